//! A small simulator of the target runtime.
//!
//! Runs synthesized protocols against an object whose class chain is given
//! root-first, with virtual dispatch for the release hook and async core and
//! `base.` calls resolved to the nearest ancestor. Every observable effect is
//! recorded as an [`Event`].

use rustc_hash::FxHashMap;

use rel_ir::ClassModel;

use crate::synth::{ExplicitArg, OpKind, Operation, Protocol, Stmt};
use crate::{plan_class, synth, GeneratorConfig};

/// A value held by a member slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Resource {
    pub id: String,
    pub sync: bool,
    pub async_: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Released(String),
    ReleasedAsync(String),
    Hook(String),
    AwaitedHook(String),
}

struct Level {
    class: String,
    protocol: Protocol,
    released: bool,
    slots: FxHashMap<String, Option<Resource>>,
}

impl Level {
    fn op(&self, kind: OpKind) -> Option<&Operation> {
        self.protocol.operation(kind)
    }
}

enum Flow {
    Continue,
    Return,
}

/// An instance of the most-derived class of a chain.
pub(crate) struct Instance {
    levels: Vec<Level>,
    finalizer_suppressed: bool,
    pub events: Vec<Event>,
}

impl Instance {
    /// Build an instance of `chain.last()`, generating every class with
    /// `config`. Every candidate member starts out holding a resource named
    /// `Class.member` with the member's declared capabilities.
    ///
    /// Classes without a release capability of their own contribute no
    /// operations.
    pub fn with_config(chain: &[ClassModel], config: &GeneratorConfig) -> Self {
        let levels = chain
            .iter()
            .map(|model| {
                let protocol = match plan_class(model, config) {
                    Ok(Some(planned)) => synth::synthesize(&planned.plan),
                    Ok(None) => Protocol {
                        operations: Vec::new(),
                    },
                    Err(problems) => panic!("{} failed to plan: {problems:?}", model.name),
                };
                let mut slots = FxHashMap::default();
                for member in &model.candidate_members {
                    for name in &member.names {
                        let resource = Resource {
                            id: format!("{}.{name}", model.name),
                            sync: member.declared_type_supports_sync_release,
                            async_: member.declared_type_supports_async_release,
                        };
                        slots.insert(name.clone(), Some(resource));
                    }
                }
                Level {
                    class: model.name.clone(),
                    protocol,
                    released: false,
                    slots,
                }
            })
            .collect();

        Instance {
            levels,
            finalizer_suppressed: false,
            events: Vec::new(),
        }
    }

    pub fn new(chain: &[ClassModel]) -> Self {
        Self::with_config(chain, &GeneratorConfig::default())
    }

    /// Current value of `class`'s member `name`.
    pub fn member(&self, class: &str, name: &str) -> Option<&Resource> {
        self.levels
            .iter()
            .find(|level| level.class == class)
            .and_then(|level| level.slots.get(name))
            .and_then(Option::as_ref)
    }

    /// Replace the value held by a member slot.
    pub fn set_member(&mut self, class: &str, name: &str, value: Option<Resource>) {
        if let Some(level) = self.levels.iter_mut().find(|level| level.class == class) {
            level.slots.insert(name.to_string(), value);
        }
    }

    pub fn is_finalizer_suppressed(&self) -> bool {
        self.finalizer_suppressed
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Call the public sync entry point.
    pub fn release(&mut self) {
        let level = self.find_entry(OpKind::SyncEntry);
        self.run(level, OpKind::SyncEntry, None);
    }

    /// Call the public async entry point.
    pub fn release_async(&mut self) {
        let level = self.find_entry(OpKind::AsyncEntry);
        self.run(level, OpKind::AsyncEntry, None);
    }

    /// Simulate the collector finalizing the object: every finalizer in the
    /// chain runs, most-derived first, unless finalization was suppressed.
    pub fn finalize(&mut self) {
        if self.finalizer_suppressed {
            return;
        }
        for level in (0..self.levels.len()).rev() {
            if self.levels[level].op(OpKind::Finalizer).is_some() {
                self.run(level, OpKind::Finalizer, None);
            }
        }
    }

    fn find_entry(&self, kind: OpKind) -> usize {
        let found = (0..self.levels.len())
            .rev()
            .find(|&i| self.levels[i].op(kind).is_some());
        match found {
            Some(level) => level,
            None => panic!("no class in the chain has {kind:?}"),
        }
    }

    /// Nearest level at or below `below` (exclusive) implementing `kind`.
    fn find_base(&self, below: usize, kind: OpKind) -> usize {
        match (0..below).rev().find(|&i| self.levels[i].op(kind).is_some()) {
            Some(level) => level,
            None => panic!("no base implements {kind:?}"),
        }
    }

    fn run(&mut self, level: usize, kind: OpKind, explicit: Option<bool>) {
        let body = match self.levels[level].op(kind) {
            Some(op) => op.body.clone(),
            None => panic!("{} has no {kind:?}", self.levels[level].class),
        };
        self.exec_block(level, &body, explicit);
    }

    fn exec_block(&mut self, level: usize, body: &[Stmt], explicit: Option<bool>) -> Flow {
        for stmt in body {
            if let Flow::Return = self.exec(level, stmt, explicit) {
                return Flow::Return;
            }
        }
        Flow::Continue
    }

    fn exec(&mut self, level: usize, stmt: &Stmt, explicit: Option<bool>) -> Flow {
        match stmt {
            Stmt::ReturnIfReleased => {
                if self.levels[level].released {
                    return Flow::Return;
                }
            }
            Stmt::ReleaseMember(name) => {
                if let Some(Some(res)) = self.levels[level].slots.get(name) {
                    if res.sync {
                        self.events.push(Event::Released(res.id.clone()));
                    }
                }
            }
            Stmt::ReleaseMemberAsync(name) => {
                if let Some(Some(res)) = self.levels[level].slots.get(name) {
                    if res.async_ {
                        self.events.push(Event::ReleasedAsync(res.id.clone()));
                    } else if res.sync {
                        self.events.push(Event::Released(res.id.clone()));
                    }
                }
            }
            Stmt::CallHook(name) => {
                let id = format!("{}.{name}", self.levels[level].class);
                self.events.push(Event::Hook(id));
            }
            Stmt::AwaitHook(name) => {
                let id = format!("{}.{name}", self.levels[level].class);
                self.events.push(Event::AwaitedHook(id));
            }
            Stmt::ClearMember(name) => {
                self.levels[level].slots.insert(name.clone(), None);
            }
            Stmt::MarkReleased => self.levels[level].released = true,
            Stmt::CallReleaseHook { explicit: value } => {
                let target = self.find_entry(OpKind::SyncHook);
                self.run(target, OpKind::SyncHook, Some(*value));
            }
            Stmt::AwaitAsyncCore => {
                let target = self.find_entry(OpKind::AsyncCore);
                self.run(target, OpKind::AsyncCore, None);
            }
            Stmt::SuppressFinalizer => {
                self.finalizer_suppressed = true;
            }
            Stmt::CallBaseReleaseHook { explicit: arg } => {
                let value = match arg {
                    ExplicitArg::Literal(value) => *value,
                    ExplicitArg::PassThrough => explicit.unwrap_or(false),
                };
                let target = self.find_base(level, OpKind::SyncHook);
                self.run(target, OpKind::SyncHook, Some(value));
            }
            Stmt::AwaitBaseAsyncCore => {
                let target = self.find_base(level, OpKind::AsyncCore);
                self.run(target, OpKind::AsyncCore, None);
            }
            Stmt::IfExplicit(body) => {
                if explicit == Some(true) {
                    return self.exec_block(level, body, explicit);
                }
            }
        }
        Flow::Continue
    }
}
