//! Protocol synthesis.
//!
//! Lowers a [`GenerationPlan`] into a language-neutral [`Protocol`]: the
//! ordered operations a class exposes and the ordered statements of each.
//! Chaining to the base class is an explicit statement, never implied by
//! dispatch, so the emitted call order can be read straight off the IR.

use crate::plan::{AsyncCoreBaseStep, GenerationPlan};

/// Which release operation an [`Operation`] implements.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Public synchronous release.
    SyncEntry,
    /// Overridable `release(explicit)` hook.
    SyncHook,
    /// Public asynchronous release.
    AsyncEntry,
    /// Overridable asynchronous core.
    AsyncCore,
    /// Runtime-invoked fallback.
    Finalizer,
}

impl OpKind {
    pub fn is_async(self) -> bool {
        matches!(self, OpKind::AsyncEntry | OpKind::AsyncCore)
    }
}

/// How an operation is declared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dispatch {
    PublicEntry,
    ProtectedVirtual,
    ProtectedOverride,
    Finalizer,
}

/// Argument passed for the `explicit` parameter of a release hook call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExplicitArg {
    Literal(bool),
    /// Forward the caller's own `explicit` parameter.
    PassThrough,
}

/// One step of a release operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stmt {
    /// Return immediately if the guard flag is set.
    ReturnIfReleased,
    /// Synchronously release a member. Null values and values that do not
    /// implement the sync interface are skipped.
    ReleaseMember(String),
    /// Await the member's async release if its runtime value has one,
    /// otherwise release it synchronously.
    ReleaseMemberAsync(String),
    CallHook(String),
    AwaitHook(String),
    /// Reset the member reference to null.
    ClearMember(String),
    /// Set the guard flag.
    MarkReleased,
    /// Call this class's own (virtual) release hook.
    CallReleaseHook { explicit: bool },
    /// Await this class's own (virtual) async core.
    AwaitAsyncCore,
    SuppressFinalizer,
    CallBaseReleaseHook { explicit: ExplicitArg },
    AwaitBaseAsyncCore,
    /// Run the body only when the hook was called explicitly.
    IfExplicit(Vec<Stmt>),
}

/// A synthesized operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Operation {
    pub kind: OpKind,
    pub dispatch: Dispatch,
    pub body: Vec<Stmt>,
}

/// Every operation one class exposes, in emission order: sync entry, sync
/// hook, async entry, async core, finalizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Protocol {
    pub operations: Vec<Operation>,
}

impl Protocol {
    /// The operation of the given kind, if the class has one.
    pub fn operation(&self, kind: OpKind) -> Option<&Operation> {
        self.operations.iter().find(|op| op.kind == kind)
    }

    pub fn has_async_operations(&self) -> bool {
        self.operations.iter().any(|op| op.kind.is_async())
    }
}

/// Synthesize the protocol for one planned class.
#[tracing::instrument(level = "debug", skip_all, fields(class = %plan.class_name))]
pub fn synthesize(plan: &GenerationPlan) -> Protocol {
    let mut operations = Vec::with_capacity(5);

    if plan.emit_own_sync_entry_point {
        operations.push(sync_entry(plan));
    }
    if plan.emit_extensible_sync_hook {
        operations.push(sync_hook(plan));
    }
    if plan.needs_async_surface {
        if plan.emit_own_async_entry_point {
            operations.push(async_entry(plan));
        }
        if plan.emit_extensible_async_core {
            operations.push(async_core(plan));
        }
    }
    if plan.needs_finalizer {
        operations.push(finalizer(plan));
    }

    tracing::debug!(
        operations = ?operations.iter().map(|op| op.kind).collect::<Vec<_>>(),
        "protocol synthesized"
    );
    Protocol { operations }
}

fn release_members(plan: &GenerationPlan) -> impl Iterator<Item = Stmt> + '_ {
    plan.member_names()
        .map(|name| Stmt::ReleaseMember(name.to_string()))
}

fn release_members_async(plan: &GenerationPlan) -> impl Iterator<Item = Stmt> + '_ {
    plan.member_names()
        .map(|name| Stmt::ReleaseMemberAsync(name.to_string()))
}

fn clear_members(plan: &GenerationPlan) -> impl Iterator<Item = Stmt> + '_ {
    plan.clearable_names()
        .map(|name| Stmt::ClearMember(name.to_string()))
}

fn call_hooks(hooks: &[String]) -> impl Iterator<Item = Stmt> + '_ {
    hooks.iter().map(|name| Stmt::CallHook(name.clone()))
}

fn await_hooks(hooks: &[String]) -> impl Iterator<Item = Stmt> + '_ {
    hooks.iter().map(|name| Stmt::AwaitHook(name.clone()))
}

fn sync_entry(plan: &GenerationPlan) -> Operation {
    let body = if plan.is_sealed {
        let mut body = vec![Stmt::ReturnIfReleased];
        body.extend(release_members(plan));
        body.extend(call_hooks(&plan.sync_hooks));
        body.extend(call_hooks(&plan.finalize_hooks));
        body.extend(clear_members(plan));
        body.push(Stmt::MarkReleased);
        body
    } else {
        vec![
            Stmt::CallReleaseHook { explicit: true },
            Stmt::SuppressFinalizer,
        ]
    };

    Operation {
        kind: OpKind::SyncEntry,
        dispatch: Dispatch::PublicEntry,
        body,
    }
}

fn sync_hook(plan: &GenerationPlan) -> Operation {
    let mut explicit_only: Vec<Stmt> = release_members(plan).collect();
    explicit_only.extend(call_hooks(&plan.sync_hooks));

    let mut body = vec![Stmt::ReturnIfReleased];
    if !explicit_only.is_empty() {
        body.push(Stmt::IfExplicit(explicit_only));
    }
    body.extend(call_hooks(&plan.finalize_hooks));
    body.extend(clear_members(plan));
    body.push(Stmt::MarkReleased);
    if plan.sync_hook_overrides_base {
        body.push(Stmt::CallBaseReleaseHook {
            explicit: ExplicitArg::PassThrough,
        });
    }

    Operation {
        kind: OpKind::SyncHook,
        dispatch: if plan.sync_hook_overrides_base {
            Dispatch::ProtectedOverride
        } else {
            Dispatch::ProtectedVirtual
        },
        body,
    }
}

fn async_entry(plan: &GenerationPlan) -> Operation {
    let body = if plan.is_sealed {
        let mut body = vec![Stmt::ReturnIfReleased];
        body.extend(release_members_async(plan));
        body.extend(await_hooks(&plan.async_hooks));
        body.extend(call_hooks(&plan.sync_hooks));
        body.extend(call_hooks(&plan.finalize_hooks));
        body.extend(clear_members(plan));
        body.push(Stmt::MarkReleased);
        body
    } else {
        vec![
            Stmt::AwaitAsyncCore,
            Stmt::CallReleaseHook { explicit: false },
            Stmt::SuppressFinalizer,
        ]
    };

    Operation {
        kind: OpKind::AsyncEntry,
        dispatch: Dispatch::PublicEntry,
        body,
    }
}

fn async_core(plan: &GenerationPlan) -> Operation {
    let mut body = vec![Stmt::ReturnIfReleased];
    body.extend(release_members_async(plan));
    body.extend(await_hooks(&plan.async_hooks));
    body.extend(call_hooks(&plan.sync_hooks));
    body.extend(clear_members(plan));
    match plan.async_core_base_step {
        AsyncCoreBaseStep::AwaitBaseAsyncCore => body.push(Stmt::AwaitBaseAsyncCore),
        AsyncCoreBaseStep::CallBaseSyncHook => body.push(Stmt::CallBaseReleaseHook {
            explicit: ExplicitArg::Literal(true),
        }),
        AsyncCoreBaseStep::None => {}
    }

    Operation {
        kind: OpKind::AsyncCore,
        dispatch: if plan.async_core_overrides_base {
            Dispatch::ProtectedOverride
        } else {
            Dispatch::ProtectedVirtual
        },
        body,
    }
}

fn finalizer(plan: &GenerationPlan) -> Operation {
    let body = if plan.is_sealed {
        let mut body = vec![Stmt::ReturnIfReleased];
        body.extend(call_hooks(&plan.finalize_hooks));
        body.push(Stmt::MarkReleased);
        body
    } else {
        vec![Stmt::CallReleaseHook { explicit: false }]
    };

    Operation {
        kind: OpKind::Finalizer,
        dispatch: Dispatch::Finalizer,
        body,
    }
}
