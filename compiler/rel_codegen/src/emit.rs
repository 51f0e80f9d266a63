//! C# emission.
//!
//! Serializes a synthesized [`Protocol`] into the second half of a partial
//! class. Output depends only on its inputs, so identical models produce
//! byte-identical units.

mod writer;

use crate::config::{GeneratorConfig, Vocabulary};
use crate::plan::GenerationPlan;
use crate::synth::{Dispatch, ExplicitArg, OpKind, Operation, Protocol, Stmt};

pub(crate) use writer::SourceWriter;

/// Emit the generated source unit for one class.
#[tracing::instrument(level = "debug", skip_all, fields(class = %plan.class_name))]
pub fn emit_class(plan: &GenerationPlan, protocol: &Protocol, config: &GeneratorConfig) -> String {
    let mut emitter = CSharpEmitter {
        w: SourceWriter::new(config.indent_size),
        v: &config.vocabulary,
        docs: config.emit_doc_comments,
        plan,
    };
    emitter.unit(protocol);
    let source = emitter.w.take_output();
    tracing::debug!(bytes = source.len(), "class emitted");
    source
}

struct CSharpEmitter<'a> {
    w: SourceWriter,
    v: &'a Vocabulary,
    docs: bool,
    plan: &'a GenerationPlan,
}

impl CSharpEmitter<'_> {
    fn unit(&mut self, protocol: &Protocol) {
        self.w.writeln("// <auto-generated/>");
        self.w.writeln("using System;");
        if protocol.has_async_operations() {
            self.w.writeln("using System.Threading.Tasks;");
        }
        self.w.newline();

        match &self.plan.namespace {
            Some(namespace) => {
                self.w.writeln(&format!("namespace {namespace}"));
                self.w.open_block();
                self.class(protocol);
                self.w.close_block();
            }
            None => self.class(protocol),
        }
    }

    fn class(&mut self, protocol: &Protocol) {
        let plan = self.plan;
        let sealed = if plan.is_sealed { "sealed " } else { "" };
        let mut interfaces = self.v.sync_interface.clone();
        if plan.needs_async_surface {
            interfaces.push_str(", ");
            interfaces.push_str(&self.v.async_interface);
        }
        self.w.writeln(&format!(
            "{} {sealed}partial class {} : {interfaces}",
            plan.accessibility, plan.class_name
        ));
        self.w.open_block();

        self.doc(&["Set once this instance has been released; later release calls do nothing."]);
        self.w.writeln(&format!("private bool {};", plan.guard_field));

        for op in &protocol.operations {
            self.w.newline();
            self.operation(op);
        }

        self.w.close_block();
    }

    fn doc(&mut self, summary: &[&str]) {
        if !self.docs {
            return;
        }
        self.w.writeln("/// <summary>");
        for line in summary {
            self.w.writeln(&format!("/// {line}"));
        }
        self.w.writeln("/// </summary>");
    }

    fn operation_docs(&mut self, op: &Operation) {
        if !self.docs {
            return;
        }
        if op.dispatch == Dispatch::ProtectedOverride {
            self.w.writeln("/// <inheritdoc/>");
            return;
        }
        match op.kind {
            OpKind::SyncEntry => self.doc(&["Releases the resources owned by this instance."]),
            OpKind::SyncHook => {
                self.doc(&[
                    "Releases the resources owned by this instance.",
                    "Derived classes extend release by overriding this method.",
                ]);
                self.w.writeln(&format!(
                    "/// <param name=\"{}\">`true` when called explicitly, `false` when called from the finalizer.</param>",
                    self.v.explicit_param
                ));
            }
            OpKind::AsyncEntry => {
                self.doc(&["Asynchronously releases the resources owned by this instance."]);
                self.w.writeln("/// <returns>A task that completes when release has finished.</returns>");
            }
            OpKind::AsyncCore => {
                self.doc(&[
                    "Asynchronously releases managed resources.",
                    "Derived classes extend async release by overriding this method.",
                ]);
                self.w.writeln("/// <returns>A task that completes when release has finished.</returns>");
            }
            OpKind::Finalizer => self.doc(&[
                "Releases unmanaged resources if this instance was never released explicitly.",
            ]),
        }
    }

    fn signature(&self, op: &Operation) -> String {
        let v = self.v;
        let modifier = match op.dispatch {
            Dispatch::PublicEntry => "public",
            Dispatch::ProtectedVirtual => "protected virtual",
            Dispatch::ProtectedOverride => "protected override",
            Dispatch::Finalizer => return format!("~{}()", self.plan.class_name),
        };
        match op.kind {
            OpKind::SyncEntry => format!("{modifier} void {}()", v.sync_method),
            OpKind::SyncHook => {
                format!("{modifier} void {}(bool {})", v.sync_method, v.explicit_param)
            }
            OpKind::AsyncEntry => format!("{modifier} async {} {}()", v.awaitable, v.async_method),
            OpKind::AsyncCore => {
                format!("{modifier} async {} {}()", v.awaitable, v.async_core_method)
            }
            OpKind::Finalizer => format!("~{}()", self.plan.class_name),
        }
    }

    fn operation(&mut self, op: &Operation) {
        self.operation_docs(op);
        let signature = self.signature(op);
        self.w.writeln(&signature);
        self.w.open_block();
        self.statements(&op.body);
        self.w.close_block();
    }

    fn statements(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.statement(stmt);
        }
    }

    fn statement(&mut self, stmt: &Stmt) {
        let v = self.v;
        match stmt {
            Stmt::ReturnIfReleased => {
                self.w.writeln(&format!("if (this.{})", self.plan.guard_field));
                self.w.open_block();
                self.w.writeln("return;");
                self.w.close_block();
            }
            Stmt::ReleaseMember(name) => self.release_sync(name),
            Stmt::ReleaseMemberAsync(name) => {
                let local = format!("asyncDisposable_{}", name.trim_start_matches('@'));
                self.w.writeln(&format!(
                    "if (this.{name} is {} {local})",
                    v.async_interface
                ));
                self.w.open_block();
                self.w.writeln(&format!(
                    "await {local}.{}().ConfigureAwait(false);",
                    v.async_method
                ));
                self.w.close_block();
                self.w.writeln("else");
                self.w.open_block();
                self.release_sync(name);
                self.w.close_block();
            }
            Stmt::CallHook(name) => self.w.writeln(&format!("this.{name}();")),
            Stmt::AwaitHook(name) => {
                self.w.writeln(&format!("await this.{name}().ConfigureAwait(false);"));
            }
            Stmt::ClearMember(name) => self.w.writeln(&format!("this.{name} = null;")),
            Stmt::MarkReleased => {
                self.w.writeln(&format!("this.{} = true;", self.plan.guard_field));
            }
            Stmt::CallReleaseHook { explicit } => {
                self.w.writeln(&format!("this.{}({explicit});", v.sync_method));
            }
            Stmt::AwaitAsyncCore => self.w.writeln(&format!(
                "await this.{}().ConfigureAwait(false);",
                v.async_core_method
            )),
            Stmt::SuppressFinalizer => self.w.writeln(&format!("{};", v.suppress_finalizer)),
            Stmt::CallBaseReleaseHook { explicit } => {
                let arg = match explicit {
                    ExplicitArg::Literal(value) => value.to_string(),
                    ExplicitArg::PassThrough => v.explicit_param.clone(),
                };
                self.w.writeln(&format!("base.{}({arg});", v.sync_method));
            }
            Stmt::AwaitBaseAsyncCore => self.w.writeln(&format!(
                "await base.{}().ConfigureAwait(false);",
                v.async_core_method
            )),
            Stmt::IfExplicit(body) => {
                self.w.writeln(&format!("if ({})", v.explicit_param));
                self.w.open_block();
                self.statements(body);
                self.w.close_block();
            }
        }
    }

    fn release_sync(&mut self, name: &str) {
        self.w.writeln(&format!(
            "(this.{name} as {})?.{}();",
            self.v.sync_interface, self.v.sync_method
        ));
    }
}
