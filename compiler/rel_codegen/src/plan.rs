//! Generation planning.
//!
//! Turns a class model and its classified members into the set of decisions
//! the synthesizer needs: which operations exist, which of them override the
//! base, and how the async core hands off to the base.

use rel_ir::{Accessibility, ClassModel, HookRole};

use crate::classify::{Classification, IncludedMember};
use crate::problem::CodegenProblem;
use crate::GeneratorConfig;

/// What the async core does after its own work.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AsyncCoreBaseStep {
    /// Await the base's async core.
    AwaitBaseAsyncCore,
    /// Call the base's sync release hook with `explicit = true`; the base
    /// has no async surface of its own.
    CallBaseSyncHook,
    /// Nothing above this class to hand off to.
    None,
}

/// Derived decisions for one class. Consumed once by the synthesizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationPlan {
    pub class_name: String,
    pub namespace: Option<String>,
    pub accessibility: Accessibility,
    pub is_sealed: bool,
    /// Private flag that makes every entry idempotent.
    pub guard_field: String,

    pub members: Vec<IncludedMember>,
    pub sync_hooks: Vec<String>,
    pub finalize_hooks: Vec<String>,
    pub async_hooks: Vec<String>,

    pub needs_async_surface: bool,
    pub needs_finalizer: bool,
    pub emit_own_sync_entry_point: bool,
    pub emit_own_async_entry_point: bool,
    pub emit_extensible_sync_hook: bool,
    pub emit_extensible_async_core: bool,
    pub sync_hook_overrides_base: bool,
    pub async_core_overrides_base: bool,
    pub async_core_base_step: AsyncCoreBaseStep,
}

impl GenerationPlan {
    /// Namespace-qualified class name.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}.{}", self.class_name),
            None => self.class_name.clone(),
        }
    }

    /// Stable name of the emitted source unit.
    pub fn hint_name(&self) -> String {
        format!("{}.g.cs", self.qualified_name())
    }

    /// Every included member name, in declaration order.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .flat_map(|m| m.names.iter().map(String::as_str))
    }

    /// Included member names whose reference is cleared after release.
    pub fn clearable_names(&self) -> impl Iterator<Item = &str> {
        self.members
            .iter()
            .filter(|m| m.assignable)
            .flat_map(|m| m.names.iter().map(String::as_str))
    }
}

fn hook_names(model: &ClassModel, role: HookRole) -> Vec<String> {
    model.hooks_with_role(role).map(|h| h.name.clone()).collect()
}

/// Derive the generation plan for `model`.
///
/// Returns every model error found; the class produces no output when any
/// is reported.
#[tracing::instrument(level = "debug", skip_all, fields(class = %model.name))]
pub fn plan(
    model: &ClassModel,
    classification: &Classification,
    config: &GeneratorConfig,
) -> Result<GenerationPlan, Vec<CodegenProblem>> {
    let class = model.qualified_name();
    let mut problems = Vec::new();

    let async_member = classification
        .included
        .iter()
        .find(|m| m.supports_async_release);
    let own_async_need = model.implements_async_release || async_member.is_some();
    // Under an async-capable base the class must override the async core,
    // or the inherited entry releases its members only via `release(false)`.
    let needs_async_surface = own_async_need || model.base_implements_async_release;

    if own_async_need && !config.async_interface_available {
        let member = if model.implements_async_release {
            None
        } else {
            async_member.map(|m| m.names.join(", "))
        };
        problems.push(CodegenProblem::AsyncUnavailable {
            class: class.clone(),
            member,
        });
    }
    if model.base_implements_async_release && !model.base_implements_sync_release {
        problems.push(CodegenProblem::BaseAsyncWithoutSync {
            class: class.clone(),
        });
    }
    if model.is_sealed && model.base_implements_sync_release {
        problems.push(CodegenProblem::SealedInheritsRelease { class });
    }
    if !problems.is_empty() {
        return Err(problems);
    }

    let async_core_base_step = if model.base_implements_async_release {
        AsyncCoreBaseStep::AwaitBaseAsyncCore
    } else if model.base_implements_sync_release {
        AsyncCoreBaseStep::CallBaseSyncHook
    } else {
        AsyncCoreBaseStep::None
    };

    let plan = GenerationPlan {
        class_name: model.name.clone(),
        namespace: model.namespace.clone(),
        accessibility: model.accessibility,
        is_sealed: model.is_sealed,
        guard_field: config.vocabulary.guard_field.clone(),
        members: classification.included.clone(),
        sync_hooks: hook_names(model, HookRole::SyncHook),
        finalize_hooks: hook_names(model, HookRole::FinalizeHook),
        async_hooks: hook_names(model, HookRole::AsyncHook),
        needs_async_surface,
        needs_finalizer: model.hooks_with_role(HookRole::FinalizeHook).next().is_some(),
        emit_own_sync_entry_point: !model.base_implements_sync_release,
        emit_own_async_entry_point: needs_async_surface && !model.base_implements_async_release,
        emit_extensible_sync_hook: !model.is_sealed,
        emit_extensible_async_core: !model.is_sealed && needs_async_surface,
        sync_hook_overrides_base: model.base_implements_sync_release,
        async_core_overrides_base: model.base_implements_async_release,
        async_core_base_step,
    };

    tracing::debug!(
        sealed = plan.is_sealed,
        needs_async = plan.needs_async_surface,
        needs_finalizer = plan.needs_finalizer,
        own_sync_entry = plan.emit_own_sync_entry_point,
        own_async_entry = plan.emit_own_async_entry_point,
        "plan derived"
    );
    Ok(plan)
}
