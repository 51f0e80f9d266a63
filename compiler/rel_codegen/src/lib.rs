//! Release-protocol generation.
//!
//! Takes one [`ClassModel`] at a time through four passes:
//!
//! 1. **Classify** ([`classify`]): which members take part in cascading release
//! 2. **Plan** ([`plan`]): which operations the class exposes, and how they
//!    chain to the base class
//! 3. **Synthesize** ([`synth`]): ordered, language-neutral statements per
//!    operation
//! 4. **Emit** ([`emit`]): C# source for the generated half of the partial class
//!
//! Each class is independent of every other; [`generate`] is a pure function
//! of the model and the configuration, so callers may run classes in parallel.

pub mod classify;
mod config;
pub mod emit;
pub mod markers;
pub mod plan;
mod problem;
pub mod synth;
pub mod validate;

#[cfg(test)]
mod test_helpers;

pub use config::{GeneratorConfig, Vocabulary};
pub use plan::GenerationPlan;
pub use problem::{CodegenProblem, IdentifierRole};

use rel_ir::ClassModel;

/// One generated source unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedUnit {
    /// Qualified name of the class it was generated for.
    pub class: String,
    pub hint_name: String,
    pub source: String,
    /// Non-fatal problems found while generating.
    pub warnings: Vec<CodegenProblem>,
}

/// A planned class, ready for synthesis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Planned {
    pub plan: GenerationPlan,
    pub warnings: Vec<CodegenProblem>,
}

/// Result of generating one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassOutcome {
    Generated(GeneratedUnit),
    /// The class declares no release capability and is not a candidate.
    Skipped,
    /// At least one error; carries warnings too.
    Failed(Vec<CodegenProblem>),
}

/// Validate, classify, and plan one class.
///
/// `Ok(None)` means the class is not a candidate. On failure every problem
/// found in any pass is returned, warnings included.
pub fn plan_class(
    model: &ClassModel,
    config: &GeneratorConfig,
) -> Result<Option<Planned>, Vec<CodegenProblem>> {
    if !model.declares_release() {
        tracing::debug!(class = %model.name, "no release capability declared, skipping");
        return Ok(None);
    }

    let mut problems = validate::validate_model(model);
    let classification = classify::classify(model, config);
    problems.extend(classification.problems.iter().cloned());

    match plan::plan(model, &classification, config) {
        Ok(plan) if !problems.iter().any(CodegenProblem::is_error) => Ok(Some(Planned {
            plan,
            warnings: problems,
        })),
        Ok(_) => Err(problems),
        Err(model_errors) => {
            problems.extend(model_errors);
            Err(problems)
        }
    }
}

/// Generate the source unit for one class.
pub fn generate(model: &ClassModel, config: &GeneratorConfig) -> ClassOutcome {
    let _span = tracing::debug_span!("generate", class = %model.qualified_name()).entered();

    match plan_class(model, config) {
        Ok(Some(Planned { plan, warnings })) => {
            let protocol = synth::synthesize(&plan);
            let source = emit::emit_class(&plan, &protocol, config);
            ClassOutcome::Generated(GeneratedUnit {
                class: plan.qualified_name(),
                hint_name: plan.hint_name(),
                source,
                warnings,
            })
        }
        Ok(None) => ClassOutcome::Skipped,
        Err(problems) => {
            tracing::debug!(problems = problems.len(), "class failed");
            ClassOutcome::Failed(problems)
        }
    }
}
