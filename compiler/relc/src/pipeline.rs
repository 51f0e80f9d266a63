//! Runs every class through the generator.
//!
//! Classes are independent, so they may run on a rayon pool. Results come
//! back in input order either way, and a panic while generating one class
//! becomes an internal error for that class only.

use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;
use rel_codegen::{ClassOutcome, CodegenProblem, GeneratorConfig};
use rel_ir::ClassModel;

/// Generate every class. The result has one outcome per model, in order.
pub fn run_classes(
    models: &[ClassModel],
    config: &GeneratorConfig,
    parallel: bool,
) -> Vec<ClassOutcome> {
    if !parallel || models.len() < 2 {
        return models.iter().map(|model| run_class(model, config)).collect();
    }

    // A scoped pool is torn down before returning, so no worker threads
    // outlive the run.
    rayon::ThreadPoolBuilder::new()
        .build_scoped(rayon::ThreadBuilder::run, |pool| {
            pool.install(|| {
                models
                    .par_iter()
                    .map(|model| run_class(model, config))
                    .collect::<Vec<_>>()
            })
        })
        .unwrap_or_else(|e| {
            tracing::warn!("failed to create thread pool ({e}), running sequentially");
            models.iter().map(|model| run_class(model, config)).collect()
        })
}

/// Generate one class, turning a panic into [`CodegenProblem::Internal`].
pub fn run_class(model: &ClassModel, config: &GeneratorConfig) -> ClassOutcome {
    match panic::catch_unwind(AssertUnwindSafe(|| rel_codegen::generate(model, config))) {
        Ok(outcome) => outcome,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "generator panicked".to_string());
            tracing::error!(class = %model.qualified_name(), %message, "generator panicked");
            ClassOutcome::Failed(vec![CodegenProblem::Internal {
                class: model.qualified_name(),
                message,
            }])
        }
    }
}
