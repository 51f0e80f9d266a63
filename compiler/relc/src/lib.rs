//! Release-protocol generator driver.
//!
//! Loads class models produced by a front-end, runs every class through
//! [`rel_codegen`], and reports diagnostics. The `relc` binary is a thin
//! argument parser over [`commands`].

use std::sync::Once;

pub mod commands;
mod error;
pub mod input;
pub mod pipeline;

pub use error::DriverError;

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set, e.g. `RUST_LOG=rel_codegen=debug`.
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}
