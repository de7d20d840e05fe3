pub mod checker;
pub mod commands;
pub mod config;
mod error;
pub mod explain;
pub mod fabric;
pub mod techpack;
pub mod workflow;

pub use checker::{validate, validate_pair, FeasibilityConfig, ValidationOutcome};
pub use config::AppConfig;
pub use error::ThreadLogicError;
pub use workflow::{ProcessStep, Workflow, WorkflowEvent, WorkflowState};

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default `info` filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
