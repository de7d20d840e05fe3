//! Handlers behind the `threadlogic` binary's subcommands.

pub mod catalog;
pub mod check;
pub mod keychain;

pub use catalog::{show_fabrics, show_templates};
pub use check::{run_check, run_matrix, CheckOptions, TechPackSource};
pub use keychain::{clear_key, key_status, store_key};
