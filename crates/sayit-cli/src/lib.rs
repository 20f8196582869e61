#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod store;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap, init_tracing, system_prefers_dark};
pub use commands::{Commands, ConfigAction};
pub use error::CliError;
pub use parser::Cli;
