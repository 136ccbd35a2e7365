//! Autoaumento CLI library.
//!
//! This library provides the core functionality for the `autoaumento`
//! command-line interface: configuration management, backend selection,
//! the input document schema, command execution and output formatting.

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod schema;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
