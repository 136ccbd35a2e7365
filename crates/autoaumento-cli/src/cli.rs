//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Autoaumento CLI - Generate, extract and verify synthetic training data.
#[derive(Debug, Parser)]
#[command(name = "autoaumento")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "AUTOAUMENTO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate candidate texts from a request
    Generate(GenerateArgs),

    /// Extract entries from a text
    Extract(ExtractArgs),

    /// Verify entries against a verification process
    Verify(VerifyArgs),

    /// Generate, extract and verify in one run
    Run(RunArgs),

    /// Manage named setups
    Setup(SetupArgs),
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Generation request file (.json or .toml)
    #[arg(short, long)]
    pub request: PathBuf,

    /// Generation model, overriding the configured one
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Extraction rules file (.json or .toml)
    #[arg(short, long)]
    pub rules: PathBuf,

    /// Text file to extract from
    #[arg(short, long, conflicts_with = "stdin")]
    pub text: Option<PathBuf>,

    /// Read the text from stdin
    #[arg(long)]
    pub stdin: bool,
}

/// Arguments for the verify command.
#[derive(Debug, Parser)]
pub struct VerifyArgs {
    /// Verification process file (.json or .toml)
    #[arg(short, long)]
    pub process: PathBuf,

    /// Entries file (.json or .toml)
    #[arg(short, long)]
    pub entries: PathBuf,

    /// Generation model used by consensus methods
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Saved setup to run
    #[arg(short, long, conflicts_with_all = ["request", "extraction", "process"])]
    pub setup: Option<String>,

    /// Generation request file
    #[arg(long, required_unless_present = "setup")]
    pub request: Option<PathBuf>,

    /// Extraction rules file
    #[arg(long, required_unless_present = "setup")]
    pub extraction: Option<PathBuf>,

    /// Verification process file
    #[arg(long, required_unless_present = "setup")]
    pub process: Option<PathBuf>,

    /// Generation model, overriding the setup and the configuration
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for setup management.
#[derive(Debug, Parser)]
pub struct SetupArgs {
    #[command(subcommand)]
    pub action: SetupAction,
}

/// Setup management actions.
#[derive(Debug, Subcommand)]
pub enum SetupAction {
    /// List saved setups
    List,

    /// Show a saved setup
    Show {
        /// Setup name
        name: String,
    },

    /// Validate a setup file and save it under a name
    Save {
        /// Setup name
        name: String,
        /// Setup file (.json or .toml)
        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a saved setup
    Delete {
        /// Setup name
        name: String,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}
