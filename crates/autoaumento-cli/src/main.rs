//! Autoaumento CLI - Command-line interface for the synthetic-data pipeline.

use autoaumento_cli::commands;
use autoaumento_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> autoaumento_cli::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // RUST_LOG wins, then -v, then the configured level; stdout stays for results
    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Generate(args) => commands::execute_generate(args, &config, &formatter).await?,
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await?,
        Command::Verify(args) => commands::execute_verify(args, &config, &formatter).await?,
        Command::Run(args) => commands::execute_run(args, &config, &formatter).await?,
        Command::Setup(args) => commands::execute_setup(args, &config, &formatter).await?,
    }

    Ok(())
}
