//! Run command implementation.

use crate::backend;
use crate::cli::RunArgs;
use crate::commands::setup::{load_setup, open_repository};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::schema::{self, ExtractionDefinition, ProcessDefinition};
use autoaumento_synthesizer::{GenerationRequest, Pipeline};
use std::path::{Path, PathBuf};
use tracing::info;

/// Execute the run command.
pub async fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let (request, extraction, process, setup_model) = match &args.setup {
        Some(name) => {
            let setup = load_setup(&open_repository(config)?, name)?;
            let (extraction, process) = setup.resolve()?;
            info!("Running setup '{}'", name);
            (setup.generation, extraction, process, setup.model_name)
        }
        None => {
            let request: GenerationRequest = schema::load(required(&args.request, "--request")?)?;
            let extraction = schema::load::<ExtractionDefinition>(required(
                &args.extraction,
                "--extraction",
            )?)?
            .to_configuration()?;
            let process =
                schema::load::<ProcessDefinition>(required(&args.process, "--process")?)?
                    .to_process()?;
            (request, extraction, process, None)
        }
    };

    let model = args.model.or(setup_model);
    let pipeline = Pipeline::with_configs(
        backend::generator(&config.backend, model.as_deref()),
        backend::scorer(&config.backend),
        config.extraction.clone(),
        config.verification.clone(),
    )?;

    let report = pipeline.run(&request, &extraction, &process).await?;
    println!("{}", formatter.report(&report)?);

    Ok(())
}

fn required<'a>(path: &'a Option<PathBuf>, flag: &str) -> Result<&'a Path> {
    path.as_deref()
        .ok_or_else(|| CliError::InvalidInput(format!("Missing {} (or use --setup)", flag)))
}
