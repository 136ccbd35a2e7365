//! Verify command implementation.

use crate::backend;
use crate::cli::VerifyArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::schema::{self, EntriesFile, ProcessDefinition};
use autoaumento_verifier::Verifier;

/// Execute the verify command.
pub async fn execute_verify(args: VerifyArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let process = schema::load::<ProcessDefinition>(&args.process)?.to_process()?;
    let entries = schema::load::<EntriesFile>(&args.entries)?.into_entries();
    if entries.is_empty() {
        return Err(CliError::InvalidInput("No entries provided".to_string()));
    }

    let verifier = Verifier::with_config(
        backend::generator(&config.backend, args.model.as_deref()),
        backend::scorer(&config.backend),
        config.verification.clone(),
    )?;

    let outcome = verifier.verify(entries, &process).await?;
    println!("{}", formatter.outcome(&outcome)?);

    Ok(())
}
