//! Generate command implementation.

use crate::backend;
use crate::cli::GenerateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::schema;
use autoaumento_synthesizer::{GenerationRequest, Synthesizer};

/// Execute the generate command.
pub async fn execute_generate(
    args: GenerateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let request: GenerationRequest = schema::load(&args.request)?;
    let synthesizer = Synthesizer::new(backend::generator(
        &config.backend,
        args.model.as_deref(),
    ));

    let responses = synthesizer.generate(&request).await?;
    println!("{}", formatter.responses(&responses)?);

    Ok(())
}
