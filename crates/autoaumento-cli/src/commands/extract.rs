//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::schema::{self, ExtractionDefinition};
use autoaumento_extractor::Extractor;
use std::fs;
use std::io::{self, Read};

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let definition: ExtractionDefinition = schema::load(&args.rules)?;
    let extractor = Extractor::with_config(&definition.to_configuration()?, config.extraction.clone())?;

    let text = if args.stdin {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else if let Some(path) = args.text {
        fs::read_to_string(path)?
    } else {
        return Err(CliError::InvalidInput(
            "Must specify either --text or --stdin".to_string(),
        ));
    };

    let entries = extractor.extract(&text)?;
    println!("{}", formatter.entries(&entries)?);

    Ok(())
}
