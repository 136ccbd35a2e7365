//! Setup command implementation.

use crate::cli::{SetupAction, SetupArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::schema::{self, SetupDefinition};
use autoaumento_store::FileSetupRepository;

/// Execute the setup command.
pub async fn execute_setup(args: SetupArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let repository = open_repository(config)?;

    match args.action {
        SetupAction::List => {
            println!("{}", formatter.setups(&repository.list()?)?);
        }
        SetupAction::Show { name } => {
            let setup = load_setup(&repository, &name)?;
            println!("{}", formatter.document(&setup)?);
        }
        SetupAction::Save { name, file } => {
            let setup: SetupDefinition = schema::load(&file)?;
            setup.resolve()?;
            repository.save(&name, &setup)?;
            println!("{}", formatter.success(&format!("Saved setup '{}'", name)));
        }
        SetupAction::Delete { name } => {
            if repository.delete(&name)? {
                println!("{}", formatter.success(&format!("Deleted setup '{}'", name)));
            } else {
                println!(
                    "{}",
                    formatter.warning(&format!("Setup '{}' does not exist", name))
                );
            }
        }
    }

    Ok(())
}

/// Open the configured setups directory.
pub(crate) fn open_repository(config: &Config) -> Result<FileSetupRepository> {
    Ok(FileSetupRepository::new(config.setups_dir()?)?)
}

/// Load a setup, failing when it does not exist.
pub(crate) fn load_setup(repository: &FileSetupRepository, name: &str) -> Result<SetupDefinition> {
    repository
        .load(name)?
        .ok_or_else(|| CliError::SetupNotFound(name.to_string()))
}
