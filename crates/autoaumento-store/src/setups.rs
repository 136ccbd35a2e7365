//! File-backed setup repository

use crate::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const EXTENSION: &str = "json";

/// Stores each setup as `<directory>/<name>.json`
#[derive(Debug, Clone)]
pub struct FileSetupRepository {
    directory: PathBuf,
}

impl FileSetupRepository {
    /// Open a repository, creating the directory if needed
    pub fn new(directory: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    /// Directory the setups live in
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Write `setup` under `name`, replacing any previous version
    pub fn save<T: Serialize + ?Sized>(&self, name: &str, setup: &T) -> Result<(), StoreError> {
        let path = self.path_for(name)?;
        let json = serde_json::to_string_pretty(setup)?;
        fs::write(&path, json)?;
        info!("Saved setup '{}' to {}", name, path.display());
        Ok(())
    }

    /// Read the setup stored under `name`, `None` when there is none
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, StoreError> {
        let path = self.path_for(name)?;
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Setup '{}' not found", name);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Names of all stored setups, sorted
    pub fn list(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove the setup stored under `name`; `false` when there was none
    pub fn delete(&self, name: &str) -> Result<bool, StoreError> {
        let path = self.path_for(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted setup '{}'", name);
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, StoreError> {
        let invalid = name.trim().is_empty()
            || name.contains(['/', '\\'])
            || name.contains("..")
            || name.starts_with('.');
        if invalid {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.directory.join(format!("{}.{}", name, EXTENSION)))
    }
}
