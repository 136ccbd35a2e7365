//! Autoaumento Storage Layer
//!
//! Persists named setups (reusable bundles of generation, extraction and
//! verification settings) as JSON documents in a directory.
//!
//! # Examples
//!
//! ```no_run
//! use autoaumento_store::FileSetupRepository;
//! use serde_json::json;
//!
//! let repo = FileSetupRepository::new("setups").unwrap();
//! repo.save("quiz", &json!({ "model_name": "llama3.2" })).unwrap();
//! assert_eq!(repo.list().unwrap(), vec!["quiz"]);
//! ```

#![warn(missing_docs)]

mod setups;

pub use setups::FileSetupRepository;

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be (de)serialized
    #[error("Invalid data: {0}")]
    InvalidData(#[from] serde_json::Error),

    /// Setup name is empty or would escape the setups directory
    #[error("Invalid setup name: '{0}'")]
    InvalidName(String),
}
