//! Autoaumento Domain Layer
//!
//! This crate contains the data model of the extraction-and-decision engine
//! used by the synthetic-data-augmentation pipeline. It performs no I/O and
//! defines the value objects, configuration invariants, and port traits that
//! all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Extraction Rule**: how one labelled field is pulled out of generated text
//! - **Entry**: one ordered label → value map produced by an extraction run
//! - **Verification Method**: one pass/fail check (embedding or consensus)
//! - **Verification Process**: an ordered chain of methods plus disposition thresholds
//! - **Verification Outcome**: the immutable result of running a process over entries
//!
//! ## Architecture
//!
//! - Configuration objects validate their invariants at construction
//! - Generation and similarity backends are reached only through [`traits`]
//! - Infrastructure implementations live in other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod error;
pub mod method;
pub mod outcome;
pub mod process;
pub mod rule;
pub mod template;
pub mod traits;

// Re-exports for convenience
pub use entry::Entry;
pub use error::ConfigurationError;
pub use method::{
    ConsensusSettings, EmbeddingSettings, MethodMode, MethodSettings, MethodType,
    VerificationMethod,
};
pub use outcome::{FinalStatus, VerificationOutcome};
pub use process::VerificationProcess;
pub use rule::{
    ExtractionConfiguration, ExtractionMode, ExtractionRule, ExtractionScope, FallbackStrategy,
    MultipleStrategy,
};
