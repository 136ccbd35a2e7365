//! Autoaumento Synthesizer
//!
//! Application layer of the synthetic-data pipeline.
//!
//! # Architecture
//!
//! ```text
//! GenerationRequest → Synthesizer → texts → Extractor → entries → Verifier → PipelineReport
//! ```
//!
//! - [`Synthesizer`] renders prompt templates from reference data and calls the
//!   generation port `num_executions` times.
//! - [`Pipeline`] chains generation, extraction and batch verification, keeping
//!   per-candidate failures isolated in the report.

#![warn(missing_docs)]

mod error;
mod generation;
mod pipeline;

pub use error::SynthesizerError;
pub use generation::{GenerationRequest, Synthesizer};
pub use pipeline::{CandidateReport, CandidateStatus, Pipeline, PipelineReport};
