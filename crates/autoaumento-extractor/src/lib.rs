//! Autoaumento Extractor
//!
//! Turns raw generated text into structured entries using configurable
//! extraction rules.
//!
//! # Overview
//!
//! Each rule of an [`ExtractionConfiguration`](autoaumento_domain::ExtractionConfiguration)
//! scans the text independently (Regex or Keyword mode, whole text or line by
//! line), resolves its fallback and multiple-match strategies, and yields a
//! list of values. The per-rule lists are then zipped into entries: the rule
//! with the fewest values decides how many entries come out.
//!
//! # Architecture
//!
//! ```text
//! Text → rule engine (per rule) → combiner (zip) → Vec<Entry>
//! ```
//!
//! # Example Usage
//!
//! ```
//! use autoaumento_domain::{
//!     ExtractionConfiguration, ExtractionRule, ExtractionScope, MultipleStrategy,
//! };
//! use autoaumento_extractor::Extractor;
//!
//! let config = ExtractionConfiguration::new(vec![
//!     ExtractionRule::regex("score", r"score: (\d+)")
//!         .with_scope(ExtractionScope::LineByLine)
//!         .with_multiple(MultipleStrategy::All),
//! ])
//! .unwrap();
//!
//! let extractor = Extractor::new(&config).unwrap();
//! let entries = extractor.extract("score: 10\nscore: 20").unwrap();
//!
//! assert_eq!(entries.len(), 2);
//! assert_eq!(entries[1].get("score"), Some("20"));
//! ```

#![warn(missing_docs)]

mod combiner;
mod config;
mod error;
mod extractor;
mod rule_engine;


pub use combiner::combine;
pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::{extract, Extractor};
