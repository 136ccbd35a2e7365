//! Verification outcome and final disposition

use crate::Entry;
use std::fmt;

/// Final disposition of a verification run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinalStatus {
    /// Enough acumulativo methods passed
    Confirmed,
    /// Some acumulativo methods passed; a human should look
    NeedsReview,
    /// An eliminatorio method failed or too few methods passed
    Discarded,
}

impl FinalStatus {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalStatus::Confirmed => "confirmed",
            FinalStatus::NeedsReview => "needs_review",
            FinalStatus::Discarded => "discarded",
        }
    }

    /// Parse a status name, accepting the Spanish labels used by earlier tooling
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "confirmed" | "confirmada" => Some(FinalStatus::Confirmed),
            "needs_review" | "needs review" | "a revisar" => Some(FinalStatus::NeedsReview),
            "discarded" | "descartada" => Some(FinalStatus::Discarded),
            _ => None,
        }
    }
}

impl fmt::Display for FinalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running a verification process over one candidate's entries
///
/// Built once at the end of an evaluation pass and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationOutcome {
    entries: Vec<Entry>,
    methods_passed: Vec<String>,
    methods_failed: Vec<String>,
    final_status: FinalStatus,
}

impl VerificationOutcome {
    /// Assemble a finished outcome
    pub fn new(
        entries: Vec<Entry>,
        methods_passed: Vec<String>,
        methods_failed: Vec<String>,
        final_status: FinalStatus,
    ) -> Self {
        Self {
            entries,
            methods_passed,
            methods_failed,
            final_status,
        }
    }

    /// Entries that were verified
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Names of methods that passed, in evaluation order
    pub fn methods_passed(&self) -> &[String] {
        &self.methods_passed
    }

    /// Names of methods that failed, in evaluation order
    pub fn methods_failed(&self) -> &[String] {
        &self.methods_failed
    }

    /// Final disposition
    pub fn final_status(&self) -> FinalStatus {
        self.final_status
    }

    /// Number of methods that were actually evaluated
    pub fn methods_evaluated(&self) -> usize {
        self.methods_passed.len() + self.methods_failed.len()
    }

    /// Take the entries back out of the outcome
    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}
