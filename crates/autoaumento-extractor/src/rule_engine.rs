//! Per-rule matching: scope selection, Regex/Keyword scanning, fallback and
//! multiple-match resolution

use crate::error::ExtractorError;
use autoaumento_domain::{
    ExtractionMode, ExtractionRule, ExtractionScope, FallbackStrategy, MultipleStrategy,
};
use regex::Regex;
use tracing::debug;

/// Compiled form of the rule's primary pattern
#[derive(Debug, Clone)]
enum Matcher {
    Regex(Regex),
    Keyword { start: String, end: Option<String> },
}

/// An extraction rule ready to run
///
/// Regex patterns are compiled once, when the rule is prepared.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    label: String,
    scope: ExtractionScope,
    fallback: FallbackStrategy,
    multiple: MultipleStrategy,
    matcher: Matcher,
}

impl CompiledRule {
    /// Prepare `rule`, compiling its pattern in Regex mode
    pub(crate) fn compile(rule: &ExtractionRule) -> Result<Self, ExtractorError> {
        let matcher = match rule.mode {
            ExtractionMode::Regex => {
                let regex =
                    Regex::new(&rule.pattern).map_err(|source| ExtractorError::InvalidPattern {
                        label: rule.label.clone(),
                        source,
                    })?;
                Matcher::Regex(regex)
            }
            ExtractionMode::Keyword => Matcher::Keyword {
                start: rule.pattern.clone(),
                end: rule.end_token().map(str::to_string),
            },
        };

        Ok(Self {
            label: rule.label.clone(),
            scope: rule.scope,
            fallback: rule.fallback.clone(),
            multiple: rule.multiple,
            matcher,
        })
    }

    /// Label the rule's values are stored under
    pub(crate) fn label(&self) -> &str {
        &self.label
    }

    /// Raw matches over every scanned unit, in order
    pub(crate) fn raw_matches(&self, text: &str) -> Vec<String> {
        match self.scope {
            ExtractionScope::AllText => self.scan(text),
            ExtractionScope::LineByLine => text.lines().flat_map(|line| self.scan(line)).collect(),
        }
    }

    /// Final value list: raw matches after fallback and multiple-match resolution
    pub(crate) fn apply(&self, text: &str) -> Result<Vec<String>, ExtractorError> {
        let mut values = self.raw_matches(text);

        if values.is_empty() {
            values = match &self.fallback {
                FallbackStrategy::Error => {
                    return Err(ExtractorError::NoMatch {
                        label: self.label.clone(),
                    })
                }
                FallbackStrategy::Empty => vec![String::new()],
                FallbackStrategy::Custom(value) => vec![value.clone()],
            };
            debug!("Rule '{}' found nothing, using fallback", self.label);
        }

        if self.multiple == MultipleStrategy::First {
            values.truncate(1);
        }

        Ok(values)
    }

    fn scan(&self, unit: &str) -> Vec<String> {
        match &self.matcher {
            Matcher::Regex(regex) => scan_regex(regex, unit),
            Matcher::Keyword { start, end } => scan_keyword(unit, start, end.as_deref()),
        }
    }
}

/// Every non-overlapping match, as the first capture group when the pattern has one
fn scan_regex(regex: &Regex, unit: &str) -> Vec<String> {
    if regex.captures_len() > 1 {
        regex
            .captures_iter(unit)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()).to_string())
            .collect()
    } else {
        regex
            .find_iter(unit)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Windows delimited by literal `start` and `end` tokens
///
/// An empty `start` opens a single window at the beginning of the unit.
/// A configured `end` that never appears stops scanning.
fn scan_keyword(unit: &str, start: &str, end: Option<&str>) -> Vec<String> {
    let mut matches = Vec::new();
    let mut cursor = 0;

    while cursor <= unit.len() {
        let window_start = if start.is_empty() {
            cursor
        } else {
            match unit[cursor..].find(start) {
                Some(offset) => cursor + offset + start.len(),
                None => break,
            }
        };

        let (window_end, next_cursor) = match end {
            Some(end) => match unit[window_start..].find(end) {
                Some(offset) => {
                    let window_end = window_start + offset;
                    (window_end, window_end + end.len())
                }
                None => break,
            },
            None => (unit.len(), unit.len()),
        };

        let value = unit[window_start..window_end].trim();
        if !value.is_empty() {
            matches.push(value.to_string());
        }

        if start.is_empty() || end.is_none() {
            break;
        }
        cursor = next_cursor;
    }

    matches
}
