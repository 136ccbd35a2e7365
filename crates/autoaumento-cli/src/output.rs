//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::schema::EntryRef;
use autoaumento_domain::{Entry, FinalStatus, VerificationOutcome};
use autoaumento_synthesizer::{CandidateStatus, PipelineReport};
use colored::*;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest candidate text shown in a table cell.
const PREVIEW_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

#[derive(Serialize)]
struct EntriesView<'a> {
    entries: Vec<EntryRef<'a>>,
}

#[derive(Serialize)]
struct OutcomeView<'a> {
    final_status: &'static str,
    methods_passed: &'a [String],
    methods_failed: &'a [String],
    entries: Vec<EntryRef<'a>>,
}

impl<'a> OutcomeView<'a> {
    fn new(outcome: &'a VerificationOutcome) -> Self {
        Self {
            final_status: outcome.final_status().as_str(),
            methods_passed: outcome.methods_passed(),
            methods_failed: outcome.methods_failed(),
            entries: outcome.entries().iter().map(EntryRef).collect(),
        }
    }
}

#[derive(Serialize)]
struct CandidateView<'a> {
    index: usize,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<OutcomeView<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
struct ReportView<'a> {
    total: usize,
    confirmed: usize,
    needs_review: usize,
    discarded: usize,
    failed: usize,
    candidates: Vec<CandidateView<'a>>,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format generated responses.
    pub fn responses(&self, responses: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(responses)?),
            OutputFormat::Table => {
                if responses.is_empty() {
                    return Ok(self.colorize("No responses generated.", Color::Yellow));
                }
                let mut builder = Builder::default();
                builder.push_record(["#", "Response"]);
                for (index, response) in responses.iter().enumerate() {
                    builder.push_record([index.to_string(), response.clone()]);
                }
                Ok(Self::render(builder))
            }
        }
    }

    /// Format extracted entries.
    pub fn entries(&self, entries: &[Entry]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&EntriesView {
                entries: entries.iter().map(EntryRef).collect(),
            })?),
            OutputFormat::Table => Ok(self.entries_table(entries)),
        }
    }

    /// Format a verification outcome.
    pub fn outcome(&self, outcome: &VerificationOutcome) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&OutcomeView::new(outcome))?),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Status", "Passed", "Failed"]);
                builder.push_record([
                    self.status(outcome.final_status()),
                    outcome.methods_passed().join(", "),
                    outcome.methods_failed().join(", "),
                ]);
                Ok(format!(
                    "{}\n{}",
                    Self::render(builder),
                    self.entries_table(outcome.entries())
                ))
            }
        }
    }

    /// Format a pipeline report.
    pub fn report(&self, report: &PipelineReport) -> Result<String> {
        let failed = report.extraction_failures() + report.verification_failures();
        match self.format {
            OutputFormat::Json => {
                let candidates = report
                    .candidates
                    .iter()
                    .map(|candidate| {
                        let (outcome, error) = match &candidate.status {
                            CandidateStatus::Verified(outcome) => {
                                (Some(OutcomeView::new(outcome)), None)
                            }
                            CandidateStatus::ExtractionFailed(e)
                            | CandidateStatus::VerificationFailed(e) => (None, Some(e.as_str())),
                        };
                        CandidateView {
                            index: candidate.index,
                            text: &candidate.text,
                            outcome,
                            error,
                        }
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&ReportView {
                    total: report.total(),
                    confirmed: report.count(FinalStatus::Confirmed),
                    needs_review: report.count(FinalStatus::NeedsReview),
                    discarded: report.count(FinalStatus::Discarded),
                    failed,
                    candidates,
                })?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["#", "Status", "Passed", "Failed", "Text"]);
                for candidate in &report.candidates {
                    let (status, passed, failed) = match &candidate.status {
                        CandidateStatus::Verified(outcome) => (
                            self.status(outcome.final_status()),
                            outcome.methods_passed().join(", "),
                            outcome.methods_failed().join(", "),
                        ),
                        CandidateStatus::ExtractionFailed(e) => (
                            self.colorize("extraction failed", Color::Red),
                            String::new(),
                            e.clone(),
                        ),
                        CandidateStatus::VerificationFailed(e) => (
                            self.colorize("verification failed", Color::Red),
                            String::new(),
                            e.clone(),
                        ),
                    };
                    builder.push_record([
                        candidate.index.to_string(),
                        status,
                        passed,
                        failed,
                        preview(&candidate.text),
                    ]);
                }
                let summary = format!(
                    "{} candidates: {} confirmed, {} needs review, {} discarded, {} failed",
                    report.total(),
                    report.count(FinalStatus::Confirmed),
                    report.count(FinalStatus::NeedsReview),
                    report.count(FinalStatus::Discarded),
                    failed
                );
                Ok(format!("{}\n{}", Self::render(builder), self.info(&summary)))
            }
        }
    }

    /// Format a list of setup names.
    pub fn setups(&self, names: &[String]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(names)?),
            OutputFormat::Table => {
                if names.is_empty() {
                    return Ok(self.info("No setups saved"));
                }
                let mut builder = Builder::default();
                builder.push_record(["Setup"]);
                for name in names {
                    builder.push_record([name.as_str()]);
                }
                Ok(Self::render(builder))
            }
        }
    }

    /// Format any serializable document as pretty JSON.
    pub fn document<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Color::Green)
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), Color::Blue)
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), Color::Yellow)
    }

    fn entries_table(&self, entries: &[Entry]) -> String {
        let Some(first) = entries.first() else {
            return self.colorize("No entries extracted.", Color::Yellow);
        };

        let labels: Vec<&str> = first.labels().collect();
        let mut builder = Builder::default();
        builder.push_record(labels.iter().copied());
        for entry in entries {
            builder.push_record(labels.iter().map(|label| entry.get(label).unwrap_or("")));
        }
        Self::render(builder)
    }

    fn status(&self, status: FinalStatus) -> String {
        let color = match status {
            FinalStatus::Confirmed => Color::Green,
            FinalStatus::NeedsReview => Color::Yellow,
            FinalStatus::Discarded => Color::Red,
        };
        self.colorize(status.as_str(), color)
    }

    fn render(builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: Color) -> String {
        if !self.color_enabled {
            return text.to_string();
        }
        text.color(color).to_string()
    }
}

/// First line of `text`, shortened for a table cell.
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or("");
    if line.chars().count() > PREVIEW_CHARS || text.lines().nth(1).is_some() {
        let short: String = line.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", short)
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoaumento_synthesizer::CandidateReport;

    fn entry(question: &str, answer: &str) -> Entry {
        [("question", question), ("answer", answer)].into_iter().collect()
    }

    fn outcome(status: FinalStatus) -> VerificationOutcome {
        VerificationOutcome::new(
            vec![entry("Capital of France?", "Paris")],
            vec!["similarity".to_string()],
            vec!["judge".to_string()],
            status,
        )
    }

    #[test]
    fn test_entries_json_keeps_label_order() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .entries(&[entry("Why?", "Because."), entry("How?", "Slowly.")])
            .unwrap();

        let question = output.find("question").unwrap();
        let answer = output.find("answer").unwrap();
        assert!(question < answer);

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["entries"][1]["answer"], "Slowly.");
    }

    #[test]
    fn test_entries_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.entries(&[entry("Why?", "Because.")]).unwrap();
        assert!(output.contains("question"));
        assert!(output.contains("Because."));

        let empty = formatter.entries(&[]).unwrap();
        assert_eq!(empty, "No entries extracted.");
    }

    #[test]
    fn test_outcome_json() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.outcome(&outcome(FinalStatus::NeedsReview)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["final_status"], "needs_review");
        assert_eq!(value["methods_passed"][0], "similarity");
        assert_eq!(value["methods_failed"][0], "judge");
        assert_eq!(value["entries"][0]["question"], "Capital of France?");
    }

    #[test]
    fn test_outcome_table_without_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.outcome(&outcome(FinalStatus::Confirmed)).unwrap();
        assert!(output.contains("confirmed"));
        assert!(output.contains("similarity"));
        assert!(output.contains("Paris"));
    }

    #[test]
    fn test_report_json_summarises_candidates() {
        let report = PipelineReport {
            candidates: vec![
                CandidateReport {
                    index: 0,
                    text: "Q: Capital of France?\nA: Paris".to_string(),
                    status: CandidateStatus::Verified(outcome(FinalStatus::Confirmed)),
                },
                CandidateReport {
                    index: 1,
                    text: "nothing".to_string(),
                    status: CandidateStatus::ExtractionFailed("no match".to_string()),
                },
            ],
        };
        let formatter = Formatter::new(OutputFormat::Json, false);
        let value: serde_json::Value =
            serde_json::from_str(&formatter.report(&report).unwrap()).unwrap();

        assert_eq!(value["total"], 2);
        assert_eq!(value["confirmed"], 1);
        assert_eq!(value["failed"], 1);
        assert_eq!(value["candidates"][0]["outcome"]["final_status"], "confirmed");
        assert!(value["candidates"][0].get("error").is_none());
        assert_eq!(value["candidates"][1]["error"], "no match");
    }

    #[test]
    fn test_setups_output() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.setups(&[]).unwrap(), "ℹ No setups saved");

        let json = Formatter::new(OutputFormat::Json, false)
            .setups(&["qa".to_string()])
            .unwrap();
        assert_eq!(
            serde_json::from_str::<Vec<String>>(&json).unwrap(),
            vec!["qa"]
        );
    }

    #[test]
    fn test_preview_shortens_multiline_text() {
        assert_eq!(preview("short"), "short");
        assert_eq!(preview("first\nsecond"), "first…");
        assert_eq!(preview(&"x".repeat(80)).chars().count(), PREVIEW_CHARS + 1);
    }

    #[test]
    fn test_no_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
        assert_eq!(formatter.warning("careful"), "⚠ careful");
    }
}
