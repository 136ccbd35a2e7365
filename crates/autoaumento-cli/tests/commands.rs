//! Command tests against the mock backend and a temporary setups directory

use autoaumento_cli::cli::{ExtractArgs, RunArgs, SetupAction, SetupArgs, VerifyArgs};
use autoaumento_cli::commands;
use autoaumento_cli::config::{BackendKind, OutputFormat};
use autoaumento_cli::schema::{self, SetupDefinition};
use autoaumento_cli::{CliError, Config, Formatter};
use autoaumento_store::FileSetupRepository;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SETUP_TOML: &str = r#"
[generation]
system_prompt = "You write quiz items."
user_prompt = "Write one question about {topic}."
num_return_sequences = 2
max_new_tokens = 64
num_executions = 1

[generation.reference_data]
topic = "geography"

[[extraction.rules]]
label = "question"
mode = "keyword"
pattern = "Q:"
secondary_pattern = "\n"

[[extraction.rules]]
label = "answer"
mode = "keyword"
pattern = "A:"

[verification]
required_for_confirmed = 2
required_for_review = 1

[[verification.methods]]
name = "similarity"
mode = "acumulativo"

[verification.methods.settings]
type = "embedding"
lower_threshold = -1.0
upper_threshold = 0.99
reference_text = "What is the capital of France?"

[[verification.methods]]
name = "judge"
mode = "acumulativo"

[verification.methods.settings]
type = "consensus"
system_prompt = "Reply yes or no."
user_prompt = "Is '{answer}' right for '{question}'?"
placeholders = ["question", "answer"]
positive_responses = ["yes"]
num_responses = 3
num_positive_required = 2
max_new_tokens = 3
"#;

fn config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.backend.kind = BackendKind::Mock;
    config.backend.mock_response = "Q: Capital of France?\nA: yes, Paris".to_string();
    config.storage.setups_dir = Some(dir.join("setups"));
    config
}

fn formatter() -> Formatter {
    Formatter::new(OutputFormat::Json, false)
}

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn setup_save_validates_and_stores() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    let file = write(&dir, "qa.toml", SETUP_TOML);

    commands::execute_setup(
        SetupArgs {
            action: SetupAction::Save {
                name: "qa".to_string(),
                file,
            },
        },
        &config,
        &formatter(),
    )
    .await
    .unwrap();

    let repository = FileSetupRepository::new(config.setups_dir().unwrap()).unwrap();
    assert_eq!(repository.list().unwrap(), vec!["qa"]);
    let stored: SetupDefinition = repository.load("qa").unwrap().unwrap();
    assert_eq!(stored.generation.num_return_sequences, 2);
    assert_eq!(stored.extraction.rules.len(), 2);
}

#[tokio::test]
async fn setup_save_rejects_invalid_process() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    let broken = SETUP_TOML.replace("required_for_review = 1", "required_for_review = 2");
    let file = write(&dir, "broken.toml", &broken);

    let err = commands::execute_setup(
        SetupArgs {
            action: SetupAction::Save {
                name: "broken".to_string(),
                file,
            },
        },
        &config,
        &formatter(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CliError::Configuration(_)));
    let repository = FileSetupRepository::new(config.setups_dir().unwrap()).unwrap();
    assert!(repository.list().unwrap().is_empty());
}

#[tokio::test]
async fn run_missing_setup_fails() {
    let dir = TempDir::new().unwrap();
    let args = RunArgs {
        setup: Some("absent".to_string()),
        request: None,
        extraction: None,
        process: None,
        model: None,
    };

    let err = commands::execute_run(args, &config(dir.path()), &formatter())
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::SetupNotFound(ref name) if name == "absent"));
}

#[tokio::test]
async fn run_saved_setup_with_mock_backend() {
    let dir = TempDir::new().unwrap();
    let config = config(dir.path());
    let setup: SetupDefinition = schema::DocumentFormat::Toml.parse(SETUP_TOML).unwrap();
    FileSetupRepository::new(config.setups_dir().unwrap())
        .unwrap()
        .save("qa", &setup)
        .unwrap();

    let args = RunArgs {
        setup: Some("qa".to_string()),
        request: None,
        extraction: None,
        process: None,
        model: None,
    };

    commands::execute_run(args, &config, &formatter())
        .await
        .unwrap();
}

#[tokio::test]
async fn extract_from_text_file() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        &dir,
        "rules.json",
        r#"{"rules": [{"label": "answer", "mode": "regex", "pattern": "A: (.+)"}]}"#,
    );
    let text = write(&dir, "text.txt", "Q: Why?\nA: Because.");

    let args = ExtractArgs {
        rules,
        text: Some(text),
        stdin: false,
    };
    commands::execute_extract(args, &config(dir.path()), &formatter())
        .await
        .unwrap();
}

#[tokio::test]
async fn extract_reports_no_match() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        &dir,
        "rules.json",
        r#"{"rules": [{"label": "score", "mode": "regex", "pattern": "score: (\\d+)"}]}"#,
    );
    let text = write(&dir, "text.txt", "nothing to see");

    let args = ExtractArgs {
        rules,
        text: Some(text),
        stdin: false,
    };
    let err = commands::execute_extract(args, &config(dir.path()), &formatter())
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Extractor(_)));
}

#[tokio::test]
async fn extract_requires_an_input() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        &dir,
        "rules.json",
        r#"{"rules": [{"label": "x", "mode": "regex", "pattern": "x"}]}"#,
    );

    let args = ExtractArgs {
        rules,
        text: None,
        stdin: false,
    };
    let err = commands::execute_extract(args, &config(dir.path()), &formatter())
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[tokio::test]
async fn verify_rejects_empty_entries() {
    let dir = TempDir::new().unwrap();
    let setup: SetupDefinition = schema::DocumentFormat::Toml.parse(SETUP_TOML).unwrap();
    let process = write(
        &dir,
        "process.json",
        &serde_json::to_string(&setup.verification).unwrap(),
    );
    let entries = write(&dir, "entries.json", r#"{"entries": []}"#);

    let args = VerifyArgs {
        process,
        entries,
        model: None,
    };
    let err = commands::execute_verify(args, &config(dir.path()), &formatter())
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::InvalidInput(_)));
}

#[tokio::test]
async fn verify_entries_file() {
    let dir = TempDir::new().unwrap();
    let setup: SetupDefinition = schema::DocumentFormat::Toml.parse(SETUP_TOML).unwrap();
    let process = write(
        &dir,
        "process.json",
        &serde_json::to_string(&setup.verification).unwrap(),
    );
    let entries = write(
        &dir,
        "entries.json",
        r#"{"entries": [{"question": "Capital of France?", "answer": "Paris"}]}"#,
    );

    let args = VerifyArgs {
        process,
        entries,
        model: None,
    };
    commands::execute_verify(args, &config(dir.path()), &formatter())
        .await
        .unwrap();
}
