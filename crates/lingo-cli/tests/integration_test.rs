//! Integration tests for lingo-cli crate.

use clap::Parser;
use lingo_cli::{run, Args, CliError};
use lingo_common::test_utils::catalog_fixtures::sample_options;
use lingo_common::test_utils::init_test_logging;
use lingo_common::LingoError;
use std::path::Path;
use tempfile::TempDir;

fn options_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("lingo.json");
    std::fs::write(&path, sample_options().to_string()).unwrap();
    path
}

fn args(config: &Path, rest: &[&str]) -> Args {
    let mut argv = vec!["lingo", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(rest);
    Args::try_parse_from(argv).unwrap()
}

#[tokio::test]
async fn test_translate_default_language() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let config = options_file(&dir);

    let output = run(&args(&config, &["translate", "Pending"])).await.unwrap();
    assert_eq!(output, "En cours");
}

#[tokio::test]
async fn test_translate_plural_with_params() {
    let dir = TempDir::new().unwrap();
    let config = options_file(&dir);

    let output = run(&args(
        &config,
        &[
            "translate",
            "%{ n } file",
            "--plural",
            "%{ n } files",
            "--count",
            "5",
            "--language",
            "ru_RU",
            "--params",
            r#"{"n": 5}"#,
        ],
    ))
    .await
    .unwrap();
    assert_eq!(output, "5 файлов");
}

#[tokio::test]
async fn test_translate_with_context() {
    let dir = TempDir::new().unwrap();
    let config = options_file(&dir);

    let output = run(&args(&config, &["translate", "Answer", "--context", "Noun"]))
        .await
        .unwrap();
    assert_eq!(output, "Réponse (nom)");
}

#[tokio::test]
async fn test_translate_missing_key_uses_plural() {
    let dir = TempDir::new().unwrap();
    let config = options_file(&dir);

    let output = run(&args(
        &config,
        &["translate", "tree", "-p", "trees", "-n", "2"],
    ))
    .await
    .unwrap();
    assert_eq!(output, "trees");
}

#[tokio::test]
async fn test_check_reports_mismatches() {
    let dir = TempDir::new().unwrap();
    let config = options_file(&dir);

    let report = run(&args(&config, &["check"])).await.unwrap();
    assert!(report.contains("fr_FR (Français): 7 messages"));
    assert_eq!(
        report.lines().last(),
        Some("fr_FR: \"Short\" has 1 plural forms, expected 2")
    );
    assert!(!report.ends_with('\n'));

    let err = run(&args(&config, &["check", "--strict"])).await.unwrap_err();
    assert!(matches!(err, CliError::FormCountMismatch(1)));
}

#[tokio::test]
async fn test_missing_options_file() {
    let dir = TempDir::new().unwrap();
    let err = run(&args(&dir.path().join("absent.json"), &["check"]))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::Lingo(LingoError::Io(_))));
}
