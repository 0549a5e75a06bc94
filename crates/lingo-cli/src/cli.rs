//! Argument parsing and command execution.

use clap::{Parser, Subcommand};
use lingo_config::ConfigLoader;
use lingo_i18n::{PluralCount, TranslationRequest, Translator};
use serde_json::Value;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{CliError, CliResult};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Plugin options file (.json, .toml, .yaml)
    #[arg(short, long, default_value = "lingo.json")]
    pub config: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the translation of one message
    Translate {
        /// The msgid, i.e. the untranslated singular
        msgid: String,

        /// Untranslated plural
        #[arg(short, long)]
        plural: Option<String>,

        /// Count selecting the plural form
        #[arg(short = 'n', long)]
        count: Option<String>,

        /// Disambiguation context
        #[arg(short = 'x', long)]
        context: Option<String>,

        /// Language code, instead of the configured default
        #[arg(short = 'L', long)]
        language: Option<String>,

        /// JSON object to interpolate `%{ }` placeholders with
        #[arg(long)]
        params: Option<String>,
    },
    /// List catalog languages and plural entries with the wrong form count
    Check {
        /// Fail when any entry has the wrong form count
        #[arg(long)]
        strict: bool,
    },
}

/// Loads the options and runs the selected command, returning its output.
pub async fn run(args: &Args) -> CliResult<String> {
    let options = ConfigLoader::new(&args.config).load().await?;
    let translator = Translator::from_options(options)?;
    debug!("Running {:?}", args.command);

    match &args.command {
        Command::Translate {
            msgid,
            plural,
            count,
            context,
            language,
            params,
        } => {
            let language = language
                .clone()
                .unwrap_or_else(|| translator.current_language().to_string());
            let count = count.as_deref().map_or_else(PluralCount::default, PluralCount::parse);

            let mut request = TranslationRequest::new(msgid, &language).with_count(count);
            if let Some(plural) = plural {
                request = request.with_default_plural(plural);
            }
            if let Some(context) = context {
                request = request.with_context(context);
            }
            let translation = translator.translate(&request);

            match params.as_deref().map(parse_params).transpose()? {
                Some(params) => Ok(translator.interpolate(&translation, &[&params])),
                None => Ok(translation),
            }
        }
        Command::Check { strict } => check(&translator, *strict),
    }
}

fn parse_params(raw: &str) -> CliResult<Value> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| CliError::Params(e.to_string()))?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(CliError::Params("expected a JSON object".to_string()))
    }
}

fn check(translator: &Translator, strict: bool) -> CliResult<String> {
    let catalog = translator.catalog();
    let mut lines = Vec::new();

    for language in catalog.languages() {
        let entries = catalog.language(language).map_or(0, |table| table.len());
        let name = translator
            .available_languages()
            .get(language)
            .map_or(String::new(), |name| format!(" ({name})"));
        lines.push(format!("{language}{name}: {entries} messages"));
    }

    let mismatches = catalog.form_count_mismatches();
    lines.extend(mismatches.iter().map(|mismatch| {
        format!(
            "{}: {:?} has {} plural forms, expected {}",
            mismatch.language, mismatch.msgid, mismatch.found, mismatch.expected
        )
    }));
    info!("Checked catalog, {} mismatches", mismatches.len());

    if strict && !mismatches.is_empty() {
        return Err(CliError::FormCountMismatch(mismatches.len()));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate() {
        let args = Args::try_parse_from([
            "lingo", "-c", "opts.yaml", "translate", "%{ n } car", "-p", "%{ n } cars", "-n",
            "3", "-L", "fr_FR", "--params", r#"{"n": 3}"#,
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("opts.yaml"));
        assert_eq!(args.log_level, "warn");
        assert_eq!(
            args.command,
            Command::Translate {
                msgid: "%{ n } car".into(),
                plural: Some("%{ n } cars".into()),
                count: Some("3".into()),
                context: None,
                language: Some("fr_FR".into()),
                params: Some(r#"{"n": 3}"#.into()),
            }
        );
    }

    #[test]
    fn test_parse_check() {
        let args = Args::try_parse_from(["lingo", "check", "--strict"]).unwrap();
        assert_eq!(args.config, PathBuf::from("lingo.json"));
        assert_eq!(args.command, Command::Check { strict: true });
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["lingo"]).is_err());
    }

    #[test]
    fn test_params_must_be_object() {
        assert!(parse_params(r#"{"a": 1}"#).is_ok());
        assert!(matches!(parse_params("[1]"), Err(CliError::Params(_))));
        assert!(matches!(parse_params("{"), Err(CliError::Params(_))));
    }
}
