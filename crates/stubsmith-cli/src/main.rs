mod config;
mod run;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use stubsmith_core::{
    Error as CoreError, FixtureDocument, InvalidFlag, StubMode, fixture_document_json_schema,
    validate_document_json,
};
use stubsmith_generate::{DocumentOptions, GenerationError, LocaleKey, Stubbing};
use thiserror::Error;

use config::{ConfigError, Settings, load_settings};
use run::{RunError, init_logging, list_generators, write_json};

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Run(#[from] RunError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("unknown invalid-mode flag: {0}")]
    UnknownFlag(String),
}

#[derive(Parser, Debug)]
#[command(name = "stubsmith", version, about = "Fixture value generator for API descriptors")]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate values for every field of a fixture document.
    Generate(GenerateArgs),
    /// List canonical generator names and their aliases.
    Generators(GeneratorsArgs),
    /// Print the fixture document JSON Schema.
    Schema,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Fixture document (JSON).
    #[arg(value_name = "DOC")]
    document: PathBuf,
    /// Locale tag, overriding the document and config.
    #[arg(long)]
    locale: Option<String>,
    /// Invalid-mode flag applied to every field; repeatable.
    #[arg(long = "mode", value_name = "FLAG")]
    modes: Vec<String>,
    /// Config file (defaults to ./stubsmith.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the report here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Join list values of parameters and headers per collectionFormat.
    #[arg(long, default_value_t = false)]
    join_collections: bool,
}

#[derive(Args, Debug)]
struct GeneratorsArgs {
    #[arg(long)]
    locale: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(cli.json_logs)?;

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Generators(args) => run_generators(args),
        Command::Schema => {
            write_json(&fixture_document_json_schema(), None)?;
            Ok(())
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        document,
        locale,
        modes,
        config,
        out,
        join_collections,
    } = args;

    let settings = load_settings(config.as_deref())?;

    let text = std::fs::read_to_string(&document).map_err(CoreError::from)?;
    let raw: Value = serde_json::from_str(&text).map_err(CoreError::from)?;
    let validation = validate_document_json(&raw)?;
    for warning in &validation.warnings {
        tracing::warn!(path = %warning.path, code = %warning.code, "{}", warning.message);
    }
    if !validation.is_ok() {
        for error in &validation.errors {
            tracing::error!(path = %error.path, code = %error.code, "{}", error.message);
        }
        return Err(CliError::InvalidDocument(format!(
            "{} error(s) in {}",
            validation.errors.len(),
            document.display()
        )));
    }
    let fixture = FixtureDocument::from_json(&text)?;

    let locale = resolve_locale(locale, fixture.locale.as_deref(), &settings);
    let mode = settings.stub_mode() | parse_modes(&modes)?;
    let stubbing = Stubbing::with_aliases(&locale, Arc::new(settings.alias_table()))?;
    let options = DocumentOptions {
        mode,
        join_collections: join_collections || settings.join_collections,
    };

    tracing::info!(
        document = %document.display(),
        locale = %stubbing.registry().locale(),
        mode = %mode,
        "generating fixtures"
    );
    let report = stubbing.generate_document(&fixture, &options);
    if !report.is_clean() {
        tracing::warn!(issues = report.issues.len(), "some fields reported issues");
    }
    write_json(&report, out.as_deref())?;
    Ok(())
}

fn run_generators(args: GeneratorsArgs) -> Result<(), CliError> {
    let settings = load_settings(args.config.as_deref())?;
    let locale = resolve_locale(args.locale, None, &settings);
    let stubbing = Stubbing::with_aliases(&locale, Arc::new(settings.alias_table()))?;
    write_json(&list_generators(stubbing.registry()), args.out.as_deref())?;
    Ok(())
}

/// Flag, then document, then config, then the default locale.
fn resolve_locale(flag: Option<String>, document: Option<&str>, settings: &Settings) -> String {
    flag.or_else(|| document.map(str::to_string))
        .or_else(|| settings.locale.clone())
        .unwrap_or_else(|| LocaleKey::default().as_str().to_string())
}

fn parse_modes(values: &[String]) -> Result<StubMode, CliError> {
    values.iter().try_fold(StubMode::VALID, |mode, value| {
        InvalidFlag::parse(value)
            .map(|flag| mode | flag.as_set())
            .ok_or_else(|| CliError::UnknownFlag(value.clone()))
    })
}
