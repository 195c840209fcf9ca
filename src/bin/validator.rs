//! Schema Validator CLI
//!
//! Checks that schema files are well-formed JSON Schema documents.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use metaschema_lint::loader::validate_paths;
use metaschema_lint::{
    FileOutcome, FileReport, OutputFormat, SchemaValidator, UnknownKeywordPolicy, ValidatorConfig,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-validator")]
#[command(about = "Validate that JSON Schema documents follow the meta-schema")]
#[command(version)]
struct Cli {
    /// Schema files or directories to check
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Maximum schema nesting depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Report keywords that are not part of the supported vocabulary
    #[arg(long)]
    deny_unknown: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pretty => OutputFormat::Pretty,
            Format::Json => OutputFormat::Json,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    valid: bool,
    files: &'a [FileReport],
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

/// Returns whether every schema was valid
fn run(cli: Cli) -> anyhow::Result<bool> {
    let mut config = ValidatorConfig::load_from(cli.config.as_deref())
        .context("failed to load configuration")?;

    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    if let Some(max_depth) = cli.max_depth {
        config.validation.max_depth = max_depth;
    }
    if cli.deny_unknown {
        config.validation.unknown_keywords = UnknownKeywordPolicy::Deny;
    }

    let validator = SchemaValidator::new(config.validator_options());
    tracing::debug!(options = ?validator.options(), "validator configured");
    let reports = validate_paths(&validator, &cli.paths)?;
    let all_valid = reports.iter().all(FileReport::is_valid);

    match config.output.format {
        OutputFormat::Pretty => print_pretty(&reports),
        OutputFormat::Json => {
            let report = Report {
                generated_at: chrono::Utc::now().to_rfc3339(),
                valid: all_valid,
                files: &reports,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(all_valid)
}

fn print_pretty(reports: &[FileReport]) {
    for report in reports {
        let source = report.source.display();
        match &report.outcome {
            FileOutcome::Checked(result) if result.valid => {
                println!("✅ {} - valid", source);
            }
            FileOutcome::Checked(result) => {
                println!("❌ {} - {} problem(s)", source, result.diagnostics.len());
                for diagnostic in &result.diagnostics {
                    println!("   └─ {}", diagnostic);
                }
            }
            FileOutcome::Failed { error } => {
                println!("⚠️  {} - {}", source, error);
            }
        }
    }

    if reports.len() > 1 {
        let valid = reports.iter().filter(|r| r.is_valid()).count();
        println!();
        println!("{}/{} schema(s) valid", valid, reports.len());
    }
}
