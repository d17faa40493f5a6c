// rollcall CLI - clean, normalize and deduplicate a CSV of personal records

mod exit_codes;
mod util;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::info;
use rollcall_core::{PipelineError, SchemaConfig};

use exit_codes::{pipeline_exit_code, EXIT_INPUT, EXIT_OUTPUT, EXIT_SCHEMA, EXIT_SUCCESS, EXIT_USAGE};
use util::{is_csv, validate_csv};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Validate, normalize and deduplicate a CSV of personal records")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Input columns: id, name, age, birthdate (any order, any case).
Output columns: id, name, age, birthdate.

Examples:
  rollcall people.csv clean.csv
  rollcall people.csv clean.csv --schema strict.toml
  RUST_LOG=debug rollcall people.csv clean.csv")]
struct Cli {
    /// Input CSV file
    input: PathBuf,

    /// Output CSV file (replaced if it exists)
    output: PathBuf,

    /// TOML file overriding the built-in field rules
    #[arg(long, value_name = "FILE", env = "ROLLCALL_SCHEMA")]
    schema: Option<PathBuf>,

    /// Don't print the discarded-row count
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Log pipeline progress to stderr (-v info, -vv debug)
    #[arg(long, short = 'v', action = ArgAction::Count)]
    verbose: u8,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cmd_clean(&cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        Self { code: EXIT_INPUT, message: msg.into(), hint: None }
    }

    pub fn schema(msg: impl Into<String>) -> Self {
        Self { code: EXIT_SCHEMA, message: msg.into(), hint: None }
    }

    /// Failure while reading the input or running the pipeline.
    pub fn read(err: PipelineError) -> Self {
        Self {
            code: pipeline_exit_code(&err),
            message: format!("Error reading file: {}", err),
            hint: None,
        }
    }

    /// Schema file that was read but failed to parse or validate.
    pub fn invalid_schema(err: PipelineError, path: &Path) -> Self {
        Self {
            code: pipeline_exit_code(&err),
            message: format!("{}: {}", path.display(), err),
            hint: None,
        }
    }

    /// Failure while writing `path`. CSV encoding errors here are output failures.
    pub fn write(err: PipelineError, path: &Path) -> Self {
        let code = match &err {
            PipelineError::Csv(_) => EXIT_OUTPUT,
            other => pipeline_exit_code(other),
        };
        match err {
            PipelineError::NoRows => Self {
                code,
                message: format!(
                    "Error writing to file '{}', no rows left after cleaning and deduplicating",
                    path.display()
                ),
                hint: Some("run with -v to see how many rows each stage discarded".to_string()),
            },
            other => Self {
                code,
                message: format!("Error writing to file '{}'", path.display()),
                hint: Some(other.to_string()),
            },
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// clean
// ============================================================================

fn cmd_clean(cli: &Cli) -> Result<(), CliError> {
    if !is_csv(&cli.input) {
        return Err(CliError::args(format!("File '{}' is not a CSV", cli.input.display())));
    }
    if !is_csv(&cli.output) {
        return Err(CliError::args(format!("File '{}' is not a CSV", cli.output.display())));
    }
    if !validate_csv(&cli.input) {
        return Err(CliError::args(format!("File '{}' was not found", cli.input.display())));
    }

    let schema = match &cli.schema {
        Some(path) => load_schema(path)?,
        None => SchemaConfig::default(),
    };

    let source = rollcall_io::csv::read_file_as_utf8(&cli.input)
        .map_err(|e| CliError::input(format!("cannot read '{}'", cli.input.display())).with_hint(e))?;

    let out = rollcall_core::run(&source, &schema).map_err(CliError::read)?;
    info!(
        "{} row(s) kept; discarded {} malformed, {} invalid, {} duplicate",
        out.records.len(),
        out.discards.malformed,
        out.discards.invalid,
        out.discards.duplicate
    );

    rollcall_io::csv::save(&out.records, &cli.output).map_err(|e| CliError::write(e, &cli.output))?;

    // Only the total is reported; per-stage counts are in the -v log.
    let discarded = out.discards.total();
    if discarded > 0 && !cli.quiet {
        println!("{} discarded row(s)", discarded);
    }

    Ok(())
}

fn load_schema(path: &Path) -> Result<SchemaConfig, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::schema(format!("cannot read schema '{}': {}", path.display(), e)))?;
    SchemaConfig::from_toml(&text).map_err(|e| CliError::invalid_schema(e, path))
}
