//! Command-line arguments and command execution.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use composite_fields::json::{from_json_str, to_json_string, to_json_string_pretty};
use composite_fields::{
    CompositeConfig, FlatData, RepeatingOptions, Subfield, ValueDict, flatten_repeating,
    flatten_scalar, resolve_repeating, resolve_scalar,
};
use serde_json::Value;
use tracing::debug;

/// Upper bound for `--min-blanks`.
pub const MAX_MIN_BLANKS: i64 = 1000;

/// Resolve and flatten composite form fields.
#[derive(Debug, Parser)]
#[command(name = "composite")]
#[command(about = "Resolve composite form fields from flat form data or stored values")]
pub struct Cli {
    #[command(flatten)]
    pub config: CompositeConfig,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "COMPOSITE_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,

    /// Pretty-print the JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve a single composite field from a flat JSON object.
    Scalar {
        /// Composite field name.
        field: String,

        /// Input file (stdin when omitted).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Resolve a repeating composite field from a flat JSON object.
    Repeating {
        /// Composite field name.
        field: String,

        /// Subfield names used for blank rows (comma-separated).
        #[arg(long, value_delimiter = ',')]
        subfields: Vec<String>,

        /// JSON file with an array of subfield descriptors; overrides --subfields.
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Requested number of blank rows when there is no data.
        #[arg(
            long,
            default_value_t = 1,
            value_parser = clap::value_parser!(u16).range(0..=MAX_MIN_BLANKS)
        )]
        min_blanks: u16,

        /// Drop rows whose values are all empty.
        #[arg(long)]
        exclude_empty: bool,

        /// Input file (stdin when omitted).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Flatten a structured value into form keys.
    Flatten {
        /// Composite field name.
        field: String,

        /// Treat the input as a list of rows.
        #[arg(long)]
        repeating: bool,

        /// Input file (stdin when omitted).
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

impl Command {
    fn input(&self) -> Option<&Path> {
        match self {
            Command::Scalar { input, .. }
            | Command::Repeating { input, .. }
            | Command::Flatten { input, .. } => input.as_deref(),
        }
    }
}

/// Runs the command against `stdin` and returns the JSON output.
pub fn run(cli: &Cli, stdin: impl Read) -> anyhow::Result<String> {
    let text = read_input(cli.command.input(), stdin)?;
    let output = execute(&cli.command, &cli.config, &text)?;
    if cli.pretty {
        Ok(to_json_string_pretty(&output)?)
    } else {
        Ok(to_json_string(&output)?)
    }
}

fn execute(command: &Command, config: &CompositeConfig, text: &str) -> anyhow::Result<Value> {
    let output = match command {
        Command::Scalar { field, .. } => {
            let data: FlatData = from_json_str(text).context("input must be a JSON object")?;
            Value::Object(resolve_scalar(field, &data, config))
        }
        Command::Repeating {
            field,
            subfields,
            schema,
            min_blanks,
            exclude_empty,
            ..
        } => {
            let data: FlatData = from_json_str(text).context("input must be a JSON object")?;
            let subfields = match schema {
                Some(path) => load_schema(path)?,
                None => subfields.iter().map(Subfield::new).collect(),
            };
            let options = RepeatingOptions {
                min_blanks: usize::from(*min_blanks),
                include_empty: !exclude_empty,
            };
            let rows = resolve_repeating(field, &subfields, &data, options, config);
            Value::Array(rows.into_iter().map(Value::Object).collect())
        }
        Command::Flatten {
            field, repeating, ..
        } => {
            let flat = if *repeating {
                let rows: Vec<ValueDict> =
                    from_json_str(text).context("input must be a JSON array of objects")?;
                flatten_repeating(field, &rows, config)
            } else {
                let value: ValueDict =
                    from_json_str(text).context("input must be a JSON object")?;
                flatten_scalar(field, &value, config)
            };
            Value::Object(flat)
        }
    };
    Ok(output)
}

fn read_input(path: Option<&Path>, mut stdin: impl Read) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Reading input file");
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            stdin
                .read_to_string(&mut text)
                .context("failed to read stdin")?;
            Ok(text)
        }
    }
}

fn load_schema(path: &Path) -> anyhow::Result<Vec<Subfield>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read schema {}", path.display()))?;
    let subfields = from_json_str(&text)
        .with_context(|| format!("schema {} must be a JSON array of subfields", path.display()))?;
    Ok(subfields)
}
