//! conform command-line front end.
//!
//! Loads a schema document and a JSON input, converts the input into
//! [`Record`]s and reports the result. The binary is a thin wrapper around
//! [`run`], which is exposed here so it can be tested without a process.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use conform_core::{Record, SchemaDocument, Validator, ValidatorConfig};
use serde_json::Value;
use tracing::{debug, info};

#[derive(Parser, Debug, Clone)]
#[command(name = "conform")]
#[command(about = "Validate JSON data against a schema document and convert it to typed records")]
pub struct Args {
    /// Schema document (.toml or .json)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// JSON input: a single object or an array of objects
    #[arg(short, long)]
    pub input: PathBuf,

    /// Validator config; defaults are used if the file does not exist
    #[arg(short, long, default_value = "validator.toml")]
    pub config: PathBuf,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of a successful [`run`].
#[derive(Debug, PartialEq)]
pub struct Report {
    pub records: Vec<Record>,
    /// Whether the input was an array rather than a single object.
    pub from_array: bool,
}

impl Report {
    pub fn summary(&self) -> String {
        let noun = if self.records.len() == 1 { "record" } else { "records" };
        let shape = if self.from_array { "array" } else { "object" };
        format!("Converted {} {} from input {}", self.records.len(), noun, shape)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.records {
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}

pub fn run(args: &Args) -> Result<Report> {
    let schema = SchemaDocument::load_from(&args.schema)
        .and_then(SchemaDocument::into_schema)
        .with_context(|| format!("failed to load schema from {}", args.schema.display()))?;
    debug!("Schema defines {} properties", schema.len());

    let config = ValidatorConfig::load_from(&args.config)
        .with_context(|| format!("failed to load config from {}", args.config.display()))?;
    let validator = Validator::with_config(&config).context("invalid validator config")?;

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("failed to read input {}", args.input.display()))?;
    let input: Value = serde_json::from_str(&raw)
        .with_context(|| format!("input {} is not valid JSON", args.input.display()))?;

    let binding = Record::binding(&schema);
    let from_array = input.is_array();
    let converted = if from_array {
        validator.validate_and_convert_object_array(&input, &binding, &schema)
    } else {
        validator
            .validate_and_convert_object(&input, &binding, &schema)
            .map(|record| vec![record])
    };
    let records = converted
        .with_context(|| format!("input {} does not match the schema", args.input.display()))?;

    let report = Report {
        records,
        from_array,
    };
    info!("{}", report.summary());
    Ok(report)
}
