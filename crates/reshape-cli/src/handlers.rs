//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.
//! Handlers write their results to the given writer; diagnostics go through
//! `tracing`.

use crate::cli::{CheckArgs, OutputFormat, RunArgs};
use crate::error::{Error, Result};
use crate::output::render;
use reshape_core::validator::StringFormat;
use reshape_core::{TransformCatalog, TransformationEngine, ValidatorRegistry};
use serde_json::{json, Value};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Handle the run command
#[instrument(skip(args, out), fields(rules = %args.rules.display()))]
pub fn handle_run(args: RunArgs, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let engine = load_engine(&args.rules, args.inference.into())?;

    let source = match &args.input {
        Some(path) => read_input(path)?,
        None => {
            debug!("Reading source record from stdin");
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            parse_input(&text)?
        }
    };

    let output = engine.transform(&source)?;
    info!("Transformed record with {} rules", engine.rules().len());

    let format = match format {
        OutputFormat::Json if args.pretty => OutputFormat::JsonPretty,
        other => other,
    };
    writeln!(out, "{}", render(&output, format)?)?;
    Ok(())
}

/// Handle the check command
#[instrument(skip(args, out), fields(rules = %args.rules.display()))]
pub fn handle_check(args: CheckArgs, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let engine = load_engine(&args.rules, Default::default())?;

    let targets: Vec<&str> = engine.rules().iter().map(|rule| rule.target()).collect();
    let summary = json!({
        "valid": true,
        "rules": targets.len(),
        "targets": targets,
    });
    writeln!(out, "{}", render(&summary, format)?)?;
    Ok(())
}

/// Handle the formats command
pub fn handle_formats(format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let formats: Vec<&str> = StringFormat::ALL.iter().map(StringFormat::name).collect();
    let catalog = TransformCatalog::with_builtins();
    let listing = json!({
        "types": ValidatorRegistry::new().type_names(),
        "formats": formats,
        "transforms": catalog.names(),
    });
    writeln!(out, "{}", render(&listing, format)?)?;
    Ok(())
}

fn load_engine(
    rules: &Path,
    inference: reshape_core::ContainerInference,
) -> Result<TransformationEngine> {
    if !rules.exists() {
        return Err(Error::FileNotFound {
            path: rules.to_path_buf(),
        });
    }

    let catalog = TransformCatalog::with_builtins();
    let rules = reshape_core::config::load_rules(rules, &catalog)?;
    debug!("Loaded {} rules, container inference {}", rules.len(), inference);

    Ok(TransformationEngine::builder(rules)
        .container_inference(inference)
        .build()?)
}

fn read_input(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    parse_input(&fs::read_to_string(path)?)
}

fn parse_input(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(Error::Input)
}
