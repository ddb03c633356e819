// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: turn a floor-plan JSON record into depth-sorted axonometric faces
//!
//! Usage:
//!   floorplan-axon <plan.json> [options]

use anyhow::{bail, Context, Result};
use axoplan_processing::{repair_and_render, PipelineConfig};
use axoplan_topology::validate_with;
use std::env;
use std::fs;
use tracing_subscriber::EnvFilter;

struct Options {
    input: String,
    output: Option<String>,
    config: Option<String>,
    validate_only: bool,
    height: Option<f64>,
    thickness: Option<f64>,
    unit_scale: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return Ok(());
    }
    let options = parse_options(&args)?;

    let mut config = match &options.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Cannot read config '{}'", path))?;
            PipelineConfig::from_json(&text)?.with_env_overrides()
        }
        None => PipelineConfig::from_env(),
    };
    if let Some(height) = options.height {
        config.default_height = height;
    }
    if let Some(thickness) = options.thickness {
        config.default_thickness = thickness;
    }
    if let Some(scale) = options.unit_scale {
        config.unit_scale = scale;
    }

    let text = fs::read_to_string(&options.input)
        .with_context(|| format!("Cannot read floor plan '{}'", options.input))?;
    let record: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("'{}' is not valid JSON", options.input))?;

    if options.validate_only {
        let report = validate_with(&record, &config.validation);
        for issue in &report.errors {
            eprintln!("error: {}", issue);
        }
        for issue in &report.warnings {
            eprintln!("warning: {}", issue);
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
        if !report.valid {
            std::process::exit(1);
        }
        return Ok(());
    }

    let output = repair_and_render(&record, &config)?;
    tracing::info!(
        faces = output.rendered.faces.len(),
        skipped = output.rendered.skipped.len(),
        repairs = output.repairs.actions.len(),
        "Floor plan processed"
    );

    let json = serde_json::to_string_pretty(&output)?;
    match &options.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Cannot write '{}'", path))?;
            tracing::info!(path = %path, "Wrote faces");
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn parse_options(args: &[String]) -> Result<Options> {
    let mut options = Options {
        input: args[1].clone(),
        output: None,
        config: None,
        validate_only: false,
        height: None,
        thickness: None,
        unit_scale: None,
    };

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output" => options.output = Some(value(args, &mut i)?.to_string()),
            "--config" => options.config = Some(value(args, &mut i)?.to_string()),
            "--height" => options.height = Some(number(args, &mut i)?),
            "--thickness" => options.thickness = Some(number(args, &mut i)?),
            "--unit-scale" => options.unit_scale = Some(number(args, &mut i)?),
            "--validate-only" => options.validate_only = true,
            other => {
                print_usage();
                bail!("Unknown option: {}", other);
            }
        }
        i += 1;
    }

    Ok(options)
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("Missing value for {}", flag))
}

fn number(args: &[String], i: &mut usize) -> Result<f64> {
    let raw = value(args, i)?;
    raw.parse()
        .with_context(|| format!("Invalid number '{}' for {}", raw, args[*i - 1]))
}

fn print_usage() {
    eprintln!("Usage: floorplan-axon <plan.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --output <path>       Write the result JSON here instead of stdout");
    eprintln!("  --config <path>       Pipeline config JSON (camelCase fields)");
    eprintln!("  --validate-only       Only report structural problems; exit 1 if any");
    eprintln!("  --height <mm>         Default wall height (2700)");
    eprintln!("  --thickness <mm>      Default wall thickness (200)");
    eprintln!("  --unit-scale <s>      Plan-to-model unit multiplier (1.0)");
    eprintln!();
    eprintln!("Environment: RUST_LOG, AXOPLAN_DEFAULT_HEIGHT, AXOPLAN_DEFAULT_THICKNESS,");
    eprintln!("             AXOPLAN_UNIT_SCALE, AXOPLAN_AXON_ALPHA, AXOPLAN_AXON_BETA");
}
