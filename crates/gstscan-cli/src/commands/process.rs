//! Process command - extract data from a single invoice image.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use image::GenericImageView;
use tracing::{debug, info};

use gstscan_core::invoice::rules::diagnose;
use gstscan_core::{ExtractionRequest, ExtractionResponse, Pipeline};

use crate::output::{format_records, OutputFormat};

use super::{load_config, load_engine};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input image (.jpg or .png)
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,

    /// Print the recognized text and each rule's outcome
    #[arg(long)]
    show_text: bool,
}

pub fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if args.input.trim().is_empty() {
        println!("{} Please upload an image.", style("ℹ").blue());
        return Ok(());
    }

    let start = Instant::now();
    let mut config = load_config(config_path)?;

    let input = PathBuf::from(&args.input);
    if !input.is_file() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    info!("Processing file: {}", input.display());

    let request = ExtractionRequest::from_file(&input)?;
    let engine = load_engine(&mut config, args.model_dir.as_deref())?;
    let pipeline = Pipeline::from_config(engine, &config);

    let ExtractionResponse::Single(single) = pipeline.run(&request)? else {
        anyhow::bail!("unexpected batch response for a single image");
    };

    let (width, height) = single.image.dimensions();
    eprintln!(
        "{} {} ({}x{})",
        style("ℹ").blue(),
        single.record.name,
        width,
        height
    );

    if !single.missing_fields.is_empty() {
        let names: Vec<String> = single.missing_fields.iter().map(|f| f.to_string()).collect();
        eprintln!(
            "{} Not found on invoice: {}",
            style("⚠").yellow(),
            names.join(", ")
        );
    }

    if args.show_text {
        eprintln!("{}", style("Recognized text:").bold());
        eprintln!("{}", single.raw_text);
        eprintln!();
        for outcome in diagnose(&single.raw_text) {
            match outcome.matched {
                Some(value) => eprintln!("  {} {:<16} {}", style("✓").green(), outcome.rule, value),
                None => eprintln!("  {} {:<16} no match", style("✗").red(), outcome.rule),
            }
        }
        eprintln!();
    }

    let output = format_records(std::slice::from_ref(&single.record), args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
