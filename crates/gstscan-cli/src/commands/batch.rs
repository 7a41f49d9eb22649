//! Batch processing command for a folder of invoice images.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use gstscan_core::{BatchDirectoryRequest, BatchReport, Pipeline};

use crate::chart::write_sales_chart;
use crate::output::{format_records, monthly_table, skipped_table, OutputFormat};

use super::{load_config, load_engine};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Folder containing .jpg / .png invoices
    input: String,

    /// Output file for the records (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format for the records
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Write an SVG line chart of total sales per month
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Model directory
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    if args.input.trim().is_empty() {
        println!("{} Please provide a folder path.", style("ℹ").blue());
        return Ok(());
    }

    let start = Instant::now();
    let mut config = load_config(config_path)?;

    let dir = PathBuf::from(&args.input);
    if !dir.is_dir() {
        anyhow::bail!("Folder not found: {}", dir.display());
    }

    let engine = load_engine(&mut config, args.model_dir.as_deref())?;
    let pipeline = Pipeline::from_config(engine, &config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let request = BatchDirectoryRequest { dir };
    let result = pipeline.process_batch_with(&request, |index, count, path| {
        pb.set_length(count as u64);
        pb.set_position(index as u64);
        if let Some(name) = path.file_name() {
            pb.set_message(name.to_string_lossy().into_owned());
        }
    });
    pb.finish_and_clear();

    let report = result?;

    print_report(&report, &args)?;

    if let Some(chart_path) = &args.chart {
        match &report.aggregate {
            Some(aggregate) => {
                let size = (config.output.chart_width, config.output.chart_height);
                write_sales_chart(aggregate, size, chart_path)?;
                println!(
                    "{} Sales chart written to {}",
                    style("✓").green(),
                    chart_path.display()
                );
            }
            None => println!("No valid data available for generating the sales line chart."),
        }
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.files_scanned,
        start.elapsed()
    );
    println!(
        "   {} kept, {} skipped",
        style(report.records.len()).green(),
        style(report.skipped.len()).yellow()
    );

    Ok(())
}

fn print_report(report: &BatchReport, args: &BatchArgs) -> anyhow::Result<()> {
    let records = format_records(&report.records, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &records)?;
        debug!("Wrote records to {}", output_path.display());
        println!(
            "{} Records written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", records);
    }

    if !report.skipped.is_empty() {
        println!();
        println!("{}", style("Skipped invoices:").yellow());
        println!("{}", skipped_table(&report.skipped));
    }

    if let Some(aggregate) = &report.aggregate {
        println!();
        println!("{}", style("Monthly totals:").bold());
        println!("{}", monthly_table(aggregate));
    }

    Ok(())
}
