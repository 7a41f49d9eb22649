//! Models command - check which OCR model files are available.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use console::style;

use super::{load_config, resolve_model_dir};

/// Arguments for the models command.
#[derive(Args)]
pub struct ModelsArgs {
    #[command(subcommand)]
    command: ModelsCommand,
}

#[derive(Subcommand)]
enum ModelsCommand {
    /// Check model status
    Status(StatusArgs),
}

#[derive(Args)]
struct StatusArgs {
    /// Model directory to check instead of the configured one
    #[arg(short, long)]
    model_dir: Option<PathBuf>,
}

pub fn run(args: ModelsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ModelsCommand::Status(status_args) => check_status(status_args, config_path),
    }
}

fn check_status(args: StatusArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    config.ocr.model_dir = resolve_model_dir(&config, args.model_dir.as_deref());

    println!("{}", style("Model Status").bold());
    println!(
        "Model directory: {}",
        style(config.ocr.model_dir.display()).cyan()
    );
    println!();

    let mut total_size: u64 = 0;

    for path in config.ocr.model_files() {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let (status, size_str) = if path.is_file() {
            let size = fs::metadata(&path)?.len();
            total_size += size;
            (style("✓").green(), format_size(size))
        } else {
            (style("✗").red(), "missing".to_string())
        };

        println!("    {} {:<25} {:>10}", status, filename, size_str);
    }

    println!();
    if config.ocr.models_present() {
        println!(
            "    {} Ready ({} total)",
            style("✓").green(),
            format_size(total_size)
        );
    } else {
        println!(
            "    {} Place the PaddleOCR detection, recognition and dictionary files in {}",
            style("⚠").yellow(),
            config.ocr.model_dir.display()
        );
    }

    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1_000_000_000 {
        format!("{:.1}GB", bytes as f64 / 1_000_000_000.0)
    } else if bytes >= 1_000_000 {
        format!("{:.1}MB", bytes as f64 / 1_000_000.0)
    } else if bytes >= 1_000 {
        format!("{:.1}KB", bytes as f64 / 1_000.0)
    } else {
        format!("{}B", bytes)
    }
}
