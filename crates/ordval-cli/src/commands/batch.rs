//! Batch command - validate multiple order documents.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use ordval_core::{validate_str, RuleConfig, Summary};

use super::check::{format_summary, OutputFormat};
use super::config::load_config;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of order documents
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file reports
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each report
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a summary CSV (one row per file)
    #[arg(long)]
    summary: bool,

    /// Continue when a document cannot be read or has the wrong shape
    #[arg(long)]
    continue_on_error: bool,

    /// Fail when any document has invalid orders
    #[arg(long)]
    strict: bool,
}

/// Result of checking a single file.
struct FileResult {
    path: PathBuf,
    summary: Option<Summary>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("json"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to check",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = check_single_file(&path, &config.rules);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(summary) => results.push(FileResult {
                path,
                summary: Some(summary),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to check {}: {}", path.display(), error_msg);
                    results.push(FileResult {
                        path,
                        summary: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to check {}: {}", path.display(), error_msg);
                    anyhow::bail!("Check failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_and_clear();

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Some(summary) = &result.summary {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("orders");

                let extension = match args.format {
                    OutputFormat::Json => "json",
                    OutputFormat::Csv => "csv",
                    OutputFormat::Text => "txt",
                };

                let output_path = output_dir.join(format!("{}.report.{}", output_name, extension));
                fs::write(&output_path, format_summary(summary, args.format, config.output.pretty)?)?;
                debug!("Wrote report to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let with_invalid: Vec<_> = results
        .iter()
        .filter(|r| r.summary.as_ref().is_some_and(|s| !s.is_clean()))
        .collect();

    println!(
        "{} Checked {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} clean, {} with invalid orders, {} failed",
        style(results.len() - failed.len() - with_invalid.len()).green(),
        style(with_invalid.len()).yellow(),
        style(failed.len()).red()
    );

    for result in &with_invalid {
        if let Some(summary) = &result.summary {
            println!(
                "  - {}: {} of {} orders invalid",
                result.path.display(),
                summary.invalid_orders_count,
                summary.total_orders
            );
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    if args.strict && !with_invalid.is_empty() {
        anyhow::bail!("{} files contain invalid orders", with_invalid.len());
    }

    Ok(())
}

fn check_single_file(path: &Path, rules: &RuleConfig) -> anyhow::Result<Summary> {
    let text = fs::read_to_string(path)?;
    Ok(validate_str(&text, rules)?)
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "total_orders",
        "total_line_items",
        "invalid_orders",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();
        let time = result.processing_time_ms.to_string();

        match &result.summary {
            Some(summary) => {
                let status = if summary.is_clean() { "clean" } else { "invalid" };
                wtr.write_record([
                    filename,
                    status.to_string(),
                    summary.total_orders.to_string(),
                    summary.total_line_items.to_string(),
                    summary.invalid_orders_count.to_string(),
                    time,
                    String::new(),
                ])?;
            }
            None => {
                wtr.write_record([
                    filename,
                    "error".to_string(),
                    String::new(),
                    String::new(),
                    String::new(),
                    time,
                    result.error.clone().unwrap_or_default(),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
