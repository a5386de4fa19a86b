//! Check command - validate a single order document.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use ordval_core::{distinct_ids, extract_orders, parse_document, Summarizer, Summary};

use super::config::load_config;

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Order document (JSON)
    #[arg(default_value = "orders.json")]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Fail when any order is invalid
    #[arg(long)]
    strict: bool,

    /// Fail unless the distinct order ids equal this comma-separated set
    #[arg(long, value_delimiter = ',')]
    expect_ids: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON summary
    Json,
    /// CSV, one row per problem
    Csv,
    /// Plain text report
    Text,
}

pub async fn run(args: CheckArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Checking file: {}", args.input.display());

    let text = fs::read_to_string(&args.input)?;
    let document = parse_document(&text)?;
    let orders = extract_orders(&document)?;
    let summary = Summarizer::with_config(&config.rules).summarize(&orders);

    let output = format_summary(&summary, args.format, config.output.pretty)?;

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

    debug!("Total check time: {:?}", start.elapsed());

    if let Some(expected) = &args.expect_ids {
        let expected: BTreeSet<String> = expected.iter().map(|s| s.trim().to_string()).collect();
        let actual = distinct_ids(&orders);
        if actual != expected {
            let missing: Vec<_> = expected.difference(&actual).cloned().collect();
            let unexpected: Vec<_> = actual.difference(&expected).cloned().collect();
            anyhow::bail!(
                "Order ids do not match: missing [{}], unexpected [{}]",
                missing.join(", "),
                unexpected.join(", ")
            );
        }
    }

    if args.strict && !summary.is_clean() {
        anyhow::bail!(
            "{} of {} orders are invalid",
            summary.invalid_orders_count,
            summary.total_orders
        );
    }

    Ok(())
}

/// Render a summary in the requested format.
pub fn format_summary(
    summary: &Summary,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(summary)?),
        OutputFormat::Json => Ok(serde_json::to_string(summary)?),
        OutputFormat::Csv => format_summary_csv(summary),
        OutputFormat::Text => Ok(format_summary_text(summary)),
    }
}

fn format_summary_csv(summary: &Summary) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["order_id", "code", "reason"])?;

    for report in &summary.problematic_orders {
        let id = report.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
        for problem in &report.reasons {
            let reason = problem.to_string();
            wtr.write_record([id.as_str(), problem.code(), reason.as_str()])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_summary_text(summary: &Summary) -> String {
    let mut output = String::new();

    if summary.is_clean() {
        output.push_str(&format!(
            "{} all {} orders valid\n",
            style("PASS:").green(),
            summary.total_orders
        ));
    }

    for report in &summary.problematic_orders {
        let id = report
            .id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "<missing id>".to_string());
        output.push_str(&format!("{} order {}\n", style("FAIL:").red(), id));
        for reason in &report.reasons {
            output.push_str(&format!("  - {}\n", reason));
        }
    }

    output.push('\n');
    output.push_str(&format!("Orders:         {}\n", summary.total_orders));
    output.push_str(&format!("Line items:     {}\n", summary.total_line_items));
    output.push_str(&format!("Invalid orders: {}\n", summary.invalid_orders_count));

    output
}
