//! Print the month-by-label risk trend for a telemetry CSV
//!
//! Usage: cargo run --bin trend_report -- --csv empleados.csv --start 2024-01-01 --end 2024-06-30

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use hr_risk_ml::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Monthly risk trend over employee telemetry")]
struct Args {
    /// CSV file with employee telemetry
    #[arg(long)]
    csv: PathBuf,

    /// Inclusive start of the date filter (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Inclusive end of the date filter (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Emit the table as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("hr_risk_ml=info")
        .init();

    let args = Args::parse();

    let table = RawTable::from_csv_path(&args.csv)
        .with_context(|| format!("failed to read {}", args.csv.display()))?;
    let mut dataset = validate(&table).context("upload rejected")?;

    if let (Some(start), Some(end)) = (args.start, args.end) {
        dataset = dataset.filter_dates(start, end);
    }

    let trend = monthly_trend(&dataset);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&trend)?);
        return Ok(());
    }

    println!("Month    {:>6} {:>6} {:>6}", "bajo", "medio", "alto");
    if trend.is_empty() {
        println!("(no dated records in range)");
    }
    for bucket in &trend.months {
        println!(
            "{}  {:>6} {:>6} {:>6}",
            bucket.month,
            bucket.count(RiskLabel::Bajo),
            bucket.count(RiskLabel::Medio),
            bucket.count(RiskLabel::Alto)
        );
    }

    Ok(())
}
