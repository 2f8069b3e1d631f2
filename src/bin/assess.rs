//! Train on an employee telemetry CSV and assess a queried profile
//!
//! Usage: cargo run --bin assess -- --csv empleados.csv --set nivel_burnout=9 --set estres_encuesta=8

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use hr_risk_ml::prelude::*;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Assess employee mental-health risk from telemetry")]
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

    /// Feature override as name=value; unset features default to 5
    #[arg(long = "set")]
    set: Vec<String>,

    /// Number of trees in the forest
    #[arg(long, default_value = "100")]
    trees: usize,

    /// Base random seed
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Rows of the filtered dataset to preview
    #[arg(long, default_value = "5")]
    preview: usize,
}

fn parse_overrides(pairs: &[String]) -> Result<HashMap<String, f64>> {
    let mut input = HashMap::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("expected name=value, got {pair:?}");
        };
        let value: f64 = value
            .trim()
            .parse()
            .with_context(|| format!("non-numeric value in {pair:?}"))?;
        input.insert(name.trim().to_string(), value);
    }
    Ok(input)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("hr_risk_ml=info")
        .init();

    let args = Args::parse();

    println!("===========================================");
    println!("  Employee Risk Assessment - HR Risk ML");
    println!("===========================================\n");

    info!("Loading {}...", args.csv.display());
    let table = RawTable::from_csv_path(&args.csv)
        .with_context(|| format!("failed to read {}", args.csv.display()))?;

    let forest = RandomForest::new(ForestConfig {
        n_trees: args.trees,
        seed: args.seed,
        ..Default::default()
    });
    let mut session = Session::with_classifier(Box::new(forest));
    session.load_table(&table).context("upload rejected")?;

    if let (Some(start), Some(end)) = (args.start, args.end) {
        session
            .filter_dates(start, end)
            .context("date filter left nothing to train on")?;
    }

    let dataset = session.dataset().context("no dataset after load")?;
    println!("Dataset: {} records", dataset.n_samples());
    if let Some((min, max)) = dataset.date_bounds() {
        println!("Dates:   {min} .. {max}");
    }

    println!("\n=== Preview ===\n");
    for record in dataset.head(args.preview) {
        let fecha = record
            .fecha
            .map(|d| d.to_string())
            .unwrap_or_else(|| "(sin fecha)".to_string());
        println!(
            "- {} | riesgo={} | burnout={}",
            fecha,
            record.riesgo,
            record.value(FeatureField::NivelBurnout)
        );
    }

    println!("\n=== Risk distribution ===\n");
    let counts = dataset.label_distribution();
    let burnout = dataset.mean_feature_by_label(FeatureField::NivelBurnout);
    for label in RiskLabel::ALL {
        println!(
            "{:6} {:4} records (mean burnout {:.1})",
            label.to_string(),
            counts[label.class_index()],
            burnout[label.class_index()]
        );
    }

    let input = parse_overrides(&args.set)?;
    let guidance = session.predict_sparse(&input)?;

    println!("\n=== Assessment ===\n");
    println!("Riesgo estimado: {}", guidance.label.to_string().to_uppercase());
    println!("Color:           {}", guidance.color);
    println!("Recomendación:   {}", guidance.recommendation);

    Ok(())
}
