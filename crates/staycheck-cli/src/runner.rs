use anyhow::{Context, Result};
use staycheck_core::store::ArtifactStore;
use staycheck_core::{ListingTable, LocalStore, Thresholds, clean, run_checks};
use staycheck_reports::{JsonFormatter, Reporter, StdOutFormatter};

use crate::{Args, CheckArgs, CleanArgs, Command, OutputFormat, errors::ConfigError};

pub fn run(args: Args) -> Result<bool> {
    let store = LocalStore::new(args.store.as_str());

    match args.command {
        Command::Clean(clean_args) => {
            run_clean(&store, &clean_args)?;
            Ok(true)
        }
        Command::Check(check_args) => {
            let formatter: Box<dyn Reporter> = match args.output {
                OutputFormat::Stdout => {
                    let version = env!("CARGO_PKG_VERSION");
                    Box::new(StdOutFormatter::new(version.to_string()))
                }
                OutputFormat::Json => Box::new(JsonFormatter::new()),
            };
            run_check(&store, &check_args, formatter.as_ref())
        }
    }
}

/// The cleaning stage: fetch, clean, publish.
fn run_clean(store: &LocalStore, args: &CleanArgs) -> Result<()> {
    let input_path = store
        .fetch(&args.input_artifact)
        .with_context(|| format!("failed to fetch artifact '{}'", args.input_artifact))?;

    let raw = ListingTable::from_csv(&input_path, &args.input_artifact)
        .with_context(|| format!("failed to load table '{}'", args.input_artifact))?;

    let cleaned = clean(&raw, args.min_price, args.max_price)
        .context("failed to clean table")?;

    // Scratch file only lives until the store has its own copy
    let scratch = tempfile::tempdir().context("failed to create scratch directory")?;
    let output_path = scratch.path().join("clean_sample.csv");
    cleaned
        .write_csv(&output_path)
        .context("failed to write cleaned table")?;

    let version = store
        .publish(
            &output_path,
            &args.output_artifact,
            &args.output_type,
            &args.output_description,
        )
        .with_context(|| format!("failed to publish artifact '{}'", args.output_artifact))?;

    tracing::info!(
        output = args.output_artifact.as_str(),
        version = version.as_str(),
        rows = cleaned.num_rows(),
        "cleaning finished"
    );
    Ok(())
}

/// The quality gate: fetch both tables, run all six checks, report.
fn run_check(store: &LocalStore, args: &CheckArgs, formatter: &dyn Reporter) -> Result<bool> {
    let (csv, reference, thresholds) = resolve_check_config(args)?;

    formatter.on_start();

    formatter.on_fetch(&csv);
    let candidate_path = store
        .fetch(&csv)
        .with_context(|| format!("failed to fetch artifact '{csv}'"))?;
    let candidate = ListingTable::from_csv(&candidate_path, &csv)
        .with_context(|| format!("failed to load table '{csv}'"))?;

    formatter.on_fetch(&reference);
    let reference_path = store
        .fetch(&reference)
        .with_context(|| format!("failed to fetch artifact '{reference}'"))?;
    let reference = ListingTable::from_csv(&reference_path, &reference)
        .with_context(|| format!("failed to load table '{reference}'"))?;

    formatter.on_suite_start();
    let report = run_checks(&candidate, &reference, &thresholds);

    formatter.on_report(&report);
    formatter.on_complete(report.passed_count(), report.failed_count());

    Ok(report.is_passed())
}

/// Validate the `check` flags, listing every missing one before any check runs.
fn resolve_check_config(args: &CheckArgs) -> Result<(String, String, Thresholds), ConfigError> {
    let mut missing = Vec::new();
    if args.csv.is_none() {
        missing.push("--csv");
    }
    if args.reference.is_none() {
        missing.push("--ref");
    }
    if args.kl_threshold.is_none() {
        missing.push("--kl_threshold");
    }
    if args.min_price.is_none() {
        missing.push("--min_price");
    }
    if args.max_price.is_none() {
        missing.push("--max_price");
    }
    match (
        &args.csv,
        &args.reference,
        args.kl_threshold,
        args.min_price,
        args.max_price,
    ) {
        (Some(csv), Some(reference), Some(kl_threshold), Some(min_price), Some(max_price)) => {
            Ok((
                csv.clone(),
                reference.clone(),
                Thresholds {
                    min_price,
                    max_price,
                    kl_threshold,
                },
            ))
        }
        _ => Err(ConfigError::MissingParameter(missing.join(", "))),
    }
}
