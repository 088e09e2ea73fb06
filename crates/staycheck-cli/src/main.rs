mod errors;
mod runner;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Output format for check results
#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Print results to standard output (human-readable)
    Stdout,
    /// Output results in JSON format
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "staycheck",
    version,
    about = "StayCheck - cleaning and quality gate for NYC listing datasets",
    long_about = "StayCheck is a data-pipeline stage for the NYC short-term-rental listings \
                  dataset. The `clean` subcommand removes price outliers and normalizes column \
                  types; the `check` subcommand runs the data quality gate comparing a candidate \
                  dataset against a reference dataset.\n\n\
                  Example usage:\n  \
                  staycheck clean --input_artifact sample.csv:latest --output_artifact clean_sample.csv \\\n           \
                  --output_type clean_sample --output_description \"Cleaned data\" \\\n           \
                  --min_price 10 --max_price 350\n  \
                  staycheck check --csv clean_sample.csv:latest --ref clean_sample.csv:reference \\\n           \
                  --kl_threshold 0.2 --min_price 10 --max_price 350"
)]
struct Args {
    /// Root directory of the local artifact store
    #[arg(long, value_name = "DIR", default_value = "artifacts")]
    store: String,

    /// Output format for check results
    #[arg(short, long, value_enum, default_value = "stdout")]
    output: OutputFormat,

    /// Enable debug mode with detailed error chains
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter price outliers and normalize column types
    Clean(CleanArgs),
    /// Run the quality gate against a reference dataset
    Check(CheckArgs),
}

#[derive(clap::Args, Debug)]
struct CleanArgs {
    /// Input artifact name with version tag (e.g., 'sample.csv:latest')
    #[arg(long = "input_artifact")]
    input_artifact: String,

    /// Output artifact name (e.g., 'clean_sample.csv')
    #[arg(long = "output_artifact")]
    output_artifact: String,

    /// Type classification for the output artifact
    #[arg(long = "output_type")]
    output_type: String,

    /// Description of the cleaning process and output data
    #[arg(long = "output_description")]
    output_description: String,

    /// Minimum price threshold for outlier removal
    #[arg(long = "min_price")]
    min_price: f64,

    /// Maximum price threshold for outlier removal
    #[arg(long = "max_price")]
    max_price: f64,
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Candidate artifact name with version tag
    #[arg(long)]
    csv: Option<String>,

    /// Reference artifact name with version tag
    #[arg(long = "ref")]
    reference: Option<String>,

    /// Maximum allowed KL divergence
    #[arg(long = "kl_threshold")]
    kl_threshold: Option<f64>,

    /// Minimum allowed price
    #[arg(long = "min_price")]
    min_price: Option<f64>,

    /// Maximum allowed price
    #[arg(long = "max_price")]
    max_price: Option<f64>,
}

fn main() {
    let args = Args::parse();

    // The diagnostic sink: installed once per run, torn down with the process
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let debug = args.debug;
    match runner::run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            if debug {
                eprintln!("Error: {err:?}");
            } else {
                eprintln!("Error: {err:#}");
                eprintln!("\nHint: Run with --debug flag for detailed error chains");
            }
            std::process::exit(1);
        }
    }
}
