//! One-shot Scorer CLI
//!
//! Runs the external scoring model once, the same way the server does for a
//! `POST /predict`, and prints the optimized price. Handy for checking a model
//! deployment without going through HTTP.
//!
//! ```sh
//! cargo run --bin score -- --workdir ./python 100.0 0.15 4.5 1200
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use price_optimizer::config::{ScorerEnvConfig, timeout_from_secs};
use price_optimizer::domain::ports::Scorer;
use price_optimizer::domain::pricing::FeatureVector;
use price_optimizer::infrastructure::ProcessScorer;
use std::path::PathBuf;
use tracing::{Level, info};

#[derive(Parser)]
#[command(author, version, about = "Score one product with the external price model", long_about = None)]
struct Cli {
    /// List price of the product
    actual_price: f64,

    /// Discount as a fraction (0.15) or percentage (15)
    discount_percentage: f64,

    /// Average rating, 0 to 5
    rating: f64,

    /// Number of ratings
    rating_count: f64,

    /// Interpreter used to run the scorer (default: SCORER_INTERPRETER or python3)
    #[arg(long)]
    interpreter: Option<String>,

    /// Scorer script passed to the interpreter (default: SCORER_SCRIPT or predict.py)
    #[arg(long)]
    script: Option<String>,

    /// Working directory of the scorer (default: SCORER_WORKDIR or ./python)
    #[arg(long)]
    workdir: Option<PathBuf>,

    /// Timeout in seconds, 0 disables (default: SCORER_TIMEOUT_SECS or 30)
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout only carries the price
    tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut config = ScorerEnvConfig::from_env().context("Failed to load scorer config")?;
    if let Some(interpreter) = cli.interpreter {
        config.interpreter = interpreter;
    }
    if let Some(script) = cli.script {
        config.script = script;
    }
    if let Some(workdir) = cli.workdir {
        config.working_dir = workdir;
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = timeout_from_secs(secs);
    }

    let features = FeatureVector::new([
        cli.actual_price,
        cli.discount_percentage,
        cli.rating,
        cli.rating_count,
    ])
    .context("Invalid features")?;

    let scorer = ProcessScorer::new(config);
    info!("Scoring {}", features.to_json_arg());

    let result = scorer
        .score(&features)
        .await
        .with_context(|| format!("Scoring {} failed", features.to_json_arg()))?;

    println!("{:.2}", result.rounded());
    Ok(())
}
