//! Deep Search command-line entry point.
//!
//! Runs one aggregation for the query given on the command line and prints
//! the ranked items as JSON, or a grounded prompt with `--prompt`.
//!
//! ```sh
//! RUST_LOG=deep_search=debug deep_search "latest news today"
//! ```

use clap::Parser;
use deep_search::prompt::grounded_prompt;
use deep_search::{deep_search, DeepSearchConfig};
use std::error::Error;
use tracing::{debug, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;

use cli::Cli;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = match &args.config {
        Some(path) => DeepSearchConfig::load(path)?,
        None => DeepSearchConfig::default(),
    };
    if let Some(url) = args.webdriver_url.clone() {
        config.webdriver_url = url;
    }
    if args.headed {
        config.headless = false;
    }

    let items = deep_search(&args.query, &config).await?;

    if args.prompt {
        println!("{}", grounded_prompt(&args.query, &items));
    } else {
        println!("{}", serde_json::to_string_pretty(&items)?);
    }

    let elapsed = start_time.elapsed();
    info!(
        results = items.len(),
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
