//! Command-line interface definitions for Deep Search.
//!
//! Options can be given as flags; the WebDriver endpoint can also come from
//! the environment.

use clap::Parser;

/// Command-line arguments for the Deep Search binary.
///
/// # Examples
///
/// ```sh
/// # Aggregate and print JSON
/// deep_search "latest news today"
///
/// # Use a config file and a remote chromedriver
/// deep_search -c deep_search.yaml --webdriver-url http://grid:4444 "rust async runtime"
///
/// # Print a grounded prompt instead of JSON
/// deep_search --prompt "monsoon update"
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Free-form search query
    pub query: String,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// WebDriver endpoint, overrides the config file
    #[arg(long, env = "WEBDRIVER_URL")]
    pub webdriver_url: Option<String>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub headed: bool,

    /// Print a grounded prompt instead of the JSON result list
    #[arg(long)]
    pub prompt: bool,
}
