use std::path::PathBuf;

use clap::Parser;

/// Compute the macro risk dashboard document.
///
/// Loads the indicator catalog, fetches every series, scores the
/// indicators and writes `dashboard.json` for the front end.
#[derive(Parser, Debug)]
#[command(name = "riskgauge", version, about = "Compute the macro risk dashboard document")]
pub struct CliArgs {
    /// Indicator catalog (.json, .yml or .yaml)
    #[arg(long, env = "RISKGAUGE_INDICATORS", default_value = "config/indicators.json")]
    pub indicators: PathBuf,

    /// Output path for the dashboard document
    #[arg(long, env = "RISKGAUGE_OUT", default_value = "public/data/dashboard.json")]
    pub out: PathBuf,

    /// Print the document to stdout instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// FRED API key (overrides FRED_API_KEY)
    #[arg(long)]
    pub fred_api_key: Option<String>,
}
