mod cli;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use riskgauge_compute::Pipeline;
use riskgauge_core::config::{load_dotenv, Config};
use riskgauge_core::Catalog;

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let mut config = Config::from_env();
    if let Some(key) = args.fred_api_key.clone().filter(|k| !k.is_empty()) {
        config.fred.api_key = Some(key);
    }
    config.log_summary();

    let catalog = Catalog::load(&args.indicators).with_context(|| {
        format!("failed to load indicator catalog: {}", args.indicators.display())
    })?;

    let pipeline = Pipeline::from_config(&config, &catalog);
    let doc = pipeline.run(&catalog.drivers).await;

    if args.stdout {
        print!("{}", output::render(&doc)?);
    } else {
        output::write_document(&args.out, &doc)?;
        info!(
            path = %args.out.display(),
            score = doc.risk_state.score,
            label = %doc.risk_state.label,
            "wrote dashboard"
        );
    }

    Ok(())
}
