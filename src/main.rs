use anyhow::Context;
use clap::Parser;
use portfolio_sheets::app::commands::{self, describe_plan};
use portfolio_sheets::config::Command;
use portfolio_sheets::core::{BundleStore, ConfigProvider};
use portfolio_sheets::utils::{logger, validation::Validate};
use portfolio_sheets::{CliConfig, HttpBundle, LocalBundle, PortfolioSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting portfolio-sheets");
    tracing::debug!(
        spreadsheet_id = ?config.spreadsheet_id,
        api_key_set = config.api_key.is_some(),
        addressing = ?config.addressing,
        bundle = config.bundle_url.as_deref().unwrap_or(&config.bundle_path),
        timeout_secs = config.timeout_secs,
        "CLI config"
    );

    config.validate().context("invalid configuration")?;

    match config.bundle_url.clone() {
        Some(url) => {
            let bundle = HttpBundle::new(url, config.request_timeout())?;
            run(bundle, config).await
        }
        None => {
            let bundle = LocalBundle::new(config.bundle_path.clone());
            run(bundle, config).await
        }
    }
}

async fn run<S: BundleStore>(bundle: S, config: CliConfig) -> anyhow::Result<()> {
    let command = config.command();
    let source = PortfolioSource::new(bundle, config)?;

    match command {
        Command::Plan => {
            println!("{}", describe_plan(source.config()));
        }
        Command::Show { kind } => {
            let json = commands::show(&source, kind).await?;
            println!("{}", json);
        }
        Command::Snapshot { out } => {
            let written = commands::snapshot(&source, &LocalBundle::new(&out))
                .await
                .with_context(|| format!("failed to write snapshot to {}", out))?;
            for path in written {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
