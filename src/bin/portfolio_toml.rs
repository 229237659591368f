use anyhow::Context;
use clap::Parser;
use portfolio_sheets::app::commands::{self, describe_plan, Selection};
use portfolio_sheets::core::{BundleStore, ConfigProvider};
use portfolio_sheets::utils::{logger, validation::Validate};
use portfolio_sheets::{HttpBundle, LocalBundle, PortfolioSource, TomlConfig};

#[derive(Parser)]
#[command(name = "portfolio-toml")]
#[command(about = "Resolve portfolio data using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "portfolio.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Only resolve this record kind
    #[arg(long, value_enum, default_value_t = Selection::All)]
    kind: Selection,

    /// Write a bundle snapshot instead of printing JSON
    #[arg(long)]
    snapshot: bool,

    /// Show the source order without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Loading configuration from: {}", args.config);

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;
    config.validate().context("invalid configuration")?;

    if args.dry_run {
        println!("{}", describe_plan(&config));
        return Ok(());
    }

    let timeout = config.request_timeout();
    match config.bundle.url.clone() {
        Some(url) => run(HttpBundle::new(url, timeout)?, config, &args).await,
        None => {
            let bundle = LocalBundle::new(config.bundle.path.clone());
            run(bundle, config, &args).await
        }
    }
}

async fn run<S: BundleStore>(bundle: S, config: TomlConfig, args: &Args) -> anyhow::Result<()> {
    let snapshot_path = config.snapshot_path().unwrap_or("./snapshot").to_string();
    let source = PortfolioSource::new(bundle, config)?;

    if args.snapshot {
        let written = commands::snapshot(&source, &LocalBundle::new(&snapshot_path))
            .await
            .with_context(|| format!("failed to write snapshot to {}", snapshot_path))?;
        for path in written {
            println!("{}", path.display());
        }
    } else {
        println!("{}", commands::show(&source, args.kind).await?);
    }

    Ok(())
}
