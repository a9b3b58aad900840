//! Station E2E
//!
//! Command-line driver for the Station wallet extension scenarios.

mod cli;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use station_config::{ConfigLoader, ConfigValidator, StationConfig};
use station_pages::Station;

use cli::{Cli, Commands, EvaluateTarget};

/// Initialize tracing with console and file output.
///
/// Log files are written to the configured directory with daily rotation.
fn init_tracing(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("station-e2e")
        .filename_suffix("log")
        .max_log_files(14)
        .build(log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keep the writer alive for the program duration
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    let log_dir = ConfigLoader::expand_path(&config.logging.dir);
    init_tracing(Path::new(&log_dir))?;

    if let Commands::CheckConfig = cli.command {
        return check_config(&config);
    }

    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in &warnings {
        warn!("{}: {}", warning.path, warning.message);
    }

    info!("Starting station-e2e v{}", env!("CARGO_PKG_VERSION"));
    let station = Station::connect(&config).await?;

    tokio::select! {
        result = run_command(&station, cli.command) => result,
        _ = tokio::signal::ctrl_c() => {
            station.cancel();
            anyhow::bail!("interrupted")
        }
    }
}

async fn run_command(station: &Station, command: Commands) -> Result<()> {
    match command {
        Commands::Setup => station.setup_station().await?,
        Commands::CreateWallet { name } => station.create_wallet(&name).await?,
        Commands::RecoverWallet => station.recover_wallet_from_seed().await?,
        Commands::ImportPrivateKey {
            invalid_key,
            wrong_password,
        } => {
            if invalid_key {
                station.import_wallet_from_private_key_invalid_key().await?
            } else if wrong_password {
                station.import_wallet_from_private_key_wrong_password().await?
            } else {
                station.import_wallet_from_private_key().await?
            }
        }
        Commands::VerifyManageWallets => station.verify_manage_wallets_form().await?,
        Commands::Evaluate { target } => match target {
            EvaluateTarget::MainPage => station.evaluate_main_page().await?,
            EvaluateTarget::Settings => station.evaluate_settings().await?,
            EvaluateTarget::ManageWallet => station.evaluate_manage_wallet().await?,
            EvaluateTarget::ManageAssets => station.evaluate_manage_assets().await?,
            EvaluateTarget::Send => station.evaluate_send().await?,
        },
        Commands::CreateMultisig {
            addresses,
            threshold,
            name,
        } => {
            station
                .create_multisig_wallet(&addresses, threshold, &name)
                .await?
        }
        Commands::CheckConfig => {}
    }
    Ok(())
}

fn check_config(config: &StationConfig) -> Result<()> {
    let warnings = ConfigValidator::validate(config).into_result()?;
    for warning in &warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    println!("Configuration OK ({} warnings)", warnings.len());
    Ok(())
}
