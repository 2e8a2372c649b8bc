use std::sync::Arc;

use clap::Parser;
use qraso_config::Config;
use qraso_core::AppState;
use tokio::signal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod controller;
mod events;
mod io;
mod profile;
mod scan_context;
mod ui;


use self::cli::Cli;
use self::controller::AppController;
use self::profile::ProfileStore;

/// Logs go to stderr so they never interleave with the prompt output
fn init_logging(force_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let json = force_json || !atty::is(atty::Stream::Stderr);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Profile, then environment, then flags
fn load_config(cli: &Cli) -> Config {
    let mut config = match ProfileStore::user().and_then(|store| {
        store.init()?;
        store.load(&cli.profile)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Using default config, profile unavailable: {e:#}");
            Config::new()
        }
    };

    config.apply_env();
    cli.apply(&mut config);
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (ignore if missing)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = load_config(&cli);
    tracing::info!(
        profile = %cli.profile,
        base_url = %config.network.base_url,
        "Starting qraso"
    );

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks().await;

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("Task exited: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;

    Ok(())
}
