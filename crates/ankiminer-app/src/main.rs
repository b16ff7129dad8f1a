use std::path::PathBuf;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod controller;
pub mod events;
pub mod input;
pub mod profile;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::state::AppState;

/// Mine Japanese vocabulary into Anki
#[derive(Parser, Debug)]
#[command(name = "ankiminer", version)]
struct Args {
    /// JSON profile to load instead of environment defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the persisted collection
    #[arg(long)]
    data_dir: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Write a profile with the current settings to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_ansi(atty::is(atty::Stream::Stderr)).init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.json_logs);

    let mut config = profile::load_config(args.config.as_deref())?;
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }

    if let Some(path) = args.write_config {
        profile::write_profile(&path, "main", &config)?;
        return Ok(());
    }

    let state = AppState::from_config(&config)?;
    if let Some(anki) = &state.anki {
        match anki.client.check_connection().await {
            Ok(version) => tracing::info!("AnkiConnect v{} at {}", version, config.anki.url),
            Err(e) => tracing::warn!("AnkiConnect not reachable, exports will fail: {e:#}"),
        }
    }
    let controller = AppController::new(config.channel_capacity);
    let mut tasks = controller.spawn_tasks(state);
    controller.spawn_input();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("Event loop finished"),
                Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::error!("Task failed during shutdown: {e:#}");
        }
    }

    Ok(())
}
