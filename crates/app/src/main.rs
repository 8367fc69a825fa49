mod commands;
mod metrics;
mod state;
mod view;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cardbinder_core::{
    load_config, load_config_from_env, validate_config, CardCatalog, Config, PokemonTcgClient,
};

use commands::HELP;
use state::{AppState, Reply};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file read when `CARDBINDER_CONFIG` is unset
const DEFAULT_CONFIG_PATH: &str = "cardbinder.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Logs go to stderr; stdout belongs to the results view.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("cardbinder v{}", VERSION);

    // An explicitly named config file must exist; the default one is optional.
    let config = match std::env::var_os("CARDBINDER_CONFIG").map(PathBuf::from) {
        Some(config_path) => load_file_config(&config_path)?,
        None => {
            let config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
            if config_path.exists() {
                load_file_config(&config_path)?
            } else {
                info!(
                    "No config file at {:?}, using defaults and environment",
                    config_path
                );
                load_config_from_env().context("Failed to load config from environment")?
            }
        }
    };

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    let catalog: Arc<dyn CardCatalog> =
        Arc::new(PokemonTcgClient::new(&config.catalog).context("Failed to create catalog client")?);
    info!("Using catalog: {}", catalog.name());

    let mut state = AppState::new(config, catalog);
    info!(
        "Configuration: {}",
        serde_json::to_string(&state.sanitized_config()).unwrap_or_default()
    );

    // Print every newly applied result set
    let mut results_rx = state.controller().subscribe();
    let renderer = tokio::spawn(async move {
        while results_rx.changed().await.is_ok() {
            let snapshot = results_rx.borrow_and_update().clone();
            println!("{}", view::render_results(&snapshot));
        }
    });

    println!("{}", HELP);

    state.start();

    // Raw bytes: a line that is not UTF-8 is decoded lossily, not fatal.
    let mut stdin = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            read = stdin.read_until(b'\n', &mut buf) => {
                if read.context("Failed to read input")? == 0 {
                    info!("Input closed");
                    break;
                }
                let line = String::from_utf8_lossy(&buf).into_owned();
                buf.clear();
                if line.contains(char::REPLACEMENT_CHARACTER) {
                    warn!("Input line was not valid UTF-8; invalid bytes replaced");
                }
                match state.handle(commands::parse(&line)) {
                    Reply::Silent => {}
                    Reply::Print(text) => println!("{}", text),
                    Reply::Quit => break,
                }
            }
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    state.shutdown();
    renderer.abort();
    info!("Goodbye");

    Ok(())
}

fn load_file_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from {:?}", config_path);
    load_config(config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
