//! mikrodeny - failed-login deny list service.

use mikrodeny::config::{Config, LogFormat, validation};
use mikrodeny::notify::{NoOpNotifier, NotificationQueue, Notifier, TelegramNotifier};
use mikrodeny::state::AppState;
use mikrodeny::{http, metrics};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Queue size used when no chat transport is configured.
const NOOP_QUEUE_SIZE: usize = 16;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        eprintln!("Failed to load config {config_path}: {e}");
        e
    })?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.server.log_format {
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }

    if let Err(errors) = validation::validate(&config) {
        for e in &errors {
            error!(path = %config_path, "Config error: {}", e);
        }
        return Err(anyhow::anyhow!(
            "Refusing to start with {} config error(s). See messages above.",
            errors.len()
        ));
    }

    info!(
        listen = %config.server.listen,
        users = config.users.len(),
        allowed = config.allow_list.addresses.len(),
        tiers = config.policy.tiers.len(),
        telegram = config.telegram.is_some(),
        "Starting mikrodeny"
    );

    if config.server.metrics {
        metrics::init();
        info!("Metrics initialized");
    } else {
        info!("Metrics disabled");
    }

    // Chat transport: a single worker drains the queue so ingestion never waits on it
    let (notifier, queue_size) = match &config.telegram {
        Some(telegram) => {
            let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(telegram));
            (notifier, telegram.queue_size)
        }
        None => {
            info!("Telegram not configured. Using NoOp notifier.");
            let notifier: Arc<dyn Notifier> = Arc::new(NoOpNotifier);
            (notifier, NOOP_QUEUE_SIZE)
        }
    };
    let (notifications, _worker) = NotificationQueue::spawn(notifier, queue_size);

    let state = Arc::new(AppState::new(&config, notifications));

    http::run_http_server(config.server.listen, state)
        .await
        .map_err(|e| {
            error!(addr = %config.server.listen, error = %e, "HTTP server failed");
            e
        })?;

    Ok(())
}
