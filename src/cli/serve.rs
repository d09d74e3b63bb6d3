//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{LogFormat, ReviewgateConfig};
use crate::store::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// How long shutdown waits for in-flight cursor writes
const CURSOR_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(
    args: &ServeArgs,
) -> Result<ReviewgateConfig, Box<dyn std::error::Error>> {
    let mut config = if args.config.exists() {
        ReviewgateConfig::load(Some(&args.config))?
    } else {
        tracing::debug!(path = %args.config.display(), "Config file not found, using defaults");
        ReviewgateConfig::default()
    };

    config = config.with_env_overrides();

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if let Some(ref base_url) = args.base_url {
        config.app.base_url = base_url.clone();
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    if config.log_feedback_content {
        eprintln!("WARNING: Feedback content logging is enabled.");
        eprintln!("         Customer names, emails and messages will appear in the logs.");
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Seed the store with the businesses declared in configuration
pub fn load_businesses_from_config(
    config: &ReviewgateConfig,
    store: &Store,
) -> Result<(), Box<dyn std::error::Error>> {
    for business_config in &config.businesses {
        let business = business_config.to_business();
        let active = business.active_platform_count();
        store.insert_business(business)?;
        tracing::info!(
            name = %business_config.name,
            slug = %business_config.slug,
            platforms = business_config.platforms.len(),
            active,
            "Loaded business from config"
        );
    }

    Ok(())
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {}
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    init_tracing(&config.logging)?;

    tracing::info!("Starting reviewgate server");
    tracing::debug!(?config, "Loaded configuration");

    let store = Arc::new(Store::new());
    load_businesses_from_config(&config, &store)?;

    let addr = config.server.bind_addr();
    let cursor_write = config.routing.cursor_write;
    let app_state = Arc::new(AppState::new(Arc::clone(&store), Arc::new(config)));
    let app = create_router(Arc::clone(&app_state));

    let cancel_token = CancellationToken::new();

    tracing::info!(addr = %addr, cursor_write = %cursor_write, "reviewgate listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token.clone()))
        .await?;

    tracing::info!("Waiting for pending cursor writes");
    if tokio::time::timeout(CURSOR_FLUSH_TIMEOUT, app_state.selector.flush())
        .await
        .is_err()
    {
        tracing::warn!("Timed out waiting for cursor writes");
    }

    tracing::info!("reviewgate server stopped");
    Ok(())
}
