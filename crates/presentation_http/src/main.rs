//! Nowcast HTTP Server
//!
//! Main entry point for the weather display server.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{StateCache, SystemClock, WeatherDisplayService, WeatherTransformer};
use infrastructure::{
    AppConfig, ResolvedWeatherSettings, TemplateEngine, WeatherSourceAdapter, init_telemetry,
};
use presentation_http::{routes, set_expose_internal_errors, state::AppState};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_telemetry(&config.telemetry).context("Failed to initialize logging")?;

    info!("Nowcast v{} starting...", env!("CARGO_PKG_VERSION"));

    let weather = config.validate().context("Invalid configuration")?;
    if !weather.has_api_key() {
        warn!("No weather API key configured, live views will fail until one is set");
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        units = %weather.units.as_str(),
        timezone = %weather.timezone,
        max_age_secs = weather.max_age.as_secs(),
        fixture = %weather.fixture_path.display(),
        "Configuration loaded"
    );

    set_expose_internal_errors(config.server.expose_internal_errors);

    let addr = config.server.socket_addr()?;
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);

    let state = build_state(config, &weather)?;
    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{}", addr);

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => {
            joined??;
            return Ok(());
        }
        () = shutdown_signal() => {}
    }

    let _ = stop_tx.send(());
    info!("Waiting up to {:?} for connections to close...", shutdown_timeout);

    match tokio::time::timeout(shutdown_timeout, server).await {
        Ok(joined) => joined??,
        Err(_) => warn!("Connections still open after {:?}, exiting", shutdown_timeout),
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wire the weather sources, cache and templates into the shared state
fn build_state(config: AppConfig, weather: &ResolvedWeatherSettings) -> anyhow::Result<AppState> {
    let live = WeatherSourceAdapter::live(&weather.to_client_config())
        .context("Failed to initialize weather client")?;
    let fixture = WeatherSourceAdapter::fixture(&weather.fixture_path);

    let cache = StateCache::new(
        WeatherTransformer::new(weather.timezone),
        Arc::new(SystemClock),
    );
    let service =
        WeatherDisplayService::new(Arc::new(cache), Arc::new(live), Arc::new(fixture))
            .with_max_age(weather.max_age);

    let templates = TemplateEngine::new().context("Failed to load templates")?;

    Ok(AppState {
        weather: Arc::new(service),
        templates,
        config: Arc::new(config),
        units: weather.units,
    })
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
