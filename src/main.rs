use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use retail_pos_api::config::{init_tracing, load_config};
use retail_pos_api::db::{establish_connection_from_app_config, run_migrations};
use retail_pos_api::events::{channel, process_events};
use retail_pos_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("Failed to load configuration")?;
    init_tracing(&config.log_level);
    info!(environment = %config.environment, "starting retail-pos-api");

    let db = Arc::new(
        establish_connection_from_app_config(&config)
            .await
            .context("Failed to connect to database")?,
    );
    if config.auto_migrate {
        run_migrations(db.as_ref())
            .await
            .context("Failed to run migrations")?;
        info!("migrations applied");
    }

    let (event_sender, event_receiver) = channel(1024);
    tokio::spawn(process_events(event_receiver));

    let state = AppState::new(db, config.clone(), event_sender);

    spawn_hold_invoice_purger(&state);

    let cors = cors_layer(config.cors_allowed_origins.as_deref())?;
    let router = app(state)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

/// Periodically deletes hold invoices past their TTL.
fn spawn_hold_invoice_purger(state: &AppState) {
    let invoices = state.services.invoices.clone();
    let interval = Duration::from_secs(state.config.hold_invoice_purge_interval_secs);
    let ttl_hours = state.config.hold_invoice_ttl_hours;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(e) = invoices.purge_expired_hold_invoices(ttl_hours).await {
                error!(error = %e, "hold invoice purge failed");
            }
        }
    });
}

fn cors_layer(allowed_origins: Option<&str>) -> anyhow::Result<CorsLayer> {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
        ])
        .allow_headers(Any);

    let origins: Vec<&str> = allowed_origins
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .collect()
        })
        .unwrap_or_default();
    if origins.is_empty() || origins.contains(&"*") {
        return Ok(layer.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin {}", origin))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(layer.allow_origin(origins))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install ctrl-c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!(error = %e, "failed to install terminate handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
