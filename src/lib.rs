//! Retail point of sale and inventory backend.
//!
//! Tracks individual products from purchase through sale, return and
//! transfer across showrooms, with invoicing and role scoped accounts.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use serde::Serialize;

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod services;

use config::AppConfig;
use events::EventSender;
use services::AppServices;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
    pub services: AppServices,
    pub event_sender: EventSender,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: AppConfig, event_sender: EventSender) -> Self {
        let services = AppServices::new(db.clone(), &config, event_sender.clone());
        Self {
            db,
            config: Arc::new(config),
            services,
            event_sender,
        }
    }
}

/// Standard response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    database: &'static str,
    version: &'static str,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthStatus> {
    let database = match db::check_connection(state.db.as_ref()).await {
        Ok(()) => "up",
        Err(_) => "down",
    };
    Json(HealthStatus {
        status: "ok",
        database,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", handlers::api_v1_routes(state.clone()))
        .with_state(state)
}
