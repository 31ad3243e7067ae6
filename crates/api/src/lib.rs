//! # Slotwise API
//!
//! The API crate provides the web server for the Slotwise consultation
//! service. Sellers publish availability as fixed-length slots, buyers book
//! them, and both sides list their bookings.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Translate requests into calls on [`ConsultationService`]
//! - **Middleware**: Caller identity and error-to-status mapping
//! - **Config**: Environment configuration
//!
//! Storage is chosen by the binary; the API only sees the service.

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Caller identity and error mapping
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderName, HeaderValue, Method, StatusCode, header},
};
use eyre::{Result, WrapErr};
use serde_json::{Value, json};
use slotwise_core::service::ConsultationService;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use crate::middleware::auth::USER_ID_HEADER;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use slotwise_api::{ApiState, build_router};
/// use slotwise_core::{service::ConsultationService, slots::ConsultationDuration, store::memory::InMemoryStore};
///
/// let service = ConsultationService::new(Arc::new(InMemoryStore::new()), ConsultationDuration::default());
/// let app = build_router(Arc::new(ApiState { service }));
/// # let _ = app;
/// ```
pub struct ApiState {
    pub service: ConsultationService,
}

/// Installs the global tracing subscriber at the given level.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the application router with every endpoint attached to `state`.
pub fn build_router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Seller availability and slots
        .merge(routes::availability::routes())
        // Booking lifecycle and listings
        .merge(routes::booking::routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .wrap_err_with(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .allow_origin(origins)
        .allow_credentials(true))
}

async fn handle_timeout(err: BoxError) -> (StatusCode, Json<Value>) {
    if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            Json(json!({ "error": "Request timed out" })),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Unhandled internal error: {}", err) })),
        )
    }
}

/// Starts the API server with the provided configuration and service
///
/// # Arguments
///
/// * `config` - API configuration including host, port, and other settings
/// * `service` - Consultation service backed by the configured store
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use slotwise_api::{config::ApiConfig, start_server};
/// # use slotwise_core::{service::ConsultationService, store::memory::InMemoryStore};
/// # async fn run() -> eyre::Result<()> {
/// let config = ApiConfig::from_env()?;
/// let service = ConsultationService::new(Arc::new(InMemoryStore::new()), config.default_duration);
/// start_server(config, service).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, service: ConsultationService) -> Result<()> {
    let state = Arc::new(ApiState { service });
    let app = build_router(state).layer(TraceLayer::new_for_http());

    // Apply CORS configuration if origins are specified
    let app = match &config.cors_origins {
        Some(origins) => app.layer(cors_layer(origins)?),
        None => app,
    };

    // Add request timeout middleware
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_timeout))
            .timeout(Duration::from_secs(config.request_timeout))
            .into_inner(),
    );

    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
