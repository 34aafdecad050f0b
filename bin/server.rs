// SIN Parser - Web Server
// REST API over the decoder with Axum

use anyhow::{Context, Result};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use sin_parser::{Decoder, ParsedIdentity, RegionCategory, Settings};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Shared application state
///
/// The region table never changes after startup, so no lock is needed.
#[derive(Clone)]
struct AppState {
    decoder: Arc<Decoder>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Region table summary
#[derive(Serialize)]
struct RegionStats {
    digest: String,
    provinces: usize,
    cities: usize,
    districts: usize,
    tier: String,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/parse/:sin - Decode one number
async fn parse_sin(State(state): State<AppState>, Path(sin): Path<String>) -> impl IntoResponse {
    match state.decoder.parse(&sin) {
        Ok(identity) => (StatusCode::OK, Json(ApiResponse::ok(identity))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "decode failed");
            (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<ParsedIdentity>::err(e.to_string())),
            )
                .into_response()
        }
    }
}

/// GET /api/regions - Which reference table is loaded
async fn region_stats(State(state): State<AppState>) -> impl IntoResponse {
    let table = state.decoder.table();

    Json(ApiResponse::ok(RegionStats {
        digest: table.digest().to_string(),
        provinces: table.len(RegionCategory::Province),
        cities: table.len(RegionCategory::City),
        districts: table.len(RegionCategory::District),
        tier: state.decoder.tier().to_string(),
    }))
}

fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/parse/:sin", get(parse_sin))
        .route("/regions", get(region_stats))
        .with_state(state);

    Router::new().nest("/api", api_routes).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    )
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env();
    let decoder = settings.build_decoder()?;

    let state = AppState {
        decoder: Arc::new(decoder),
    };

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", settings.bind_addr))?;

    tracing::info!(
        addr = %settings.bind_addr,
        tier = %settings.tier,
        "🚀 server running, try GET /api/parse/<SIN>"
    );

    axum::serve(listener, app(state))
        .await
        .context("server stopped")?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
