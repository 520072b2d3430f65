//! Dashboard HTTP surface
//!
//! Serves the market overview, report analysis, risk monitor and
//! portfolio stub as JSON route groups over one shared in-memory
//! state.


pub mod routes;
pub mod state;

pub use state::AppState;

use crate::config::Config;
use crate::error::EsgError;
use crate::scoring::EsgScorer;
use crate::universe;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

impl IntoResponse for EsgError {
    fn into_response(self) -> Response {
        let status = match &self {
            EsgError::UnsupportedFile(_) | EsgError::UploadTooLarge { .. } => {
                StatusCode::BAD_REQUEST
            }
            EsgError::EmptyInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EsgError::AnalysisInFlight => StatusCode::CONFLICT,
            EsgError::AlertNotFound(_) => StatusCode::NOT_FOUND,
            EsgError::Scoring(_)
            | EsgError::Network(_)
            | EsgError::Json(_)
            | EsgError::InvalidResponse(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if status == StatusCode::BAD_GATEWAY {
            // Diagnostic detail stays in the log; the client gets one
            // undifferentiated failure message.
            tracing::error!(error = %self, "scoring call failed");
            "Analysis failed. Please try again or check your data format.".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::healthcheck))
        .route("/api/v1/companies", get(routes::list_companies))
        .route("/api/v1/overview", get(routes::market_overview))
        .route(
            "/api/v1/analysis",
            post(routes::analyze_report).get(routes::latest_analysis),
        )
        .route(
            "/api/v1/alerts",
            get(routes::list_alerts).post(routes::create_alert),
        )
        .route("/api/v1/alerts/:id", delete(routes::remove_alert))
        .route("/api/v1/portfolio", get(routes::portfolio_stub))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn run(config: &Config, scorer: Arc<dyn EsgScorer>) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(
        scorer,
        universe::seed_companies(),
        config.ingest.max_upload_bytes,
    ));

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, scorer = state.scorer.name(), "ESG dashboard ready");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
