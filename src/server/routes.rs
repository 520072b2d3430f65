//! Route handlers for the four dashboard screens

use crate::error::{EsgError, Result};
use crate::ingest;
use crate::server::state::AppState;
use crate::types::{AnalysisResult, NewsSentiment};
use crate::universe::{self, PerformerEntry};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

// ---- Market overview ----

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompanyView {
    #[serde(flatten)]
    pub(crate) profile: crate::types::CompanyEsgProfile,
    pub(crate) average_score: i64,
    pub(crate) rating_color: &'static str,
}

pub(crate) async fn list_companies(State(state): State<Arc<AppState>>) -> Json<Vec<CompanyView>> {
    let companies = state
        .companies
        .iter()
        .map(|profile| CompanyView {
            average_score: profile.average_score(),
            rating_color: profile.overall_rating.color(),
            profile: profile.clone(),
        })
        .collect();
    Json(companies)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OverviewResponse {
    pub(crate) companies_tracked: usize,
    /// Mean of per-company average scores, one decimal.
    pub(crate) market_average: f64,
    pub(crate) active_alerts: usize,
    pub(crate) industries: Vec<&'static str>,
    pub(crate) top_performers: Vec<PerformerEntry>,
}

pub(crate) async fn market_overview(State(state): State<Arc<AppState>>) -> Json<OverviewResponse> {
    let companies = &state.companies;
    let market_average = if companies.is_empty() {
        0.0
    } else {
        let total: i64 = companies.iter().map(|c| c.average_score()).sum();
        (total as f64 / companies.len() as f64 * 10.0).round() / 10.0
    };
    let seeded_news: usize = companies.iter().map(|c| c.news_feed.len()).sum();

    Json(OverviewResponse {
        companies_tracked: companies.len(),
        market_average,
        active_alerts: seeded_news + state.alerts().len(),
        industries: universe::INDUSTRIES.to_vec(),
        top_performers: universe::top_performers(companies, 5),
    })
}

// ---- Report analysis ----

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    /// Pasted report text.
    #[serde(default)]
    pub(crate) text: Option<String>,
    /// Uploaded file, takes precedence over pasted text.
    #[serde(default)]
    pub(crate) file: Option<UploadedFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadedFile {
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnalyzeResponse {
    #[serde(flatten)]
    pub(crate) result: AnalysisResult,
    pub(crate) average_score: i64,
    pub(crate) rating_color: &'static str,
}

pub(crate) async fn analyze_report(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    // Input checks happen before the scoring slot is claimed and
    // before any network call.
    let content = match payload.file {
        Some(file) => ingest::extract_text(&file.name, file.content.as_bytes(), state.max_upload_bytes)?,
        None => match payload.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(EsgError::EmptyInput("report text")),
        },
    };

    let ticket = state.begin_analysis()?;
    tracing::info!(chars = content.len(), "submitting report for scoring");
    let result = state.scorer.analyze_report(&content).await?;
    drop(ticket);

    state.store_analysis(result.clone());

    Ok(Json(AnalyzeResponse {
        average_score: result.scores.average(),
        rating_color: result.suggested_rating.color(),
        result,
    }))
}

pub(crate) async fn latest_analysis(
    State(state): State<Arc<AppState>>,
) -> Json<Option<AnalysisResult>> {
    Json(state.latest_analysis())
}

// ---- Risk monitor ----

#[derive(Debug, Deserialize)]
pub(crate) struct CreateAlertRequest {
    pub(crate) title: String,
    pub(crate) summary: String,
}

pub(crate) async fn list_alerts(State(state): State<Arc<AppState>>) -> Json<Vec<NewsSentiment>> {
    Json(state.alerts())
}

pub(crate) async fn create_alert(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateAlertRequest>,
) -> Result<(StatusCode, Json<NewsSentiment>)> {
    if payload.title.trim().is_empty() {
        return Err(EsgError::EmptyInput("news title"));
    }
    if payload.summary.trim().is_empty() {
        return Err(EsgError::EmptyInput("news summary"));
    }

    let impact = state
        .scorer
        .score_news_impact(&payload.title, &payload.summary)
        .await?;

    let alert = NewsSentiment {
        id: uuid::Uuid::new_v4().to_string(),
        title: payload.title,
        summary: payload.summary,
        dimension: impact.dimension,
        impact_score: impact.impact,
        source: "AI Manual Entry".to_string(),
        date: chrono::Utc::now().date_naive(),
    };

    tracing::info!(
        dimension = %alert.dimension,
        impact = alert.impact_score,
        "news item scored"
    );
    state.push_alert(alert.clone());

    Ok((StatusCode::CREATED, Json(alert)))
}

pub(crate) async fn remove_alert(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.remove_alert(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- Portfolio (stub screen) ----

pub(crate) async fn portfolio_stub() -> Json<serde_json::Value> {
    Json(json!({
        "status": "coming_soon",
        "message": "Portfolio aggregation for institutional investors is under construction."
    }))
}
