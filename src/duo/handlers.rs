use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    service::DuoService,
    types::{
        DuoReportQuery, EventBatchRequest, EventBatchResponse, HighlightsResponse,
        JournalRequest, JournalResponse, MatchBatchRequest, MatchBatchResponse, PlaybookResponse,
        ScorecardResponse,
    },
};
use crate::shared::{AppError, AppState};

fn duo_service(state: &AppState) -> DuoService {
    DuoService::new(
        Arc::clone(&state.duo_repository),
        state.config.default_window_days,
    )
}

/// POST /api/duo/matches
#[instrument(name = "ingest_matches", skip(state, request))]
pub async fn ingest_matches(
    State(state): State<AppState>,
    Json(request): Json<MatchBatchRequest>,
) -> Result<Json<MatchBatchResponse>, AppError> {
    info!(match_count = request.matches.len(), "Ingesting duo matches");
    let response = duo_service(&state).ingest_matches(request).await?;
    Ok(Json(response))
}

/// POST /api/duo/events/batch
#[instrument(name = "ingest_events", skip(state, request))]
pub async fn ingest_events(
    State(state): State<AppState>,
    Json(request): Json<EventBatchRequest>,
) -> Result<Json<EventBatchResponse>, AppError> {
    let response = duo_service(&state).ingest_events(request).await?;
    info!(inserted = response.inserted, total_events = response.total_events, "Events ingested");
    Ok(Json(response))
}

/// POST /api/duo/journal
#[instrument(name = "record_journal", skip(state, request))]
pub async fn record_journal(
    State(state): State<AppState>,
    Json(request): Json<JournalRequest>,
) -> Result<Json<JournalResponse>, AppError> {
    let response = duo_service(&state).record_journal(request).await?;
    Ok(Json(response))
}

/// GET /api/duo/scorecard?duoId=..&windowDays=..
#[instrument(name = "duo_scorecard", skip(state))]
pub async fn scorecard(
    State(state): State<AppState>,
    Query(query): Query<DuoReportQuery>,
) -> Result<Json<ScorecardResponse>, AppError> {
    let response = duo_service(&state).scorecard(query).await?;
    info!(
        duo_id = %response.duo_id,
        match_count = response.match_count,
        event_count = response.event_count,
        "Scorecard built"
    );
    Ok(Json(response))
}

/// GET /api/duo/playbook?duoId=..&windowDays=..
#[instrument(name = "duo_playbook", skip(state))]
pub async fn playbook(
    State(state): State<AppState>,
    Query(query): Query<DuoReportQuery>,
) -> Result<Json<PlaybookResponse>, AppError> {
    let response = duo_service(&state).playbook(query).await?;
    Ok(Json(response))
}

/// GET /api/duo/highlights?duoId=..&windowDays=..
#[instrument(name = "duo_highlights", skip(state))]
pub async fn highlights(
    State(state): State<AppState>,
    Query(query): Query<DuoReportQuery>,
) -> Result<Json<HighlightsResponse>, AppError> {
    let response = duo_service(&state).highlights(query).await?;
    Ok(Json(response))
}
