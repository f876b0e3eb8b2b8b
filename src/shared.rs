use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, warn};

use crate::config::AppConfig;
use crate::duo::{self, DuoError, DuoRepository};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub duo_repository: Arc<dyn DuoRepository>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(duo_repository: Arc<dyn DuoRepository>, config: AppConfig) -> Self {
        Self {
            duo_repository,
            config: Arc::new(config),
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<DuoError> for AppError {
    fn from(err: DuoError) -> Self {
        match err {
            DuoError::Validation(_) => AppError::BadRequest(err.to_string()),
            DuoError::UnknownDuo(ref duo_id) | DuoError::DuoNotFound(ref duo_id) => {
                warn!(duo_id = %duo_id, "Unknown duo requested");
                AppError::NotFound(err.to_string())
            }
            DuoError::Repository(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(msg) => {
                error!(error = %msg, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

/// CORS restricted to the configured origins.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "ok": true }))
}

async fn not_found() -> AppError {
    AppError::NotFound("Not found.".to_string())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/duo/matches", post(duo::ingest_matches))
        .route("/api/duo/events/batch", post(duo::ingest_events))
        .route("/api/duo/journal", post(duo::record_journal))
        .route("/api/duo/scorecard", get(duo::scorecard))
        .route("/api/duo/playbook", get(duo::playbook))
        .route("/api/duo/highlights", get(duo::highlights))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub mod test_utils {
    use super::*;
    use crate::duo::InMemoryDuoRepository;

    /// Builder for creating test AppState with sensible defaults
    pub struct AppStateBuilder {
        duo_repository: Option<Arc<dyn DuoRepository>>,
        config: AppConfig,
    }

    impl Default for AppStateBuilder {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AppStateBuilder {
        pub fn new() -> Self {
            Self {
                duo_repository: None,
                config: AppConfig::default(),
            }
        }

        pub fn with_duo_repository(mut self, repo: Arc<dyn DuoRepository>) -> Self {
            self.duo_repository = Some(repo);
            self
        }

        pub fn with_config(mut self, config: AppConfig) -> Self {
            self.config = config;
            self
        }

        pub fn build(self) -> AppState {
            let config = self.config;
            let duo_repository = self.duo_repository.unwrap_or_else(|| {
                Arc::new(InMemoryDuoRepository::with_limits(config.retention))
            });
            AppState::new(duo_repository, config)
        }
    }
}
