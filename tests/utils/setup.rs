use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use duoscope::{
    duo::DuoRecord,
    router,
    shared::test_utils::AppStateBuilder,
    stable_duo_id, AppConfig, DuoRepository, InMemoryDuoRepository, RetentionLimits,
};

use super::match_builders::MatchBuilder;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub const PLAYER_A: &str = "puuid-alice";
pub const PLAYER_B: &str = "puuid-bob";

pub struct TestSetup {
    pub app: Router,
    pub repository: Arc<InMemoryDuoRepository>,
    pub duo_id: String,
}

pub struct TestSetupBuilder {
    limits: RetentionLimits,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            limits: RetentionLimits::default(),
        }
    }

    pub fn with_max_events(mut self, max_events: usize) -> Self {
        self.limits.max_events = max_events;
        self
    }

    pub fn build(self) -> TestSetup {
        let repository = Arc::new(InMemoryDuoRepository::with_limits(self.limits));
        let state = AppStateBuilder::new()
            .with_duo_repository(repository.clone() as Arc<dyn DuoRepository>)
            .with_config(AppConfig {
                retention: self.limits,
                ..AppConfig::default()
            })
            .build();

        TestSetup {
            app: router(state),
            repository,
            duo_id: stable_duo_id(PLAYER_A, PLAYER_B),
        }
    }
}

impl TestSetup {
    pub async fn get_duo(&self) -> DuoRecord {
        self.repository
            .get_duo(&self.duo_id)
            .await
            .unwrap()
            .expect("duo should exist")
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, value)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn submit_matches(&self, matches: &[MatchBuilder]) -> (StatusCode, Value) {
        let matches: Vec<Value> = matches.iter().map(MatchBuilder::build).collect();
        self.post(
            "/api/duo/matches",
            json!({"playerAPuuid": PLAYER_A, "playerBPuuid": PLAYER_B, "matches": matches}),
        )
        .await
    }

    pub async fn submit_events(&self, match_id: Option<&str>, events: Value) -> (StatusCode, Value) {
        self.post(
            "/api/duo/events/batch",
            json!({"duoId": self.duo_id, "matchId": match_id, "events": events}),
        )
        .await
    }

    pub async fn submit_journal(&self, body: Value) -> (StatusCode, Value) {
        let mut body = body;
        body["duoId"] = json!(self.duo_id);
        self.post("/api/duo/journal", body).await
    }

    pub async fn report(&self, endpoint: &str, window_days: Option<i64>) -> (StatusCode, Value) {
        let uri = match window_days {
            Some(days) => format!("/api/duo/{}?duoId={}&windowDays={}", endpoint, self.duo_id, days),
            None => format!("/api/duo/{}?duoId={}", endpoint, self.duo_id),
        };
        self.get(&uri).await
    }
}
