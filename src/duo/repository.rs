use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use super::errors::DuoError;
use super::models::{stable_duo_id, DuoRecord, JournalEntry};
use crate::analytics::models::{Event, Match};
use crate::analytics::reports::PersonalizedPlaybook;

/// Per-duo retention caps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionLimits {
    pub max_matches: usize,
    pub max_events: usize,
    pub max_journals: usize,
}

impl Default for RetentionLimits {
    fn default() -> Self {
        Self {
            max_matches: 600,
            max_events: 6000,
            max_journals: 1000,
        }
    }
}

/// Result of storing a batch of matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub duo_id: String,
    /// Matches in the batch that carried an id.
    pub stored: usize,
    pub total_matches: usize,
}

/// Trait for duo record storage
#[async_trait]
pub trait DuoRepository: Send + Sync {
    /// Creates the duo record on first use, then stores matches keyed by id
    async fn upsert_matches(
        &self,
        player_a_puuid: &str,
        player_b_puuid: &str,
        matches: Vec<Match>,
        now_ms: i64,
    ) -> Result<UpsertOutcome, DuoError>;

    /// Appends events and returns the total retained
    async fn append_events(&self, duo_id: &str, events: Vec<Event>) -> Result<usize, DuoError>;

    /// Appends a journal entry with its derived events, returns the journals retained
    async fn append_journal(
        &self,
        duo_id: &str,
        entry: JournalEntry,
        events: Vec<Event>,
    ) -> Result<usize, DuoError>;

    async fn save_playbook_snapshot(
        &self,
        duo_id: &str,
        playbook: PersonalizedPlaybook,
    ) -> Result<(), DuoError>;

    async fn get_duo(&self, duo_id: &str) -> Result<Option<DuoRecord>, DuoError>;

    /// Cheap existence check that avoids cloning the record
    async fn contains_duo(&self, duo_id: &str) -> Result<bool, DuoError>;
}

/// In-memory implementation of DuoRepository
pub struct InMemoryDuoRepository {
    duos: RwLock<HashMap<String, DuoRecord>>,
    limits: RetentionLimits,
}

impl Default for InMemoryDuoRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDuoRepository {
    pub fn new() -> Self {
        Self::with_limits(RetentionLimits::default())
    }

    pub fn with_limits(limits: RetentionLimits) -> Self {
        Self {
            duos: RwLock::new(HashMap::new()),
            limits,
        }
    }
}

#[async_trait]
impl DuoRepository for InMemoryDuoRepository {
    #[instrument(skip(self, matches), fields(match_count = matches.len()))]
    async fn upsert_matches(
        &self,
        player_a_puuid: &str,
        player_b_puuid: &str,
        matches: Vec<Match>,
        now_ms: i64,
    ) -> Result<UpsertOutcome, DuoError> {
        let duo_id = stable_duo_id(player_a_puuid, player_b_puuid);
        let mut duos = self.duos.write().await;
        let record = duos.entry(duo_id.clone()).or_insert_with(|| {
            info!(duo_id = %duo_id, "Creating duo record");
            DuoRecord::new(player_a_puuid, player_b_puuid, now_ms)
        });

        let mut stored = 0;
        for m in matches {
            match m.id.clone() {
                Some(id) => {
                    record.matches_by_id.insert(id, m);
                    stored += 1;
                }
                None => warn!(duo_id = %duo_id, "Skipping match without id"),
            }
        }
        record.cap_matches(self.limits.max_matches);

        let total_matches = record.matches_by_id.len();
        debug!(duo_id = %duo_id, stored, total_matches, "Matches upserted");

        Ok(UpsertOutcome {
            duo_id,
            stored,
            total_matches,
        })
    }

    #[instrument(skip(self, events), fields(event_count = events.len()))]
    async fn append_events(&self, duo_id: &str, events: Vec<Event>) -> Result<usize, DuoError> {
        let mut duos = self.duos.write().await;
        let record = duos
            .get_mut(duo_id)
            .ok_or_else(|| DuoError::UnknownDuo(duo_id.to_string()))?;

        record.events.extend(events);
        record.cap_events(self.limits.max_events);

        debug!(duo_id = %duo_id, total_events = record.events.len(), "Events appended");
        Ok(record.events.len())
    }

    #[instrument(skip(self, entry, events), fields(journal_id = %entry.id))]
    async fn append_journal(
        &self,
        duo_id: &str,
        entry: JournalEntry,
        events: Vec<Event>,
    ) -> Result<usize, DuoError> {
        let mut duos = self.duos.write().await;
        let record = duos
            .get_mut(duo_id)
            .ok_or_else(|| DuoError::UnknownDuo(duo_id.to_string()))?;

        record.journals.push(entry);
        record.cap_journals(self.limits.max_journals);
        record.events.extend(events);
        record.cap_events(self.limits.max_events);

        debug!(
            duo_id = %duo_id,
            total_journals = record.journals.len(),
            total_events = record.events.len(),
            "Journal appended"
        );
        Ok(record.journals.len())
    }

    #[instrument(skip(self, playbook))]
    async fn save_playbook_snapshot(
        &self,
        duo_id: &str,
        playbook: PersonalizedPlaybook,
    ) -> Result<(), DuoError> {
        let mut duos = self.duos.write().await;
        let record = duos
            .get_mut(duo_id)
            .ok_or_else(|| DuoError::UnknownDuo(duo_id.to_string()))?;
        record.playbook_snapshot = Some(playbook);

        debug!(duo_id = %duo_id, "Playbook snapshot saved");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_duo(&self, duo_id: &str) -> Result<Option<DuoRecord>, DuoError> {
        let duos = self.duos.read().await;
        let record = duos.get(duo_id).cloned();

        match &record {
            Some(r) => debug!(duo_id = %duo_id, matches = r.matches_by_id.len(), events = r.events.len(), "Duo found"),
            None => debug!(duo_id = %duo_id, "Duo not found"),
        }

        Ok(record)
    }

    #[instrument(skip(self))]
    async fn contains_duo(&self, duo_id: &str) -> Result<bool, DuoError> {
        Ok(self.duos.read().await.contains_key(duo_id))
    }
}
