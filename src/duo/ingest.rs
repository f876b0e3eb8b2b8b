//! Normalization of client-submitted events and journal entries.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use uuid::Uuid;

use super::models::JournalEntry;
use crate::analytics::lenient;
use crate::analytics::models::{Event, EventKind};

pub const MAX_JOURNAL_TAGS: usize = 8;
/// Stage at which the duo commits to a plan; journal events are pinned here.
pub const JOURNAL_STAGE: &str = "3.2";

/// Splits `"3-2"` or `"3.2"` into major and minor stage numbers.
pub fn parse_stage(raw: &str) -> (Option<i64>, Option<i64>) {
    let mut parts = raw.trim().split(['-', '.']);
    let major = parts.next().and_then(|p| p.trim().parse::<i64>().ok());
    let minor = parts.next().and_then(|p| p.trim().parse::<i64>().ok());
    (major, minor)
}

fn stage_number(raw: &Map<String, Value>, name: &str, parsed: Option<i64>) -> Option<i64> {
    match raw.get(name).filter(|value| !value.is_null()) {
        Some(value) => lenient::as_int(value),
        None => parsed,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Keeps truthy slot markers, anything falsy becomes `null`.
fn slot(raw: &Map<String, Value>, name: &str) -> Value {
    match raw.get(name) {
        Some(value) if lenient::is_truthy(value) => value.clone(),
        _ => Value::Null,
    }
}

/// Builds the stored shape of one submitted event, or `None` if it has no
/// usable `type`.
pub fn normalize_event(
    raw: &Value,
    fallback_match_id: Option<&str>,
    now: DateTime<Utc>,
) -> Option<Event> {
    let raw = raw.as_object()?;
    let kind = non_empty_str(raw.get("type"))?;

    let (parsed_major, parsed_minor) = raw
        .get("stage")
        .and_then(Value::as_str)
        .map(parse_stage)
        .unwrap_or_default();
    let stage_major = stage_number(raw, "stageMajor", parsed_major);
    let stage_minor = stage_number(raw, "stageMinor", parsed_minor);

    let match_id = non_empty_str(raw.get("matchId")).or(fallback_match_id);
    let payload = match raw.get("payload") {
        Some(Value::Object(payload)) => Value::Object(payload.clone()),
        _ => Value::Object(Map::new()),
    };

    let mut fields = Map::new();
    fields.insert("id".to_string(), json!(Uuid::new_v4().to_string()));
    fields.insert("type".to_string(), json!(kind));
    fields.insert("matchId".to_string(), json!(match_id));
    fields.insert("stageMajor".to_string(), json!(stage_major));
    fields.insert("stageMinor".to_string(), json!(stage_minor));
    fields.insert("actorSlot".to_string(), slot(raw, "actorSlot"));
    fields.insert("targetSlot".to_string(), slot(raw, "targetSlot"));
    fields.insert("payload".to_string(), payload);
    fields.insert("createdAt".to_string(), json!(now.timestamp_millis()));
    if let (Some(major), Some(minor)) = (stage_major, stage_minor) {
        fields.insert("stage".to_string(), json!(format!("{}.{}", major, minor)));
    }

    Some(Event::from_fields(fields))
}

/// Trimmed, non-empty tags, capped at [`MAX_JOURNAL_TAGS`].
pub fn normalize_tags(raw: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(tags)) = raw else {
        return Vec::new();
    };
    tags.iter()
        .filter_map(|tag| match tag {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .filter(|tag| !tag.is_empty())
        .take(MAX_JOURNAL_TAGS)
        .collect()
}

/// The intent event plus one mistake-tag event per journal tag.
pub fn journal_events(entry: &JournalEntry, now: DateTime<Utc>) -> Vec<Event> {
    let match_id = entry.match_id.as_deref();
    let intent = json!({
        "type": EventKind::IntentTag.as_ref(),
        "matchId": match_id,
        "stage": JOURNAL_STAGE,
        "payload": {
            "planAt32": entry.plan_at32,
            "executed": entry.executed,
            "tags": entry.tags,
        },
    });

    std::iter::once(intent)
        .chain(entry.tags.iter().map(|tag| {
            json!({
                "type": EventKind::MistakeTag.as_ref(),
                "matchId": match_id,
                "stage": JOURNAL_STAGE,
                "payload": { "tag": tag },
            })
        }))
        .filter_map(|raw| normalize_event(&raw, match_id, now))
        .collect()
}
