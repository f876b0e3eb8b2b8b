use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};

use super::lenient;

/// Placement assumed when a participant has none recorded (last place).
pub const DEFAULT_PLACEMENT: i64 = 8;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub patch: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub set_number: Option<i64>,
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "lenient::int")]
    pub game_datetime: i64,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub player_a: Participant,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub player_b: Participant,
    #[serde(default, deserialize_with = "lenient::truthy")]
    pub same_team: bool,
}

impl Match {
    /// The worse of the two placements.
    pub fn duo_placement(&self) -> i64 {
        self.player_a.placement().max(self.player_b.placement())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(default, deserialize_with = "lenient::opt_int")]
    pub placement: Option<i64>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub units: Vec<Unit>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub level: i64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_damage_to_players: f64,
    #[serde(default, deserialize_with = "lenient::list")]
    pub traits: Vec<Trait>,
}

impl Participant {
    pub fn placement(&self) -> i64 {
        match self.placement {
            Some(placement) if placement != 0 => placement,
            _ => DEFAULT_PLACEMENT,
        }
    }

    pub fn three_star_count(&self) -> usize {
        self.units.iter().filter(|unit| unit.tier >= 3).count()
    }

    pub fn item_count(&self) -> usize {
        self.units.iter().map(|unit| unit.items.len()).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(default, deserialize_with = "lenient::int")]
    pub tier: i64,
    /// Item identity is irrelevant to scoring, only the count is read.
    #[serde(default, deserialize_with = "lenient::list")]
    pub items: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trait {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub style: i64,
    #[serde(default, deserialize_with = "lenient::int")]
    pub num_units: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum EventKind {
    GiftSent,
    RescueArrival,
    MissedBailout,
    RollDown,
    CommsSnapshot,
    IntentTag,
    MistakeTag,
}

/// Freeform coaching tags that the grader reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum CoachingTag {
    PanicRoll,
    MissedGift,
}

/// One entry of the append-only event log.
///
/// Two shapes are stored side by side: legacy events with every field
/// flattened onto the record, and newer events that nest details under
/// `payload`. Every field read goes through [`Event::field`], which checks
/// the top level first and then the payload. A `null` at either level
/// counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event {
    fields: Map<String, Value>,
}

impl Event {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Raw `type` value. Only the top level is consulted.
    pub fn kind_name(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<EventKind> {
        self.kind_name().and_then(|name| EventKind::from_str(name).ok())
    }

    pub fn is(&self, kind: EventKind) -> bool {
        self.kind() == Some(kind)
    }

    /// A top-level `null` does not shadow the payload value. This differs
    /// from plain key-presence precedence, where a present `null` would win.
    pub fn field(&self, name: &str) -> Option<&Value> {
        if let Some(value) = self.fields.get(name).filter(|value| !value.is_null()) {
            return Some(value);
        }
        self.fields
            .get("payload")
            .and_then(Value::as_object)
            .and_then(|payload| payload.get(name))
            .filter(|value| !value.is_null())
    }

    pub fn int_field(&self, name: &str) -> Option<i64> {
        self.field(name).and_then(lenient::as_int)
    }

    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// True only for a literal boolean `true`.
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.field(name), Some(Value::Bool(true)))
    }

    pub fn tag(&self) -> Option<CoachingTag> {
        self.str_field("tag")
            .and_then(|tag| CoachingTag::from_str(tag).ok())
    }

    pub fn has_tag(&self, tag: CoachingTag) -> bool {
        self.tag() == Some(tag)
    }

    /// Store-owned metadata, always top level.
    pub fn match_id(&self) -> Option<&str> {
        self.fields.get("matchId").and_then(Value::as_str)
    }

    pub fn created_at(&self) -> i64 {
        self.fields
            .get("createdAt")
            .and_then(lenient::as_int)
            .unwrap_or_default()
    }
}

impl From<Value> for Event {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            _ => Self::default(),
        }
    }
}

/// Counts events of one kind.
pub fn count_kind(events: &[Event], kind: EventKind) -> usize {
    events.iter().filter(|event| event.is(kind)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn event(value: Value) -> Event {
        Event::from(value)
    }

    #[test]
    fn top_level_field_wins_over_payload() {
        let e = event(json!({"type": "gift_sent", "giftType": "unit", "payload": {"giftType": "item"}}));
        assert_eq!(e.str_field("giftType"), Some("unit"));
    }

    #[test]
    fn nested_payload_is_read_when_top_level_missing() {
        let e = event(json!({"type": "gift_sent", "payload": {"giftType": "item", "stageMajor": 4}}));
        assert_eq!(e.str_field("giftType"), Some("item"));
        assert_eq!(e.int_field("stageMajor"), Some(4));
    }

    #[test]
    fn null_top_level_falls_through_to_payload() {
        let e = event(json!({"type": "roll_down", "stageMajor": null, "payload": {"stageMajor": 3}}));
        assert_eq!(e.int_field("stageMajor"), Some(3));
    }

    #[test]
    fn missing_field_is_absent() {
        let e = event(json!({"type": "roll_down"}));
        assert_eq!(e.field("goldAfter"), None);
        assert!(!e.flag("teammateAtRisk"));
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!("true"), false)]
    #[case(json!(1), false)]
    fn flag_requires_literal_true(#[case] value: Value, #[case] expected: bool) {
        let e = event(json!({"type": "rescue_arrival", "payload": {"teammateAtRisk": value}}));
        assert_eq!(e.flag("teammateAtRisk"), expected);
    }

    #[rstest]
    #[case("gift_sent", Some(EventKind::GiftSent))]
    #[case("rescue_arrival", Some(EventKind::RescueArrival))]
    #[case("roll_down", Some(EventKind::RollDown))]
    #[case("comms_snapshot", Some(EventKind::CommsSnapshot))]
    #[case("augment_pick", None)]
    fn parses_event_kinds(#[case] name: &str, #[case] expected: Option<EventKind>) {
        assert_eq!(event(json!({"type": name})).kind(), expected);
    }

    #[test]
    fn kind_is_read_from_top_level_only() {
        let e = event(json!({"payload": {"type": "gift_sent"}}));
        assert_eq!(e.kind(), None);
    }

    #[test]
    fn tags_parse_from_payload() {
        let e = event(json!({"type": "mistake_tag", "payload": {"tag": "panic_roll"}}));
        assert!(e.has_tag(CoachingTag::PanicRoll));
        assert!(!e.has_tag(CoachingTag::MissedGift));
    }

    #[test]
    fn participant_defaults_missing_placement_to_last() {
        let participant = Participant::default();
        assert_eq!(participant.placement(), DEFAULT_PLACEMENT);
    }

    #[test]
    fn match_deserializes_loose_shapes() {
        let m: Match = serde_json::from_value(json!({
            "id": "NA1_1",
            "sameTeam": true,
            "playerA": {"placement": "2", "units": null, "level": 8, "totalDamageToPlayers": "31"},
            "playerB": {"units": [{"tier": 3, "items": ["a", "b"]}, {"tier": 1}], "traits": "none"}
        }))
        .unwrap();

        assert!(m.same_team);
        assert_eq!(m.player_a.placement(), 2);
        assert!(m.player_a.units.is_empty());
        assert_eq!(m.player_a.total_damage_to_players, 31.0);
        assert_eq!(m.player_b.three_star_count(), 1);
        assert_eq!(m.player_b.item_count(), 2);
        assert!(m.player_b.traits.is_empty());
        assert_eq!(m.duo_placement(), 8);
    }
}
