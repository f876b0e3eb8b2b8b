use chrono::{Duration, Utc};
use serde_json::{json, Value};

// ============================================================================
// Match Payload Builders
// ============================================================================

/// One side of a duo match as the upstream fetch layer would normalize it.
#[derive(Clone)]
pub struct PlayerBuilder {
    placement: i64,
    level: i64,
    damage: f64,
    units: Vec<Value>,
    traits: Vec<Value>,
}

impl PlayerBuilder {
    pub fn placed(placement: i64) -> Self {
        Self {
            placement,
            level: 8,
            damage: 0.0,
            units: vec![],
            traits: vec![],
        }
    }

    pub fn level(mut self, level: i64) -> Self {
        self.level = level;
        self
    }

    pub fn damage(mut self, damage: f64) -> Self {
        self.damage = damage;
        self
    }

    pub fn three_star(mut self, items: usize) -> Self {
        self.units
            .push(json!({"tier": 3, "items": vec!["item"; items]}));
        self
    }

    pub fn unit(mut self, tier: i64, items: usize) -> Self {
        self.units
            .push(json!({"tier": tier, "items": vec!["item"; items]}));
        self
    }

    pub fn active_trait(mut self, name: &str, style: i64, num_units: i64) -> Self {
        self.traits
            .push(json!({"name": name, "style": style, "numUnits": num_units}));
        self
    }

    fn build(&self) -> Value {
        json!({
            "placement": self.placement,
            "level": self.level,
            "totalDamageToPlayers": self.damage,
            "units": self.units,
            "traits": self.traits,
        })
    }
}

pub struct MatchBuilder {
    id: String,
    days_ago: i64,
    same_team: bool,
    player_a: PlayerBuilder,
    player_b: PlayerBuilder,
}

impl MatchBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            days_ago: 1,
            same_team: true,
            player_a: PlayerBuilder::placed(4),
            player_b: PlayerBuilder::placed(4),
        }
    }

    /// Same-team match finishing at the given placements
    pub fn duo(id: &str, placement_a: i64, placement_b: i64) -> Self {
        Self::new(id)
            .player_a(PlayerBuilder::placed(placement_a))
            .player_b(PlayerBuilder::placed(placement_b))
    }

    pub fn split(mut self) -> Self {
        self.same_team = false;
        self
    }

    pub fn days_ago(mut self, days: i64) -> Self {
        self.days_ago = days;
        self
    }

    pub fn player_a(mut self, player: PlayerBuilder) -> Self {
        self.player_a = player;
        self
    }

    pub fn player_b(mut self, player: PlayerBuilder) -> Self {
        self.player_b = player;
        self
    }

    pub fn build(&self) -> Value {
        let game_datetime = (Utc::now() - Duration::days(self.days_ago)).timestamp_millis();
        json!({
            "id": self.id,
            "patch": "14.24",
            "setNumber": 13,
            "gameDatetime": game_datetime,
            "sameTeam": self.same_team,
            "playerA": self.player_a.build(),
            "playerB": self.player_b.build(),
        })
    }
}
