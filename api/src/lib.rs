pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the backend wire format
// ---------------------------------------------------------------------------

/// A player as selected into a roster. Identity is `id`; a player record is
/// replaced wholesale when re-fetched, never patched field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub profile_picture: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Team {
    /// None for locally-created teams the backend has not confirmed yet.
    pub id: Option<String>,
    pub name: String,
    pub short_name: Option<String>,
    pub logo_url: Option<String>,
    pub players: Vec<Player>,
    pub won: u32,
    pub loss: u32,
    pub location: Option<String>,
    pub captain: Vec<Player>,
    pub sport: Option<String>,
    pub matches: u32,
    pub home_ground: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<String>,
    pub admin: Option<String>,
}

impl Team {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn player_ids(&self) -> Vec<String> {
        self.players.iter().map(|p| p.id.clone()).collect()
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }
}

/// Lifecycle of a match session. Wire tags are lowercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Paused,
    Completed,
    Cancelled,
}

impl MatchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live => "live",
            MatchStatus::Paused => "paused",
            MatchStatus::Completed => "completed",
            MatchStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Cancelled)
    }

    /// Transition table for a match session. Re-delivering the current status
    /// is allowed (push frames are at-least-once); Paused → Completed is
    /// allowed so a missed resume frame cannot wedge a session.
    pub fn can_transition_to(self, next: MatchStatus) -> bool {
        use MatchStatus::*;
        if self == next {
            return true;
        }
        match self {
            Scheduled => matches!(next, Live | Cancelled),
            Live => matches!(next, Paused | Completed | Cancelled),
            Paused => matches!(next, Live | Completed | Cancelled),
            Completed | Cancelled => false,
        }
    }
}

/// Running totals for the two fielded sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchScore {
    #[serde(rename = "teamA")]
    pub team_a: u32,
    #[serde(rename = "teamB")]
    pub team_b: u32,
}

/// Abstract side of a match setup: slot 0 or slot 1 of the team pair.
/// Mapped to concrete team ids only at request-building time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn index(self) -> usize {
        match self {
            TeamSide::A => 0,
            TeamSide::B => 1,
        }
    }
}

/// Side of the court/pitch chosen at the toss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourtSide {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl CourtSide {
    /// Wire spelling used by the match-creation endpoint.
    pub fn wire_label(self) -> &'static str {
        match self {
            CourtSide::Left => "left",
            CourtSide::Right => "right",
        }
    }
}

/// One immutable entry of the live feed. Never mutated or removed once
/// ingested; the feed is ordered most-recent-first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEvent {
    pub id: String,
    /// Match-clock label, e.g. "43'" or "Q2 04:12".
    #[serde(default)]
    pub time: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    pub created_at: DateTime<Utc>,
}

/// One push-style update frame for a match session. `seq` is assigned by the
/// backend and is strictly monotonic per match; consumers drop stale frames.
/// Absent fields mean "unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchUpdate {
    pub seq: u64,
    pub match_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<MatchStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<MatchScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_event: Option<FeedEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring_state: Option<Map<String, Value>>,
}

/// A match as confirmed by the backend — the result of creation, and the
/// shape returned by the refresh endpoint.
#[derive(Debug, Clone, Default)]
pub struct CreatedMatch {
    pub id: String,
    pub status: MatchStatus,
    pub score: MatchScore,
    /// Opaque per-sport scoring blob seeded from the match rules.
    pub scoring_state: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_transition_table() {
        use MatchStatus::*;
        assert!(Scheduled.can_transition_to(Live));
        assert!(Scheduled.can_transition_to(Cancelled));
        assert!(!Scheduled.can_transition_to(Paused));
        assert!(!Scheduled.can_transition_to(Completed));
        assert!(Live.can_transition_to(Paused));
        assert!(Live.can_transition_to(Completed));
        assert!(Paused.can_transition_to(Live));
        assert!(Paused.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Live), "completed is terminal");
        assert!(!Cancelled.can_transition_to(Scheduled), "cancelled is terminal");
    }

    #[test]
    fn status_redelivery_is_allowed() {
        assert!(MatchStatus::Live.can_transition_to(MatchStatus::Live));
        assert!(MatchStatus::Completed.can_transition_to(MatchStatus::Completed));
    }

    #[test]
    fn status_wire_tags_are_lowercase() {
        let tag = serde_json::to_string(&MatchStatus::Live).unwrap();
        assert_eq!(tag, "\"live\"");
        let parsed: MatchStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(parsed, MatchStatus::Paused);
    }

    #[test]
    fn update_frame_parses_with_absent_fields() {
        let frame: MatchUpdate =
            serde_json::from_str(r#"{"seq":7,"matchId":"m1","status":"live"}"#).unwrap();
        assert_eq!(frame.seq, 7);
        assert_eq!(frame.match_id, "m1");
        assert_eq!(frame.status, Some(MatchStatus::Live));
        assert!(frame.scores.is_none());
        assert!(frame.feed_event.is_none());
        assert!(frame.scoring_state.is_none());
    }

    #[test]
    fn feed_event_round_trips_side_tag() {
        let json = r#"{
            "id": "e1",
            "time": "12'",
            "type": "goal",
            "description": "header from the corner",
            "team": "A",
            "playerId": "p9",
            "createdAt": "2026-03-01T18:04:05Z"
        }"#;
        let event: FeedEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.kind, "goal");
        assert_eq!(event.team, Some(TeamSide::A));
        assert_eq!(event.player_id.as_deref(), Some("p9"));
    }

    #[test]
    fn team_player_ids_preserve_roster_order() {
        let team = Team {
            players: vec![
                Player { id: "p2".into(), ..Default::default() },
                Player { id: "p1".into(), ..Default::default() },
            ],
            ..Default::default()
        };
        assert_eq!(team.player_ids(), vec!["p2".to_string(), "p1".to_string()]);
    }
}
