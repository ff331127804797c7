/// Raw wire types for the Courtside venue-booking backend — serde shapes for
/// request and response bodies. These map to the clean domain types via the
/// mapping functions in client.rs.
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::TeamSide;

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// GET /api/teams?user={userId}
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsResponse {
    pub data: Option<Vec<WireTeam>>,
}

/// POST /api/teams — the created team comes back under the same envelope.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamResponse {
    pub data: Option<WireTeam>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireTeam {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub players: Vec<WirePlayer>,
    pub won: Option<u32>,
    pub loss: Option<u32>,
    pub location: Option<String>,
    #[serde(default)]
    pub captain: Vec<WirePlayer>,
    pub sport: Option<String>,
    pub matches: Option<u32>,
    pub home_ground: Option<String>,
    pub city: Option<String>,
    pub description: Option<String>,
    pub created_by: Option<String>,
    pub admin: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WirePlayer {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub profile_picture: Option<String>,
    pub role: Option<String>,
}

/// GET /api/teams/{teamId} — only the roster is consumed from this endpoint.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct RosterResponse {
    pub data: Option<WireRoster>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireRoster {
    #[serde(default)]
    pub players: Vec<WirePlayer>,
}

/// GET /api/users/search?q={query}
#[derive(Debug, Deserialize, Default, Clone)]
pub struct UserSearchResponse {
    pub success: Option<bool>,
    pub users: Option<Vec<WireUser>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireUser {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    /// Not documented for this endpoint but passed through when present.
    pub username: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub profile_picture: Option<String>,
}

/// POST /api/matches and GET /api/matches/{matchId}
#[derive(Debug, Deserialize, Default, Clone)]
pub struct MatchResponse {
    pub data: Option<WireMatch>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireMatch {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub status: Option<String>,
    pub score: Option<WireMatchScore>,
    pub rules: Option<Map<String, Value>>,
}

/// The creation endpoint names the sides team1/team2; everything after
/// creation speaks teamA/teamB.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireMatchScore {
    pub team1: Option<u32>,
    pub team2: Option<u32>,
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// POST /api/teams body.
#[derive(Debug, Serialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub sport: String,
    /// Player ids, roster order preserved.
    pub players: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_ground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub created_by: String,
}

/// POST /api/matches body — the output of the setup transformation.
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchCreateRequest {
    pub sport: String,
    pub format: String,
    pub tournament: bool,
    /// RFC 3339; defaults to the submission instant when the setup has no date.
    pub start_at: String,
    pub location: WireLocation,
    pub teams: Vec<TeamRef>,
    pub rules: Map<String, Value>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarters: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter_duration_mins: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toss: Option<WireToss>,
}

#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct WireLocation {
    pub city: String,
    pub ground: String,
}

#[derive(Debug, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    /// Omitted for locally-created teams the backend has not confirmed.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    /// Fielded player ids, selection order preserved.
    pub players: Vec<String>,
}

/// Toss block of the creation body. Football fills kick_off_first_team_id,
/// tennis fills serve_first_team_id; the other fields are shared.
#[derive(Debug, Serialize, Default, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WireToss {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toss_winner_team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kick_off_first_team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serve_first_team_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_of_serve: Option<String>,
}

/// POST /api/matches/{matchId}/score body — one incremental score event.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEventRequest {
    #[serde(rename = "type")]
    pub kind: String,
    pub team: TeamSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}
