use courtside_api::wire::{CreateTeamRequest, MatchCreateRequest, ScoreEventRequest};
use courtside_api::{CreatedMatch, Player, Team};

#[derive(Debug, Clone)]
pub enum SessionRequest {
    LoadTeams { user_id: String },
    CreateTeam { request: CreateTeamRequest },
    LoadRoster { team_id: String },
    SearchPlayers { query: String },
    CreateMatch { request: MatchCreateRequest },
    PostScoreEvent { match_id: String, event: ScoreEventRequest },
    /// Resync snapshot while the push feed is down.
    RefreshMatch { match_id: String },
}

#[derive(Debug)]
pub enum SessionResponse {
    TeamsLoaded { teams: Vec<Team> },
    TeamCreated { team: Team },
    RosterLoaded { team_id: String, players: Vec<Player> },
    /// Echoes the query so stale results can be dropped against the
    /// query still on screen.
    PlayersFound { query: String, players: Vec<Player> },
    MatchCreated { created: CreatedMatch },
    /// Opaque acknowledgement; scores only move through the update feed.
    ScoreAccepted { match_id: String },
    MatchRefreshed { refreshed: CreatedMatch },
    Error { message: String },
}
