use crate::wire::{
    CreateTeamRequest, MatchCreateRequest, MatchResponse, RosterResponse, ScoreEventRequest,
    TeamResponse, TeamsResponse, UserSearchResponse, WireMatch, WirePlayer, WireTeam, WireUser,
};
use crate::{CreatedMatch, MatchScore, MatchStatus, Player, Team};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

/// Courtside backend client. The base URL comes from runtime configuration;
/// the bearer token is attached per request when available.
#[derive(Debug, Clone)]
pub struct VenueApi {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl VenueApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("courtside/0.1 (match scoring client)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token,
            timeout: Duration::from_secs(10),
        }
    }

    /// Fetch the teams visible to a user. Results replace any local list
    /// wholesale; there is no incremental sync.
    pub async fn fetch_teams(&self, user_id: &str) -> ApiResult<Vec<Team>> {
        let url = format!("{}/api/teams", self.base_url);
        let raw: TeamsResponse = self.get(&url, &[("user", user_id)]).await?;
        Ok(raw.data.unwrap_or_default().iter().map(map_team).collect())
    }

    /// Create a team. The backend echoes the persisted team, now with an id.
    pub async fn create_team(&self, request: &CreateTeamRequest) -> ApiResult<Team> {
        let url = format!("{}/api/teams", self.base_url);
        let raw: TeamResponse = self.post(&url, request).await?;
        let team = raw
            .data
            .ok_or_else(|| ApiError::NotFound(format!("created team missing from {url}")))?;
        Ok(map_team(&team))
    }

    /// Fetch a team's full roster.
    pub async fn fetch_roster(&self, team_id: &str) -> ApiResult<Vec<Player>> {
        let url = format!("{}/api/teams/{team_id}", self.base_url);
        let raw: RosterResponse = self.get(&url, &[]).await?;
        Ok(raw
            .data
            .unwrap_or_default()
            .players
            .iter()
            .filter_map(map_player)
            .collect())
    }

    /// Free-text search against the global player directory.
    pub async fn search_players(&self, query: &str) -> ApiResult<Vec<Player>> {
        let url = format!("{}/api/users/search", self.base_url);
        let raw: UserSearchResponse = self.get(&url, &[("q", query)]).await?;
        if raw.success == Some(false) {
            return Ok(Vec::new());
        }
        Ok(raw.users.unwrap_or_default().iter().filter_map(map_user).collect())
    }

    /// Create a match from a fully built request body.
    pub async fn create_match(&self, request: &MatchCreateRequest) -> ApiResult<CreatedMatch> {
        let url = format!("{}/api/matches", self.base_url);
        let raw: MatchResponse = self.post(&url, request).await?;
        let m = raw
            .data
            .ok_or_else(|| ApiError::NotFound(format!("created match missing from {url}")))?;
        map_match(m).ok_or_else(|| ApiError::NotFound(format!("created match has no id ({url})")))
    }

    /// Post one incremental score event. The acknowledgement body is opaque;
    /// visible state only changes through the push-update feed.
    pub async fn post_score_event(
        &self,
        match_id: &str,
        event: &ScoreEventRequest,
    ) -> ApiResult<()> {
        let url = format!("{}/api/matches/{match_id}/score", self.base_url);
        let response = self
            .request(self.client.post(&url).json(event))
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.clone()))?;
        response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url))?;
        Ok(())
    }

    /// Fetch the current server-side view of a match. Used to resync while
    /// the push feed is disconnected.
    pub async fn fetch_match(&self, match_id: &str) -> ApiResult<CreatedMatch> {
        let url = format!("{}/api/matches/{match_id}", self.base_url);
        let raw: MatchResponse = self.get(&url, &[]).await?;
        let m = raw
            .data
            .ok_or_else(|| ApiError::NotFound(format!("match {match_id} not found")))?;
        map_match(m).ok_or_else(|| ApiError::NotFound(format!("match {match_id} has no id")))
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let response = self
            .request(self.client.get(url).query(query))
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }

    async fn post<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .request(self.client.post(url).json(body))
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => Err(ApiError::Api(e, url.to_owned())),
        }
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let builder = builder.timeout(self.timeout);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

// ---------------------------------------------------------------------------
// Mapping: backend wire types → clean domain types
// ---------------------------------------------------------------------------

fn map_team(t: &WireTeam) -> Team {
    Team {
        id: t.id.clone(),
        name: t.name.clone().unwrap_or_default(),
        short_name: t.short_name.clone(),
        logo_url: t.logo_url.clone(),
        players: t.players.iter().filter_map(map_player).collect(),
        won: t.won.unwrap_or(0),
        loss: t.loss.unwrap_or(0),
        location: t.location.clone(),
        captain: t.captain.iter().filter_map(map_player).collect(),
        sport: t.sport.clone(),
        matches: t.matches.unwrap_or(0),
        home_ground: t.home_ground.clone(),
        city: t.city.clone(),
        description: t.description.clone(),
        created_by: t.created_by.clone(),
        admin: t.admin.clone(),
    }
}

/// Roster entries without an id cannot participate in selection or scoring
/// and are dropped.
fn map_player(p: &WirePlayer) -> Option<Player> {
    let id = p.id.clone()?;
    let name = p.name.clone().unwrap_or_default();
    let username = p
        .username
        .clone()
        .or_else(|| email_local_part(p.email.as_deref()))
        .unwrap_or_else(|| name.clone());
    Some(Player {
        id,
        username,
        name,
        email: p.email.clone(),
        mobile: p.mobile.clone(),
        profile_picture: p.profile_picture.clone(),
        role: p.role.clone(),
    })
}

/// The user-search endpoint does not return a username; derive one from the
/// email local part, falling back to the display name.
fn map_user(u: &WireUser) -> Option<Player> {
    let id = u.id.clone()?;
    let name = u.name.clone().unwrap_or_default();
    let username = u
        .username
        .clone()
        .or_else(|| email_local_part(u.email.as_deref()))
        .unwrap_or_else(|| name.clone());
    Some(Player {
        id,
        username,
        name,
        email: u.email.clone(),
        mobile: u.mobile.clone(),
        profile_picture: u.profile_picture.clone(),
        role: None,
    })
}

fn email_local_part(email: Option<&str>) -> Option<String> {
    let email = email?.trim();
    let local = email.split('@').next()?;
    if local.is_empty() { None } else { Some(local.to_owned()) }
}

fn map_match(m: WireMatch) -> Option<CreatedMatch> {
    let id = m.id?;
    let status = m
        .status
        .as_deref()
        .map(parse_status)
        .unwrap_or_default();
    let score = m
        .score
        .map(|s| MatchScore { team_a: s.team1.unwrap_or(0), team_b: s.team2.unwrap_or(0) })
        .unwrap_or_default();
    Some(CreatedMatch {
        id,
        status,
        score,
        scoring_state: m.rules.unwrap_or_default(),
    })
}

fn parse_status(s: &str) -> MatchStatus {
    match s {
        "live" => MatchStatus::Live,
        "paused" => MatchStatus::Paused,
        "completed" => MatchStatus::Completed,
        "cancelled" => MatchStatus::Cancelled,
        _ => MatchStatus::Scheduled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TeamSide;

    #[test]
    fn parse_status_defaults_to_scheduled() {
        assert_eq!(parse_status("live"), MatchStatus::Live);
        assert_eq!(parse_status("completed"), MatchStatus::Completed);
        assert_eq!(parse_status("something-new"), MatchStatus::Scheduled);
    }

    #[test]
    fn map_user_derives_username_from_email() {
        let user = WireUser {
            id: Some("u1".into()),
            username: None,
            name: Some("Asha Rao".into()),
            email: Some("asha.rao@example.com".into()),
            mobile: None,
            profile_picture: None,
        };
        let player = map_user(&user).expect("user with id must map");
        assert_eq!(player.username, "asha.rao");
        assert_eq!(player.name, "Asha Rao");
    }

    #[test]
    fn map_user_falls_back_to_display_name() {
        let user = WireUser {
            id: Some("u2".into()),
            name: Some("Walk-in".into()),
            ..Default::default()
        };
        let player = map_user(&user).unwrap();
        assert_eq!(player.username, "Walk-in");
    }

    #[test]
    fn map_player_drops_entries_without_id() {
        let ghost = WirePlayer { name: Some("No Id".into()), ..Default::default() };
        assert!(map_player(&ghost).is_none());
    }

    #[test]
    fn map_match_defaults_score_and_rules() {
        let m = WireMatch { id: Some("m1".into()), ..Default::default() };
        let created = map_match(m).unwrap();
        assert_eq!(created.status, MatchStatus::Scheduled);
        assert_eq!(created.score, MatchScore { team_a: 0, team_b: 0 });
        assert!(created.scoring_state.is_empty());
    }

    // -----------------------------------------------------------------------
    // HTTP paths against a mock backend
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn fetch_teams_maps_and_sends_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/teams")
            .match_query(mockito::Matcher::UrlEncoded("user".into(), "u42".into()))
            .match_header("authorization", "Bearer sekrit")
            .with_status(200)
            .with_body(
                r#"{"data":[{"_id":"t1","name":"Rovers","players":[
                    {"_id":"p1","username":"kay","name":"Kay"}]}]}"#,
            )
            .create_async()
            .await;

        let api = VenueApi::new(server.url(), Some("sekrit".into()));
        let teams = api.fetch_teams("u42").await.expect("fetch should succeed");
        mock.assert_async().await;
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].id.as_deref(), Some("t1"));
        assert_eq!(teams[0].players[0].username, "kay");
    }

    #[tokio::test]
    async fn fetch_teams_non_2xx_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/teams")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let api = VenueApi::new(server.url(), None);
        let err = api.fetch_teams("u42").await.unwrap_err();
        assert!(matches!(err, ApiError::Api(_, _)), "got: {err}");
    }

    #[tokio::test]
    async fn fetch_teams_bad_json_is_parsing_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/teams")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let api = VenueApi::new(server.url(), None);
        let err = api.fetch_teams("u42").await.unwrap_err();
        assert!(matches!(err, ApiError::Parsing(_, _)), "got: {err}");
    }

    #[tokio::test]
    async fn create_match_extracts_server_assigned_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/matches")
            .with_status(201)
            .with_body(
                r#"{"data":{"_id":"m7","status":"scheduled",
                    "score":{"team1":0,"team2":0},
                    "rules":{"durationMinutes":90}}}"#,
            )
            .create_async()
            .await;

        let api = VenueApi::new(server.url(), None);
        let request = MatchCreateRequest {
            sport: "Football".into(),
            format: "11v11".into(),
            start_at: "2026-03-01T18:00:00Z".into(),
            status: "scheduled".into(),
            ..Default::default()
        };
        let created = api.create_match(&request).await.expect("create should succeed");
        assert_eq!(created.id, "m7");
        assert_eq!(created.status, MatchStatus::Scheduled);
        assert_eq!(created.scoring_state["durationMinutes"], 90);
    }

    #[tokio::test]
    async fn create_match_without_data_envelope_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/matches")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let api = VenueApi::new(server.url(), None);
        let err = api.create_match(&MatchCreateRequest::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)), "got: {err}");
    }

    #[tokio::test]
    async fn post_score_event_hits_per_match_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/matches/m7/score")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"type":"goal","team":"A"}"#.into(),
            ))
            .with_status(202)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let api = VenueApi::new(server.url(), None);
        let event = ScoreEventRequest {
            kind: "goal".into(),
            team: TeamSide::A,
            player_id: Some("p1".into()),
            points: None,
            meta: None,
        };
        api.post_score_event("m7", &event).await.expect("ack expected");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_roster_unwraps_nested_players() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/teams/t1")
            .with_status(200)
            .with_body(
                r#"{"data":{"players":[
                    {"_id":"p1","name":"Kay","email":"kay@example.com"},
                    {"name":"ghost entry without id"}]}}"#,
            )
            .create_async()
            .await;

        let api = VenueApi::new(server.url(), None);
        let roster = api.fetch_roster("t1").await.unwrap();
        assert_eq!(roster.len(), 1, "entries without id are dropped");
        assert_eq!(roster[0].username, "kay");
    }

    #[tokio::test]
    async fn search_players_with_success_false_is_empty() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/users/search")
            .match_query(mockito::Matcher::UrlEncoded("q".into(), "ka".into()))
            .with_status(200)
            .with_body(r#"{"success":false,"users":[{"_id":"u1","name":"Kay"}]}"#)
            .create_async()
            .await;

        let api = VenueApi::new(server.url(), None);
        let players = api.search_players("ka").await.unwrap();
        assert!(players.is_empty());
    }
}
