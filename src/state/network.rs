use crate::state::messages::{SessionRequest, SessionResponse};
use courtside_api::client::{ApiError, VenueApi};
use log::{debug, error};
use tokio::sync::mpsc;

/// Owns the backend client and drains the session's request channel. Every
/// failure is funneled into `SessionResponse::Error` with a human-readable
/// message; there is no retry policy.
pub struct NetworkWorker {
    api: VenueApi,
    requests: mpsc::Receiver<SessionRequest>,
    responses: mpsc::Sender<SessionResponse>,
}

impl NetworkWorker {
    pub fn new(
        api: VenueApi,
        requests: mpsc::Receiver<SessionRequest>,
        responses: mpsc::Sender<SessionResponse>,
    ) -> Self {
        Self { api, requests, responses }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let result = self.handle(request).await;
            debug!("network request complete");

            let response =
                result.unwrap_or_else(|err| SessionResponse::Error { message: err.to_string() });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle(&self, request: SessionRequest) -> Result<SessionResponse, ApiError> {
        match request {
            SessionRequest::LoadTeams { user_id } => {
                debug!("loading teams for user {user_id}");
                let teams = self.api.fetch_teams(&user_id).await?;
                Ok(SessionResponse::TeamsLoaded { teams })
            }
            SessionRequest::CreateTeam { request } => {
                debug!("creating team {}", request.name);
                let team = self.api.create_team(&request).await?;
                Ok(SessionResponse::TeamCreated { team })
            }
            SessionRequest::LoadRoster { team_id } => {
                debug!("loading roster for team {team_id}");
                let players = self.api.fetch_roster(&team_id).await?;
                Ok(SessionResponse::RosterLoaded { team_id, players })
            }
            SessionRequest::SearchPlayers { query } => {
                debug!("searching players for {query:?}");
                let players = self.api.search_players(&query).await?;
                Ok(SessionResponse::PlayersFound { query, players })
            }
            SessionRequest::CreateMatch { request } => {
                debug!("creating {} match", request.sport);
                let created = self.api.create_match(&request).await?;
                Ok(SessionResponse::MatchCreated { created })
            }
            SessionRequest::PostScoreEvent { match_id, event } => {
                debug!("posting {} event for match {match_id}", event.kind);
                self.api.post_score_event(&match_id, &event).await?;
                Ok(SessionResponse::ScoreAccepted { match_id })
            }
            SessionRequest::RefreshMatch { match_id } => {
                debug!("refreshing match {match_id}");
                let refreshed = self.api.fetch_match(&match_id).await?;
                Ok(SessionResponse::MatchRefreshed { refreshed })
            }
        }
    }
}
