use crate::state::feed::FeedSignal;
use crate::state::messages::{SessionRequest, SessionResponse};
use crate::state::selection::{PlayerPicker, SelectionError, TeamSelectState};
use crate::state::session::{MatchSession, SessionError};
use crate::state::settings::ClientSettings;
use crate::state::setup::SetupError;
use crate::transform::build_match_request;
use chrono::Utc;
use courtside_api::wire::ScoreEventRequest;
use courtside_api::{Team, TeamSide};
use log::{debug, warn};
use std::fmt;

/// Errors surfaced to the caller before anything reaches the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Setup(SetupError),
    Selection(SelectionError),
    Session(SessionError),
    /// The picker flow was driven without a team chosen for that side.
    NoTeamForSide(TeamSide),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Setup(e) => write!(f, "{e}"),
            AppError::Selection(e) => write!(f, "{e}"),
            AppError::Session(e) => write!(f, "{e}"),
            AppError::NoTeamForSide(side) => write!(f, "no team selected for side {side:?}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<SetupError> for AppError {
    fn from(e: SetupError) -> Self {
        AppError::Setup(e)
    }
}

impl From<SelectionError> for AppError {
    fn from(e: SelectionError) -> Self {
        AppError::Selection(e)
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

/// Root coordinator: owns the session, the selection flow, and the picker,
/// and routes worker responses into them. The owning loop sends the
/// `SessionRequest`s this type hands back.
pub struct ScoringApp {
    pub settings: ClientSettings,
    pub session: MatchSession,
    pub team_select: TeamSelectState,
    pub picker: PlayerPicker,
    pub last_error: Option<String>,
}

impl ScoringApp {
    pub fn new(settings: ClientSettings) -> Self {
        Self {
            settings,
            session: MatchSession::new(),
            team_select: TeamSelectState::default(),
            picker: PlayerPicker::default(),
            last_error: None,
        }
    }

    // -----------------------------------------------------------------------
    // Requests — built here, sent by the owning loop
    // -----------------------------------------------------------------------

    pub fn load_teams_request(&self) -> SessionRequest {
        SessionRequest::LoadTeams { user_id: self.settings.user_id.clone() }
    }

    /// Open the picker for one side's team and request its roster.
    pub fn open_picker_request(&mut self, side: TeamSide) -> Result<SessionRequest, AppError> {
        let team = self
            .team_select
            .chosen(side)
            .ok_or(AppError::NoTeamForSide(side))?;
        let team_id = team.id.clone().ok_or(AppError::NoTeamForSide(side))?;
        self.picker.open(team_id.clone(), self.team_select.fielded_players(side));
        Ok(SessionRequest::LoadRoster { team_id })
    }

    /// Directory search for the picker, gated on the minimum query length.
    pub fn picker_search_request(&self) -> Option<SessionRequest> {
        self.picker
            .search_query()
            .map(|query| SessionRequest::SearchPlayers { query: query.to_owned() })
    }

    /// Confirm the picker into one side's fielded subset.
    pub fn confirm_picker(&mut self, side: TeamSide) {
        let chosen = self.picker.confirm();
        self.team_select.set_fielded(side, chosen);
    }

    /// "Continue" from the team screen: resolve the fielded pair (with the
    /// full-roster fallback) into the setup draft.
    pub fn commit_team_selection(&mut self) -> Result<(), AppError> {
        let (a, b) = self.team_select.fielded_pair()?;
        self.session.setup.set_teams(a, b)?;
        Ok(())
    }

    /// Build the creation request from the current draft and flag the
    /// session as creating.
    pub fn create_match_request(&mut self) -> Result<SessionRequest, AppError> {
        let draft = self.session.setup.draft().ok_or(SetupError::NotStarted)?;
        let request = build_match_request(draft, Utc::now())?;
        self.session.begin_create();
        Ok(SessionRequest::CreateMatch { request })
    }

    pub fn score_event_request(
        &mut self,
        event: ScoreEventRequest,
    ) -> Result<SessionRequest, AppError> {
        Ok(self.session.score_event_request(event)?)
    }

    // -----------------------------------------------------------------------
    // Worker response handlers
    // -----------------------------------------------------------------------

    pub fn on_response(&mut self, response: SessionResponse) {
        match response {
            SessionResponse::TeamsLoaded { teams } => {
                self.last_error = None;
                self.team_select.load(teams);
            }
            SessionResponse::TeamCreated { team } => self.on_team_created(team),
            SessionResponse::RosterLoaded { team_id, players } => {
                // A response for a picker that has moved on is dropped.
                if self.picker.open && self.picker.team_id() == Some(team_id.as_str()) {
                    self.picker.set_roster(players);
                }
            }
            SessionResponse::PlayersFound { query, players } => {
                self.picker.set_results(&query, players);
            }
            SessionResponse::MatchCreated { created } => {
                self.last_error = None;
                self.session.on_match_created(created);
            }
            SessionResponse::ScoreAccepted { match_id } => {
                debug!("score event acknowledged for match {match_id}");
                self.session.on_score_acked();
            }
            SessionResponse::MatchRefreshed { refreshed } => self.session.resync(refreshed),
            SessionResponse::Error { message } => self.on_error(message),
        }
    }

    fn on_team_created(&mut self, team: Team) {
        // The confirmed team (now persisted) leads the list.
        self.last_error = None;
        self.team_select.teams.insert(0, team);
    }

    /// Failures arrive as one flat message; attribute them to whichever
    /// operation is in flight, mirroring the loading flags.
    fn on_error(&mut self, message: String) {
        if self.session.creating {
            self.session.on_create_failed(message.clone());
        } else if self.session.posting_score {
            self.session.on_score_failed(message.clone());
        } else if self.picker.open {
            self.picker.on_roster_failed(message.clone());
        } else {
            self.team_select.on_load_failed(message.clone());
        }
        self.last_error = Some(message);
    }

    pub fn on_feed_signal(&mut self, signal: FeedSignal) {
        match signal {
            FeedSignal::Connected => self.session.on_feed_connected(),
            FeedSignal::Disconnected => self.session.on_feed_disconnected(),
            FeedSignal::Update(update) => match self.session.apply_update(update) {
                Ok(()) => {}
                Err(e @ SessionError::StaleUpdate { .. }) => debug!("{e}"),
                Err(e) => warn!("dropped feed update: {e}"),
            },
            FeedSignal::Error(message) => {
                warn!("feed error: {message}");
                self.last_error = Some(message);
            }
        }
    }
}
