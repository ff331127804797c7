use crate::state::messages::SessionRequest;
use crate::state::setup::SetupState;
use chrono::{DateTime, Utc};
use courtside_api::wire::ScoreEventRequest;
use courtside_api::{CreatedMatch, FeedEvent, MatchScore, MatchStatus, MatchUpdate};
use log::{debug, warn};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Match session — lifecycle, score, and feed for one live match
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A score event was requested before any match was created.
    NoActiveMatch,
    /// An update frame for a different match reached this session.
    WrongMatch { expected: Option<String>, got: String },
    /// The frame's sequence number is not newer than what was applied.
    StaleUpdate { seq: u64, last_seq: u64 },
    InvalidTransition { from: MatchStatus, to: MatchStatus },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoActiveMatch => write!(f, "no active match to score against"),
            SessionError::WrongMatch { expected, got } => write!(
                f,
                "update for match {got} does not belong to this session (expected {})",
                expected.as_deref().unwrap_or("none")
            ),
            SessionError::StaleUpdate { seq, last_seq } => {
                write!(f, "stale update seq {seq} (already at {last_seq})")
            }
            SessionError::InvalidTransition { from, to } => {
                write!(f, "illegal status change {} -> {}", from.label(), to.label())
            }
        }
    }
}

impl std::error::Error for SessionError {}

/// State container for one match session. All mutations after creation flow
/// through `apply_update` — the single authoritative reducer — keyed by the
/// backend's monotonic sequence number; the score-event POST is only a
/// trigger whose acknowledgement clears the in-flight flag.
#[derive(Debug, Default)]
pub struct MatchSession {
    /// Setup draft. Deliberately survives `reset` so consecutive matches
    /// can reuse the same teams.
    pub setup: SetupState,

    pub match_id: Option<String>,
    pub status: MatchStatus,
    pub scores: MatchScore,
    /// Opaque per-sport scoring blob, overwritten wholesale by updates.
    pub scoring_state: Map<String, Value>,
    /// Most-recent-first, prepend-only, deduplicated by event id.
    pub feed: Vec<FeedEvent>,
    seen_events: HashSet<String>,
    pub last_seq: u64,
    pub last_update_at: Option<DateTime<Utc>>,
    pub feed_connected: bool,

    pub creating: bool,
    pub create_error: Option<String>,
    pub posting_score: bool,
    pub score_error: Option<String>,
}

impl MatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_active_match(&self) -> bool {
        self.match_id.is_some()
    }

    // -----------------------------------------------------------------------
    // Match creation
    // -----------------------------------------------------------------------

    pub fn begin_create(&mut self) {
        self.creating = true;
        self.create_error = None;
    }

    /// Adopt the backend's view of the newly created match wholesale: id,
    /// initial status, score, and the rules-seeded scoring blob.
    pub fn on_match_created(&mut self, created: CreatedMatch) {
        debug!("match {} created with status {}", created.id, created.status.label());
        self.creating = false;
        self.create_error = None;
        self.match_id = Some(created.id);
        self.status = created.status;
        self.scores = created.score;
        self.scoring_state = created.scoring_state;
        self.feed.clear();
        self.seen_events.clear();
        self.last_seq = 0;
        self.last_update_at = None;
    }

    /// Creation failed; prior session state stays untouched.
    pub fn on_create_failed(&mut self, message: String) {
        self.creating = false;
        self.create_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Score events
    // -----------------------------------------------------------------------

    /// Build the network request for one score event. Fails fast, before any
    /// network traffic, when no match is active.
    pub fn score_event_request(
        &mut self,
        event: ScoreEventRequest,
    ) -> Result<SessionRequest, SessionError> {
        let match_id = self.match_id.clone().ok_or(SessionError::NoActiveMatch)?;
        self.posting_score = true;
        self.score_error = None;
        Ok(SessionRequest::PostScoreEvent { match_id, event })
    }

    pub fn on_score_acked(&mut self) {
        self.posting_score = false;
        self.score_error = None;
    }

    pub fn on_score_failed(&mut self, message: String) {
        self.posting_score = false;
        self.score_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Status + updates
    // -----------------------------------------------------------------------

    /// Explicit local status change, checked against the transition table.
    pub fn try_set_status(&mut self, next: MatchStatus) -> Result<(), SessionError> {
        if !self.status.can_transition_to(next) {
            return Err(SessionError::InvalidTransition { from: self.status, to: next });
        }
        self.status = next;
        Ok(())
    }

    /// Apply one push-update frame. All-or-nothing: the frame is validated
    /// (session match, fresh seq, legal status move) before any field lands.
    /// Absent fields stay untouched; a duplicate feed event is skipped
    /// without failing the rest of the frame.
    pub fn apply_update(&mut self, update: MatchUpdate) -> Result<(), SessionError> {
        if self.match_id.as_deref() != Some(update.match_id.as_str()) {
            return Err(SessionError::WrongMatch {
                expected: self.match_id.clone(),
                got: update.match_id,
            });
        }
        if update.seq <= self.last_seq {
            return Err(SessionError::StaleUpdate { seq: update.seq, last_seq: self.last_seq });
        }
        if let Some(next) = update.status
            && !self.status.can_transition_to(next)
        {
            return Err(SessionError::InvalidTransition { from: self.status, to: next });
        }

        if let Some(next) = update.status {
            self.status = next;
        }
        if let Some(scores) = update.scores {
            self.scores = scores;
        }
        if let Some(event) = update.feed_event {
            self.ingest_event(event);
        }
        if let Some(scoring_state) = update.scoring_state {
            self.scoring_state = scoring_state;
        }
        self.last_seq = update.seq;
        self.last_update_at = Some(Utc::now());
        Ok(())
    }

    /// Prepend a feed event unless its id was already ingested (push frames
    /// are at-least-once).
    fn ingest_event(&mut self, event: FeedEvent) {
        if !event.id.is_empty() {
            if self.seen_events.contains(&event.id) {
                debug!("dropping duplicate feed event {}", event.id);
                return;
            }
            self.seen_events.insert(event.id.clone());
        }
        self.feed.insert(0, event);
    }

    /// Adopt a polled snapshot fetched while the push feed was down. The
    /// snapshot carries no sequence number, so it can refresh status and
    /// score but never touches the feed or the seq cursor.
    pub fn resync(&mut self, snapshot: CreatedMatch) {
        if self.match_id.as_deref() != Some(snapshot.id.as_str()) {
            warn!("ignoring resync for foreign match {}", snapshot.id);
            return;
        }
        if self.status.can_transition_to(snapshot.status) {
            self.status = snapshot.status;
        } else {
            warn!(
                "resync status {} unreachable from {}; keeping local",
                snapshot.status.label(),
                self.status.label()
            );
        }
        self.scores = snapshot.score;
        self.scoring_state = snapshot.scoring_state;
        self.last_update_at = Some(Utc::now());
    }

    pub fn on_feed_connected(&mut self) {
        self.feed_connected = true;
    }

    pub fn on_feed_disconnected(&mut self) {
        self.feed_connected = false;
    }

    // -----------------------------------------------------------------------
    // Reset
    // -----------------------------------------------------------------------

    /// Back to initial values, preserving the setup draft.
    pub fn reset(&mut self) {
        let setup = std::mem::take(&mut self.setup);
        *self = MatchSession { setup, ..Default::default() };
    }
}
