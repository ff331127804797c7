use crate::state::rules::{Sport, SportRules};
use chrono::{DateTime, Utc};
use courtside_api::{CourtSide, Team, TeamSide};
use std::fmt;

// ---------------------------------------------------------------------------
// Match setup draft — accumulated across screens, owned by SetupState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub city: String,
    pub ground: String,
}

/// Outcome of the pre-match toss, in abstract sides. Mapping to concrete
/// team ids happens only at request-building time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toss {
    pub winner: TeamSide,
    pub kick_off: Option<TeamSide>,
    pub side: Option<CourtSide>,
}

/// The in-progress match configuration. An owned value behind `SetupState`;
/// screens never share it by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSetup {
    pub sport: Sport,
    pub format: String,
    pub tournament_mode: bool,
    /// Slot 0 is side A ("my team"), slot 1 is side B (opponent).
    pub teams: [Option<Team>; 2],
    pub match_type: String,
    pub location: Location,
    pub date: Option<DateTime<Utc>>,
    pub rules: SportRules,
    pub toss: Option<Toss>,
    pub is_scheduled: bool,
}

impl MatchSetup {
    pub fn new(sport: Sport) -> Self {
        let rules = SportRules::default_for(&sport);
        Self {
            sport,
            format: String::new(),
            tournament_mode: false,
            teams: [None, None],
            match_type: String::new(),
            location: Location::default(),
            date: None,
            rules,
            toss: None,
            is_scheduled: false,
        }
    }

    pub fn both_teams_selected(&self) -> bool {
        self.teams.iter().all(|slot| slot.is_some())
    }

    /// Both fielded teams, or the completeness error the original left to
    /// UI button enablement.
    pub fn fielded_teams(&self) -> Result<(&Team, &Team), SetupError> {
        match (&self.teams[0], &self.teams[1]) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(SetupError::TeamsIncomplete),
        }
    }
}

/// A partial setup fragment from one screen. `None` fields are left alone
/// by the merge; present fields replace wholesale.
#[derive(Debug, Clone, Default)]
pub struct SetupPatch {
    pub sport: Option<Sport>,
    pub format: Option<String>,
    pub tournament_mode: Option<bool>,
    pub match_type: Option<String>,
    pub location: Option<Location>,
    pub date: Option<DateTime<Utc>>,
    pub rules: Option<SportRules>,
    pub is_scheduled: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// A write arrived before any draft existed. The original silently
    /// dropped these; here the caller finds out.
    NotStarted,
    /// The initial patch carried no sport, so no rules variant can be chosen.
    MissingSport,
    TeamsIncomplete,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::NotStarted => write!(f, "no match setup in progress"),
            SetupError::MissingSport => write!(f, "a new setup needs a sport"),
            SetupError::TeamsIncomplete => write!(f, "both teams must be selected"),
        }
    }
}

impl std::error::Error for SetupError {}

/// Owned container for the draft. Survives a session reset so consecutive
/// matches can reuse the same teams.
#[derive(Debug, Clone, Default)]
pub struct SetupState {
    draft: Option<MatchSetup>,
    pub error: Option<String>,
}

impl SetupState {
    pub fn draft(&self) -> Option<&MatchSetup> {
        self.draft.as_ref()
    }

    /// Shallow-merge a partial fragment; initializes the draft from the
    /// fragment alone when none exists yet.
    pub fn update(&mut self, patch: SetupPatch) -> Result<(), SetupError> {
        if self.draft.is_none() {
            let sport = patch.sport.clone().ok_or(SetupError::MissingSport)?;
            self.draft = Some(MatchSetup::new(sport));
        }
        let draft = self.draft.as_mut().ok_or(SetupError::NotStarted)?;

        if let Some(sport) = patch.sport {
            // A sport change invalidates rules of the old variant.
            if !draft.rules.matches_sport(&sport) && patch.rules.is_none() {
                draft.rules = SportRules::default_for(&sport);
            }
            draft.sport = sport;
        }
        if let Some(format) = patch.format {
            draft.format = format;
        }
        if let Some(tournament_mode) = patch.tournament_mode {
            draft.tournament_mode = tournament_mode;
        }
        if let Some(match_type) = patch.match_type {
            draft.match_type = match_type;
        }
        if let Some(location) = patch.location {
            draft.location = location;
        }
        if let Some(date) = patch.date {
            draft.date = Some(date);
        }
        if let Some(rules) = patch.rules {
            draft.rules = rules;
        }
        if let Some(is_scheduled) = patch.is_scheduled {
            draft.is_scheduled = is_scheduled;
        }
        Ok(())
    }

    /// Replace the team pair wholesale.
    pub fn set_teams(&mut self, team_a: Team, team_b: Team) -> Result<(), SetupError> {
        let draft = self.draft.as_mut().ok_or(SetupError::NotStarted)?;
        draft.teams = [Some(team_a), Some(team_b)];
        Ok(())
    }

    pub fn set_rules(&mut self, rules: SportRules) -> Result<(), SetupError> {
        let draft = self.draft.as_mut().ok_or(SetupError::NotStarted)?;
        draft.rules = rules;
        Ok(())
    }

    pub fn set_toss(&mut self, toss: Toss) -> Result<(), SetupError> {
        let draft = self.draft.as_mut().ok_or(SetupError::NotStarted)?;
        draft.toss = Some(toss);
        Ok(())
    }

    /// Drop the draft and any setup error.
    pub fn clear(&mut self) {
        self.draft = None;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn team(id: &str) -> Team {
        Team { id: Some(id.into()), name: id.to_uppercase(), ..Default::default() }
    }

    #[test]
    fn update_initializes_draft_from_first_patch() {
        let mut state = SetupState::default();
        state
            .update(SetupPatch {
                sport: Some(Sport::Football),
                format: Some("11v11".into()),
                ..Default::default()
            })
            .unwrap();
        let draft = state.draft().unwrap();
        assert_eq!(draft.sport, Sport::Football);
        assert_eq!(draft.format, "11v11");
        assert!(matches!(draft.rules, SportRules::Football { .. }));
    }

    #[test]
    fn first_patch_without_sport_is_rejected() {
        let mut state = SetupState::default();
        let err = state
            .update(SetupPatch { format: Some("11v11".into()), ..Default::default() })
            .unwrap_err();
        assert_eq!(err, SetupError::MissingSport);
        assert!(state.draft().is_none());
    }

    #[test]
    fn merge_leaves_unpatched_fields_alone() {
        let mut state = SetupState::default();
        state
            .update(SetupPatch {
                sport: Some(Sport::Tennis),
                format: Some("Singles".into()),
                ..Default::default()
            })
            .unwrap();
        let when = Utc.with_ymd_and_hms(2026, 4, 2, 17, 0, 0).unwrap();
        state.update(SetupPatch { date: Some(when), ..Default::default() }).unwrap();

        let draft = state.draft().unwrap();
        assert_eq!(draft.format, "Singles");
        assert_eq!(draft.date, Some(when));
    }

    #[test]
    fn sport_change_resets_stale_rules_variant() {
        let mut state = SetupState::default();
        state
            .update(SetupPatch { sport: Some(Sport::Football), ..Default::default() })
            .unwrap();
        state
            .update(SetupPatch { sport: Some(Sport::Basketball), ..Default::default() })
            .unwrap();
        let draft = state.draft().unwrap();
        assert!(
            matches!(draft.rules, SportRules::Basketball { quarters: 4, .. }),
            "rules must follow the sport"
        );
    }

    #[test]
    fn team_writes_before_any_draft_are_errors_not_noops() {
        let mut state = SetupState::default();
        assert_eq!(state.set_teams(team("a"), team("b")).unwrap_err(), SetupError::NotStarted);
        assert_eq!(
            state.set_rules(SportRules::default_for(&Sport::Tennis)).unwrap_err(),
            SetupError::NotStarted
        );
        assert_eq!(
            state
                .set_toss(Toss { winner: TeamSide::A, kick_off: None, side: None })
                .unwrap_err(),
            SetupError::NotStarted
        );
    }

    #[test]
    fn set_teams_replaces_pair_wholesale() {
        let mut state = SetupState::default();
        state
            .update(SetupPatch { sport: Some(Sport::Football), ..Default::default() })
            .unwrap();
        state.set_teams(team("a"), team("b")).unwrap();
        state.set_teams(team("c"), team("d")).unwrap();
        let (left, right) = state.draft().unwrap().fielded_teams().unwrap();
        assert_eq!(left.id.as_deref(), Some("c"));
        assert_eq!(right.id.as_deref(), Some("d"));
    }

    #[test]
    fn fielded_teams_requires_both_slots() {
        let mut setup = MatchSetup::new(Sport::Football);
        assert_eq!(setup.fielded_teams().unwrap_err(), SetupError::TeamsIncomplete);
        setup.teams[0] = Some(team("a"));
        assert!(!setup.both_teams_selected());
        assert_eq!(setup.fielded_teams().unwrap_err(), SetupError::TeamsIncomplete);
        setup.teams[1] = Some(team("b"));
        assert!(setup.both_teams_selected());
        assert!(setup.fielded_teams().is_ok());
    }

    #[test]
    fn clear_drops_draft_and_error() {
        let mut state = SetupState::default();
        state
            .update(SetupPatch { sport: Some(Sport::Football), ..Default::default() })
            .unwrap();
        state.error = Some("boom".into());
        state.clear();
        assert!(state.draft().is_none());
        assert!(state.error.is_none());
    }
}
