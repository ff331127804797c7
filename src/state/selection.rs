use courtside_api::{Player, Team, TeamSide};
use std::fmt;

/// Free-text player search only fires at this many trimmed characters.
const MIN_SEARCH_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    TeamsIncomplete,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::TeamsIncomplete => write!(f, "both teams must be selected"),
        }
    }
}

impl std::error::Error for SelectionError {}

// ---------------------------------------------------------------------------
// Team selection — "my team" vs. opponent, server-backed list
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TeamSelectState {
    /// Server-backed list, replaced wholesale on each load.
    pub teams: Vec<Team>,
    chosen: [Option<Team>; 2],
    /// Fielded subset per side. Empty means "use the full roster".
    fielded: [Vec<Player>; 2],
    /// Surfaced to the caller as an alert; the list itself just stays empty.
    pub load_error: Option<String>,
}

impl TeamSelectState {
    /// Store a freshly fetched team list. No incremental sync.
    pub fn load(&mut self, teams: Vec<Team>) {
        self.load_error = None;
        self.teams = teams;
    }

    pub fn on_load_failed(&mut self, message: String) {
        self.teams.clear();
        self.load_error = Some(message);
    }

    /// Select a team for one side. The side's fielded-player subset is
    /// cleared unconditionally: a roster subset from a previously selected
    /// team must never leak into the new team's match.
    pub fn choose(&mut self, side: TeamSide, team: Team) {
        self.fielded[side.index()].clear();
        self.chosen[side.index()] = Some(team);
    }

    pub fn chosen(&self, side: TeamSide) -> Option<&Team> {
        self.chosen[side.index()].as_ref()
    }

    pub fn fielded_players(&self, side: TeamSide) -> &[Player] {
        &self.fielded[side.index()]
    }

    /// Record a confirmed picker selection for one side.
    pub fn set_fielded(&mut self, side: TeamSide, players: Vec<Player>) {
        self.fielded[side.index()] = players;
    }

    /// The "Continue" gate: both sides need a team; player subsets are
    /// optional.
    pub fn both_teams_selected(&self) -> bool {
        self.chosen.iter().all(|slot| slot.is_some())
    }

    /// Resolve the pair to hand to the setup draft. A side with an empty
    /// subset fields its full roster.
    pub fn fielded_pair(&self) -> Result<(Team, Team), SelectionError> {
        let (Some(a), Some(b)) = (&self.chosen[0], &self.chosen[1]) else {
            return Err(SelectionError::TeamsIncomplete);
        };
        Ok((self.with_fielded(a, TeamSide::A), self.with_fielded(b, TeamSide::B)))
    }

    fn with_fielded(&self, team: &Team, side: TeamSide) -> Team {
        let subset = &self.fielded[side.index()];
        let mut fielded = team.clone();
        if !subset.is_empty() {
            fielded.players = subset.clone();
        }
        fielded
    }
}

// ---------------------------------------------------------------------------
// Player picker — modal-driven roster subset selection
// ---------------------------------------------------------------------------

/// Selection state for the player-picker modal. Re-initialized from the
/// caller's last-confirmed selection on every open, so an open–cancel cycle
/// leaves nothing behind.
#[derive(Debug, Default)]
pub struct PlayerPicker {
    pub open: bool,
    team_id: Option<String>,
    pub roster: Vec<Player>,
    selected: Vec<Player>,
    query: String,
    pub results: Vec<Player>,
    pub error: Option<String>,
}

impl PlayerPicker {
    pub fn open(&mut self, team_id: impl Into<String>, confirmed: &[Player]) {
        self.open = true;
        self.team_id = Some(team_id.into());
        self.roster.clear();
        self.selected = confirmed.to_vec();
        self.query.clear();
        self.results.clear();
        self.error = None;
    }

    pub fn team_id(&self) -> Option<&str> {
        self.team_id.as_deref()
    }

    /// Store the fetched roster wholesale.
    pub fn set_roster(&mut self, players: Vec<Player>) {
        self.error = None;
        self.roster = players;
    }

    pub fn on_roster_failed(&mut self, message: String) {
        self.roster.clear();
        self.error = Some(message);
    }

    pub fn selected(&self) -> &[Player] {
        &self.selected
    }

    pub fn is_selected(&self, player_id: &str) -> bool {
        self.selected.iter().any(|p| p.id == player_id)
    }

    pub fn toggle(&mut self, player: &Player) {
        if let Some(pos) = self.selected.iter().position(|p| p.id == player.id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(player.clone());
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// The directory query to fire, once it clears the minimum length.
    /// Below that the caller sends nothing and shows no results.
    pub fn search_query(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (trimmed.chars().count() >= MIN_SEARCH_LEN).then_some(trimmed)
    }

    /// Accept directory results, but only for the query still on screen —
    /// a stale response from an earlier keystroke is dropped.
    pub fn set_results(&mut self, query: &str, players: Vec<Player>) {
        if self.search_query() == Some(query) {
            self.results = players;
        }
    }

    /// Add a searched player to the roster and the current selection in one
    /// step. A player already on the roster is left untouched.
    pub fn add_searched_player(&mut self, player: Player) {
        if self.roster.iter().any(|p| p.id == player.id) {
            return;
        }
        if !self.is_selected(&player.id) {
            self.selected.push(player.clone());
        }
        self.roster.push(player);
    }

    /// Close the modal and hand the chosen players back to the caller.
    pub fn confirm(&mut self) -> Vec<Player> {
        self.open = false;
        std::mem::take(&mut self.selected)
    }

    /// Close the modal and discard in-progress changes.
    pub fn cancel(&mut self) {
        self.open = false;
        self.selected.clear();
        self.query.clear();
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: &str) -> Player {
        Player { id: id.into(), username: id.into(), name: id.to_uppercase(), ..Default::default() }
    }

    fn team(id: &str, roster: &[&str]) -> Team {
        Team {
            id: Some(id.into()),
            name: id.to_uppercase(),
            players: roster.iter().map(|p| player(p)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn choosing_a_new_team_clears_that_sides_subset_unconditionally() {
        let mut state = TeamSelectState::default();
        state.choose(TeamSide::A, team("t1", &["p1", "p2"]));
        state.set_fielded(TeamSide::A, vec![player("p1")]);
        assert_eq!(state.fielded_players(TeamSide::A).len(), 1);

        state.choose(TeamSide::A, team("t2", &["p3"]));
        assert!(state.fielded_players(TeamSide::A).is_empty());
    }

    #[test]
    fn choosing_one_side_leaves_the_other_side_alone() {
        let mut state = TeamSelectState::default();
        state.choose(TeamSide::B, team("t9", &["p9"]));
        state.set_fielded(TeamSide::B, vec![player("p9")]);
        state.choose(TeamSide::A, team("t1", &["p1"]));
        assert_eq!(state.fielded_players(TeamSide::B).len(), 1);
    }

    #[test]
    fn continue_gate_requires_both_teams() {
        let mut state = TeamSelectState::default();
        assert!(!state.both_teams_selected());
        state.choose(TeamSide::A, team("t1", &[]));
        assert!(!state.both_teams_selected());
        state.choose(TeamSide::B, team("t2", &[]));
        assert!(state.both_teams_selected());
    }

    #[test]
    fn empty_subset_falls_back_to_full_roster() {
        let mut state = TeamSelectState::default();
        state.choose(TeamSide::A, team("t1", &["p1", "p2", "p3"]));
        state.choose(TeamSide::B, team("t2", &["p4", "p5"]));
        state.set_fielded(TeamSide::B, vec![player("p5")]);

        let (a, b) = state.fielded_pair().unwrap();
        assert_eq!(a.players.len(), 3, "side A fields the full roster");
        assert_eq!(b.players.len(), 1, "side B fields the confirmed subset");
        assert_eq!(b.players[0].id, "p5");
    }

    #[test]
    fn fielded_pair_needs_both_sides() {
        let mut state = TeamSelectState::default();
        state.choose(TeamSide::A, team("t1", &[]));
        assert_eq!(state.fielded_pair().unwrap_err(), SelectionError::TeamsIncomplete);
    }

    #[test]
    fn load_failure_leaves_an_empty_list_and_a_message() {
        let mut state = TeamSelectState::default();
        state.load(vec![team("t1", &[])]);
        state.on_load_failed("network down".into());
        assert!(state.teams.is_empty());
        assert_eq!(state.load_error.as_deref(), Some("network down"));
        state.load(vec![team("t2", &[])]);
        assert!(state.load_error.is_none());
    }

    #[test]
    fn picker_reopens_from_last_confirmed_not_from_leftovers() {
        let mut picker = PlayerPicker::default();
        let confirmed = vec![player("p1")];

        picker.open("t1", &confirmed);
        picker.set_roster(vec![player("p1"), player("p2")]);
        picker.toggle(&player("p2"));
        picker.cancel();

        picker.open("t1", &confirmed);
        assert_eq!(picker.selected(), confirmed.as_slice(), "cancelled toggle must not survive");
    }

    #[test]
    fn picker_toggle_adds_and_removes() {
        let mut picker = PlayerPicker::default();
        picker.open("t1", &[]);
        picker.toggle(&player("p1"));
        assert!(picker.is_selected("p1"));
        picker.toggle(&player("p1"));
        assert!(!picker.is_selected("p1"));
    }

    #[test]
    fn search_needs_two_trimmed_characters() {
        let mut picker = PlayerPicker::default();
        picker.open("t1", &[]);
        picker.set_query(" k ");
        assert_eq!(picker.search_query(), None);
        picker.set_query("ka");
        assert_eq!(picker.search_query(), Some("ka"));
    }

    #[test]
    fn stale_search_results_are_dropped() {
        let mut picker = PlayerPicker::default();
        picker.open("t1", &[]);
        picker.set_query("kay");
        picker.set_results("ka", vec![player("u1")]);
        assert!(picker.results.is_empty(), "results for an older query must not land");
        picker.set_results("kay", vec![player("u1")]);
        assert_eq!(picker.results.len(), 1);
    }

    #[test]
    fn searched_player_joins_roster_and_selection_once() {
        let mut picker = PlayerPicker::default();
        picker.open("t1", &[]);
        picker.set_roster(vec![player("p1")]);

        picker.add_searched_player(player("u1"));
        assert!(picker.roster.iter().any(|p| p.id == "u1"));
        assert!(picker.is_selected("u1"));

        // Already a member: nothing changes.
        picker.add_searched_player(player("p1"));
        assert_eq!(picker.roster.len(), 2);
        assert!(!picker.is_selected("p1"));
    }

    #[test]
    fn confirm_returns_selection_and_closes() {
        let mut picker = PlayerPicker::default();
        picker.open("t1", &[]);
        picker.toggle(&player("p1"));
        let chosen = picker.confirm();
        assert!(!picker.open);
        assert_eq!(chosen.len(), 1);
        assert_eq!(chosen[0].id, "p1");
    }
}
