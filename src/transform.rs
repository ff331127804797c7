use crate::state::rules::{Sport, SportRules};
use crate::state::setup::{MatchSetup, SetupError, Toss};
use chrono::{DateTime, SecondsFormat, Utc};
use courtside_api::wire::{MatchCreateRequest, TeamRef, WireLocation, WireToss};
use courtside_api::{Team, TeamSide};

// ---------------------------------------------------------------------------
// Setup draft → match-creation request body
// ---------------------------------------------------------------------------

/// Build the creation body for a finished setup. Pure: a given
/// `(setup, now)` pair always yields the same request. `now` is only used
/// when the setup carries no start date.
pub fn build_match_request(
    setup: &MatchSetup,
    now: DateTime<Utc>,
) -> Result<MatchCreateRequest, SetupError> {
    let (team_a, team_b) = setup.fielded_teams()?;

    let mut request = MatchCreateRequest {
        sport: setup.sport.wire_label().to_owned(),
        format: setup.format.clone(),
        tournament: setup.tournament_mode,
        start_at: setup
            .date
            .unwrap_or(now)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        location: WireLocation {
            city: setup.location.city.clone(),
            ground: setup.location.ground.clone(),
        },
        teams: vec![team_ref(team_a), team_ref(team_b)],
        rules: setup.rules.to_wire(),
        status: "scheduled".to_owned(),
        duration_minutes: None,
        quarters: None,
        quarter_duration_mins: None,
        toss: None,
    };

    // Per-sport extensions. SetupState keeps the rules variant aligned with
    // the sport, so a mismatched pair falls through to the base payload.
    match (&setup.sport, &setup.rules) {
        (Sport::Football, SportRules::Football { duration_minutes, .. }) => {
            request.duration_minutes = Some(*duration_minutes);
            request.toss = setup
                .toss
                .as_ref()
                .map(|t| map_toss(t, team_a, team_b, TossNaming::KickOff));
        }
        (Sport::Basketball, SportRules::Basketball { quarters, quarter_duration_mins, .. }) => {
            request.quarters = Some(*quarters);
            request.quarter_duration_mins = Some(*quarter_duration_mins);
        }
        (Sport::Tennis, _) => {
            request.toss = setup
                .toss
                .as_ref()
                .map(|t| map_toss(t, team_a, team_b, TossNaming::ServeFirst));
        }
        _ => {}
    }

    Ok(request)
}

fn team_ref(team: &Team) -> TeamRef {
    TeamRef {
        id: team.id.clone(),
        name: team.name.clone(),
        short_name: team.short_name.clone(),
        logo_url: team.logo_url.clone(),
        players: team.player_ids(),
    }
}

enum TossNaming {
    /// Football: the side going first is the kick-off.
    KickOff,
    /// Tennis: the side going first is the opening server.
    ServeFirst,
}

/// Map abstract toss sides onto concrete team ids. A side whose team has no
/// persisted id is omitted rather than invented. The side going first
/// defaults to the toss winner when not chosen explicitly.
fn map_toss(toss: &Toss, team_a: &Team, team_b: &Team, naming: TossNaming) -> WireToss {
    let id_for = |side: TeamSide| match side {
        TeamSide::A => team_a.id.clone(),
        TeamSide::B => team_b.id.clone(),
    };
    let first = toss.kick_off.unwrap_or(toss.winner);

    let mut wire = WireToss {
        toss_winner_team_id: id_for(toss.winner),
        kick_off_first_team_id: None,
        serve_first_team_id: None,
        side_of_serve: toss.side.map(|s| s.wire_label().to_owned()),
    };
    match naming {
        TossNaming::KickOff => wire.kick_off_first_team_id = id_for(first),
        TossNaming::ServeFirst => wire.serve_first_team_id = id_for(first),
    }
    wire
}
