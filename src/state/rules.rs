use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Sport and per-sport rule sets
// ---------------------------------------------------------------------------

/// Sport of a match setup. Anything the rules engine has no dedicated
/// variant for rides through as `Other` with an untyped rule map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sport {
    Football,
    Basketball,
    Tennis,
    Other(String),
}

impl Sport {
    pub fn wire_label(&self) -> &str {
        match self {
            Sport::Football => "Football",
            Sport::Basketball => "Basketball",
            Sport::Tennis => "Tennis",
            Sport::Other(name) => name,
        }
    }
}

/// Rules of one match, keyed by sport. Each variant carries its typed knobs
/// plus an `extra` map for venue-specific rules the backend passes through
/// untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum SportRules {
    Football {
        duration_minutes: u32,
        extra_time: bool,
        extra: Map<String, Value>,
    },
    Basketball {
        quarters: u32,
        quarter_duration_mins: u32,
        extra: Map<String, Value>,
    },
    Tennis {
        tie_break_points: u32,
        extra: Map<String, Value>,
    },
    Other {
        extra: Map<String, Value>,
    },
}

impl SportRules {
    pub fn default_for(sport: &Sport) -> Self {
        match sport {
            Sport::Football => SportRules::Football {
                duration_minutes: 90,
                extra_time: false,
                extra: Map::new(),
            },
            Sport::Basketball => SportRules::Basketball {
                quarters: 4,
                quarter_duration_mins: 10,
                extra: Map::new(),
            },
            Sport::Tennis => SportRules::Tennis { tie_break_points: 7, extra: Map::new() },
            Sport::Other(_) => SportRules::Other { extra: Map::new() },
        }
    }

    /// Build basketball rules from the configuration strings the selection
    /// screens collect ("4 Quarters", "6 Quarters", ...).
    pub fn basketball_from_config(quarters_label: &str, quarter_duration_mins: u32) -> Self {
        SportRules::Basketball {
            quarters: parse_quarters(quarters_label),
            quarter_duration_mins,
            extra: Map::new(),
        }
    }

    pub fn matches_sport(&self, sport: &Sport) -> bool {
        matches!(
            (self, sport),
            (SportRules::Football { .. }, Sport::Football)
                | (SportRules::Basketball { .. }, Sport::Basketball)
                | (SportRules::Tennis { .. }, Sport::Tennis)
                | (SportRules::Other { .. }, Sport::Other(_))
        )
    }

    pub fn extra_mut(&mut self) -> &mut Map<String, Value> {
        match self {
            SportRules::Football { extra, .. }
            | SportRules::Basketball { extra, .. }
            | SportRules::Tennis { extra, .. }
            | SportRules::Other { extra } => extra,
        }
    }

    /// Flatten into the single rules map the creation endpoint expects.
    /// Typed fields overwrite colliding `extra` keys — the typed knobs are
    /// what the user actually confirmed.
    pub fn to_wire(&self) -> Map<String, Value> {
        let mut map = match self {
            SportRules::Football { extra, .. }
            | SportRules::Basketball { extra, .. }
            | SportRules::Tennis { extra, .. }
            | SportRules::Other { extra } => extra.clone(),
        };
        match self {
            SportRules::Football { duration_minutes, extra_time, .. } => {
                map.insert("durationMinutes".into(), Value::from(*duration_minutes));
                map.insert("extraTime".into(), Value::from(*extra_time));
            }
            SportRules::Basketball { quarters, quarter_duration_mins, .. } => {
                map.insert("quarters".into(), Value::from(*quarters));
                map.insert("quarterDurationMins".into(), Value::from(*quarter_duration_mins));
            }
            SportRules::Tennis { tie_break_points, .. } => {
                map.insert("tieBreakPoints".into(), Value::from(*tie_break_points));
            }
            SportRules::Other { .. } => {}
        }
        map
    }
}

/// Parse the quarter count out of a "N Quarters" configuration label.
/// Anything unparseable falls back to the regulation 4.
pub fn parse_quarters(label: &str) -> u32 {
    label
        .split_whitespace()
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(4)
}
