/// Runtime configuration, environment-driven with local-dev defaults.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Base URL of the venue-booking backend.
    pub api_url: String,
    /// Websocket endpoint of the match-update feed.
    pub ws_url: String,
    /// Bearer token, attached per request when present.
    pub token: Option<String>,
    /// User identity the team list is keyed by.
    pub user_id: String,
}

impl ClientSettings {
    pub fn load() -> Self {
        Self {
            api_url: env_or("COURTSIDE_API_URL", "http://127.0.0.1:4000"),
            ws_url: env_or("COURTSIDE_WS_URL", "ws://127.0.0.1:8787"),
            token: std::env::var("COURTSIDE_TOKEN").ok().filter(|t| !t.trim().is_empty()),
            user_id: env_or("COURTSIDE_USER", "guest"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
