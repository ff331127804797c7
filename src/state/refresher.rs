use crate::state::messages::SessionRequest;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::interval;

/// Fallback resync — every 30 seconds while the push feed is down.
/// Does nothing while the websocket is healthy; the feed is authoritative.
pub struct FallbackRefresher {
    match_id: String,
    requests: mpsc::Sender<SessionRequest>,
    feed_connected: watch::Receiver<bool>,
}

impl FallbackRefresher {
    pub fn new(
        match_id: String,
        requests: mpsc::Sender<SessionRequest>,
        feed_connected: watch::Receiver<bool>,
    ) -> Self {
        Self { match_id, requests, feed_connected }
    }

    pub async fn run(self) {
        let mut tick = interval(Duration::from_secs(30));
        // Skip the immediate first tick so a fresh session isn't double-loaded.
        tick.tick().await;

        loop {
            tick.tick().await;
            if *self.feed_connected.borrow() {
                continue;
            }
            if self
                .requests
                .send(SessionRequest::RefreshMatch { match_id: self.match_id.clone() })
                .await
                .is_err()
            {
                break;
            }
        }
    }
}
