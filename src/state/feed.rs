use courtside_api::MatchUpdate;
use futures_util::StreamExt;
use log::debug;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tokio_tungstenite::{connect_async, tungstenite::Message};

#[derive(Debug, Clone)]
pub enum FeedSignal {
    Connected,
    Disconnected,
    Update(MatchUpdate),
    Error(String),
}

/// Websocket consumer for one match's push updates. Read-only: the client
/// never writes to this channel. Reconnects with a flat 2 s backoff until
/// the signal receiver goes away.
#[derive(Debug)]
pub struct FeedWorker {
    pub url: String,
    pub match_id: String,
    pub signals: mpsc::Sender<FeedSignal>,
}

impl FeedWorker {
    pub async fn run(self) {
        loop {
            match connect_async(self.url.as_str()).await {
                Ok((stream, _)) => {
                    let _ = self.signals.send(FeedSignal::Connected).await;
                    let (_write, mut read) = stream.split();

                    while let Some(inbound) = read.next().await {
                        match inbound {
                            Ok(Message::Text(text)) => {
                                match serde_json::from_str::<MatchUpdate>(&text) {
                                    Ok(update) if update.match_id == self.match_id => {
                                        let _ =
                                            self.signals.send(FeedSignal::Update(update)).await;
                                    }
                                    Ok(update) => {
                                        debug!(
                                            "ignoring frame for match {} (watching {})",
                                            update.match_id, self.match_id
                                        );
                                    }
                                    Err(e) => {
                                        let _ = self
                                            .signals
                                            .send(FeedSignal::Error(format!(
                                                "feed parse error: {e}"
                                            )))
                                            .await;
                                    }
                                }
                            }
                            Ok(Message::Close(_)) => break,
                            Ok(_) => {}
                            Err(e) => {
                                let _ = self
                                    .signals
                                    .send(FeedSignal::Error(format!("feed read failed: {e}")))
                                    .await;
                                break;
                            }
                        }
                    }
                    let _ = self.signals.send(FeedSignal::Disconnected).await;
                }
                Err(e) => {
                    let _ = self
                        .signals
                        .send(FeedSignal::Error(format!("feed connect failed: {e}")))
                        .await;
                    let _ = self.signals.send(FeedSignal::Disconnected).await;
                }
            }

            if self.signals.is_closed() {
                return;
            }
            sleep(Duration::from_secs(2)).await;
        }
    }
}
