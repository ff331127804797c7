//! Dev-only fan-out relay for match-update frames. Point a scorer's console
//! and any number of courtside clients at the same port; every valid frame
//! one connection sends is broadcast to all the others. Frames that do not
//! parse as a `MatchUpdate` are dropped here instead of poisoning every
//! connected session.
use courtside_api::MatchUpdate;
use futures_util::{SinkExt, StreamExt};
use std::env;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::{accept_async, tungstenite::Message};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let addr = env::var("COURTSIDE_RELAY_BIND").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    let listener = TcpListener::bind(&addr).await?;
    let (tx, _rx) = broadcast::channel::<String>(512);

    eprintln!("score relay listening on {addr}");

    loop {
        let (stream, peer) = listener.accept().await?;
        let tx = tx.clone();
        let rx = tx.subscribe();
        tokio::spawn(async move {
            match handle_client(stream, tx, rx).await {
                Ok(stats) => eprintln!(
                    "client {peer} disconnected ({} relayed, {} rejected)",
                    stats.relayed, stats.rejected
                ),
                Err(e) => eprintln!("client {peer} dropped: {e}"),
            }
        });
    }
}

#[derive(Default)]
struct RelayStats {
    relayed: u64,
    rejected: u64,
}

async fn handle_client(
    stream: TcpStream,
    tx: broadcast::Sender<String>,
    mut rx: broadcast::Receiver<String>,
) -> anyhow::Result<RelayStats> {
    let ws = accept_async(stream).await?;
    let (mut write, mut read) = ws.split();
    let mut stats = RelayStats::default();

    loop {
        tokio::select! {
            inbound = read.next() => {
                match inbound {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<MatchUpdate>(&text) {
                            Ok(update) => {
                                stats.relayed += 1;
                                let _ = tx.send(text.to_string());
                                eprintln!(
                                    "relayed seq {} for match {}",
                                    update.seq, update.match_id
                                );
                            }
                            Err(e) => {
                                stats.rejected += 1;
                                eprintln!("rejected malformed frame: {e}");
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                }
            }
            outbound = rx.recv() => {
                match outbound {
                    Ok(text) => {
                        write.send(Message::Text(text.into())).await?;
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    Ok(stats)
}
