//! Test helpers
//!
//! An in-process stand-in for the OrionDB socket service, plus event
//! helpers for the channel sink.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam::channel::Receiver;
use futures_util::{SinkExt, StreamExt};
use orion_client::Event;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_tungstenite::accept_hdr_async;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http;
use tokio_tungstenite::tungstenite::Message;

/// How long helpers wait before giving up
pub const WAIT: Duration = Duration::from_secs(5);

// =============================================================================
// Mock Server
// =============================================================================

/// What the mock server does with each connection
#[derive(Debug, Clone, Default)]
pub struct Behavior {
    /// Text messages sent right after the handshake
    pub greetings: Vec<String>,

    /// Raw frames (binary, control) sent after the text greetings
    pub frames: Vec<Message>,

    /// Close the connection right after the greetings
    pub close_after_greeting: bool,

    /// Drop the TCP stream right after the greetings, without a close frame
    pub drop_after_greeting: bool,

    /// Reply to every command with `{"type": <method>, "message": "ok"}`
    pub acknowledge: bool,

    /// Refuse the upgrade with 403
    pub reject: bool,
}

/// Accepts WebSocket connections on a random local port
pub struct MockServer {
    addr: SocketAddr,
    frames: mpsc::UnboundedReceiver<String>,
    accepted: Arc<AtomicUsize>,
    paths: Arc<Mutex<Vec<String>>>,
}

impl MockServer {
    pub async fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (tx, frames) = mpsc::unbounded_channel();
        let accepted = Arc::new(AtomicUsize::new(0));
        let paths = Arc::new(Mutex::new(Vec::new()));

        let accepted_clone = Arc::clone(&accepted);
        let paths_clone = Arc::clone(&paths);

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                accepted_clone.fetch_add(1, Ordering::SeqCst);

                let behavior = behavior.clone();
                let tx = tx.clone();
                let paths = Arc::clone(&paths_clone);

                tokio::spawn(async move {
                    let callback = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
                        paths.lock().unwrap().push(req.uri().path().to_string());
                        if behavior.reject {
                            let refusal = http::Response::builder()
                                .status(http::StatusCode::FORBIDDEN)
                                .body(Some("wrong password".to_string()))
                                .unwrap();
                            return Err(refusal);
                        }
                        Ok(resp)
                    };

                    let mut ws = match accept_hdr_async(stream, callback).await {
                        Ok(ws) => ws,
                        Err(_) => return,
                    };

                    for greeting in &behavior.greetings {
                        if ws.send(Message::Text(greeting.clone())).await.is_err() {
                            return;
                        }
                    }

                    for frame in &behavior.frames {
                        if ws.send(frame.clone()).await.is_err() {
                            return;
                        }
                    }

                    if behavior.drop_after_greeting {
                        // Read the client's pong first so nothing is left unread
                        let _ = tokio::time::timeout(Duration::from_millis(500), async {
                            while let Some(Ok(message)) = ws.next().await {
                                if message.is_pong() {
                                    break;
                                }
                            }
                        })
                        .await;
                        drop(ws);
                        return;
                    }

                    if behavior.close_after_greeting {
                        let _ = ws.close(None).await;
                        while let Some(Ok(_)) = ws.next().await {}
                        return;
                    }

                    while let Some(Ok(message)) = ws.next().await {
                        if let Message::Text(text) = message {
                            let ack = acknowledgement(&text);
                            let _ = tx.send(text);
                            if behavior.acknowledge && ws.send(Message::Text(ack)).await.is_err() {
                                return;
                            }
                        }
                    }
                });
            }
        });

        Self {
            addr,
            frames,
            accepted,
            paths,
        }
    }

    /// URL of this server for `route`
    pub fn url(&self, route: &str) -> String {
        format!("ws://{}{}", self.addr, route)
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Next text frame a client sent, `None` after a timeout
    pub async fn next_frame(&mut self) -> Option<String> {
        tokio::time::timeout(WAIT, self.frames.recv())
            .await
            .ok()
            .flatten()
    }

    /// True if no frame arrives within `ms`
    pub async fn quiet_for(&mut self, ms: u64) -> bool {
        tokio::time::timeout(Duration::from_millis(ms), self.frames.recv())
            .await
            .is_err()
    }

    /// Number of TCP connections accepted so far
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    /// Request paths seen during handshakes
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

/// The OrionDB service's reply shape
pub fn acknowledgement(command: &str) -> String {
    let method = serde_json::from_str::<serde_json::Value>(command)
        .ok()
        .and_then(|v| v["method"].as_str().map(str::to_string))
        .unwrap_or_else(|| "error".to_string());

    serde_json::json!({ "type": method, "message": "ok" }).to_string()
}

/// A local address nothing is listening on
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

// =============================================================================
// Event Helpers
// =============================================================================

/// Wait for the next sink event without blocking the runtime
pub async fn next_event(events: &Receiver<Event>) -> Option<Event> {
    let events = events.clone();
    tokio::task::spawn_blocking(move || events.recv_timeout(WAIT).ok())
        .await
        .unwrap()
}

/// Wait for the next inbound message, skipping nothing
pub async fn next_text(events: &Receiver<Event>) -> String {
    match next_event(events).await {
        Some(Event::Received(message)) => message.to_string(),
        other => panic!("Expected an inbound message, got {:?}", other),
    }
}
