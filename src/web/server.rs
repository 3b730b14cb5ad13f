//! WebSocket server streaming match snapshots to browser spectators.

use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Broadcast channel of JSON-encoded snapshots.
pub type SnapshotSender = broadcast::Sender<String>;

pub struct SpectatorServer {
    pub snapshot_tx: SnapshotSender,
}

impl SpectatorServer {
    pub fn new() -> Self {
        let (snapshot_tx, _) = broadcast::channel(64);
        Self { snapshot_tx }
    }

    /// Sender for a `SpectatorRenderer`.
    pub fn snapshot_sender(&self) -> SnapshotSender {
        self.snapshot_tx.clone()
    }
}

impl Default for SpectatorServer {
    fn default() -> Self {
        Self::new()
    }
}

/// Accept spectators on the given port until the runtime shuts down.
pub async fn start_spectator_server(
    port: u16,
    server: Arc<SpectatorServer>,
) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    info!(port, "spectator server listening");

    loop {
        match listener.accept().await {
            Ok((stream, addr)) => {
                let server = Arc::clone(&server);
                tokio::spawn(async move {
                    if let Err(e) = handle_connection(stream, addr, server).await {
                        warn!(%addr, error = %e, "spectator connection failed");
                    }
                });
            }
            Err(e) => warn!(error = %e, "accept failed"),
        }
    }
}

async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    server: Arc<SpectatorServer>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut peek_buf = [0u8; 512];
    let n = stream.peek(&mut peek_buf).await?;
    if is_page_request(&String::from_utf8_lossy(&peek_buf[..n])) {
        serve_html(stream).await?;
        return Ok(());
    }

    let ws_stream = tokio_tungstenite::accept_async(stream).await?;
    info!(%addr, "spectator connected");

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();
    let mut snapshot_rx = server.snapshot_tx.subscribe();

    let send_task = tokio::spawn(async move {
        loop {
            match snapshot_rx.recv().await {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(%addr, skipped, "spectator lagging");
                }
            }
        }
    });

    // Spectators are read-only: anything but a close is dropped.
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Close(_)) | Err(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    info!(%addr, "spectator disconnected");
    Ok(())
}

/// Plain `GET /` without a WebSocket upgrade.
fn is_page_request(request: &str) -> bool {
    request.starts_with("GET / ") && !request.to_ascii_lowercase().contains("upgrade: websocket")
}

async fn serve_html(mut stream: TcpStream) -> std::io::Result<()> {
    use tokio::io::AsyncWriteExt;

    let html = include_str!("../../web/index.html");
    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        html.len(),
        html
    );

    stream.write_all(response.as_bytes()).await?;
    Ok(())
}
