//! WebSocket batch endpoint.
//!
//! The first text frame carries newline-separated URLs. One JSON result frame
//! is sent per URL as its walk completes, then `{"status":"done"}`, then the
//! socket is closed.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::sink::SinkExt;
use futures::stream::{SplitSink, SplitStream, StreamExt};
use log::{debug, error, info};
use tokio::sync::mpsc;

use super::super::types::AppState;
use crate::batch::run_batch;
use crate::models::BatchMessage;

/// Results buffered between the batch and a slow client.
const OUTBOUND_BUFFER: usize = 100;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let (sender, mut receiver) = socket.split();

    let Some(raw) = next_text(&mut receiver).await else {
        info!("Client disconnected before sending URLs");
        return;
    };

    let (tx, rx) = mpsc::channel::<BatchMessage>(OUTBOUND_BUFFER);
    let sender_task = tokio::spawn(forward_results(sender, rx));

    let report = run_batch(&raw, &state.ctx, tx).await;
    debug!(
        "Batch of {} URLs finished (delivered: {})",
        report.total, report.delivered
    );

    if let Err(e) = sender_task.await {
        error!("WebSocket sender task failed: {e}");
    }
    info!("Connection closed.");
}

/// Waits for the first text frame, skipping control frames.
async fn next_text(receiver: &mut SplitStream<WebSocket>) -> Option<String> {
    while let Some(msg) = receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => return Some(text.as_str().to_owned()),
            Ok(Message::Close(_)) => return None,
            Ok(other) => debug!("Ignoring non-text frame before URLs: {other:?}"),
            Err(e) => {
                debug!("WebSocket receive error: {e}");
                return None;
            }
        }
    }
    None
}

/// Sends each batch message as a JSON text frame.
///
/// Returning drops `rx`, which tells the batch to stop emitting.
async fn forward_results(
    mut sender: SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<BatchMessage>,
) {
    while let Some(msg) = rx.recv().await {
        let text = match serde_json::to_string(&msg) {
            Ok(t) => t,
            Err(e) => {
                error!("Failed to serialize result: {e}");
                continue;
            }
        };

        if let Err(e) = sender.send(Message::Text(text.into())).await {
            debug!("Failed to send result: {e}");
            return;
        }
    }

    let _ = sender.close().await;
}
