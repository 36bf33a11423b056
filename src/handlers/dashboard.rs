use crate::services::Explorer;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{Html, Response},
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::time::{interval, Duration};

const PLAYGROUND_HTML: &str = include_str!("playground.html");

pub async fn playground() -> Html<&'static str> {
    Html(PLAYGROUND_HTML)
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(explorer): State<Arc<Explorer>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, explorer))
}

/// Pushes the per-endpoint summary once a second until the peer goes away.
async fn handle_socket(socket: WebSocket, explorer: Arc<Explorer>) {
    let (mut sender, mut receiver) = socket.split();

    let mut interval = interval(Duration::from_secs(1));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let summary = explorer.summary().await;

                if let Ok(msg) = serde_json::to_string(&summary) {
                    if sender.send(Message::Text(msg)).await.is_err() {
                        break;
                    }
                }
            }

            msg = receiver.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                    Some(Ok(Message::Ping(data))) => {
                        if sender.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::debug!("WebSocket connection closed");
}
