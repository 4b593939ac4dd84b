/* src/server/adapter/axum/src/handler/ws.rs */

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::broadcast::error::RecvError;

/// Dev websocket endpoint. Each connected page holds one socket and reloads
/// itself when a full-reload broadcast arrives.
pub(crate) async fn handle_reload_ws(
  State(state): State<Arc<super::AppState>>,
  upgrade: WebSocketUpgrade,
) -> Response {
  let controller = Arc::clone(&state.controller);
  upgrade.on_upgrade(move |socket| async move {
    reload_loop(socket, controller.subscribe_full_reload()).await;
  })
}

async fn reload_loop(
  mut socket: WebSocket,
  mut reloads: tokio::sync::broadcast::Receiver<portico_server::FullReload>,
) {
  loop {
    tokio::select! {
      reload = reloads.recv() => match reload {
        Ok(_) => {
          if socket.send(Message::Text("reload".into())).await.is_err() {
            break;
          }
        }
        // A lagged receiver missed some broadcasts, but one reload is as
        // good as many.
        Err(RecvError::Lagged(_)) => {
          if socket.send(Message::Text("reload".into())).await.is_err() {
            break;
          }
        }
        Err(RecvError::Closed) => break,
      },
      incoming = socket.recv() => match incoming {
        Some(Ok(_)) => {} // clients only listen; ignore anything they send
        _ => break,
      },
    }
  }
}
