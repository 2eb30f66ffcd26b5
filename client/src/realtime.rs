//! Live connection for server-pushed chat messages.
//!
//! The service pushes `newMessage` events over a WebSocket at the socket
//! URL; the client authenticates by sending `{"token": …}` as its first
//! frame. [`RealtimeChannel`] owns at most one live connection and is
//! handed around explicitly, the same way [`SessionStore`] is.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::api::types::ChatMessage;
use crate::error::ApiError;
use crate::session::SessionStore;

/// Receives every decoded `newMessage` event.
pub type MessageHandler = Arc<dyn Fn(ChatMessage) + Send + Sync>;

/// Frames the server pushes after authentication.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
enum ServerEvent {
    NewMessage(ChatMessage),
}

struct ChannelHandle {
    shutdown: oneshot::Sender<()>,
    reader: JoinHandle<()>,
}

/// Manager for the single live connection.
///
/// The handle's lifecycle is independent of the session: logging out does
/// not close an open channel, callers disconnect explicitly.
pub struct RealtimeChannel {
    socket_url: String,
    session: Arc<SessionStore>,
    on_message: MessageHandler,
    handle: Option<ChannelHandle>,
}

impl RealtimeChannel {
    pub fn new(
        socket_url: impl Into<String>,
        session: Arc<SessionStore>,
        on_message: MessageHandler,
    ) -> Self {
        Self {
            socket_url: socket_url.into(),
            session,
            on_message,
            handle: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.handle.is_some()
    }

    /// Opens the connection, authenticating with the token held by the
    /// session store at this moment; a token rotated later is not re-sent.
    ///
    /// Returns `Ok(false)` without connecting when unauthenticated. An
    /// already-open channel is disconnected first so the old connection is
    /// not leaked.
    pub async fn connect(&mut self) -> Result<bool, ApiError> {
        let Some(token) = self.session.token() else {
            return Ok(false);
        };
        if self.handle.is_some() {
            self.disconnect().await;
        }

        let (mut stream, _) = connect_async(self.socket_url.as_str()).await?;
        stream
            .send(Message::Text(json!({ "token": token }).to_string()))
            .await?;
        log::info!("connected to real-time server");

        let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();
        let on_message = Arc::clone(&self.on_message);
        let reader = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        let _ = stream.send(Message::Close(None)).await;
                        break;
                    }
                    frame = stream.next() => match frame {
                        Some(Ok(Message::Text(text))) => {
                            match serde_json::from_str::<ServerEvent>(&text) {
                                Ok(ServerEvent::NewMessage(message)) => on_message(message),
                                Err(error) => {
                                    log::debug!("ignoring unrecognized frame: {}", error);
                                }
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => {
                            log::info!("disconnected from real-time server");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(error)) => {
                            log::error!("realtime channel error: {}", error);
                            break;
                        }
                    }
                }
            }
        });

        self.handle = Some(ChannelHandle { shutdown, reader });
        Ok(true)
    }

    /// Closes the live connection, if any, and clears the handle. Safe to
    /// call repeatedly.
    pub async fn disconnect(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.shutdown.send(());
            let _ = handle.reader.await;
        }
    }
}

impl std::fmt::Debug for RealtimeChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeChannel")
            .field("socket_url", &self.socket_url)
            .field("connected", &self.is_connected())
            .finish()
    }
}
