use serde_json::json;

use super::client::ApiClient;
use super::types::ChatMessage;
use crate::error::ApiError;

/// Channel used when callers have no reason to pick another one.
pub const DEFAULT_CHANNEL: &str = "general";

impl ApiClient {
    /// Message history for one channel.
    pub async fn get_messages(&self, channel: &str) -> Result<Vec<ChatMessage>, ApiError> {
        self.get_json(&format!("/messages/{}", channel)).await
    }

    /// Posts a message; other members receive it as a `newMessage` push on
    /// the realtime channel.
    pub async fn send_message(&self, content: &str, channel: &str) -> Result<ChatMessage, ApiError> {
        self.post_json("/messages", &json!({ "content": content, "channel": channel }))
            .await
    }
}
