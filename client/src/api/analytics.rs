use serde_json::Value;

use super::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// Per-user stats for the dashboard charts. Loose JSON; the charting
    /// layer consumes whatever series the server computes.
    pub async fn get_my_analytics(&self) -> Result<Value, ApiError> {
        self.get_json("/analytics/my").await
    }

    pub async fn get_leaderboard(&self) -> Result<Value, ApiError> {
        self.get_json("/leaderboard").await
    }
}
