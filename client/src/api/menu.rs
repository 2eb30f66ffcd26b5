use serde_json::Value;

use super::client::ApiClient;
use crate::error::ApiError;

impl ApiClient {
    /// This week's menu. The shape is owned by the kitchen admin tooling
    /// and changes term to term, so it stays a loose JSON value.
    pub async fn get_weekly_menu(&self) -> Result<Value, ApiError> {
        self.get_json("/menu/weekly").await
    }
}
