use serde_json::{json, Value};

use super::client::ApiClient;
use super::types::{CheckIn, CheckInResponse, CreateCheckIn, TodayStatus};
use crate::error::ApiError;

impl ApiClient {
    /// Records a meal check-in for the current user.
    pub async fn create_check_in(&self, request: &CreateCheckIn) -> Result<CheckInResponse, ApiError> {
        self.post_json("/checkins", request).await
    }

    /// Full check-in history for the current user, newest first per the
    /// server contract.
    pub async fn get_my_check_ins(&self) -> Result<Vec<CheckIn>, ApiError> {
        self.get_json("/checkins/my").await
    }

    /// Which meals are already checked in today.
    pub async fn get_today_check_ins(&self) -> Result<TodayStatus, ApiError> {
        self.get_json("/checkins/today").await
    }

    pub async fn submit_feedback(
        &self,
        check_in_id: &str,
        rating: u8,
        feedback: &str,
    ) -> Result<Value, ApiError> {
        self.post_json(
            &format!("/checkins/{}/feedback", check_in_id),
            &json!({ "rating": rating, "feedback": feedback }),
        )
        .await
    }
}
