use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The three meals the service tracks. Wire names are lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    /// Wall-clock hour after which a check-in for this meal is closed.
    pub fn deadline_hour(self) -> u32 {
        match self {
            MealType::Breakfast => 9,
            MealType::Lunch => 14,
            MealType::Dinner => 21,
        }
    }
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "breakfast"),
            MealType::Lunch => write!(f, "lunch"),
            MealType::Dinner => write!(f, "dinner"),
        }
    }
}

/// Account record as returned by the auth endpoints.
///
/// The server attaches stat fields (points, streaks, …) that grow over time;
/// anything not modelled here is kept in `extra` so partial profile updates
/// merged via [`SessionStore::update_user`](crate::session::SessionStore)
/// survive a serialize round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub eco_points: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Payload of a successful login or registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionData {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A recorded meal check-in. Owned by the server; this layer only reads it
/// (streak computation looks at `date` and nothing else).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    #[serde(default)]
    pub id: Option<String>,
    pub date: DateTime<Utc>,
    pub meal_type: MealType,
    #[serde(default)]
    pub meal_name: Option<String>,
    #[serde(default)]
    pub nutrition_data: Option<NutritionData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckIn {
    pub meal_type: MealType,
    pub meal_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition_data: Option<NutritionData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    #[serde(default)]
    pub eco_points: i64,
    #[serde(default)]
    pub streak: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInResponse {
    #[serde(default)]
    pub check_in: Option<CheckIn>,
    #[serde(default)]
    pub updated_stats: Option<UserStats>,
}

/// Which meals have already been checked in today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayStatus {
    #[serde(default)]
    pub breakfast: bool,
    #[serde(default)]
    pub lunch: bool,
    #[serde(default)]
    pub dinner: bool,
}

impl TodayStatus {
    pub fn is_checked(&self, meal: MealType) -> bool {
        match meal {
            MealType::Breakfast => self.breakfast,
            MealType::Lunch => self.lunch,
            MealType::Dinner => self.dinner,
        }
    }
}

/// A chat message, either fetched over HTTP or pushed over the realtime
/// channel as a `newMessage` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub content: String,
    pub channel: String,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}
