//! Client library for the mess meal-tracking service.
//!
//! Wraps the service's REST endpoints behind a typed [`ApiClient`] with
//! bearer-token injection and forced logout on token expiry, keeps the
//! session in an injectable [`SessionStore`], maintains one live
//! [`RealtimeChannel`] for chat pushes, and ships the small pure helpers
//! the dashboards need (date formatting, check-in deadlines, streaks).
//!
//! ```no_run
//! use std::sync::Arc;
//! use messmate_client::{ApiClient, SessionStore};
//!
//! # async fn run() -> Result<(), messmate_client::ApiError> {
//! let session = Arc::new(SessionStore::in_memory());
//! let client = ApiClient::new(Arc::clone(&session));
//! client.login("asha@example.com", "secret").await?;
//! let today = client.get_today_check_ins().await?;
//! # let _ = today;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod realtime;
pub mod session;
pub mod utils;

pub use api::{ApiClient, RequestOptions};
pub use config::ClientConfig;
pub use error::ApiError;
pub use realtime::{MessageHandler, RealtimeChannel};
pub use session::{MemoryStorage, SessionStore, StorageBackend};
