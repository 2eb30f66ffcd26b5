mod analytics;
mod auth;
mod checkins;
pub mod client;
mod menu;
mod messages;
pub mod types;

pub use client::*;
pub use messages::DEFAULT_CHANNEL;
pub use types::*;
