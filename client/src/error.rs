use thiserror::Error;

/// Failure taxonomy for the API client and the realtime channel.
///
/// Every failure is logged once where it is detected and then returned
/// unchanged to the caller. There is no retry and no local recovery; the
/// only side effect the client performs on its own is the forced session
/// teardown behind [`ApiError::SessionExpired`].
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered 401 or 403. The session has already been torn
    /// down (and the redirect hook fired) by the time this is returned.
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// Any other non-success status, carrying the server's `error` message
    /// when the body had one.
    #[error("{0}")]
    RequestFailed(String),

    /// Network-level failure or a response body that was not valid JSON.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A JSON payload that parsed but did not match the expected record
    /// shape, or a corrupt persisted session record.
    #[error("Failed to parse payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Realtime channel connect or stream failure.
    #[error("Realtime channel error: {0}")]
    Realtime(#[from] tokio_tungstenite::tungstenite::Error),

    /// The injected storage backend rejected a read or write.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::RequestFailed(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// True for the variant raised after a forced logout.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}
