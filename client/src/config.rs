use std::time::Duration;

/// Connection settings for the API client and the realtime channel.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address for HTTP endpoints; endpoint paths are appended as-is.
    pub base_url: String,
    /// Address the realtime channel connects to.
    pub socket_url: String,
    /// Declared request timeout. Advisory only: the HTTP transport does not
    /// enforce it.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            socket_url: "ws://localhost:5000".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_socket_url(mut self, socket_url: impl Into<String>) -> Self {
        self.socket_url = socket_url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:5000/api");
        assert_eq!(config.socket_url, "ws://localhost:5000");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn new_overrides_base_url_only() {
        let config = ClientConfig::new("http://example.test/api");
        assert_eq!(config.base_url, "http://example.test/api");
        assert_eq!(config.socket_url, "ws://localhost:5000");
    }
}
