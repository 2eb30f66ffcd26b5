use serde_json::json;

use super::client::ApiClient;
use super::types::{AuthResponse, RegisterRequest, User};
use crate::error::ApiError;

impl ApiClient {
    /// Logs in and persists the returned token and user into the session
    /// store, so subsequent requests carry the bearer header.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self
            .post_json("/auth/login", &json!({ "email": email, "password": password }))
            .await?;
        self.session()
            .persist(response.token.clone(), response.user.clone())?;
        Ok(response)
    }

    /// Registers a new account. Like [`login`](Self::login), a success is
    /// also a session write.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let response: AuthResponse = self.post_json("/auth/register", request).await?;
        self.session()
            .persist(response.token.clone(), response.user.clone())?;
        Ok(response)
    }

    /// Fetches the authoritative user record for the current token.
    pub async fn get_me(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me").await
    }

    /// Clears the session and fires the redirect hook. Purely local; the
    /// server is not notified.
    pub fn logout(&self) {
        self.session().logout();
    }
}
