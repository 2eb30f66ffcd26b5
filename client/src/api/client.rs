use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::SessionStore;

/// Per-request knobs for [`ApiClient::request`]. Defaults match a plain
/// unauthenticated GET: method GET, no extra headers, no body.
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    /// Overlaid last, so a caller-supplied header wins over the defaults
    /// (including `Authorization`).
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn method(method: Method) -> Self {
        Self {
            method: Some(method),
            ..Self::default()
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// HTTP gateway to the meal-tracking service.
///
/// Owns a `reqwest::Client` and a shared [`SessionStore`]; every endpoint
/// method in the `api` module is an `impl` extension on this type. The
/// gateway injects the bearer token, parses every response as JSON, and on
/// 401/403 tears the session down before surfacing
/// [`ApiError::SessionExpired`].
pub struct ApiClient {
    client: Client,
    config: ClientConfig,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(session: Arc<SessionStore>) -> Self {
        Self::with_config(ClientConfig::default(), session)
    }

    pub fn with_config(config: ClientConfig, session: Arc<SessionStore>) -> Self {
        Self {
            client: Client::new(),
            config,
            session,
        }
    }

    pub fn new_with_base_url(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        Self::with_config(ClientConfig::new(base_url), session)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issues one request and returns the parsed JSON body.
    ///
    /// Failures are logged here, once, and returned unchanged; there is no
    /// retry. See [`ApiError`] for the mapping from status codes.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        match self.dispatch(endpoint, options).await {
            Ok(value) => Ok(value),
            Err(error) => {
                log::error!("API request to {} failed: {}", endpoint, error);
                Err(error)
            }
        }
    }

    async fn dispatch(&self, endpoint: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let method = options.method.unwrap_or(Method::GET);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.session.token() {
            let bearer = format!("Bearer {}", token)
                .parse()
                .map_err(|_| ApiError::request_failed("Invalid token format"))?;
            headers.insert(AUTHORIZATION, bearer);
        }
        // Caller-supplied headers overlay the defaults.
        headers.extend(options.headers);

        let url = format!("{}{}", self.config.base_url, endpoint);
        let mut request = self.client.request(method, &url).headers(headers);
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        // The body is JSON no matter the status; error responses carry an
        // optional `error` string.
        let payload: Value = response.json().await?;

        if status.is_success() {
            return Ok(payload);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            // Token expired or invalid: unconditional teardown, the error
            // body is discarded.
            self.session.logout();
            return Err(ApiError::SessionExpired);
        }

        let message = payload
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Request failed");
        Err(ApiError::request_failed(message))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let value = self.request(endpoint, RequestOptions::default()).await?;
        Self::decode(endpoint, value)
    }

    pub(crate) async fn post_json<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let options = RequestOptions::method(Method::POST).body(serde_json::to_value(body)?);
        let value = self.request(endpoint, options).await?;
        Self::decode(endpoint, value)
    }

    fn decode<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, ApiError> {
        serde_json::from_value(value).map_err(|error| {
            log::error!("Failed to parse response from {}: {}", endpoint, error);
            ApiError::Payload(error)
        })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}
