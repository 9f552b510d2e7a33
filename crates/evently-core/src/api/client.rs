use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ApiError, ApiResult, classify_reqwest_error};
use super::form::MultipartForm;
use super::types::{CreatedEvent, Event, LoginRequest, LoginResponse};
use crate::config::Config;
use crate::session::SharedSession;

/// Standard User-Agent header for evently requests.
pub const USER_AGENT: &str = concat!("evently/", env!("CARGO_PKG_VERSION"));

/// Client for the event service.
///
/// Every request goes through `request()`, which attaches
/// `Authorization: Bearer <token>` whenever the session holds a token.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    session: SharedSession,
}

impl Clone for ApiClient {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            http: self.http.clone(),
            session: Arc::clone(&self.session),
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.session.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client for `base_url` sharing `session`.
    ///
    /// # Errors
    /// Returns an error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        session: SharedSession,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        url::Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            session,
        })
    }

    /// Creates a client from the effective config values.
    ///
    /// # Errors
    /// Returns an error if the configured base URL is invalid.
    pub fn from_config(config: &Config, session: SharedSession) -> Result<Self> {
        let base_url = config.effective_base_url()?;
        Self::new(&base_url, session, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    // ========================================================================
    // Operations
    // ========================================================================

    /// Logs in and stores the returned token in the session.
    ///
    /// The session is left untouched on failure, and when the response carries
    /// no token.
    ///
    /// # Errors
    /// Returns a classified `ApiError` on failure.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let op = "login";
        let builder = self
            .request(Method::POST, "/auth/login")
            .json(&LoginRequest { email, password });
        let response = self.send(op, builder).await?;
        let body: LoginResponse = Self::read_json(op, response).await?;

        if let Some(token) = body.token.as_deref().filter(|t| !t.is_empty()) {
            self.session.set_token(token);
            tracing::info!("logged in");
        } else {
            tracing::warn!("login response carried no token");
        }
        Ok(body)
    }

    /// Creates an account. Does not log in.
    ///
    /// # Errors
    /// Returns a classified `ApiError` on failure.
    pub async fn signup(&self, form: MultipartForm) -> ApiResult<Value> {
        let op = "signup";
        let builder = self.multipart(op, Method::POST, "/auth/signup", form)?;
        let response = self.send(op, builder).await?;
        Self::read_json_or_null(op, response).await
    }

    /// Logs out and clears the session token.
    ///
    /// The local session ends even when the server call fails; the failure is
    /// still returned.
    ///
    /// # Errors
    /// Returns a classified `ApiError` on failure.
    pub async fn logout(&self) -> ApiResult<Value> {
        let op = "logout";
        let result = match self.send(op, self.request(Method::POST, "/api/logout")).await {
            Ok(response) => Self::read_json_or_null(op, response).await,
            Err(e) => Err(e),
        };
        self.session.clear();
        tracing::info!(acknowledged = result.is_ok(), "logged out");
        result
    }

    /// Fetches all events, in server order. Never cached.
    ///
    /// Records without a usable id are skipped; the rest of the listing is
    /// still returned.
    ///
    /// # Errors
    /// Returns a classified `ApiError` on failure, or `Unknown` when the body
    /// is not a JSON array.
    pub async fn list_events(&self) -> ApiResult<Vec<Event>> {
        let op = "list_events";
        let response = self.send(op, self.request(Method::GET, "/events")).await?;
        let records: Vec<Value> = Self::read_json(op, response).await?;
        let total = records.len();
        let events: Vec<Event> = records
            .into_iter()
            .filter_map(|record| {
                serde_json::from_value(record)
                    .inspect_err(|e| tracing::warn!(error = %e, "skipping event record"))
                    .ok()
            })
            .collect();
        if events.len() < total {
            tracing::warn!(skipped = total - events.len(), "listing had unreadable records");
        }
        Ok(events)
    }

    /// Fetches one event. A missing event is a `Server` error with status 404.
    ///
    /// # Errors
    /// Returns a classified `ApiError` on failure.
    pub async fn get_event(&self, id: &str) -> ApiResult<Event> {
        let op = "get_event";
        let url = self.event_url(id).inspect_err(|e| log_failure(op, e))?;
        let builder = self.decorate(self.http.get(url));
        let response = self.send(op, builder).await?;
        Self::read_json(op, response).await
    }

    /// Submits a new event as multipart form data.
    ///
    /// Any 2xx response means the event exists. The body is not required to
    /// be an `Event`; a non-JSON body is kept as a string.
    ///
    /// # Errors
    /// Returns a classified `ApiError` on failure.
    pub async fn create_event(&self, form: MultipartForm) -> ApiResult<CreatedEvent> {
        let op = "create_event";
        let builder = self.multipart(op, Method::POST, "/events", form)?;
        let response = self.send(op, builder).await?;
        let text = Self::read_text(op, response).await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        let created = CreatedEvent::from_body(body);
        tracing::info!(event_id = created.id.as_deref().unwrap_or("?"), "event created");
        Ok(created)
    }

    // ========================================================================
    // Request plumbing
    // ========================================================================

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.decorate(self.http.request(method, url))
    }

    /// Attaches the session token, if present.
    fn decorate(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn multipart(
        &self,
        op: &'static str,
        method: Method,
        path: &str,
        form: MultipartForm,
    ) -> ApiResult<RequestBuilder> {
        let form = form.into_reqwest().map_err(|e| {
            let err = ApiError::unknown(format!("Invalid multipart form: {e}"));
            log_failure(op, &err);
            err
        })?;
        Ok(self.request(method, path).multipart(form))
    }

    fn event_url(&self, id: &str) -> ApiResult<url::Url> {
        let mut url = url::Url::parse(&format!("{}/api/events", self.base_url))
            .map_err(|e| ApiError::unknown(format!("Invalid event URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::unknown("Base URL cannot carry a path"))?
            .push(id);
        Ok(url)
    }

    async fn send(&self, op: &'static str, builder: RequestBuilder) -> ApiResult<Response> {
        let response = builder.send().await.map_err(|e| {
            let err = classify_reqwest_error(&e);
            log_failure(op, &err);
            err
        })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(operation = op, status = status.as_u16(), "request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = ApiError::server(status.as_u16(), &body);
        log_failure(op, &err);
        Err(err)
    }

    async fn read_json<T: DeserializeOwned>(op: &'static str, response: Response) -> ApiResult<T> {
        let text = Self::read_text(op, response).await?;
        serde_json::from_str(&text).map_err(|e| {
            let err = ApiError::unknown(format!("Malformed response: {e}"));
            log_failure(op, &err);
            err
        })
    }

    async fn read_json_or_null(op: &'static str, response: Response) -> ApiResult<Value> {
        let text = Self::read_text(op, response).await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| {
            let err = ApiError::unknown(format!("Malformed response: {e}"));
            log_failure(op, &err);
            err
        })
    }

    async fn read_text(op: &'static str, response: Response) -> ApiResult<String> {
        response.text().await.map_err(|e| {
            let err = classify_reqwest_error(&e);
            log_failure(op, &err);
            err
        })
    }
}

fn log_failure(op: &str, err: &ApiError) {
    tracing::warn!(operation = op, kind = %err.kind(), error = %err, "request failed");
}
