//! The authenticated API client.
//!
//! Every call goes through [`ApiClient::send`]:
//!
//! 1. Attach the stored access token as a bearer credential, if any
//! 2. Pass any response that is not a first-time 401 straight back
//! 3. On a first-time 401, require both stored tokens or end the session
//! 4. Obtain a new access token through the single-flight coordinator
//! 5. Replay the request once with the new token
//!
//! A refresh failure is terminal: the session is torn down and every
//! request waiting on that refresh receives the refresh error.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use mentorhub_core::config::AppConfig;
use mentorhub_core::error::{AppError, ErrorKind};
use mentorhub_core::result::AppResult;
use mentorhub_core::traits::{Navigator, SessionStore};
use mentorhub_session::keys;

use crate::session::idle::ActivityTracker;
use crate::session::redirect::RedirectPolicy;
use crate::session::teardown::SessionTerminator;

use super::refresh::RefreshCoordinator;
use super::request::ApiRequest;

/// Body of the token refresh call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenRequest<'a> {
    expired_token: &'a str,
    refresh_token: &'a str,
}

/// Token refresh response. Fields beyond these are ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// HTTP client for the MentorHub API with transparent token refresh.
///
/// Clones share the session store, the navigator, and the refresh
/// coordinator, so a refresh started through one clone is awaited by all.
#[derive(Clone)]
pub struct ApiClient {
    /// Underlying HTTP client.
    http: reqwest::Client,
    /// Base URL with no trailing slash.
    base_url: String,
    /// Path of the refresh endpoint.
    refresh_path: String,
    /// Path of the login endpoint.
    login_path: String,
    /// Lifetime given to stored access tokens.
    access_ttl: Duration,
    /// Session credential store.
    store: Arc<dyn SessionStore>,
    /// Teardown and redirect on unrecoverable auth failure.
    terminator: SessionTerminator,
    /// Single-flight refresh state.
    refresh: Arc<RefreshCoordinator>,
    /// Activity sink for the idle monitor, if one is attached.
    activity: Option<ActivityTracker>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("refresh_path", &self.refresh_path)
            .field("refreshing", &self.refresh.is_refreshing())
            .finish()
    }
}

impl ApiClient {
    /// Build a client from configuration.
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> AppResult<Self> {
        let base_url = validate_base_url(&config.api.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_seconds))
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        let policy = RedirectPolicy::from_config(&config.routes);
        let terminator = SessionTerminator::new(Arc::clone(&store), navigator, policy);

        Ok(Self {
            http,
            base_url,
            refresh_path: config.api.refresh_path.clone(),
            login_path: config.api.login_path.clone(),
            access_ttl: Duration::from_secs(config.session.access_token_ttl_days * 86_400),
            store,
            terminator,
            refresh: Arc::new(RefreshCoordinator::new()),
            activity: None,
        })
    }

    /// Record activity on `tracker` for every request sent.
    pub fn with_activity_tracker(mut self, tracker: ActivityTracker) -> Self {
        self.activity = Some(tracker);
        self
    }

    /// The session store backing this client.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// The teardown handler shared with the idle monitor.
    pub fn terminator(&self) -> &SessionTerminator {
        &self.terminator
    }

    /// The refresh coordinator shared by all clones.
    pub fn refresh_coordinator(&self) -> &RefreshCoordinator {
        &self.refresh
    }

    /// Lifetime given to stored access tokens.
    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Path of the login endpoint.
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Send a request through the pipeline.
    ///
    /// Any HTTP response other than a recoverable 401 is returned as-is,
    /// including a 401 on the replayed request. Transport failures and
    /// terminal authentication failures come back as errors.
    pub async fn send(&self, request: ApiRequest) -> AppResult<Response> {
        if let Some(activity) = &self.activity {
            activity.touch();
        }

        let token = self.store.get(keys::ACCESS_TOKEN).await?;
        let response = self.dispatch(&request, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED || request.retried {
            return Ok(response);
        }

        let mut request = request;
        request.retried = true;
        self.recover(request, response).await
    }

    /// Send a request and decode a successful JSON response.
    ///
    /// Non-success statuses become [`AppError::from_status`].
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> AppResult<T> {
        let method = request.method.clone();
        let path = request.path.clone();

        let response = self.send(request).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(&method, &path, status, &body));
        }

        Ok(response.json::<T>().await?)
    }

    /// `GET` a path and decode the JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        self.send_json(ApiRequest::get(path)).await
    }

    /// Handle a first-time 401 for `request`.
    async fn recover(&self, request: ApiRequest, rejected: Response) -> AppResult<Response> {
        let epoch = self.terminator.epoch();
        let access_token = self.store.get(keys::ACCESS_TOKEN).await?;
        let refresh_token = self.store.get(keys::REFRESH_TOKEN).await?;

        let (Some(access_token), Some(refresh_token)) = (access_token, refresh_token) else {
            warn!(
                method = %request.method,
                path = %request.path,
                "Unauthorized with no refreshable session"
            );
            let status = rejected.status();
            let body = rejected.text().await.unwrap_or_default();
            self.terminator.terminate("missing credentials").await;
            return Err(status_error(&request.method, &request.path, status, &body));
        };

        debug!(
            method = %request.method,
            path = %request.path,
            "Access token rejected; obtaining a new one"
        );

        let token = self
            .refresh
            .run(|| self.refresh_session(epoch, access_token, refresh_token))
            .await?;

        debug!(method = %request.method, path = %request.path, "Replaying request");
        self.dispatch(&request, Some(&token)).await
    }

    /// Run the refresh call; on failure tear the session down.
    ///
    /// Only the caller that owns the in-flight refresh gets here. `epoch` is
    /// the session epoch the tokens were read under.
    async fn refresh_session(
        &self,
        epoch: u64,
        access_token: String,
        refresh_token: String,
    ) -> AppResult<String> {
        match self.exchange_tokens(epoch, &access_token, &refresh_token).await {
            Ok(token) => {
                info!("Access token refreshed");
                Ok(token)
            }
            Err(e) if self.terminator.epoch() != epoch => {
                debug!(error = %e, "Token refresh outlived its session");
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed; ending session");
                self.terminator.terminate("token refresh failed").await;
                Err(e)
            }
        }
    }

    /// Call the refresh endpoint and persist the new token(s).
    ///
    /// Nothing is stored if the session was torn down after `epoch`.
    async fn exchange_tokens(
        &self,
        epoch: u64,
        access_token: &str,
        refresh_token: &str,
    ) -> AppResult<String> {
        let url = self.endpoint(&self.refresh_path, &[])?;
        let response = self
            .http
            .post(url)
            .json(&RefreshTokenRequest {
                expired_token: access_token,
                refresh_token,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(&Method::POST, &self.refresh_path, status, &body));
        }

        let tokens: RefreshTokenResponse = response.json().await?;

        let _gate = self.terminator.hold().await;
        if self.terminator.epoch() != epoch {
            warn!("Session ended while the token refresh was in flight; discarding new token");
            return Err(AppError::session(
                "Session ended while the token refresh was in flight",
            ));
        }

        self.store
            .set(keys::ACCESS_TOKEN, &tokens.access_token, Some(self.access_ttl))
            .await?;
        if let Some(rotated) = &tokens.refresh_token {
            self.store.set(keys::REFRESH_TOKEN, rotated, None).await?;
        }

        Ok(tokens.access_token)
    }

    /// Issue `request` once with the given bearer token.
    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> AppResult<Response> {
        let url = self.endpoint(&request.path, &request.query)?;

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(request.headers.clone());
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        debug!(
            method = %request.method,
            path = %request.path,
            status = response.status().as_u16(),
            authenticated = token.is_some(),
            retried = request.retried,
            "API response"
        );
        Ok(response)
    }

    /// Resolve a path against the base URL.
    fn endpoint(&self, path: &str, query: &[(String, String)]) -> AppResult<Url> {
        let raw = if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}/{}", self.base_url, path.trim_start_matches('/'))
        };

        let mut url = Url::parse(&raw)
            .map_err(|e| AppError::validation(format!("Invalid request URL '{raw}': {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

/// Check the configured base URL and strip any trailing slash.
fn validate_base_url(raw: &str) -> AppResult<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AppError::configuration(
            "api.base_url is empty; set MENTORHUB__API__BASE_URL",
        ));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| AppError::configuration(format!("Invalid api.base_url '{raw}': {e}")))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AppError::configuration(format!(
            "api.base_url must be http or https, got '{}'",
            url.scheme()
        )));
    }

    Ok(trimmed.to_string())
}

/// Build an error for a non-success response.
///
/// Prefers the API's own `message` field when the body is JSON.
fn status_error(method: &Method, path: &str, status: StatusCode, body: &str) -> AppError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string());

    let message = if detail.is_empty() {
        format!("{method} {path} failed with {status}")
    } else {
        format!("{method} {path} failed with {status}: {detail}")
    };
    AppError::from_status(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url() {
        assert_eq!(
            validate_base_url("https://api.mentorhub.test/v1/").unwrap(),
            "https://api.mentorhub.test/v1"
        );
        assert!(validate_base_url("").is_err());
        assert!(validate_base_url("ftp://files.test").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn test_status_error_prefers_api_message() {
        let err = status_error(
            &Method::GET,
            "/users",
            StatusCode::NOT_FOUND,
            r#"{"message":"User not found"}"#,
        );
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.status, Some(404));
        assert!(err.message.ends_with("User not found"));
    }

    #[test]
    fn test_status_error_without_body() {
        let err = status_error(&Method::POST, "/auth/login", StatusCode::UNAUTHORIZED, "");
        assert!(err.is_unauthorized());
        assert_eq!(err.message, "POST /auth/login failed with 401 Unauthorized");
    }
}
