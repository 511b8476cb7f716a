//! Auth gateway seam and its REST implementation.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: the HTTP gateway reports a transport
//! error, since the endpoints are only meaningful from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every outcome is folded into [`AuthError`] here: transport failures, non-2xx
//! statuses carrying the gateway's `message`, and 2xx bodies missing `user` or
//! `token`. Callers never inspect raw response payloads.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::error::AuthError;
use super::types::{AuthSession, LoginRequest, RegisterRequest};
use crate::config::SessionConfig;

#[cfg(any(test, feature = "hydrate"))]
use super::types::User;
#[cfg(any(test, feature = "hydrate"))]
use serde::Deserialize;

/// Remote login/register endpoint consumed by the session store.
///
/// Futures are `?Send`: browser fetch futures are bound to the UI thread.
#[async_trait::async_trait(?Send)]
pub trait AuthGateway {
    /// Verify credentials and issue a session.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the gateway is unreachable, rejects the
    /// credentials, or answers with an unusable body.
    async fn login(&self, request: &LoginRequest) -> Result<AuthSession, AuthError>;

    /// Create an account and issue a session for it.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`AuthGateway::login`].
    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, AuthError>;
}

#[cfg(any(test, feature = "hydrate"))]
fn endpoint(base_url: &str, path: &str) -> String {
    format!("{base_url}{path}")
}

#[cfg(any(test, feature = "hydrate"))]
fn failed_message(operation: &str, status: u16) -> String {
    format!("{operation} failed: {status}")
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct AuthResponseBody {
    user: Option<User>,
    token: Option<String>,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Interpret a 2xx body as `{user, token}`.
#[cfg(any(test, feature = "hydrate"))]
fn decode_success_body(body: &str) -> Result<AuthSession, AuthError> {
    let parsed: AuthResponseBody =
        serde_json::from_str(body).map_err(|e| AuthError::MalformedResponse(e.to_string()))?;
    let Some(user) = parsed.user else {
        return Err(AuthError::MalformedResponse("response missing user".to_owned()));
    };
    match parsed.token {
        Some(token) if !token.is_empty() => Ok(AuthSession { user, token }),
        _ => Err(AuthError::MalformedResponse("response missing token".to_owned())),
    }
}

/// Interpret a non-2xx body, preferring the gateway's own `message`.
#[cfg(any(test, feature = "hydrate"))]
fn decode_failure_body(operation: &str, status: u16, body: &str) -> AuthError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| failed_message(operation, status));
    AuthError::Rejected { status, message }
}

/// [`AuthGateway`] backed by `POST {base}/auth/login` and `POST {base}/auth/register`.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    base_url: String,
}

impl HttpAuthGateway {
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self { base_url: config.api_base_url.clone() }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<T: serde::Serialize>(&self, operation: &str, path: &str, body: &T) -> Result<AuthSession, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let url = endpoint(&self.base_url, path);
            log::debug!("auth gateway: {operation} -> {url}");
            let resp = gloo_net::http::Request::post(&url)
                .json(body)
                .map_err(|e| AuthError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| AuthError::Transport(e.to_string()))?;
            let ok = resp.ok();
            let status = resp.status();
            let text = resp.text().await.map_err(|e| AuthError::Transport(e.to_string()))?;
            if ok { decode_success_body(&text) } else { Err(decode_failure_body(operation, status, &text)) }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (operation, path, body);
            Err(AuthError::Transport("not available on server".to_owned()))
        }
    }
}

#[async_trait::async_trait(?Send)]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, request: &LoginRequest) -> Result<AuthSession, AuthError> {
        self.post("login", "/auth/login", request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, AuthError> {
        self.post("register", "/auth/register", request).await
    }
}
