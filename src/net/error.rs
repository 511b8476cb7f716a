//! Auth gateway failures.
//!
//! ERROR HANDLING
//! ==============
//! The session store never classifies or rewrites these; whatever the gateway
//! produced reaches the caller unchanged so the UI can render `message()`.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Coarse category of an [`AuthError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    Transport,
    Rejected,
    MalformedResponse,
}

/// Errors produced by an auth gateway call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The gateway could not be reached.
    #[error("auth gateway unreachable: {0}")]
    Transport(String),

    /// The gateway refused the request (bad credentials, duplicate account, ...).
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The gateway answered with a success status but an unusable body.
    #[error("malformed auth response: {0}")]
    MalformedResponse(String),
}

impl AuthError {
    #[must_use]
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            Self::Transport(_) => AuthErrorKind::Transport,
            Self::Rejected { .. } => AuthErrorKind::Rejected,
            Self::MalformedResponse(_) => AuthErrorKind::MalformedResponse,
        }
    }

    /// Human-readable message suitable for a login form.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Transport(m) | Self::MalformedResponse(m) | Self::Rejected { message: m, .. } => m,
        }
    }
}
