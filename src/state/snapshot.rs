//! Persisted session snapshot format.
//!
//! Stored text is `{"state":{"user":..,"token":..,"isAuthenticated":..},"version":0}`.
//! `loading` is never part of a snapshot.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use serde::{Deserialize, Serialize};

use crate::net::types::User;

pub const SNAPSHOT_VERSION: u32 = 0;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    /// `isAuthenticated` disagrees with the presence of `user` and `token`.
    #[error("inconsistent snapshot state")]
    Inconsistent,
}

/// The persisted subset of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub user: Option<User>,
    pub token: Option<String>,
    pub is_authenticated: bool,
}

impl Snapshot {
    /// Authenticated snapshots carry a user and a non-empty token; anonymous
    /// ones carry neither.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.is_authenticated {
            self.user.is_some() && self.token.as_deref().is_some_and(|t| !t.is_empty())
        } else {
            self.user.is_none() && self.token.is_none()
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: &'a Snapshot,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope {
    state: Snapshot,
    #[serde(default)]
    version: u32,
}

/// Serialize `snapshot` into the stored envelope.
///
/// # Errors
///
/// Returns [`SnapshotError::Parse`] if serialization fails.
pub fn encode(snapshot: &Snapshot) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&EnvelopeRef { state: snapshot, version: SNAPSHOT_VERSION })?)
}

/// Parse and validate stored envelope text.
///
/// # Errors
///
/// Returns a [`SnapshotError`] for unparseable text, a foreign version, or an
/// inconsistent state.
pub fn decode(raw: &str) -> Result<Snapshot, SnapshotError> {
    let envelope: Envelope = serde_json::from_str(raw)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion(envelope.version));
    }
    if !envelope.state.is_consistent() {
        return Err(SnapshotError::Inconsistent);
    }
    Ok(envelope.state)
}
