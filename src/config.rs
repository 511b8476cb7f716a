//! Session configuration resolved at build time.
//!
//! The WASM bundle has no process environment at runtime, so overrides are
//! baked in through `option_env!` when the crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "/api";
pub const DEFAULT_STORAGE_KEY: &str = "auth-storage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Prefix for auth gateway endpoints, without a trailing slash.
    pub api_base_url: String,
    /// Persistence key holding this application's session snapshot.
    pub storage_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_owned(), storage_key: DEFAULT_STORAGE_KEY.to_owned() }
    }
}

impl SessionConfig {
    /// Build config from compile-time environment variables.
    ///
    /// Optional:
    /// - `CAMPUS_API_BASE_URL`: default `/api`
    /// - `CAMPUS_SESSION_KEY`: default `auth-storage`
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("CAMPUS_API_BASE_URL"), option_env!("CAMPUS_SESSION_KEY"))
    }

    /// Build config from raw optional values, applying defaults for blanks.
    #[must_use]
    pub fn from_values(api_base_url: Option<&str>, storage_key: Option<&str>) -> Self {
        Self {
            api_base_url: parse_base_url(api_base_url),
            storage_key: non_blank(storage_key).unwrap_or(DEFAULT_STORAGE_KEY).to_owned(),
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_base_url(raw: Option<&str>) -> String {
    // "/" trims to "", which yields same-origin paths like "/auth/login".
    non_blank(raw).map_or_else(|| DEFAULT_API_BASE_URL.to_owned(), |v| v.trim_end_matches('/').to_owned())
}
