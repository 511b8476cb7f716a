//! Wire DTOs shared with the auth gateway.
//!
//! DESIGN
//! ======
//! Field names follow the gateway's camelCase JSON so request bodies, response
//! bodies, and persisted snapshots all serialize the same profile shape.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Platform role attached to every account.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Professor,
    Admin,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Professor => "professor",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile of the signed-in account as issued by the auth gateway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Gateway-assigned account identifier.
    pub id: String,
    /// Institutional student (or staff) number used to sign in.
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub school: String,
    pub department: String,
    pub phone: String,
    pub role: Role,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_year: Option<u16>,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub student_id: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(student_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self { student_id: student_id.into(), password: password.into() }
    }
}

/// Body of `POST /auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub school: String,
    pub department: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admission_year: Option<u16>,
}

/// A successful login or registration: the profile and its opaque token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}
