use super::*;
use crate::net::error::AuthErrorKind;
use crate::net::types::Role;

const USER_JSON: &str = r#"{
    "id": "u1",
    "studentId": "20230001",
    "name": "Kim Minji",
    "email": "minji@campus.example",
    "school": "Seoul Tech",
    "department": "Computer Science",
    "phone": "010-1234-5678",
    "role": "student",
    "createdAt": "2024-03-02T09:00:00Z"
}"#;

// =============================================================
// endpoint / failed_message
// =============================================================

#[test]
fn endpoint_joins_base_and_path() {
    assert_eq!(endpoint("/api", "/auth/login"), "/api/auth/login");
    assert_eq!(endpoint("", "/auth/register"), "/auth/register");
}

#[test]
fn failed_message_formats_operation_and_status() {
    assert_eq!(failed_message("login", 502), "login failed: 502");
}

// =============================================================
// decode_success_body
// =============================================================

#[test]
fn success_body_with_user_and_token_decodes() {
    let body = format!(r#"{{"user": {USER_JSON}, "token": "tok-abc"}}"#);
    let session = decode_success_body(&body).unwrap();
    assert_eq!(session.token, "tok-abc");
    assert_eq!(session.user.id, "u1");
    assert_eq!(session.user.role, Role::Student);
}

#[test]
fn success_body_missing_token_is_malformed() {
    let body = format!(r#"{{"user": {USER_JSON}}}"#);
    let err = decode_success_body(&body).unwrap_err();
    assert_eq!(err, AuthError::MalformedResponse("response missing token".into()));
}

#[test]
fn success_body_with_empty_token_is_malformed() {
    let body = format!(r#"{{"user": {USER_JSON}, "token": ""}}"#);
    assert_eq!(decode_success_body(&body).unwrap_err().kind(), AuthErrorKind::MalformedResponse);
}

#[test]
fn success_body_missing_user_is_malformed() {
    let err = decode_success_body(r#"{"token": "tok-abc"}"#).unwrap_err();
    assert_eq!(err, AuthError::MalformedResponse("response missing user".into()));
}

#[test]
fn success_body_not_json_is_malformed() {
    let err = decode_success_body("<html>oops</html>").unwrap_err();
    assert_eq!(err.kind(), AuthErrorKind::MalformedResponse);
}

// =============================================================
// decode_failure_body
// =============================================================

#[test]
fn failure_body_carries_gateway_message() {
    let err = decode_failure_body("login", 401, r#"{"message": "invalid credentials"}"#);
    assert_eq!(err, AuthError::Rejected { status: 401, message: "invalid credentials".into() });
}

#[test]
fn failure_body_without_message_uses_status_fallback() {
    let err = decode_failure_body("register", 500, "Internal Server Error");
    assert_eq!(err, AuthError::Rejected { status: 500, message: "register failed: 500".into() });
}

#[test]
fn failure_body_with_blank_message_uses_status_fallback() {
    let err = decode_failure_body("login", 409, r#"{"message": "  "}"#);
    assert_eq!(err.message(), "login failed: 409");
}

// =============================================================
// HttpAuthGateway
// =============================================================

#[test]
fn gateway_takes_base_url_from_config() {
    let cfg = SessionConfig::from_values(Some("https://campus.example/api/"), None);
    assert_eq!(HttpAuthGateway::new(&cfg).base_url(), "https://campus.example/api");
}

#[cfg(not(feature = "hydrate"))]
#[tokio::test]
async fn gateway_outside_browser_reports_transport_error() {
    let gateway = HttpAuthGateway::new(&SessionConfig::default());
    let err = gateway.login(&LoginRequest::new("20230001", "pw")).await.unwrap_err();
    assert_eq!(err.kind(), AuthErrorKind::Transport);
}
