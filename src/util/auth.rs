//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect and
//! role-gating behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::net::types::Role;
use crate::state::session::Session;

pub const LOGIN_PATH: &str = "/login";

/// True once no auth call is pending and nobody is signed in.
pub fn should_redirect_unauth(session: &Session) -> bool {
    !session.loading() && !session.is_authenticated()
}

/// True when the signed-in user holds one of `allowed`. An empty list admits
/// any authenticated user.
pub fn can_access(session: &Session, allowed: &[Role]) -> bool {
    match session.user() {
        Some(user) if session.is_authenticated() => allowed.is_empty() || allowed.contains(&user.role),
        _ => false,
    }
}

/// Redirect to `/login` whenever auth has settled and no user is present.
pub fn install_unauth_redirect<F>(session: RwSignal<Session>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&session.get()) {
            navigate(LOGIN_PATH, NavigateOptions::default());
        }
    });
}
