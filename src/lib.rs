//! # campus-session
//!
//! Browser-resident identity and session manager for the campus education
//! platform. Authenticates a student or staff member against the remote auth
//! gateway, holds the resulting token and profile, persists them across page
//! reloads, and exposes the session to Leptos components through context.
//!
//! SYSTEM CONTEXT
//! ==============
//! The application's composition root builds one [`state::session::SessionStore`]
//! per page lifetime and hands it to [`state::context::provide_session_context`].
//! Pages and components read the mirrored signal and call the store's mutators;
//! nothing else writes authentication state.

pub mod config;
pub mod net;
pub mod state;
pub mod util;

/// Route `log` output to the browser console and install the panic hook.
///
/// Call once from the WASM entry point before building the session store.
pub fn init_logging() {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
    }
}
