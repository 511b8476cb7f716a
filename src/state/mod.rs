//! Client-side session state.
//!
//! DESIGN
//! ======
//! `session` owns the state machine, `snapshot` its persisted text form, and
//! `context` the Leptos wiring. Only `session` mutates authentication state.

pub mod context;
pub mod session;
pub mod snapshot;
