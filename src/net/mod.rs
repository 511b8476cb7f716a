//! Networking modules for the auth gateway.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the gateway seam and its REST implementation, `error` the
//! failure taxonomy, and `types` the shared wire schema.

pub mod api;
pub mod error;
pub mod types;
