//! HTTP gateway for doctalk.
//!
//! Exposes the session lifecycle, document uploads and chat turns as a small
//! JSON API. Each route maps to exactly one orchestrator or store action.

/// Request handlers and response bodies.
pub mod handlers;
/// Router construction and shared state.
pub mod server;

pub use server::{AppState, GatewayServer};
