//! FitTrack web server library.
//!
//! Exposes the building blocks (config, state, sessions, error handling,
//! routes, views) so integration tests and the binary entrypoint share the
//! exact same application.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod session;
pub mod state;
pub mod views;
