//! Session extractors.
//!
//! - [`auth::SessionUser`] -- the session gate for protected screens.
//!
//! Public screens take `tower_sessions::Session` directly.

pub mod auth;
