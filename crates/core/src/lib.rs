//! Domain logic for the FitTrack workout log.
//!
//! Everything in this crate is pure: the form controllers, the history view
//! state machine and the principal model perform no I/O, so the HTTP layer
//! and the store clients can both depend on it.

pub mod error;
pub mod form;
pub mod history;
pub mod principal;
pub mod types;
pub mod workout;
