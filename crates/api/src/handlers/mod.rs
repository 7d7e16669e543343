//! Request handlers for the server-rendered screens.
//!
//! Each submodule owns one area of the app. Handlers read their draft from
//! the session, delegate to `fittrack_core` form controllers and the
//! `fittrack_db` repositories, and render a view from `crate::views`.

pub mod activity;
pub mod auth;
pub mod pages;
pub mod submission;
pub mod workout;
