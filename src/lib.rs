//! Cineshelf - server-rendered movie, TV and people pages backed by TMDB
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod i18n;
pub mod metadata;
pub mod page;
pub mod seo;
pub mod server;
pub mod state;
pub mod views;
