//! Access to the external metadata API.
//!
//! # Module layout
//!
//! - [`entity`] -- Record types and translation lookup.
//! - [`tmdb`] -- The TMDB request decorator.
//! - [`provider`] -- The [`EntityFetcher`] seam used by pages.

pub mod entity;
pub mod provider;
pub mod tmdb;

pub use entity::{find_translation, Entity, Translation, TranslationList};
pub use provider::{EntityFetcher, KindFetcher};
pub use tmdb::{ApiRequest, RequestOptions, TmdbApi};
