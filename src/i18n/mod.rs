//! Internationalization: language selection, UI string catalogs and
//! request language negotiation.
//!
//! Content translations (titles, overviews...) come from the entity itself
//! and are handled by [`crate::state::TranslationsStore`]; this module only
//! deals with which language to ask for and with the UI strings around the
//! content.

pub mod catalog;
pub mod language;
pub mod negotiate;

pub use catalog::{Catalog, Labels};
pub use language::LanguageSelection;
pub use negotiate::negotiate_language;
