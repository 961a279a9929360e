//! Cineshelf-Common: Shared types and error handling.
//!
//! This crate provides the pieces used by every layer of cineshelf:
//!
//! - **Entity IDs**: [`EntityId`], the opaque identifier of a TMDB record
//! - **Entity kinds**: [`EntityKind`] (movie, person, tv) with per-kind defaults
//! - **Error Handling**: Common error type and result alias
//!
//! # Examples
//!
//! ```
//! use cineshelf_common::{EntityId, EntityKind, Error, Result};
//!
//! let id = EntityId::from(550u64);
//! assert_eq!(EntityKind::Movie.path(&id), "/movie/550");
//!
//! fn example() -> Result<()> {
//!     Err(Error::not_found("movie", "550"))
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod ids;
pub mod types;

pub use error::{Error, Result};
pub use ids::*;
pub use types::*;
