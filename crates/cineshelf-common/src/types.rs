//! Kinds of records served by the metadata API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{EntityId, Error};

/// Kind of upstream record. Each kind maps to one API path prefix and one
/// default set of appended sub-resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A feature film.
    Movie,
    /// An actor, director or other credited person.
    Person,
    /// A television series.
    Tv,
}

/// Default `append_to_response` values, indexed by [`EntityKind::index`].
const DEFAULT_APPEND: [&[&str]; 3] = [
    &["credits", "translations"],
    &["movie_credits", "tv_credits", "translations"],
    &["credits", "translations"],
];

impl EntityKind {
    /// All kinds, in route registration order.
    pub const ALL: [EntityKind; 3] = [EntityKind::Movie, EntityKind::Person, EntityKind::Tv];

    const fn index(self) -> usize {
        match self {
            Self::Movie => 0,
            Self::Person => 1,
            Self::Tv => 2,
        }
    }

    /// Path segment used both by the API and by page routes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::Person => "person",
            Self::Tv => "tv",
        }
    }

    /// Sub-resources appended to a detail request when the caller does not
    /// ask for a specific list.
    pub const fn default_append(self) -> &'static [&'static str] {
        DEFAULT_APPEND[self.index()]
    }

    /// API path of a record of this kind, e.g. `/movie/550`.
    pub fn path(self, id: &EntityId) -> String {
        format!("/{}/{}", self.as_str(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(Self::Movie),
            "person" => Ok(Self::Person),
            "tv" => Ok(Self::Tv),
            other => Err(Error::invalid_input(format!("unknown entity kind: {other}"))),
        }
    }
}
