//! Common error type for cineshelf.
//!
//! Library code funnels its failures into [`Error`], which carries enough
//! context for the server to derive an HTTP status via [`Error::http_status`].

/// Common error type for cineshelf.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity does not exist upstream.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity (e.g. "movie", "person").
        entity: String,
        /// Identifier that was looked up.
        id: String,
    },

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The metadata API answered with a non-success status.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status returned by the API.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The HTTP client failed before a response was received, or the body
    /// could not be decoded.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A view template failed to render.
    #[error("Template error: {0}")]
    Template(String),

    /// An I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<E: Into<String>, I: Into<String>>(entity: E, id: I) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Upstream error.
    pub fn upstream<S: Into<String>>(status: u16, msg: S) -> Self {
        Self::Upstream {
            status,
            message: msg.into(),
        }
    }

    /// Create a new Http error.
    pub fn http<S: Into<String>>(msg: S) -> Self {
        Self::Http(msg.into())
    }

    /// Create a new Template error.
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// HTTP status code a handler should answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::InvalidInput(_) => 400,
            Error::Upstream { .. } | Error::Http(_) => 502,
            Error::Template(_) | Error::Io(_) | Error::Internal(_) => 500,
        }
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
