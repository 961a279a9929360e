//! TMDB (The Movie Database) API decorator.
//!
//! Wraps a [`reqwest::Client`] bound to a single API key and exposes one
//! detail call per [`EntityKind`]. All three calls share
//! [`ApiRequest::build`], which fills in the default language and the
//! per-kind `append_to_response` list.
//!
//! There is deliberately no retry, pagination or rate limiting here: a failed
//! call surfaces as an [`Error`] to the caller.

use std::time::Duration;

use cineshelf_common::{EntityId, EntityKind, Error, Result};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::TmdbConfig;
use crate::metadata::entity::Entity;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
/// Environment variable consulted when the config file carries no key.
pub const API_KEY_ENV: &str = "CINESHELF_TMDB_API_KEY";
/// Language used when a request does not name one.
pub const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Request shaping
// ---------------------------------------------------------------------------

/// Per-call options for a detail request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Response language; [`DEFAULT_LANGUAGE`] when unset or blank.
    pub language: Option<String>,
    /// Sub-resources to append; the kind's default list when unset.
    pub append: Option<Vec<String>>,
}

impl RequestOptions {
    pub fn language<S: Into<String>>(language: S) -> Self {
        Self {
            language: Some(language.into()),
            append: None,
        }
    }

    pub fn with_append<I, S>(mut self, append: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append = Some(append.into_iter().map(Into::into).collect());
        self
    }
}

/// A fully resolved detail request, independent of any HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub kind: EntityKind,
    pub id: EntityId,
    pub path: String,
    pub language: String,
    pub append: Vec<String>,
}

impl ApiRequest {
    /// Resolve `options` against the defaults of `kind`.
    pub fn build(kind: EntityKind, id: &EntityId, options: &RequestOptions) -> Self {
        let language = options
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string();

        let append = match &options.append {
            Some(list) => list.clone(),
            None => kind
                .default_append()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        };

        Self {
            kind,
            id: id.clone(),
            path: kind.path(id),
            language,
            append,
        }
    }

    /// Query parameters excluding the API key.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("language", self.language.clone()),
            ("append_to_response", self.append.join(",")),
        ]
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// TMDB client bound to one API key.
///
/// # Examples
///
/// ```no_run
/// use cineshelf::metadata::tmdb::{RequestOptions, TmdbApi, TMDB_BASE_URL};
///
/// # async fn demo() -> cineshelf_common::Result<()> {
/// let api = TmdbApi::new("your-api-key", TMDB_BASE_URL)?;
/// let movie = api.movie(&550u64.into(), RequestOptions::language("fr")).await?;
/// println!("{:?}", movie.text("title"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TmdbApi {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for TmdbApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbApi")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}

impl TmdbApi {
    /// Create a client with the default request timeout.
    pub fn new<K: Into<String>, U: Into<String>>(api_key: K, base_url: U) -> Result<Self> {
        Self::with_timeout(api_key, base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout<K: Into<String>, U: Into<String>>(
        api_key: K,
        base_url: U,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(http, api_key, base_url))
    }

    /// Wrap an already configured client.
    pub fn with_client<K: Into<String>, U: Into<String>>(
        http: reqwest::Client,
        api_key: K,
        base_url: U,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build the client from configuration. The key is read once here: the
    /// config value wins, then [`API_KEY_ENV`].
    pub fn from_config(config: &TmdbConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .unwrap_or_default();

        if api_key.trim().is_empty() {
            warn!("No TMDB API key configured (set tmdb.api_key or {API_KEY_ENV})");
        }

        Self::with_timeout(
            api_key,
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Movie details. Appends `credits,translations` by default.
    pub async fn movie(&self, id: &EntityId, options: RequestOptions) -> Result<Entity> {
        self.fetch(EntityKind::Movie, id, &options).await
    }

    /// Person details. Appends `movie_credits,tv_credits,translations` by
    /// default.
    pub async fn person(&self, id: &EntityId, options: RequestOptions) -> Result<Entity> {
        self.fetch(EntityKind::Person, id, &options).await
    }

    /// TV series details. Appends `credits,translations` by default.
    pub async fn tv(&self, id: &EntityId, options: RequestOptions) -> Result<Entity> {
        self.fetch(EntityKind::Tv, id, &options).await
    }

    /// Typed detail request for any kind.
    pub async fn fetch(
        &self,
        kind: EntityKind,
        id: &EntityId,
        options: &RequestOptions,
    ) -> Result<Entity> {
        self.execute(&ApiRequest::build(kind, id, options)).await
    }

    /// Detail request returning the body untouched.
    pub async fn fetch_raw(
        &self,
        kind: EntityKind,
        id: &EntityId,
        options: &RequestOptions,
    ) -> Result<serde_json::Value> {
        self.execute(&ApiRequest::build(kind, id, options)).await
    }

    /// Absolute URL of `request` below the base URL. The id must be a single
    /// plain path segment; it is pushed as one encoded segment regardless.
    pub fn request_url(&self, request: &ApiRequest) -> Result<reqwest::Url> {
        if !request.id.is_path_segment() {
            return Err(Error::invalid_input(format!(
                "invalid {} identifier: {:?}",
                request.kind,
                request.id.as_str()
            )));
        }

        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_input(format!("invalid TMDB base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| {
                Error::invalid_input(format!("TMDB base URL cannot be a base: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(request.kind.as_str())
            .push(request.id.as_str());
        Ok(url)
    }

    /// Issue one GET for `request` and decode the body.
    pub async fn execute<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T> {
        let url = self.request_url(request)?;
        debug!(
            path = %request.path,
            language = %request.language,
            append = %request.append.join(","),
            "TMDB request"
        );

        let mut params = vec![("api_key", self.api_key.clone())];
        params.extend(request.params());

        let resp = self
            .http
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::http(format!("TMDB request failed: {}", e.without_url())))?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::not_found(request.kind.as_str(), request.id.as_str()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::upstream(status.as_u16(), body));
        }

        resp.json::<T>()
            .await
            .map_err(|e| Error::http(format!("TMDB parse error: {}", e.without_url())))
    }
}
