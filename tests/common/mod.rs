//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which starts a `wiremock` server standing in for
//! TMDB, writes a small locale catalog to a temp dir, and builds a full
//! [`AppContext`] against both. [`TestHarness::with_server`] starts Axum on a
//! random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use cineshelf::config::Config;
use cineshelf::i18n::Catalog;
use cineshelf::metadata::TmdbApi;
use cineshelf::server::{create_router, AppContext};
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";

/// Test harness wrapping an [`AppContext`] wired to a mock TMDB.
pub struct TestHarness {
    pub ctx: AppContext,
    pub tmdb: MockServer,
    _locales: TempDir,
}

impl TestHarness {
    /// Harness with default configuration.
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    /// Harness with a custom configuration. The TMDB base URL and locale
    /// directory are always replaced by the harness' own.
    pub async fn with_config(mut config: Config) -> Self {
        let tmdb = MockServer::start().await;
        let locales = write_locales();

        config.tmdb.base_url = tmdb.uri();
        config.i18n.locales_dir = locales.path().to_path_buf();

        let api = TmdbApi::new(API_KEY, tmdb.uri()).expect("failed to build TMDB client");
        let catalog = Catalog::load_dir(locales.path(), &config.i18n.default_language)
            .expect("failed to load locales");
        let ctx = AppContext::new(config, Arc::new(api), catalog);

        Self {
            ctx,
            tmdb,
            _locales: locales,
        }
    }

    /// Start an Axum server on a random port and return the harness together
    /// with the bound socket address.
    pub async fn with_server() -> (Self, SocketAddr) {
        Self::with_server_config(Config::default()).await
    }

    /// Start an Axum server with custom config on a random port.
    pub async fn with_server_config(config: Config) -> (Self, SocketAddr) {
        let harness = Self::with_config(config).await;
        let app = create_router(harness.ctx.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        (harness, addr)
    }

    /// Answer `GET /{kind}/{id}?language={language}` with `body`.
    pub async fn mount_entity(&self, kind: &str, id: u64, language: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/{kind}/{id}")))
            .and(query_param("language", language))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.tmdb)
            .await;
    }

    /// Answer `GET /{kind}/{id}` with `status` for any query.
    pub async fn mount_status(&self, kind: &str, id: u64, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/{kind}/{id}")))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({ "status_message": "upstream says no" })),
            )
            .mount(&self.tmdb)
            .await;
    }

    /// Number of requests the mock TMDB has seen.
    pub async fn tmdb_requests(&self) -> usize {
        self.tmdb
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }
}

/// A movie with French and Spanish overrides.
pub fn fight_club() -> Value {
    json!({
        "id": 550,
        "title": "Fight Club",
        "original_title": "Fight Club",
        "overview": "An insomniac office worker and a soap maker form a club.",
        "runtime": 139,
        "release_date": "1999-10-15",
        "genres": [{ "id": 18, "name": "Drama" }],
        "credits": {
            "cast": [{ "id": 819, "name": "Edward Norton", "character": "The Narrator" }],
            "crew": [{ "id": 7467, "name": "David Fincher", "job": "Director" }]
        },
        "translations": { "translations": [
            {
                "iso_639_1": "fr", "iso_3166_1": "FR", "name": "Français",
                "data": { "title": "Fight Club (fr)", "overview": "Un employé insomniaque." }
            },
            {
                "iso_639_1": "es", "iso_3166_1": "ES", "name": "Español",
                "data": { "title": "El club de la lucha", "overview": "" }
            }
        ]}
    })
}

fn write_locales() -> TempDir {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let files = [
        (
            "en/common.toml",
            "loading = \"Loading\"\n[app]\nname = \"Cineshelf\"\n[error]\ntitle = \"Nothing to show\"\nmessage = \"Could not load.\"\n[kind]\nmovie = \"Movie\"\nperson = \"Person\"\ntv = \"TV series\"\n",
        ),
        ("en/movie.toml", "[movie]\noverview = \"Overview\"\ncast = \"Cast\"\n"),
        ("en/home.toml", "[home]\ntitle = \"Browse\"\n"),
        (
            "fr/common.toml",
            "loading = \"Chargement\"\n[error]\ntitle = \"Rien à afficher\"\n",
        ),
        ("fr/movie.toml", "[movie]\noverview = \"Synopsis\"\n"),
    ];
    for (rel, content) in files {
        let path = dir.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }
    dir
}
