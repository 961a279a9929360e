use crate::config::Config;
use crate::i18n::Catalog;
use crate::metadata::{KindFetcher, TmdbApi};
use crate::page::{PageConfig, WrappedPage};
use crate::views::{self, HomeView};
use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    response::IntoResponse,
    routing::get,
    Router,
};
use cineshelf_common::EntityKind;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod routes_api;
pub mod routes_pages;

pub use error::AppError;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    /// TMDB client shared by every page and the JSON passthrough
    pub api: Arc<TmdbApi>,
    /// UI string tables
    pub catalog: Arc<Catalog>,
    pub pages: Arc<Pages>,
}

impl AppContext {
    /// Build the context from configuration: TMDB client from `[tmdb]`,
    /// string tables from `[i18n].locales_dir`.
    pub fn from_config(config: Config) -> Result<Self> {
        let api = TmdbApi::from_config(&config.tmdb).context("Failed to create TMDB client")?;
        let catalog = Catalog::load_dir(&config.i18n.locales_dir, &config.i18n.default_language)
            .with_context(|| format!("Failed to load locales from {:?}", config.i18n.locales_dir))?;
        Ok(Self::new(config, Arc::new(api), catalog))
    }

    pub fn new(config: Config, api: Arc<TmdbApi>, catalog: Catalog) -> Self {
        Self {
            pages: Arc::new(Pages::new(api.clone())),
            config: Arc::new(config),
            api,
            catalog: Arc::new(catalog),
        }
    }
}

/// Every wrapped page the router serves.
#[derive(Debug)]
pub struct Pages {
    home: WrappedPage,
    movie: WrappedPage,
    person: WrappedPage,
    tv: WrappedPage,
}

impl Pages {
    pub fn new(api: Arc<TmdbApi>) -> Self {
        let entity_page = |kind: EntityKind| {
            PageConfig::new(kind.as_str())
                .with_api_call(Arc::new(KindFetcher::new(api.clone(), kind)))
                .with_namespaces_required(["common", kind.as_str()])
                .wrap(views::view_for(kind))
        };

        Self {
            home: PageConfig::new("home")
                .with_namespaces_required(["common"])
                .wrap(Arc::new(HomeView)),
            movie: entity_page(EntityKind::Movie),
            person: entity_page(EntityKind::Person),
            tv: entity_page(EntityKind::Tv),
        }
    }

    pub fn home(&self) -> &WrappedPage {
        &self.home
    }

    pub fn entity(&self, kind: EntityKind) -> &WrappedPage {
        match kind {
            EntityKind::Movie => &self.movie,
            EntityKind::Person => &self.person,
            EntityKind::Tv => &self.tv,
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT_LANGUAGE]);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", routes_api::api_routes())
        .merge(routes_pages::page_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> impl IntoResponse {
    "ok"
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let ctx = AppContext::from_config(config)?;
    if !ctx.api.has_api_key() {
        tracing::warn!("Pages will render the error placeholder until a TMDB API key is set");
    }
    tracing::info!(
        languages = ?ctx.catalog.languages(),
        "Loaded UI catalog"
    );

    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Router whose TMDB client points at a closed port.
    fn test_router() -> Router {
        let api = TmdbApi::new("key", "http://127.0.0.1:9").unwrap();
        let ctx = AppContext::new(Config::default(), Arc::new(api), Catalog::empty("en"));
        create_router(ctx)
    }

    async fn body_to_string(body: Body) -> String {
        let bytes = body.collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn health_endpoint() {
        let response = test_router().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_to_string(response.into_body()).await, "ok");
    }

    #[tokio::test]
    async fn home_renders_without_upstream() {
        let response = test_router().oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let html = body_to_string(response.into_body()).await;
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("href=\"/movie/550\""));
    }

    #[tokio::test]
    async fn unknown_api_kind_is_json_400() {
        let response = test_router().oneshot(get("/api/episode/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json: serde_json::Value =
            serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
        assert_eq!(json["status"], 400);
    }

    #[tokio::test]
    async fn encoded_identifier_is_rejected_before_upstream() {
        let response = test_router()
            .oneshot(get("/movie/..%2F..%2Faccount%2F7"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let html = body_to_string(response.into_body()).await;
        assert!(html.contains("class=\"error\""));
    }

    #[tokio::test]
    async fn unreachable_upstream_is_bad_gateway() {
        let response = test_router().oneshot(get("/api/tv/1399")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn unknown_route_is_404() {
        let response = test_router().oneshot(get("/episode/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let request = Request::get("/health")
            .header(header::ORIGIN, "https://other.example")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(request).await.unwrap();
        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
