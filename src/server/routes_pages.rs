//! Server-rendered pages.
//!
//! `/{kind}/{id}` renders in the negotiated UI language; an extra
//! `/{kind}/{id}/{lang}` segment selects the translation language, which is
//! exactly what the hreflang links point at.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Html,
    routing::get,
    Router,
};
use cineshelf_common::{EntityId, EntityKind};
use serde::Deserialize;
use tracing::info;

use crate::i18n::{negotiate_language, LanguageSelection};
use crate::page::{PageInputs, PageProps, WrappedPage};
use crate::server::{AppContext, AppError};
use crate::state::AppState;

pub fn page_routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(home_page))
        .route("/movie/:id", get(movie_page))
        .route("/movie/:id/:lang", get(movie_page))
        .route("/person/:id", get(person_page))
        .route("/person/:id/:lang", get(person_page))
        .route("/tv/:id", get(tv_page))
        .route("/tv/:id/:lang", get(tv_page))
}

#[derive(Debug, Deserialize)]
struct EntityPath {
    id: String,
    lang: Option<String>,
}

async fn home_page(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let inputs = PageInputs {
        id: EntityId::new(""),
        base_path: ctx.config.server.base_path.clone(),
        pathname: "/".to_string(),
        languages: LanguageSelection::default_only(ui_language(&ctx, &headers)),
    };
    render(&ctx, ctx.pages.home(), inputs).await
}

async fn movie_page(
    State(ctx): State<AppContext>,
    Path(path): Path<EntityPath>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    entity_page(&ctx, EntityKind::Movie, path, &headers).await
}

async fn person_page(
    State(ctx): State<AppContext>,
    Path(path): Path<EntityPath>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    entity_page(&ctx, EntityKind::Person, path, &headers).await
}

async fn tv_page(
    State(ctx): State<AppContext>,
    Path(path): Path<EntityPath>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    entity_page(&ctx, EntityKind::Tv, path, &headers).await
}

fn ui_language(ctx: &AppContext, headers: &HeaderMap) -> String {
    let i18n = &ctx.config.i18n;
    negotiate_language(headers, &i18n.languages, &i18n.default_language)
}

async fn entity_page(
    ctx: &AppContext,
    kind: EntityKind,
    path: EntityPath,
    headers: &HeaderMap,
) -> Result<Html<String>, AppError> {
    let id = EntityId::new(path.id);
    let inputs = PageInputs {
        pathname: kind.path(&id),
        id,
        base_path: ctx.config.server.base_path.clone(),
        languages: LanguageSelection::new(path.lang, ui_language(ctx, headers)),
    };
    render(ctx, ctx.pages.entity(kind), inputs).await
}

/// Initial load, mount and render of one page.
async fn render(
    ctx: &AppContext,
    page: &WrappedPage,
    inputs: PageInputs,
) -> Result<Html<String>, AppError> {
    let labels = ctx
        .catalog
        .bundle(&inputs.languages.default, &page.config().label_namespaces());
    let base_path = inputs.base_path.clone();

    let (initial, state) = match page.initial_props(&inputs, &AppState::new()).await {
        Ok(loaded) => loaded,
        Err(e) => return Err(AppError::page(e, labels, base_path)),
    };

    info!(
        page = %page.display_name(),
        id = %inputs.id,
        language = inputs.languages.resolved(),
        "Rendering page"
    );

    let mut session = page.session(PageProps::new(initial, inputs));
    let state = session.mount(state);

    match session.render(&state, &labels) {
        Ok(html) => Ok(Html(html)),
        Err(e) => Err(AppError::page(e, labels, base_path)),
    }
}
