//! JSON passthrough of the metadata API.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use cineshelf_common::{EntityId, EntityKind};
use serde::Deserialize;

use crate::metadata::RequestOptions;
use crate::server::{AppContext, AppError};

pub fn api_routes() -> Router<AppContext> {
    Router::new().route("/:kind/:id", get(get_entity))
}

#[derive(Debug, Deserialize)]
struct EntityQuery {
    language: Option<String>,
    /// Comma-separated sub-resources; the kind's defaults when absent.
    append: Option<String>,
}

impl EntityQuery {
    fn into_options(self) -> RequestOptions {
        let options = RequestOptions {
            language: self.language,
            append: None,
        };
        match self.append {
            Some(list) => options.with_append(
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
            ),
            None => options,
        }
    }
}

async fn get_entity(
    State(ctx): State<AppContext>,
    Path((kind, id)): Path<(String, String)>,
    Query(query): Query<EntityQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let kind: EntityKind = kind.parse().map_err(AppError::json)?;
    let options = query.into_options();

    let value = ctx
        .api
        .fetch_raw(kind, &EntityId::new(id), &options)
        .await
        .map_err(AppError::json)?;

    Ok(Json(value))
}
