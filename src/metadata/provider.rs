//! Fetch seam between pages and the metadata API.
//!
//! Pages only need "give me record `id` in `language`". [`EntityFetcher`]
//! captures that so page logic can be exercised with in-memory fetchers.

use std::sync::Arc;

use async_trait::async_trait;
use cineshelf_common::{EntityId, EntityKind, Result};

use crate::metadata::entity::Entity;
use crate::metadata::tmdb::{RequestOptions, TmdbApi};

/// Loads one record in one language.
#[async_trait]
pub trait EntityFetcher: Send + Sync {
    async fn fetch(&self, id: &EntityId, language: &str) -> Result<Entity>;
}

/// [`EntityFetcher`] backed by [`TmdbApi`] for a single [`EntityKind`],
/// always using the kind's default append list.
#[derive(Debug, Clone)]
pub struct KindFetcher {
    api: Arc<TmdbApi>,
    kind: EntityKind,
}

impl KindFetcher {
    pub fn new(api: Arc<TmdbApi>, kind: EntityKind) -> Self {
        Self { api, kind }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }
}

#[async_trait]
impl EntityFetcher for KindFetcher {
    async fn fetch(&self, id: &EntityId, language: &str) -> Result<Entity> {
        self.api
            .fetch(self.kind, id, &RequestOptions::language(language))
            .await
    }
}
