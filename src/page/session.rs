use std::sync::Arc;

use cineshelf_common::{EntityId, Result};
use tracing::{debug, warn};

use super::effects::{plan_update, Effect};
use super::{PageConfig, PageProps};
use crate::i18n::Labels;
use crate::metadata::{Entity, EntityFetcher};
use crate::seo;
use crate::state::{AppState, TranslationsStore};
use crate::views::{self, LayoutParams, PageView, ViewContext};

/// What the page body shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageBody<'a> {
    /// A fetch was expected but there is nothing to show.
    ErrorPlaceholder,
    /// The wrapped view, with the projected data if any.
    View(Option<&'a Entity>),
}

/// A re-fetch issued by [`PageSession::receive_props`].
///
/// Run it with [`RefetchRequest::run`] and hand the outcome back through
/// [`PageSession::settle`] together with [`RefetchRequest::seq`].
pub struct RefetchRequest {
    pub seq: u64,
    pub id: EntityId,
    pub language: String,
    fetcher: Arc<dyn EntityFetcher>,
}

impl RefetchRequest {
    pub async fn run(&self) -> Result<Entity> {
        self.fetcher.fetch(&self.id, &self.language).await
    }
}

impl std::fmt::Debug for RefetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefetchRequest")
            .field("seq", &self.seq)
            .field("id", &self.id)
            .field("language", &self.language)
            .finish()
    }
}

/// Render state of one page instance.
pub struct PageSession {
    config: Arc<PageConfig>,
    view: Arc<dyn PageView>,
    props: PageProps,
    data: Option<Entity>,
    /// Sequence number of the latest issued re-fetch; 0 before any.
    issued: u64,
}

impl PageSession {
    pub(super) fn new(config: Arc<PageConfig>, view: Arc<dyn PageView>, props: PageProps) -> Self {
        let data = props.data.clone();
        Self {
            config,
            view,
            props,
            data,
            issued: 0,
        }
    }

    pub fn props(&self) -> &PageProps {
        &self.props
    }

    /// Data currently on screen.
    pub fn data(&self) -> Option<&Entity> {
        self.data.as_ref()
    }

    /// Sequence number of the latest issued re-fetch.
    pub fn latest_request(&self) -> u64 {
        self.issued
    }

    fn name(&self) -> &'static str {
        self.view.name()
    }

    fn project(&self, data: &Entity) -> Entity {
        let languages = &self.props.inputs.languages;
        TranslationsStore::retrieve_data_with_fallback(
            data,
            &languages.default,
            languages.translation(),
        )
    }

    /// First client-side pass: push translations and project the loaded
    /// data into the resolved language.
    pub fn mount(&mut self, state: AppState) -> AppState {
        debug!(page = self.name(), "mount");
        let state = state.with_translations(self.props.translations());
        if let Some(data) = &self.props.data {
            let projected = self.project(data);
            self.data = Some(projected);
        }
        state
    }

    /// Apply new props. Synchronous effects are applied to the returned
    /// state; a language change yields a [`RefetchRequest`] and raises the
    /// loading flag.
    pub fn receive_props(
        &mut self,
        next: PageProps,
        mut state: AppState,
    ) -> (AppState, Option<RefetchRequest>) {
        let effects = plan_update(&self.props, &next, self.config.has_api_call());
        debug!(page = self.name(), ?effects, "update");
        self.props = next;

        let mut request = None;
        for effect in effects {
            match effect {
                Effect::PushTranslations => {
                    state = state.with_translations(self.props.translations());
                }
                Effect::ProjectData => {
                    if let Some(data) = &self.props.data {
                        let projected = self.project(data);
                        self.data = Some(projected);
                    }
                }
                Effect::Refetch { id, language } => {
                    if let Some(fetcher) = &self.config.api_call {
                        self.issued += 1;
                        debug!(page = self.name(), seq = self.issued, %id, %language, "refetch");
                        state = state.with_loading(true);
                        request = Some(RefetchRequest {
                            seq: self.issued,
                            id,
                            language,
                            fetcher: fetcher.clone(),
                        });
                    }
                }
            }
        }

        (state, request)
    }

    /// Apply the outcome of re-fetch `seq`.
    ///
    /// Outcomes of anything but the latest request are dropped and leave the
    /// state untouched. Otherwise the loading flag is lowered; on success the
    /// new entity's translations are pushed and its projection displayed, on
    /// failure the displayed data is cleared.
    pub fn settle(&mut self, seq: u64, outcome: Result<Entity>, state: AppState) -> AppState {
        if seq != self.issued {
            debug!(page = self.name(), seq, latest = self.issued, "discarding stale refetch");
            return state;
        }

        match outcome {
            Ok(entity) => {
                let state = state.with_translations(entity.embedded_translations().to_vec());
                let projected = self.project(&entity);
                self.data = Some(projected);
                state.with_loading(false)
            }
            Err(e) => {
                warn!(page = self.name(), seq, error = %e, "refetch failed");
                self.data = None;
                state.with_loading(false)
            }
        }
    }

    /// [`receive_props`](Self::receive_props), then run and settle the
    /// re-fetch if one was issued.
    pub async fn update(&mut self, next: PageProps, state: AppState) -> AppState {
        let (state, request) = self.receive_props(next, state);
        match request {
            Some(request) => {
                let outcome = request.run().await;
                self.settle(request.seq, outcome, state)
            }
            None => state,
        }
    }

    pub fn body(&self) -> PageBody<'_> {
        if self.data.is_none() && self.config.has_api_call() {
            PageBody::ErrorPlaceholder
        } else {
            PageBody::View(self.data.as_ref())
        }
    }

    /// Full HTML document for the current state.
    pub fn render(&self, state: &AppState, labels: &Labels) -> Result<String> {
        let inputs = &self.props.inputs;
        let url = inputs.current_url();
        let languages = state.translations.available_languages();
        let head = seo::render_hreflang_tags(&url, languages, "")?;

        let body = match self.body() {
            PageBody::ErrorPlaceholder => views::error_placeholder(labels)?,
            PageBody::View(data) => self.view.render(&ViewContext {
                data,
                base_path: &inputs.base_path,
                pathname: &inputs.pathname,
                labels,
            })?,
        };

        views::layout(&LayoutParams {
            title: &views::document_title(self.data.as_ref(), labels),
            head: &head,
            body: &body,
            loading: state.is_loading(),
            base_path: &inputs.base_path,
            labels,
        })
    }
}
