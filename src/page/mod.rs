//! Page wrapper: loads an entity for a route, keeps the translation store
//! in step with it, and re-fetches when the language changes.
//!
//! # Lifecycle
//!
//! Server side:
//! - [`WrappedPage::initial_props`] fetches the entity (when an api call is
//!   configured) and pushes its translations into the state.
//! - [`WrappedPage::session`] builds a [`PageSession`] from the props.
//! - [`PageSession::mount`] projects the data into the resolved language.
//! - [`PageSession::render`] emits the layout, hreflang links and view.
//!
//! Long-lived sessions then feed new props through
//! [`PageSession::receive_props`] / [`PageSession::update`]; the decision of
//! what to do is made by the pure [`plan_update`].

mod effects;
mod session;

pub use effects::{plan_update, Effect};
pub use session::{PageBody, PageSession, RefetchRequest};

use std::sync::Arc;

use cineshelf_common::{EntityId, Result};
use tracing::debug;

use crate::i18n::LanguageSelection;
use crate::metadata::{Entity, EntityFetcher};
use crate::state::AppState;
use crate::views::PageView;

/// What a page needs besides its view.
#[derive(Clone)]
pub struct PageConfig {
    /// Fetches the entity. `None` means the page never loads data and its
    /// view always receives `None`.
    pub api_call: Option<Arc<dyn EntityFetcher>>,
    /// Namespace the view reads its own strings from.
    pub namespaces: String,
    /// Namespaces that must be loaded before rendering.
    pub namespaces_required: Vec<String>,
}

impl PageConfig {
    pub fn new<S: Into<String>>(namespaces: S) -> Self {
        Self {
            api_call: None,
            namespaces: namespaces.into(),
            namespaces_required: Vec::new(),
        }
    }

    pub fn with_api_call(mut self, fetcher: Arc<dyn EntityFetcher>) -> Self {
        self.api_call = Some(fetcher);
        self
    }

    pub fn with_namespaces_required<I, S>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.namespaces_required = namespaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_api_call(&self) -> bool {
        self.api_call.is_some()
    }

    /// Namespaces to bundle for a render: the view's own first, then the
    /// required ones, without duplicates.
    pub fn label_namespaces(&self) -> Vec<String> {
        let mut out = vec![self.namespaces.clone()];
        for ns in &self.namespaces_required {
            if !out.contains(ns) {
                out.push(ns.clone());
            }
        }
        out
    }

    /// Pair this configuration with the view it wraps.
    pub fn wrap(self, view: Arc<dyn PageView>) -> WrappedPage {
        WrappedPage {
            config: Arc::new(self),
            view,
        }
    }
}

impl std::fmt::Debug for PageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageConfig")
            .field("api_call", &self.has_api_call())
            .field("namespaces", &self.namespaces)
            .field("namespaces_required", &self.namespaces_required)
            .finish()
    }
}

/// Route-supplied inputs of one page render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInputs {
    /// Identifier from the route.
    pub id: EntityId,
    /// Public URL prefix.
    pub base_path: String,
    /// Canonical path of the page, without any language suffix.
    pub pathname: String,
    pub languages: LanguageSelection,
}

impl PageInputs {
    /// Canonical URL used for hreflang links.
    pub fn current_url(&self) -> String {
        format!("{}{}", self.base_path, self.pathname)
    }
}

/// Result of the initial load, handed to the session.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialProps {
    pub data: Option<Entity>,
    pub namespaces_required: Vec<String>,
}

/// Props a session renders from: the loaded data plus route inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct PageProps {
    pub data: Option<Entity>,
    pub inputs: PageInputs,
}

impl PageProps {
    pub fn new(initial: InitialProps, inputs: PageInputs) -> Self {
        Self {
            data: initial.data,
            inputs,
        }
    }

    /// Overrides embedded in the data, or an empty list.
    pub fn translations(&self) -> Vec<crate::metadata::Translation> {
        self.data
            .as_ref()
            .map(|d| d.embedded_translations().to_vec())
            .unwrap_or_default()
    }
}

/// A view together with its [`PageConfig`].
#[derive(Clone)]
pub struct WrappedPage {
    config: Arc<PageConfig>,
    view: Arc<dyn PageView>,
}

impl WrappedPage {
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn view(&self) -> &dyn PageView {
        self.view.as_ref()
    }

    /// Display name used in logs, e.g. `page(movie)`.
    pub fn display_name(&self) -> String {
        format!("page({})", self.view.name())
    }

    /// Initial load.
    ///
    /// Fetches `inputs.id` in the resolved language when an api call is
    /// configured, then pushes the entity's translations (or an empty list)
    /// into the returned state. Fetch errors are returned as-is.
    pub async fn initial_props(
        &self,
        inputs: &PageInputs,
        state: &AppState,
    ) -> Result<(InitialProps, AppState)> {
        debug!(page = %self.display_name(), id = %inputs.id, "initial_props");

        let data = match &self.config.api_call {
            Some(fetcher) => {
                let language = inputs.languages.resolved();
                debug!(page = %self.display_name(), language, "calling api");
                Some(fetcher.fetch(&inputs.id, language).await?)
            }
            None => None,
        };

        let translations = data
            .as_ref()
            .map(|d| d.embedded_translations().to_vec())
            .unwrap_or_default();
        let state = state.clone().with_translations(translations);

        Ok((
            InitialProps {
                data,
                namespaces_required: self.config.namespaces_required.clone(),
            },
            state,
        ))
    }

    /// Session for rendering and updating this page.
    pub fn session(&self, props: PageProps) -> PageSession {
        PageSession::new(self.config.clone(), self.view.clone(), props)
    }
}

impl std::fmt::Debug for WrappedPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrappedPage")
            .field("view", &self.view.name())
            .field("config", &self.config)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::views::MovieView;

    #[tokio::test]
    async fn initial_props_fetches_in_resolved_language() {
        let fetcher = Arc::new(MapFetcher::default().with(42, "fr", movie(42, "Le Film")));
        let page = PageConfig::new("movie")
            .with_api_call(fetcher.clone())
            .with_namespaces_required(["common", "movie"])
            .wrap(Arc::new(MovieView));

        let (props, state) = page
            .initial_props(&inputs(42, Some("fr"), "en"), &AppState::new())
            .await
            .unwrap();

        assert_eq!(props.data.unwrap().text("title"), Some("Le Film"));
        assert_eq!(props.namespaces_required, vec!["common", "movie"]);
        assert_eq!(state.translations.available_languages(), ["fr-FR"]);
        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test]
    async fn initial_props_without_api_call_is_none() {
        let page = PageConfig::new("movie").wrap(Arc::new(MovieView));
        for id in [1, 42, 999] {
            let (props, state) = page
                .initial_props(&inputs(id, Some("fr"), "en"), &AppState::new())
                .await
                .unwrap();
            assert!(props.data.is_none());
            assert!(state.translations.available_languages().is_empty());
        }
    }

    #[tokio::test]
    async fn initial_props_propagates_fetch_errors() {
        let page = PageConfig::new("movie")
            .with_api_call(Arc::new(MapFetcher::default()))
            .wrap(Arc::new(MovieView));
        let err = page
            .initial_props(&inputs(7, None, "en"), &AppState::new())
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn label_namespaces_deduplicated() {
        let config = PageConfig::new("movie").with_namespaces_required(["common", "movie"]);
        assert_eq!(config.label_namespaces(), vec!["movie", "common"]);
    }

    #[test]
    fn current_url_joins_base_and_path() {
        assert_eq!(inputs(3, None, "en").current_url(), "https://example.org/movie/3");
    }
}
