//! Application state shared by the page lifecycle.
//!
//! State is an immutable snapshot: every mutation consumes an [`AppState`]
//! and returns the next one, so the order in which lifecycle steps touch the
//! translation store and the loading flag is visible at each call site.

mod translations;

pub use translations::TranslationsStore;

use serde::Serialize;

/// UI flags shown by the layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UiState {
    pub loading: bool,
}

/// Snapshot of everything a page render reads besides its own data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AppState {
    pub translations: TranslationsStore,
    pub ui: UiState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active entity's override list.
    #[must_use]
    pub fn with_translations(self, translations: Vec<crate::metadata::Translation>) -> Self {
        Self {
            translations: self.translations.with_translations(translations),
            ..self
        }
    }

    /// Raise or lower the global loading indicator.
    #[must_use]
    pub fn with_loading(self, loading: bool) -> Self {
        Self {
            ui: UiState { loading },
            ..self
        }
    }

    pub fn is_loading(&self) -> bool {
        self.ui.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Translation;
    use serde_json::Map;

    fn translation(code: &str) -> Translation {
        Translation {
            iso_639_1: code.to_string(),
            iso_3166_1: None,
            name: None,
            english_name: None,
            data: Map::new(),
        }
    }

    #[test]
    fn mutations_return_new_snapshots() {
        let initial = AppState::new();
        let loading = initial.clone().with_loading(true);
        assert!(!initial.is_loading());
        assert!(loading.is_loading());

        let with_fr = loading.with_translations(vec![translation("fr")]);
        assert!(with_fr.is_loading());
        assert_eq!(with_fr.translations.available_languages(), ["fr"]);
        assert!(initial.translations.available_languages().is_empty());
    }
}
