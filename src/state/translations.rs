use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::trace;

use crate::metadata::entity::{find_translation, Entity, Translation};

/// Override list of the entity currently on screen, plus the language codes
/// it makes available.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TranslationsStore {
    translations: Vec<Translation>,
    available_languages: Vec<String>,
}

impl TranslationsStore {
    /// Store holding `translations`. Available codes keep first-seen order
    /// and drop duplicates.
    #[must_use]
    pub fn with_translations(self, translations: Vec<Translation>) -> Self {
        let mut seen = BTreeSet::new();
        let available_languages = translations
            .iter()
            .map(Translation::full_code)
            .filter(|code| seen.insert(code.to_ascii_lowercase()))
            .collect();

        Self {
            translations,
            available_languages,
        }
    }

    pub fn translations(&self) -> &[Translation] {
        &self.translations
    }

    pub fn available_languages(&self) -> &[String] {
        &self.available_languages
    }

    /// Display-ready copy of `data`.
    ///
    /// Every field named by any override is resolved as: the override for
    /// the resolved language (`translation_language`, else
    /// `default_language`), then the entity's own value, then the override
    /// for `default_language`. Empty strings count as missing. Overrides come
    /// from `data` itself, never from a store, so projecting a freshly
    /// fetched entity cannot mix in a previous entity's overrides.
    pub fn retrieve_data_with_fallback(
        data: &Entity,
        default_language: &str,
        translation_language: Option<&str>,
    ) -> Entity {
        let resolved = translation_language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(default_language);

        let overrides = data.embedded_translations();
        let preferred = find_translation(overrides, resolved);
        let fallback = find_translation(overrides, default_language);

        let fields: BTreeSet<&String> = overrides.iter().flat_map(|t| t.data.keys()).collect();

        let mut projected = data.clone();
        for field in fields {
            let value = preferred
                .and_then(|t| t.text(field))
                .or_else(|| data.text(field))
                .or_else(|| fallback.and_then(|t| t.text(field)));

            if let Some(value) = value {
                trace!(field = %field, language = %resolved, "projected field");
                projected
                    .fields
                    .insert(field.clone(), Value::String(value.to_string()));
            }
        }

        projected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(value: serde_json::Value) -> Entity {
        serde_json::from_value(value).unwrap()
    }

    fn movie() -> Entity {
        entity(json!({
            "id": 1,
            "title": "A",
            "translations": {
                "translations": [
                    { "iso_639_1": "fr", "data": { "title": "B" } }
                ]
            }
        }))
    }

    #[test]
    fn override_used_for_resolved_language() {
        let projected = TranslationsStore::retrieve_data_with_fallback(&movie(), "en", Some("fr"));
        assert_eq!(projected.text("title"), Some("B"));
    }

    #[test]
    fn default_value_kept_without_override() {
        let projected = TranslationsStore::retrieve_data_with_fallback(&movie(), "en", Some("de"));
        assert_eq!(projected.text("title"), Some("A"));
    }

    #[test]
    fn translation_language_absent_uses_default() {
        let data = entity(json!({
            "id": 2,
            "overview": "",
            "translations": { "translations": [
                { "iso_639_1": "en", "iso_3166_1": "US", "data": { "overview": "English text" } },
                { "iso_639_1": "fr", "iso_3166_1": "FR", "data": { "overview": "Texte" } }
            ]}
        }));
        let projected = TranslationsStore::retrieve_data_with_fallback(&data, "en", None);
        assert_eq!(projected.text("overview"), Some("English text"));
    }

    #[test]
    fn empty_fields_fall_back_to_default_override() {
        let data = entity(json!({
            "id": 3,
            "biography": "",
            "translations": { "translations": [
                { "iso_639_1": "en", "data": { "biography": "Born in 1963." } },
                { "iso_639_1": "de", "data": { "biography": "" } }
            ]}
        }));
        let projected = TranslationsStore::retrieve_data_with_fallback(&data, "en", Some("de"));
        assert_eq!(projected.text("biography"), Some("Born in 1963."));
    }

    #[test]
    fn unrelated_fields_untouched() {
        let data = entity(json!({
            "id": 4,
            "title": "A",
            "runtime": 139,
            "translations": { "translations": [
                { "iso_639_1": "fr", "data": { "title": "B", "tagline": "Slogan" } }
            ]}
        }));
        let projected = TranslationsStore::retrieve_data_with_fallback(&data, "en", Some("fr"));
        assert_eq!(projected.field("runtime"), Some(&json!(139)));
        assert_eq!(projected.text("tagline"), Some("Slogan"));
        assert_eq!(projected.embedded_translations(), data.embedded_translations());
        // source data is not modified
        assert_eq!(data.text("title"), Some("A"));
    }

    #[test]
    fn available_languages_deduplicated_in_order() {
        let data = entity(json!({
            "id": 5,
            "translations": { "translations": [
                { "iso_639_1": "fr", "iso_3166_1": "FR", "data": {} },
                { "iso_639_1": "es", "iso_3166_1": "", "data": {} },
                { "iso_639_1": "fr", "iso_3166_1": "FR", "data": {} },
                { "iso_639_1": "pt", "iso_3166_1": "BR", "data": {} }
            ]}
        }));
        let store =
            TranslationsStore::default().with_translations(data.embedded_translations().to_vec());
        assert_eq!(store.available_languages(), ["fr-FR", "es", "pt-BR"]);
        assert_eq!(store.translations().len(), 4);
    }

    #[test]
    fn projection_ignores_previous_entity_overrides() {
        let previous = entity(json!({
            "id": 9,
            "translations": { "translations": [
                { "iso_639_1": "de", "data": { "title": "Alt" } }
            ]}
        }));
        let store = TranslationsStore::default()
            .with_translations(previous.embedded_translations().to_vec());
        assert_eq!(store.available_languages(), ["de"]);

        let projected = TranslationsStore::retrieve_data_with_fallback(&movie(), "en", Some("de"));
        assert_eq!(projected.text("title"), Some("A"));
    }
}
