//! Entity records returned by the metadata API.
//!
//! Only the parts the browser reasons about are typed: the identifier and the
//! embedded `translations.translations` override list. Every other field of
//! the upstream body is kept verbatim in [`Entity::fields`].

use cineshelf_common::EntityId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A movie, person or tv record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translations: Option<TranslationList>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// Wrapper matching the upstream `translations` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationList {
    #[serde(default)]
    pub translations: Vec<Translation>,
}

/// Field overrides for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translation {
    /// ISO-639-1 language code, e.g. `fr`.
    pub iso_639_1: String,
    /// ISO-3166-1 region code, e.g. `CA`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_3166_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english_name: Option<String>,
    /// Overridden field values keyed by field name (`title`, `overview`,
    /// `biography`...).
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Translation {
    /// Language code including the region when one is set, e.g. `fr-CA`.
    pub fn full_code(&self) -> String {
        match self.iso_3166_1.as_deref().map(str::trim) {
            Some(region) if !region.is_empty() => format!("{}-{}", self.iso_639_1, region),
            _ => self.iso_639_1.clone(),
        }
    }

    /// Non-empty string value of an overridden field.
    pub fn text(&self, field: &str) -> Option<&str> {
        non_empty_str(self.data.get(field))
    }
}

impl Entity {
    /// Embedded overrides, empty when the record was fetched without the
    /// `translations` sub-resource.
    pub fn embedded_translations(&self) -> &[Translation] {
        self.translations
            .as_ref()
            .map(|t| t.translations.as_slice())
            .unwrap_or_default()
    }

    /// Raw value of a top-level field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Non-empty string value of a top-level field.
    pub fn text(&self, name: &str) -> Option<&str> {
        non_empty_str(self.fields.get(name))
    }
}

/// Find the override for `code`.
///
/// An exact full-code match wins (`fr-CA` against `fr-CA`); otherwise the
/// first override sharing the primary subtag is used (`fr` or `fr-FR` against
/// an override tagged `fr`).
pub fn find_translation<'a>(translations: &'a [Translation], code: &str) -> Option<&'a Translation> {
    let code = code.trim();
    if code.is_empty() {
        return None;
    }

    translations
        .iter()
        .find(|t| t.full_code().eq_ignore_ascii_case(code))
        .or_else(|| {
            let primary = primary_subtag(code);
            translations
                .iter()
                .find(|t| t.iso_639_1.eq_ignore_ascii_case(primary))
        })
}

/// Primary language subtag of a tag like `pt-BR` or `pt_BR`.
pub fn primary_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Entity {
        serde_json::from_value(json!({
            "id": 1,
            "title": "A",
            "overview": "",
            "translations": {
                "translations": [
                    { "iso_639_1": "fr", "iso_3166_1": "FR", "data": { "title": "B" } },
                    { "iso_639_1": "fr", "iso_3166_1": "CA", "data": { "title": "C" } },
                    { "iso_639_1": "es", "data": { "title": "" } }
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn deserializes_known_and_unknown_fields() {
        let entity = sample();
        assert_eq!(entity.id, EntityId::from(1u64));
        assert_eq!(entity.text("title"), Some("A"));
        assert_eq!(entity.text("overview"), None);
        assert_eq!(entity.embedded_translations().len(), 3);
        assert!(entity.field("translations").is_none());
    }

    #[test]
    fn missing_translations_block_is_empty() {
        let entity: Entity = serde_json::from_value(json!({ "id": "7", "name": "X" })).unwrap();
        assert!(entity.embedded_translations().is_empty());
    }

    #[test]
    fn full_code_includes_region() {
        let entity = sample();
        let codes: Vec<String> = entity
            .embedded_translations()
            .iter()
            .map(Translation::full_code)
            .collect();
        assert_eq!(codes, vec!["fr-FR", "fr-CA", "es"]);
    }

    #[test]
    fn find_prefers_exact_then_primary() {
        let entity = sample();
        let list = entity.embedded_translations();
        assert_eq!(find_translation(list, "fr-CA").unwrap().text("title"), Some("C"));
        assert_eq!(find_translation(list, "fr").unwrap().text("title"), Some("B"));
        assert_eq!(find_translation(list, "fr-BE").unwrap().text("title"), Some("B"));
        assert!(find_translation(list, "de").is_none());
        assert!(find_translation(list, "").is_none());
    }

    #[test]
    fn empty_override_value_is_none() {
        let entity = sample();
        let es = find_translation(entity.embedded_translations(), "es").unwrap();
        assert_eq!(es.text("title"), None);
    }
}
