use serde::{Deserialize, Serialize};

/// The two language inputs of a page: an explicit content translation
/// (from the route) and the default UI language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSelection {
    pub translation: Option<String>,
    pub default: String,
}

impl LanguageSelection {
    pub fn new<S: Into<String>>(translation: Option<String>, default: S) -> Self {
        Self {
            translation: translation
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            default: default.into(),
        }
    }

    /// Selection with no explicit translation.
    pub fn default_only<S: Into<String>>(default: S) -> Self {
        Self::new(None, default)
    }

    /// The language used for API calls and field fallback.
    pub fn resolved(&self) -> &str {
        self.translation.as_deref().unwrap_or(&self.default)
    }

    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }
}
