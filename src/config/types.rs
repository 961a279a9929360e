use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::metadata::tmdb::TMDB_BASE_URL;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub i18n: I18nConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Public URL prefix prepended to page paths in links, e.g.
    /// `https://example.org`. Empty means root-relative links.
    #[serde(default)]
    pub base_path: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_path: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// API key. When unset the `CINESHELF_TMDB_API_KEY` environment variable
    /// is read once at client construction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_tmdb_base_url() -> String {
    TMDB_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    30
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tmdb_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct I18nConfig {
    /// UI language used when the request does not negotiate one.
    #[serde(default = "default_language")]
    pub default_language: String,

    /// UI languages offered by the locale catalog.
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,

    /// Directory holding `{language}/{namespace}.toml` string tables.
    #[serde(default = "default_locales_dir")]
    pub locales_dir: PathBuf,
}

fn default_language() -> String {
    "en".to_string()
}
fn default_languages() -> Vec<String> {
    vec!["en".to_string(), "fr".to_string()]
}
fn default_locales_dir() -> PathBuf {
    PathBuf::from("locales")
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            languages: default_languages(),
            locales_dir: default_locales_dir(),
        }
    }
}
