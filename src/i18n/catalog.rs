//! UI string tables loaded per language and namespace.
//!
//! Layout on disk is `{dir}/{language}/{namespace}.toml`. Each file is a flat
//! table of strings; nested tables are flattened with `.` separators.

use std::collections::HashMap;
use std::path::Path;

use cineshelf_common::{Error, Result};
use tracing::{debug, warn};

type Table = HashMap<String, String>;

/// All string tables, keyed by language then namespace.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    default_language: String,
    tables: HashMap<String, HashMap<String, Table>>,
}

impl Catalog {
    /// Empty catalog; every lookup returns the key itself.
    pub fn empty<S: Into<String>>(default_language: S) -> Self {
        Self {
            default_language: default_language.into(),
            tables: HashMap::new(),
        }
    }

    /// Load every `{language}/{namespace}.toml` below `dir`. A missing
    /// directory yields an empty catalog.
    pub fn load_dir(dir: &Path, default_language: &str) -> Result<Self> {
        let mut catalog = Self::empty(default_language);

        if !dir.is_dir() {
            warn!("Locales directory not found: {:?}", dir);
            return Ok(catalog);
        }

        for lang_entry in std::fs::read_dir(dir)? {
            let lang_path = lang_entry?.path();
            if !lang_path.is_dir() {
                continue;
            }
            let Some(language) = lang_path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            for ns_entry in std::fs::read_dir(&lang_path)? {
                let ns_path = ns_entry?.path();
                if ns_path.extension().and_then(|e| e.to_str()) != Some("toml") {
                    continue;
                }
                let Some(namespace) = ns_path.file_stem().and_then(|n| n.to_str()) else {
                    continue;
                };

                let content = std::fs::read_to_string(&ns_path)?;
                let table = parse_table(&content).map_err(|e| {
                    Error::invalid_input(format!("invalid locale file {:?}: {e}", ns_path))
                })?;
                debug!(language, namespace, keys = table.len(), "Loaded locale table");
                catalog.insert(language, namespace, table);
            }
        }

        Ok(catalog)
    }

    /// Add or replace one table.
    pub fn insert<L, N>(&mut self, language: L, namespace: N, table: Table)
    where
        L: Into<String>,
        N: Into<String>,
    {
        self.tables
            .entry(language.into())
            .or_default()
            .insert(namespace.into(), table);
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Languages that have at least one table, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }

    /// Merged strings of `namespaces` for `language`.
    ///
    /// Each key resolves in `language` first, then in the default language.
    /// When two namespaces define the same key the earlier namespace wins.
    pub fn bundle(&self, language: &str, namespaces: &[String]) -> Labels {
        let mut strings = Table::new();
        for lang in [language, self.default_language.as_str()] {
            let Some(by_ns) = self.tables.get(lang) else {
                continue;
            };
            for ns in namespaces {
                if let Some(table) = by_ns.get(ns) {
                    for (key, value) in table {
                        strings.entry(key.clone()).or_insert_with(|| value.clone());
                    }
                }
            }
        }

        Labels {
            language: language.to_string(),
            strings,
        }
    }
}

/// Resolved UI strings for one render.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    language: String,
    strings: Table,
}

impl Labels {
    /// Language the bundle was requested for.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// String for `key`, or the key itself when no table defines it.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings.get(key).map(String::as_str).unwrap_or(key)
    }
}

fn parse_table(content: &str) -> std::result::Result<Table, toml::de::Error> {
    let value: toml::Table = toml::from_str(content)?;
    let mut out = Table::new();
    flatten("", &value, &mut out);
    Ok(out)
}

fn flatten(prefix: &str, table: &toml::Table, out: &mut Table) {
    for (key, value) in table {
        let full = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            toml::Value::String(s) => {
                out.insert(full, s.clone());
            }
            toml::Value::Table(inner) => flatten(&full, inner, out),
            other => {
                out.insert(full, other.to_string());
            }
        }
    }
}
