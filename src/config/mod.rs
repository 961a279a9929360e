mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    parse_config(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Parse and validate configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config> {
    let mut config: Config = toml::from_str(content)?;

    normalize_config(&mut config);
    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    // Try default locations
    let default_paths = [
        "./config.toml",
        "./cineshelf.toml",
        "~/.config/cineshelf/config.toml",
        "/etc/cineshelf/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    // Return default config if no file found
    Ok(Config::default())
}

fn normalize_config(config: &mut Config) {
    let trimmed = config.server.base_path.trim().trim_end_matches('/');
    config.server.base_path = trimmed.to_string();

    config.i18n.default_language = config.i18n.default_language.trim().to_string();
    config.i18n.languages = config
        .i18n
        .languages
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    // Validate server config
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    let base = &config.server.base_path;
    if !base.is_empty() && !base.starts_with('/') && !base.contains("://") {
        anyhow::bail!(
            "Server base_path must be empty, start with '/', or be an absolute URL: {}",
            base
        );
    }

    // Validate i18n config
    if config.i18n.default_language.is_empty() {
        anyhow::bail!("i18n default_language cannot be empty");
    }
    if !config
        .i18n
        .languages
        .iter()
        .any(|l| l.eq_ignore_ascii_case(&config.i18n.default_language))
    {
        anyhow::bail!(
            "i18n default_language '{}' is not listed in i18n.languages",
            config.i18n.default_language
        );
    }

    if !config.i18n.locales_dir.exists() {
        tracing::warn!("Locales directory does not exist: {:?}", config.i18n.locales_dir);
    }

    // Validate tmdb config
    if config.tmdb.timeout_secs == 0 {
        anyhow::bail!("TMDB timeout_secs cannot be 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.i18n.default_language, "en");
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert!(config.tmdb.api_key.is_none());
    }

    #[test]
    fn base_path_trailing_slash_removed() {
        let config = parse_config("[server]\nbase_path = \"https://example.org/\"\n").unwrap();
        assert_eq!(config.server.base_path, "https://example.org");
    }

    #[test]
    fn zero_port_rejected() {
        assert!(parse_config("[server]\nport = 0\n").is_err());
    }

    #[test]
    fn relative_base_path_rejected() {
        assert!(parse_config("[server]\nbase_path = \"films\"\n").is_err());
    }

    #[test]
    fn default_language_must_be_listed() {
        let toml = "[i18n]\ndefault_language = \"de\"\nlanguages = [\"en\", \"fr\"]\n";
        let err = parse_config(toml).unwrap_err();
        assert!(err.to_string().contains("not listed"));
    }

    #[test]
    fn full_config_parses() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 3000

[tmdb]
api_key = "abc"
timeout_secs = 5

[i18n]
default_language = "fr"
languages = ["fr", "en", " "]
"#;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.tmdb.api_key.as_deref(), Some("abc"));
        assert_eq!(config.i18n.languages, vec!["fr", "en"]);
    }

    #[test]
    fn load_missing_file_fails() {
        let err = load_config(Path::new("/nonexistent/cineshelf.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
