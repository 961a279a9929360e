mod cli;

use cineshelf::{
    config,
    metadata::{RequestOptions, TmdbApi},
    server,
};
use cineshelf_common::{EntityId, EntityKind};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};

async fn start_server(
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    // Load config
    let mut config = config::load_config_or_default(config_path)?;

    // Override host/port from CLI if specified
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting Cineshelf server");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    server::start_server(config).await
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "cineshelf=trace,cineshelf_common=debug,tower_http=debug".to_string()
        } else {
            "cineshelf=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(host, port, cli.config.as_deref()))
        }
        Commands::Fetch {
            kind,
            id,
            language,
            append,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(fetch_entity(
                &kind,
                &id,
                RequestOptions { language, append },
                cli.config.as_deref(),
            ))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("cineshelf {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn fetch_entity(
    kind: &str,
    id: &str,
    options: RequestOptions,
    config_path: Option<&std::path::Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let kind: EntityKind = kind.parse()?;

    let api = TmdbApi::from_config(&config.tmdb)?;
    if !api.has_api_key() {
        anyhow::bail!(
            "No TMDB API key configured (set tmdb.api_key or {})",
            cineshelf::metadata::tmdb::API_KEY_ENV
        );
    }

    let value = api
        .fetch_raw(kind, &EntityId::new(id), &options)
        .await
        .with_context(|| format!("Failed to fetch {kind} {id}"))?;

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn validate_config(path: Option<&std::path::Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            if !config.server.base_path.is_empty() {
                println!("  Base path: {}", config.server.base_path);
            }
            println!("  TMDB: {}", config.tmdb.base_url);
            println!(
                "  API key: {}",
                if config.tmdb.api_key.is_some() {
                    "configured"
                } else {
                    "from environment"
                }
            );
            println!(
                "  Languages: {} (default {})",
                config.i18n.languages.join(", "),
                config.i18n.default_language
            );
            println!("  Locales: {:?}", config.i18n.locales_dir);
        }
        None => {
            println!("No config file specified, using defaults");
            let config = config::Config::default();
            println!("Default config:");
            println!("  Server: {}:{}", config.server.host, config.server.port);
            println!("  Languages: {}", config.i18n.languages.join(", "));
        }
    }

    Ok(())
}
