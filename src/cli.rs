use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cineshelf")]
#[command(author, version, about = "Localized movie, TV and people pages backed by TMDB")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch one record from TMDB and print it as JSON
    Fetch {
        /// Record kind: movie, person or tv
        kind: String,

        /// TMDB identifier
        id: String,

        /// Response language (default: en)
        #[arg(short, long)]
        language: Option<String>,

        /// Comma-separated sub-resources to append (default: per kind)
        #[arg(short, long, value_delimiter = ',')]
        append: Option<Vec<String>>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fetch_with_append_list() {
        let cli = Cli::parse_from([
            "cineshelf", "fetch", "movie", "550", "--language", "fr", "--append", "credits,images",
        ]);
        match cli.command {
            Commands::Fetch {
                kind,
                id,
                language,
                append,
            } => {
                assert_eq!(kind, "movie");
                assert_eq!(id, "550");
                assert_eq!(language.as_deref(), Some("fr"));
                assert_eq!(append, Some(vec!["credits".into(), "images".into()]));
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["cineshelf", "start", "--port", "9000", "-v", "-c", "x.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(
            cli.command,
            Commands::Start {
                host: None,
                port: Some(9000)
            }
        ));
    }
}
