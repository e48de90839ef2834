use clap::{Parser, Subcommand};

use crate::catalog::{ELEMENT_TYPES, Generation};

/// Output format switches shared by the one-shot commands
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

impl OutputOptions {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

#[derive(Parser)]
#[command(name = "pokejournal")]
#[command(about = "Browse the Pokémon catalog from the terminal")]
#[command(version)]
pub struct Cli {
    /// Log debug diagnostics to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive browser; the catalog loads in the background
    #[command(visible_alias = "b")]
    Browse {
        /// Initial location, e.g. /item/pikachu
        #[arg(long)]
        at: Option<String>,
    },

    /// Load the whole catalog and list the entries matching the filters
    Ls {
        /// Element type the entries must have (repeatable, all must match)
        #[arg(short = 't', long = "type", value_parser = parse_element_type)]
        types: Vec<String>,

        /// Generation the entries belong to (repeatable, any may match)
        #[arg(short, long = "gen", value_parser = parse_generation)]
        generations: Vec<Generation>,

        /// Name substring, or '#<id>' for an exact id
        #[arg(short, long)]
        search: Option<String>,

        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the detail view of one entry, by name or id
    Show {
        /// Name, id, or '#<id>'
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, batch_size, display_limit, moves_limit, request_timeout, connect_timeout)
        key: String,
        /// Value to set
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get a configuration value
    Get {
        /// Configuration key (api_url, batch_size, display_limit, moves_limit, request_timeout, connect_timeout)
        key: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_element_type(s: &str) -> Result<String, String> {
    let lower = s.trim().to_lowercase();
    if ELEMENT_TYPES.contains(&lower.as_str()) {
        Ok(lower)
    } else {
        Err(format!(
            "Invalid type. Must be one of: {}",
            ELEMENT_TYPES.join(", ")
        ))
    }
}

fn parse_generation(s: &str) -> Result<Generation, String> {
    s.parse()
        .map_err(|_| "Invalid generation. Must be 1-9 or I-IX".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ls_filters() {
        let cli = Cli::try_parse_from([
            "pokejournal", "ls", "--type", "Fire", "-t", "flying", "--gen", "1", "--search", "char",
        ])
        .unwrap();

        match cli.command {
            Commands::Ls {
                types,
                generations,
                search,
                limit,
                json,
            } => {
                assert_eq!(types, vec!["fire", "flying"]);
                assert_eq!(generations, vec![Generation::I]);
                assert_eq!(search.as_deref(), Some("char"));
                assert_eq!(limit, None);
                assert!(!json);
            }
            _ => panic!("expected ls"),
        }
    }

    #[test]
    fn test_rejects_unknown_type() {
        assert!(Cli::try_parse_from(["pokejournal", "ls", "--type", "shadow"]).is_err());
        assert!(Cli::try_parse_from(["pokejournal", "ls", "--gen", "10"]).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["pokejournal", "show", "pikachu", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_browse_location() {
        let cli = Cli::try_parse_from(["pokejournal", "browse", "--at", "/item/eevee"]).unwrap();
        assert!(matches!(cli.command, Commands::Browse { at: Some(ref p) } if p == "/item/eevee"));
    }
}
