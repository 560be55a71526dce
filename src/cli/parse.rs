//! CLI parse: clap types for flashgen. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// flashgen - AI-generated study flashcards
#[derive(Parser)]
#[command(name = "flashgen")]
#[command(about = "Generate study flashcards from a topic and review them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (where config/config.toml is looked up)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Data directory for the set database and session (overrides config)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Output format for commands that print data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate flashcards for a topic and print them without saving
    Generate {
        /// Topic to study
        #[arg(long)]
        topic: String,
        /// Number of cards (clamped to 1-20; defaults to generation.default_count)
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Generate flashcards, review or edit them, and save them as a new set
    Create {
        /// Set title
        #[arg(long)]
        title: String,
        /// Set description
        #[arg(long, default_value = "")]
        description: String,
        /// Make the set visible to other users
        #[arg(long)]
        public: bool,
        /// Topic to generate cards for
        #[arg(long)]
        topic: String,
        /// Number of cards (clamped to 1-20; defaults to generation.default_count)
        #[arg(long, allow_negative_numbers = true)]
        count: Option<i64>,
        /// Save without the interactive edit step
        #[arg(long)]
        yes: bool,
    },
    /// List your sets, newest first, plus recent public sets
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Browse or search public sets
    Public {
        /// Case-insensitive match on title or description
        #[arg(long)]
        search: Option<String>,
        /// Maximum number of sets to show
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show a set and all of its cards
    Show {
        /// Set id or unique id prefix
        set_id: String,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Review a set card by card (next, previous, flip, quit)
    Review {
        /// Set id or unique id prefix
        set_id: String,
    },
    /// Delete one of your sets
    Delete {
        /// Set id or unique id prefix
        set_id: String,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Sign in as a local user
    Login {
        user_id: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate_with_defaults() {
        let cli = Cli::try_parse_from(["flashgen", "generate", "--topic", "Photosynthesis"]).unwrap();
        match cli.command {
            Commands::Generate {
                topic,
                count,
                format,
            } => {
                assert_eq!(topic, "Photosynthesis");
                assert_eq!(count, None);
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_negative_count_is_accepted() {
        // Out-of-range counts are clamped later, not rejected by the parser
        let cli = Cli::try_parse_from(["flashgen", "generate", "--topic", "x", "--count", "-3"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Generate { count: Some(-3), .. }
        ));
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "flashgen",
            "--data-dir",
            "/tmp/fg",
            "--verbose",
            "--log-format",
            "json",
            "create",
            "--title",
            "Cells",
            "--topic",
            "Cell biology",
            "--public",
            "--yes",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/fg")));
        assert!(cli.verbose);
        assert_eq!(cli.log_format.as_deref(), Some("json"));
        assert!(matches!(
            cli.command,
            Commands::Create {
                public: true,
                yes: true,
                ..
            }
        ));
    }

    #[test]
    fn test_missing_topic_is_a_parse_error() {
        assert!(Cli::try_parse_from(["flashgen", "generate"]).is_err());
    }
}
