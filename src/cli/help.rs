//! CLI command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Stable command name used as a log field (e.g. "create", "review").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Generate { .. } => "generate",
        Commands::Create { .. } => "create",
        Commands::List { .. } => "list",
        Commands::Public { .. } => "public",
        Commands::Show { .. } => "show",
        Commands::Review { .. } => "review",
        Commands::Delete { .. } => "delete",
        Commands::Login { .. } => "login",
        Commands::Logout => "logout",
        Commands::Whoami => "whoami",
    }
}

/// Commands that need the provider configured.
pub fn needs_provider(command: &Commands) -> bool {
    matches!(command, Commands::Generate { .. } | Commands::Create { .. })
}
