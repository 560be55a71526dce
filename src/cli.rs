//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::{command_name, needs_provider};
pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_cards_json, format_cards_text, format_dashboard_json, format_dashboard_text, format_generation_notice,
    format_review_card, format_set_detail_json, format_set_detail_text, format_sets_json,
    format_sets_text,
};
pub use route::RunContext;
