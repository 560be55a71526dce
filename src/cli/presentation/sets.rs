//! Set listings and set detail.

use super::to_pretty_json;
use crate::error::FlashgenError;
use crate::types::{Card, CardSet};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

fn visibility(set: &CardSet) -> &'static str {
    if set.is_public {
        "public"
    } else {
        "private"
    }
}

fn heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

pub fn format_sets_text(sets: &[CardSet], empty_message: &str) -> String {
    if sets.is_empty() {
        return empty_message.to_string();
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_BORDERS_ONLY)
        .set_header(vec!["ID", "Title", "Description", "Owner", "Visibility", "Created"]);
    for set in sets {
        table.add_row(vec![
            set.id.short().to_string(),
            set.title.clone(),
            set.description.clone(),
            set.owner_id.to_string(),
            visibility(set).to_string(),
            set.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    table.to_string()
}

pub fn format_sets_json(sets: &[CardSet]) -> Result<String, FlashgenError> {
    let rows: Vec<serde_json::Value> = sets.iter().map(set_json).collect();
    to_pretty_json(&serde_json::Value::Array(rows))
}

fn set_json(set: &CardSet) -> serde_json::Value {
    json!({
        "id": set.id.as_str(),
        "title": set.title,
        "description": set.description,
        "is_public": set.is_public,
        "owner_id": set.owner_id.as_str(),
        "created_at": set.created_at.to_rfc3339(),
    })
}

/// The signed-in user's sets followed by recent public sets of others.
pub fn format_dashboard_text(mine: &[CardSet], recent_public: &[CardSet]) -> String {
    format!(
        "{}\n{}\n\n{}\n{}",
        heading("Your sets"),
        format_sets_text(mine, "You have no sets yet. Create one with `flashgen create`."),
        heading("Recent public sets"),
        format_sets_text(recent_public, "No public sets from other users."),
    )
}

pub fn format_dashboard_json(mine: &[CardSet], recent_public: &[CardSet]) -> Result<String, FlashgenError> {
    to_pretty_json(&json!({
        "mine": mine.iter().map(set_json).collect::<Vec<_>>(),
        "recent_public": recent_public.iter().map(set_json).collect::<Vec<_>>(),
    }))
}

pub fn format_set_detail_text(set: &CardSet, cards: &[Card], can_edit: bool) -> String {
    let mut out = format!(
        "{}\n{}\nID: {}  ·  {}  ·  owner {}{}\n\n",
        heading(&set.title),
        set.description,
        set.id,
        visibility(set),
        set.owner_id,
        if can_edit { " (you)" } else { "" },
    );
    if cards.is_empty() {
        out.push_str("This set has no cards.");
    } else {
        out.push_str(&super::format_cards_text(cards));
    }
    out
}

pub fn format_set_detail_json(set: &CardSet, cards: &[Card], can_edit: bool) -> Result<String, FlashgenError> {
    let mut value = set_json(set);
    value["can_edit"] = json!(can_edit);
    value["cards"] = json!(cards);
    to_pretty_json(&value)
}
