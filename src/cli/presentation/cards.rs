//! Card lists and the review screen.

use super::to_pretty_json;
use crate::error::FlashgenError;
use crate::generation::GenerationRequest;
use crate::review::ReviewSession;
use crate::types::{Card, Face};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn format_cards_text(cards: &[Card]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Front", "Back"]);
    for (i, card) in cards.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), card.front.clone(), card.back.clone()]);
    }
    table.to_string()
}

pub fn format_cards_json(request: &GenerationRequest, cards: &[Card]) -> Result<String, FlashgenError> {
    to_pretty_json(&json!({
        "topic": request.topic(),
        "requested": request.requested(),
        "count": request.count(),
        "cards": cards,
    }))
}

/// One-line note shown above generated cards.
pub fn format_generation_notice(request: &GenerationRequest, received: usize) -> String {
    let mut notice = format!(
        "Generated {} flashcards for \"{}\"",
        received,
        request.topic()
    );
    if request.was_clamped() {
        notice.push_str(&format!(
            " (count {} adjusted to {})",
            request.requested(),
            request.count()
        ));
    }
    notice
}

/// The review screen for the session's current position.
pub fn format_review_card(session: &ReviewSession) -> String {
    let view = session.current();
    let side = match view.face {
        Face::Front => "Front".green().bold().to_string(),
        Face::Back => "Back".yellow().bold().to_string(),
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![format!("Card {}  ·  {}", session.progress_label(), side)])
        .add_row(vec![view.text()]);

    let hint = if session.showing_front() {
        "flip to see the answer"
    } else {
        "flip to see the question"
    };
    format!("{}\n{}", table, hint.dimmed())
}
