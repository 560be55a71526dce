//! CLI presentation: text and json formatters per command family.

mod cards;
mod sets;

pub use cards::{
    format_cards_json, format_cards_text, format_generation_notice, format_review_card,
};
pub use sets::{
    format_dashboard_json, format_dashboard_text, format_set_detail_json, format_set_detail_text, format_sets_json,
    format_sets_text,
};

use crate::error::{FlashgenError, StorageError};

fn to_pretty_json(value: &serde_json::Value) -> Result<String, FlashgenError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::Encoding(e.to_string()).into())
}
