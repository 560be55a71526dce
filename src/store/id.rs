//! Id computation for stored sets and cards.

use crate::types::{Card, CardId, NewCardSet, SetId};
use blake3::Hasher;
use chrono::{DateTime, Utc};

/// SetId = hash("set:" || owner || title || created_at || nonce)
///
/// The nonce comes from the store's monotonic id generator so two sets with the
/// same title created in the same instant still get distinct ids.
pub fn compute_set_id(set: &NewCardSet, created_at: DateTime<Utc>, nonce: u64) -> SetId {
    let mut hasher = Hasher::new();
    hasher.update(b"set:");
    hasher.update(set.owner_id.as_str().as_bytes());
    hasher.update(b"title:");
    hasher.update(set.title.as_bytes());
    hasher.update(b"at:");
    hasher.update(created_at.to_rfc3339().as_bytes());
    hasher.update(&nonce.to_le_bytes());
    SetId::from_digest(hasher.finalize().as_bytes())
}

/// CardId = hash("card:" || set_id || position || front || back)
pub fn compute_card_id(set_id: &SetId, position: u32, card: &Card) -> CardId {
    let mut hasher = Hasher::new();
    hasher.update(b"card:");
    hasher.update(set_id.as_str().as_bytes());
    hasher.update(&position.to_le_bytes());
    hasher.update(b"front:");
    hasher.update(card.front.as_bytes());
    hasher.update(b"back:");
    hasher.update(card.back.as_bytes());
    CardId::from_digest(hasher.finalize().as_bytes())
}
