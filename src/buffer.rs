//! Generation buffer: the editable, uncommitted card list of the creation flow.
//!
//! Two kinds of change exist: a generation result replaces the whole list, and a
//! hand edit replaces one card. Generation results carry the ticket of the
//! request that produced them; a result whose ticket is older than the latest
//! issued one is discarded without touching the list.

use crate::error::{GenerationError, ValidationError};
use crate::types::Card;
use tracing::debug;

/// Sequence stamp of one generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn sequence(self) -> u64 {
        self.0
    }
}

/// Result of offering a generation outcome to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Cards replaced the buffer contents.
    Applied(usize),
    /// Generation failed; the buffer kept its previous contents.
    Failed(GenerationError),
    /// A newer request was issued since; the result was dropped.
    Stale,
}

#[derive(Debug, Default, Clone)]
pub struct GenerationBuffer {
    cards: Vec<Card>,
    issued: u64,
}

impl GenerationBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Stamp a new generation request. Any earlier ticket becomes stale.
    pub fn begin_request(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }

    pub fn apply(
        &mut self,
        ticket: RequestTicket,
        result: Result<Vec<Card>, GenerationError>,
    ) -> ApplyOutcome {
        if !self.is_current(ticket) {
            debug!(
                ticket = ticket.0,
                latest = self.issued,
                "Discarding superseded generation result"
            );
            return ApplyOutcome::Stale;
        }
        match result {
            Ok(cards) => {
                let count = cards.len();
                self.replace_all(cards);
                ApplyOutcome::Applied(count)
            }
            Err(err) => ApplyOutcome::Failed(err),
        }
    }

    pub fn replace_all(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }

    /// Replace the card at `index` with a new value.
    pub fn replace(&mut self, index: usize, card: Card) -> Result<(), ValidationError> {
        let len = self.cards.len();
        let slot = self
            .cards
            .get_mut(index)
            .ok_or(ValidationError::CardIndexOutOfRange { index, len })?;
        *slot = card;
        Ok(())
    }

    pub fn edit_front(&mut self, index: usize, front: impl Into<String>) -> Result<(), ValidationError> {
        let back = self.card_at(index)?.back.clone();
        self.replace(index, Card::new(front, back))
    }

    pub fn edit_back(&mut self, index: usize, back: impl Into<String>) -> Result<(), ValidationError> {
        let front = self.card_at(index)?.front.clone();
        self.replace(index, Card::new(front, back))
    }

    /// Check every card has both sides filled in.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cards.is_empty() {
            return Err(ValidationError::EmptyBuffer);
        }
        for (index, card) in self.cards.iter().enumerate() {
            if card.front.trim().is_empty() {
                return Err(ValidationError::EmptyCardField { index, side: "front" });
            }
            if card.back.trim().is_empty() {
                return Err(ValidationError::EmptyCardField { index, side: "back" });
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    fn card_at(&self, index: usize) -> Result<&Card, ValidationError> {
        self.cards.get(index).ok_or(ValidationError::CardIndexOutOfRange {
            index,
            len: self.cards.len(),
        })
    }
}
