//! Review Engine
//!
//! Navigation state over a fixed, ordered card sequence: a cursor and the face
//! currently shown. Transitions are pure and return a new session; they clamp
//! at both ends and never fail. Moving to another card always shows its front.

use crate::types::{Card, Face};
use std::sync::Arc;

/// In-memory review state. Cloning shares the card sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession {
    cards: Arc<[Card]>,
    cursor: usize,
    showing_front: bool,
}

/// What the viewer renders for the current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView<'a> {
    pub card: &'a Card,
    pub face: Face,
    pub position: usize,
    pub total: usize,
}

impl<'a> CardView<'a> {
    /// Text of the visible face.
    pub fn text(&self) -> &'a str {
        match self.face {
            Face::Front => &self.card.front,
            Face::Back => &self.card.back,
        }
    }
}

impl ReviewSession {
    /// Start at the first card, front face up. Returns `None` for an empty
    /// sequence: there is nothing to review.
    pub fn new(cards: impl Into<Arc<[Card]>>) -> Option<Self> {
        let cards = cards.into();
        if cards.is_empty() {
            return None;
        }
        Some(Self {
            cards,
            cursor: 0,
            showing_front: true,
        })
    }

    #[must_use]
    pub fn advance(self) -> Self {
        let last = self.cards.len() - 1;
        Self {
            cursor: (self.cursor + 1).min(last),
            showing_front: true,
            ..self
        }
    }

    #[must_use]
    pub fn retreat(self) -> Self {
        Self {
            cursor: self.cursor.saturating_sub(1),
            showing_front: true,
            ..self
        }
    }

    #[must_use]
    pub fn flip(self) -> Self {
        Self {
            showing_front: !self.showing_front,
            ..self
        }
    }

    pub fn current(&self) -> CardView<'_> {
        CardView {
            card: &self.cards[self.cursor],
            face: self.face(),
            position: self.cursor,
            total: self.cards.len(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn showing_front(&self) -> bool {
        self.showing_front
    }

    pub fn face(&self) -> Face {
        if self.showing_front {
            Face::Front
        } else {
            Face::Back
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false; a session cannot be built without cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor == self.cards.len() - 1
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// One-based position label, e.g. "2 / 3".
    pub fn progress_label(&self) -> String {
        format!("{} / {}", self.cursor + 1, self.cards.len())
    }
}
