//! Core data shapes shared by the generator, the review engine and storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A front/back text pair, the atomic study unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub front: String,
    pub back: String,
}

impl Card {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Which side of a card is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Face {
    Front,
    Back,
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Front => write!(f, "front"),
            Face::Back => write!(f, "back"),
        }
    }
}

macro_rules! hex_id {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn from_digest(digest: &[u8; 32]) -> Self {
                Self(hex::encode(digest))
            }

            /// Parse a hex id typed by a user. Accepts exactly 64 hex characters.
            pub fn parse(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                if raw.len() == 64 && hex::decode(raw).is_ok() {
                    Some(Self(raw.to_ascii_lowercase()))
                } else {
                    None
                }
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn short(&self) -> &str {
                &self.0[..12.min(self.0.len())]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

hex_id!(SetId, "Identifier of a stored card set (hex blake3 digest).");
hex_id!(CardId, "Identifier of a stored card (hex blake3 digest).");

/// Identifier of a user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, owned collection of cards, optionally public.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSet {
    pub id: SetId,
    pub title: String,
    pub description: String,
    pub is_public: bool,
    pub owner_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the caller when a set is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCardSet {
    pub title: String,
    pub description: String,
    pub is_public: bool,
    pub owner_id: UserId,
}

/// A card after commit: owned by storage, addressed by id, ordered by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    pub set_id: SetId,
    pub position: u32,
    pub front: String,
    pub back: String,
}

impl CardRecord {
    pub fn card(&self) -> Card {
        Card::new(self.front.clone(), self.back.clone())
    }
}
