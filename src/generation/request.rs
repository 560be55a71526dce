//! Validated generation input.

use crate::error::ValidationError;

pub const MIN_CARD_COUNT: u32 = 1;
pub const MAX_CARD_COUNT: u32 = 20;
pub const DEFAULT_CARD_COUNT: u32 = 5;

/// A topic and a card count that are safe to forward to the provider.
///
/// The count is always within `[MIN_CARD_COUNT, MAX_CARD_COUNT]`. When the
/// caller asked for something outside that range the request keeps the
/// original value so the clamp can be reported back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    topic: String,
    count: u32,
    requested: i64,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, requested: i64) -> Result<Self, ValidationError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(ValidationError::EmptyTopic);
        }
        let count = requested.clamp(i64::from(MIN_CARD_COUNT), i64::from(MAX_CARD_COUNT)) as u32;
        Ok(Self {
            topic,
            count,
            requested,
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// The count actually used for the prompt.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn requested(&self) -> i64 {
        self.requested
    }

    pub fn was_clamped(&self) -> bool {
        self.requested != i64::from(self.count)
    }
}
