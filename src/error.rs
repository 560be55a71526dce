//! Error types for flashcard generation, storage and review.

use crate::types::SetId;
use std::time::Duration;
use thiserror::Error;

/// Malformed caller input. Raised before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Topic must not be empty")]
    EmptyTopic,

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("There are no flashcards to save; generate some first")]
    EmptyBuffer,

    #[error("You must be signed in to do that")]
    NotSignedIn,

    #[error("Card {index} does not exist (set has {len} cards)")]
    CardIndexOutOfRange { index: usize, len: usize },

    #[error("Card {index} has an empty {side}")]
    EmptyCardField { index: usize, side: &'static str },

    #[error("No set matches id '{0}'")]
    UnknownSetId(String),

    #[error("Set id prefix '{0}' matches more than one set")]
    AmbiguousSetId(String),

    #[error("Only the owner of set {} can change it", .0.short())]
    NotOwner(SetId),
}

/// Coarse category of a generation failure, for callers that need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationFailure {
    Service,
    Timeout,
    Malformed,
    InvalidFormat,
}

/// Failure of a single generation attempt.
///
/// `Display` yields a stable user-facing message. The payload carries the
/// internal cause for logs and diagnostics and is never part of the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Failed to generate flashcards. Please try again later.")]
    ServiceFailed(String),

    #[error("Failed to generate flashcards. Please try again later.")]
    Timeout(Duration),

    #[error("Failed to generate valid flashcard format")]
    MalformedResponse(String),

    #[error("Failed to generate valid flashcard format")]
    InvalidFormat(String),
}

impl GenerationError {
    pub fn kind(&self) -> GenerationFailure {
        match self {
            GenerationError::ServiceFailed(_) => GenerationFailure::Service,
            GenerationError::Timeout(_) => GenerationFailure::Timeout,
            GenerationError::MalformedResponse(_) => GenerationFailure::Malformed,
            GenerationError::InvalidFormat(_) => GenerationFailure::InvalidFormat,
        }
    }

    /// Internal cause, suitable for logs only.
    pub fn detail(&self) -> String {
        match self {
            GenerationError::ServiceFailed(cause)
            | GenerationError::MalformedResponse(cause)
            | GenerationError::InvalidFormat(cause) => cause.clone(),
            GenerationError::Timeout(after) => format!("no response after {:?}", after),
        }
    }
}

/// Transport-level failures from a model provider client.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider error: {0}")]
    Other(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Provider request failed: {0}")]
    RequestFailed(String),

    #[error("Provider authentication failed: {0}")]
    AuthFailed(String),

    #[error("Provider rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Provider model not found: {0}")]
    ModelNotFound(String),
}

impl From<ProviderError> for GenerationError {
    fn from(err: ProviderError) -> Self {
        GenerationError::ServiceFailed(err.to_string())
    }
}

/// Storage-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Set not found: {0}")]
    SetNotFound(SetId),

    #[error("Failed to encode or decode record: {0}")]
    Encoding(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<sled::Error> for StorageError {
    fn from(err: sled::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::Encoding(err.to_string())
    }
}

/// Failure while committing a generated set.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to save flashcard set: {0}")]
    SetInsert(#[source] StorageError),

    /// The set was created but its cards were not. `rolled_back` tells whether
    /// the empty set was removed again.
    #[error("Failed to save flashcards{}: {source}", leftover_note(.rolled_back))]
    CardsRejected {
        rolled_back: bool,
        #[source]
        source: StorageError,
    },

    /// The set exists without cards and rollback failed. Retry the card insert
    /// against `set_id` or abandon the set.
    #[error("Set {set_id} was created but its cards were not saved: {source}")]
    PartialCommit {
        set_id: SetId,
        #[source]
        source: StorageError,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

fn leftover_note(rolled_back: &bool) -> &'static str {
    if *rolled_back {
        ""
    } else {
        " (empty set left behind)"
    }
}

/// Top-level error at the workflow and CLI boundary.
#[derive(Debug, Error)]
pub enum FlashgenError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Identity error: {0}")]
    Identity(String),

    #[error("Failed to get user input: {0}")]
    Input(String),
}

impl From<config::ConfigError> for FlashgenError {
    fn from(err: config::ConfigError) -> Self {
        FlashgenError::Config(err.to_string())
    }
}
