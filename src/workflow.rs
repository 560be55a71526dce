//! Creation workflow: generate into the buffer, let the user edit, commit.
//!
//! Commit writes the set and then its cards. Cards only count as committed when
//! both writes succeed. If the card write fails the just-created set is deleted
//! again; if that also fails the caller gets `PersistenceError::PartialCommit`
//! carrying the set id, and can `retry_cards` or `abandon` it.

use crate::buffer::{ApplyOutcome, GenerationBuffer};
use crate::error::{FlashgenError, GenerationError, PersistenceError, StorageError, ValidationError};
use crate::generation::{GenerationRequest, Generator};
use crate::identity::IdentityProvider;
use crate::provider::CompletionService;
use crate::store::SetStore;
use crate::types::{Card, NewCardSet, SetId};
use std::time::Duration;
use tracing::{error, info, warn};

/// User-entered fields of a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDetails {
    pub title: String,
    pub description: String,
    pub is_public: bool,
}

/// What happened to one generate action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationAttempt {
    pub request: GenerationRequest,
    pub outcome: ApplyOutcome,
}

impl GenerationAttempt {
    /// Number of cards now in the buffer, or the generation failure.
    pub fn into_result(self) -> Result<usize, FlashgenError> {
        match self.outcome {
            ApplyOutcome::Applied(count) => Ok(count),
            ApplyOutcome::Failed(err) => Err(err.into()),
            ApplyOutcome::Stale => Ok(0),
        }
    }
}

/// Run one generation under a caller-imposed deadline.
///
/// A call that never answers is reported the same way as a failed one.
pub async fn generate_with_timeout<C: CompletionService>(
    generator: &Generator<C>,
    request: &GenerationRequest,
    limit: Duration,
) -> Result<Vec<Card>, GenerationError> {
    match tokio::time::timeout(limit, generator.generate(request)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout = ?limit, "Generation timed out");
            Err(GenerationError::Timeout(limit))
        }
    }
}

pub struct CreationWorkflow<S, I> {
    store: S,
    identity: I,
    buffer: GenerationBuffer,
    timeout: Duration,
}

impl<S: SetStore, I: IdentityProvider> CreationWorkflow<S, I> {
    pub fn new(store: S, identity: I, timeout: Duration) -> Self {
        Self {
            store,
            identity,
            buffer: GenerationBuffer::new(),
            timeout,
        }
    }

    pub fn buffer(&self) -> &GenerationBuffer {
        &self.buffer
    }

    /// Hand edits go through the buffer's replace operations.
    pub fn buffer_mut(&mut self) -> &mut GenerationBuffer {
        &mut self.buffer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generate (or regenerate) the buffer contents for a topic.
    ///
    /// Input errors return before any network call. A generation failure
    /// leaves the previous buffer contents in place.
    pub async fn generate<C: CompletionService>(
        &mut self,
        generator: &Generator<C>,
        topic: &str,
        count: i64,
    ) -> Result<GenerationAttempt, ValidationError> {
        let request = GenerationRequest::new(topic, count)?;
        let ticket = self.buffer.begin_request();
        info!(
            ticket = ticket.sequence(),
            count = request.count(),
            clamped = request.was_clamped(),
            "Starting generation"
        );

        let result = generate_with_timeout(generator, &request, self.timeout).await;
        if let Err(err) = &result {
            error!(ticket = ticket.sequence(), cause = %err.detail(), "Generation failed");
        }
        let outcome = self.buffer.apply(ticket, result);
        Ok(GenerationAttempt { request, outcome })
    }

    /// Persist the buffer as a new set owned by the current user.
    pub fn commit(&mut self, details: SetDetails) -> Result<SetId, FlashgenError> {
        let title = details.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        self.buffer.validate()?;
        let owner_id = self
            .identity
            .current_user_id()
            .ok_or(ValidationError::NotSignedIn)?;

        let set_id = self
            .store
            .insert_set(NewCardSet {
                title: title.to_string(),
                description: details.description.trim().to_string(),
                is_public: details.is_public,
                owner_id,
            })
            .map_err(PersistenceError::SetInsert)?;

        match self.store.insert_cards(&set_id, self.buffer.cards()) {
            Ok(ids) => {
                info!(set_id = %set_id, cards = ids.len(), "Committed set");
                self.buffer.clear();
                Ok(set_id)
            }
            Err(source) => Err(self.roll_back(set_id, source).into()),
        }
    }

    /// Insert the buffered cards into a set left behind by a partial commit.
    pub fn retry_cards(&mut self, set_id: &SetId) -> Result<(), FlashgenError> {
        self.buffer.validate()?;
        if self.store.select_set_by_id(set_id)?.is_none() {
            return Err(StorageError::SetNotFound(set_id.clone()).into());
        }
        let ids = self
            .store
            .insert_cards(set_id, self.buffer.cards())
            .map_err(|source| PersistenceError::PartialCommit {
                set_id: set_id.clone(),
                source,
            })?;
        info!(set_id = %set_id, cards = ids.len(), "Retried card insert");
        self.buffer.clear();
        Ok(())
    }

    /// Give up on a set left behind by a partial commit. The buffer is kept.
    pub fn abandon(&self, set_id: &SetId) -> Result<(), FlashgenError> {
        self.store.delete_set(set_id)?;
        info!(set_id = %set_id, "Abandoned partially committed set");
        Ok(())
    }

    fn roll_back(&self, set_id: SetId, source: StorageError) -> PersistenceError {
        error!(set_id = %set_id, error = %source, "Card insert failed, removing empty set");
        match self.store.delete_set(&set_id) {
            Ok(_) => PersistenceError::CardsRejected {
                rolled_back: true,
                source,
            },
            Err(rollback) => {
                error!(set_id = %set_id, error = %rollback, "Rollback failed");
                PersistenceError::PartialCommit { set_id, source }
            }
        }
    }
}
