//! The generator: one prompt, one completion call, one validated card list.

use crate::error::{FlashgenError, GenerationError};
use crate::generation::parse::parse_response;
use crate::generation::prompt::build_prompt;
use crate::generation::request::GenerationRequest;
use crate::provider::CompletionService;
use crate::types::Card;
use tracing::{debug, error, info, instrument, warn};

/// Stateless flashcard generator over a completion service.
///
/// Every call reaches the service: there is no cache, and identical requests
/// are expected to yield different cards.
pub struct Generator<C> {
    client: C,
}

impl<C: CompletionService> Generator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Generate cards for an already validated request.
    ///
    /// Makes exactly one service call. Failures of the call, of JSON parsing or
    /// of the card shape all surface as `GenerationError`.
    #[instrument(
        skip(self, request),
        fields(
            provider = self.client.provider_name(),
            topic = %request.topic(),
            count = request.count()
        )
    )]
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<Card>, GenerationError> {
        let prompt = build_prompt(request);
        debug!(prompt_len = prompt.len(), "Requesting flashcards");

        let raw = self.client.complete(&prompt).await.map_err(|e| {
            error!(error = %e, "Completion request failed");
            GenerationError::from(e)
        })?;
        debug!(response_len = raw.len(), "Received completion");

        let cards = parse_response(&raw).map_err(|rejection| {
            warn!(reason = %rejection, "Rejected completion response");
            GenerationError::from(rejection)
        })?;

        if cards.len() > request.count() as usize {
            warn!(
                returned = cards.len(),
                "Provider returned more cards than requested"
            );
        }
        info!(returned = cards.len(), "Generated flashcards");
        Ok(cards)
    }

    /// Validate raw caller input, then generate.
    pub async fn generate_topic(&self, topic: &str, count: i64) -> Result<Vec<Card>, FlashgenError> {
        let request = GenerationRequest::new(topic, count)?;
        if request.was_clamped() {
            info!(
                requested = request.requested(),
                used = request.count(),
                "Card count clamped"
            );
        }
        Ok(self.generate(&request).await?)
    }
}
