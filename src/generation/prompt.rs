//! Prompt template for flashcard generation.

use crate::generation::request::GenerationRequest;

/// Build the instruction prompt for a request. Deterministic for equal input.
pub fn build_prompt(request: &GenerationRequest) -> String {
    format!(
        "Generate {count} flashcards about \"{topic}\".\n\
         Return ONLY a JSON array with objects containing \"front\" and \"back\" properties.\n\
         Do not include any markdown formatting, code blocks, or additional text.\n\
         Keep each side concise but informative.\n\
         Example:\n\
         [{{\"front\":\"What is X?\",\"back\":\"X is Y\"}},{{\"front\":\"Define Z\",\"back\":\"Z is...\"}}]",
        count = request.count(),
        topic = request.topic(),
    )
}
