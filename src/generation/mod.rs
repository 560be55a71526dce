//! Flashcard generation: request validation, prompt construction, the single
//! completion call, and validation of the untrusted response.

pub mod generator;
pub mod parse;
pub mod prompt;
pub mod request;

pub use generator::Generator;
pub use parse::{parse_response, strip_code_fences, validate_cards, ResponseRejection};
pub use prompt::build_prompt;
pub use request::{GenerationRequest, DEFAULT_CARD_COUNT, MAX_CARD_COUNT, MIN_CARD_COUNT};
