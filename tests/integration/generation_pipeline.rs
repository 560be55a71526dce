//! End-to-end generation through the public API: prompt, one call, validation.

use super::test_utils::ScriptedCompletion;
use flashgen::error::{FlashgenError, GenerationError, GenerationFailure, ValidationError};
use flashgen::generation::{GenerationRequest, Generator};
use flashgen::types::Card;
use flashgen::workflow::generate_with_timeout;
use std::time::Duration;

const PHOTOSYNTHESIS: &str = "```json\n[{\"front\":\"Q1\",\"back\":\"A1\"},{\"front\":\"Q2\",\"back\":\"A2\"},{\"front\":\"Q3\",\"back\":\"A3\"}]\n```";

#[tokio::test]
async fn test_fenced_response_yields_cards_in_order() {
    let generator = Generator::new(ScriptedCompletion::replying(PHOTOSYNTHESIS));
    let cards = generator.generate_topic("Photosynthesis", 3).await.unwrap();
    assert_eq!(
        cards,
        vec![
            Card::new("Q1", "A1"),
            Card::new("Q2", "A2"),
            Card::new("Q3", "A3"),
        ]
    );

    let prompts = generator.client().prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("3 flashcards"));
    assert!(prompts[0].contains("Photosynthesis"));
}

#[tokio::test]
async fn test_non_json_response_is_a_generation_error() {
    let generator = Generator::new(ScriptedCompletion::replying("not json"));
    let err = generator.generate_topic("X", 5).await.unwrap_err();
    match err {
        FlashgenError::Generation(e) => {
            assert_eq!(e.kind(), GenerationFailure::Malformed);
            assert_eq!(e.to_string(), "Failed to generate valid flashcard format");
        }
        other => panic!("expected generation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_wrong_shapes_never_return_partial_lists() {
    let bad = [
        r#"{"front":"Q","back":"A"}"#,
        r#"[{"front":"Q1","back":"A1"},{"front":"Q2"}]"#,
        r#"[{"front":"Q1","back":"A1"},{"front":7,"back":"A2"}]"#,
        r#"[{"front":"Q1","back":"A1"},"just text"]"#,
        r#"[{"cards":[{"front":"Q","back":"A"}]}]"#,
    ];
    for raw in bad {
        let generator = Generator::new(ScriptedCompletion::replying(raw));
        let request = GenerationRequest::new("Topic", 2).unwrap();
        let err = generator.generate(&request).await.unwrap_err();
        assert_eq!(err.kind(), GenerationFailure::InvalidFormat, "input: {raw}");
    }
}

#[tokio::test]
async fn test_service_failure_hides_cause_from_message() {
    let generator = Generator::new(ScriptedCompletion::failing("503 upstream overloaded"));
    let request = GenerationRequest::new("Topic", 2).unwrap();
    let err = generator.generate(&request).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to generate flashcards. Please try again later."
    );
    assert!(err.detail().contains("503 upstream overloaded"));
    // Exactly one attempt
    assert_eq!(generator.client().calls(), 1);
}

#[tokio::test]
async fn test_invalid_input_makes_no_call() {
    let generator = Generator::new(ScriptedCompletion::replying(PHOTOSYNTHESIS));
    let err = generator.generate_topic("   ", 3).await.unwrap_err();
    assert!(matches!(
        err,
        FlashgenError::Validation(ValidationError::EmptyTopic)
    ));
    assert_eq!(generator.client().calls(), 0);
}

#[tokio::test]
async fn test_out_of_range_count_is_clamped_in_prompt() {
    let generator = Generator::new(ScriptedCompletion::new(vec![
        Ok(r#"[{"front":"Q","back":"A"}]"#),
        Ok(r#"[{"front":"Q","back":"A"}]"#),
    ]));
    generator.generate_topic("Rome", 0).await.unwrap();
    generator.generate_topic("Rome", 500).await.unwrap();

    let prompts = generator.client().prompts();
    assert!(prompts[0].starts_with("Generate 1 flashcards"));
    assert!(prompts[1].starts_with("Generate 20 flashcards"));
}

#[tokio::test]
async fn test_identical_requests_are_not_cached() {
    let generator = Generator::new(ScriptedCompletion::new(vec![
        Ok(r#"[{"front":"First","back":"A"}]"#),
        Ok(r#"[{"front":"Second","back":"B"}]"#),
    ]));
    let request = GenerationRequest::new("Rome", 1).unwrap();
    let first = generator.generate(&request).await.unwrap();
    let second = generator.generate(&request).await.unwrap();
    assert_ne!(first, second);
    assert_eq!(generator.client().calls(), 2);
}

#[tokio::test]
async fn test_timeout_wrapper_passes_through_fast_results() {
    let generator = Generator::new(ScriptedCompletion::replying(PHOTOSYNTHESIS));
    let request = GenerationRequest::new("Photosynthesis", 3).unwrap();
    let cards = generate_with_timeout(&generator, &request, Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(cards.len(), 3);

    let empty = Generator::new(ScriptedCompletion::replying("[]"));
    let cards = generate_with_timeout(&empty, &request, Duration::from_secs(5))
        .await
        .unwrap();
    assert!(cards.is_empty());

    let failing = Generator::new(ScriptedCompletion::replying(r#"{"cards": []}"#));
    let err = generate_with_timeout(&failing, &request, Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::InvalidFormat(_)));
}
