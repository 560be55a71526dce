//! Review engine behavior over stored and generated card sequences.

use flashgen::review::ReviewSession;
use flashgen::types::{Card, Face};

fn three() -> Vec<Card> {
    vec![
        Card::new("Q1", "A1"),
        Card::new("Q2", "A2"),
        Card::new("Q3", "A3"),
    ]
}

#[test]
fn test_advance_clamps_then_flip() {
    let session = ReviewSession::new(three()).unwrap();
    assert_eq!((session.cursor(), session.showing_front()), (0, true));

    let session = session.advance().advance().advance();
    assert_eq!(session.cursor(), 2);

    let session = session.flip();
    assert!(!session.showing_front());
    assert_eq!(session.current().text(), "A3");
}

#[test]
fn test_moving_always_shows_front() {
    let session = ReviewSession::new(three()).unwrap().flip();
    assert_eq!(session.face(), Face::Back);

    let moved = session.clone().advance();
    assert_eq!(moved.face(), Face::Front);
    assert_eq!(moved.current().text(), "Q2");

    // Retreat at the first card stays put but still resets the face
    let stayed = session.retreat();
    assert_eq!(stayed.cursor(), 0);
    assert!(stayed.showing_front());
}

#[test]
fn test_single_card_session() {
    let session = ReviewSession::new(vec![Card::new("Only", "One")]).unwrap();
    assert!(session.is_first() && session.is_last());
    let session = session.advance().retreat();
    assert_eq!(session.cursor(), 0);
    assert_eq!(session.progress_label(), "1 / 1");
}

#[test]
fn test_empty_sequence_has_no_session() {
    assert!(ReviewSession::new(Vec::<Card>::new()).is_none());
}
