//! Review navigation never leaves the card range and moves always show the front.

use flashgen::review::ReviewSession;
use flashgen::types::Card;
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Step {
    Advance,
    Retreat,
    Flip,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![Just(Step::Advance), Just(Step::Retreat), Just(Step::Flip)]
}

fn session(n: usize) -> ReviewSession {
    let cards: Vec<Card> = (0..n)
        .map(|i| Card::new(format!("Q{}", i), format!("A{}", i)))
        .collect();
    ReviewSession::new(cards).unwrap()
}

proptest! {
    #[test]
    fn cursor_stays_in_range(n in 1usize..30, steps in prop::collection::vec(step(), 0..200)) {
        let mut s = session(n);
        for step in steps {
            let before = s.cursor();
            s = match step {
                Step::Advance => s.advance(),
                Step::Retreat => s.retreat(),
                Step::Flip => s.flip(),
            };
            prop_assert!(s.cursor() < n);
            match step {
                Step::Advance => {
                    prop_assert_eq!(s.cursor(), (before + 1).min(n - 1));
                    prop_assert!(s.showing_front());
                }
                Step::Retreat => {
                    prop_assert_eq!(s.cursor(), before.saturating_sub(1));
                    prop_assert!(s.showing_front());
                }
                Step::Flip => prop_assert_eq!(s.cursor(), before),
            }
        }
    }

    #[test]
    fn retreat_at_start_and_advance_at_end_are_fixed_points(n in 1usize..30, repeats in 1usize..10) {
        let mut start = session(n);
        for _ in 0..repeats {
            start = start.retreat();
        }
        prop_assert_eq!(start.cursor(), 0);

        let mut end = session(n);
        for _ in 0..n + repeats {
            end = end.advance();
        }
        prop_assert_eq!(end.cursor(), n - 1);
        prop_assert!(end.is_last());
    }

    #[test]
    fn flip_is_an_involution(n in 1usize..30, moves in 0usize..40) {
        let mut s = session(n);
        for _ in 0..moves {
            s = s.advance();
        }
        let twice = s.clone().flip().flip();
        prop_assert_eq!(twice, s);
    }

    #[test]
    fn moving_from_the_back_face_shows_the_front(n in 1usize..30, forward in any::<bool>()) {
        let flipped = session(n).flip();
        prop_assert!(!flipped.showing_front());
        let moved = if forward { flipped.advance() } else { flipped.retreat() };
        prop_assert!(moved.showing_front());
    }
}
