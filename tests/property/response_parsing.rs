//! Fence stripping and response validation over generated card lists.

use flashgen::generation::{parse_response, strip_code_fences};
use flashgen::types::Card;
use proptest::prelude::*;

fn card() -> impl Strategy<Value = Card> {
    ("[A-Za-z0-9 ?.,'-]{1,40}", "[A-Za-z0-9 ?.,'-]{1,80}")
        .prop_map(|(front, back)| Card::new(front, back))
}

fn cards_json(cards: &[Card]) -> String {
    serde_json::to_string(cards).unwrap()
}

proptest! {
    #[test]
    fn fenced_and_bare_responses_strip_identically(
        cards in prop::collection::vec(card(), 1..20),
        tag in prop_oneof![Just(""), Just("json"), Just("JSON")],
        pad in "[ \n]{0,3}",
    ) {
        let body = cards_json(&cards);
        let fenced = format!("{pad}```{tag}\n{body}\n```{pad}");
        prop_assert_eq!(strip_code_fences(&fenced), strip_code_fences(&body));
        prop_assert_eq!(strip_code_fences(&body), body.as_str());
    }

    #[test]
    fn valid_arrays_round_trip_through_parsing(
        cards in prop::collection::vec(card(), 1..20),
        fenced in any::<bool>(),
    ) {
        let body = cards_json(&cards);
        let raw = if fenced { format!("```json\n{}\n```", body) } else { body };
        prop_assert_eq!(parse_response(&raw).unwrap(), cards);
    }

    #[test]
    fn one_bad_element_rejects_the_whole_list(
        cards in prop::collection::vec(card(), 1..10),
        at in any::<prop::sample::Index>(),
    ) {
        let mut values: Vec<serde_json::Value> =
            cards.iter().map(|c| serde_json::to_value(c).unwrap()).collect();
        let i = at.index(values.len());
        values[i].as_object_mut().unwrap().remove("back");
        let raw = serde_json::Value::Array(values).to_string();
        prop_assert!(parse_response(&raw).is_err());
    }

    #[test]
    fn non_array_json_is_rejected(text in "[A-Za-z0-9 ]{0,40}", number in any::<i64>()) {
        prop_assert!(parse_response(&serde_json::to_string(&text).unwrap()).is_err());
        prop_assert!(parse_response(&number.to_string()).is_err());
        let object_json = "{\"front\":\"Q\",\"back\":\"A\"}";
        prop_assert!(parse_response(object_json).is_err());
    }
}
