//! Blank-field removal for update payloads.
//!
//! `{ "bird": { "name": "", "location": "Paris" } }` becomes
//! `{ "bird": { "location": "Paris" } }`, so a form submitted with an empty
//! input never overwrites a stored value.

use serde_json::Value;

/// Remove every object key whose value is exactly `""`, at any object depth.
///
/// Whitespace is not trimmed. Arrays are left as they are and not descended
/// into; non-object roots are untouched.
pub fn remove_blanks(payload: &mut Value) {
    if let Value::Object(map) = payload {
        map.retain(|_, v| !matches!(v, Value::String(s) if s.is_empty()));
        for child in map.values_mut() {
            remove_blanks(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn strips_blank_fields_from_nested_objects() {
        let mut body = json!({ "bird": { "name": "", "location": "Paris" } });
        remove_blanks(&mut body);
        assert_eq!(body, json!({ "bird": { "location": "Paris" } }));
    }

    #[test]
    fn keeps_whitespace_and_non_string_values() {
        let mut body = json!({
            "a": " ",
            "b": 0,
            "c": false,
            "d": null,
            "e": {},
            "f": { "g": { "h": "", "i": "x" } },
        });
        remove_blanks(&mut body);
        assert_eq!(
            body,
            json!({
                "a": " ",
                "b": 0,
                "c": false,
                "d": null,
                "e": {},
                "f": { "g": { "i": "x" } },
            })
        );
    }

    #[test]
    fn arrays_pass_through_untouched() {
        let mut body = json!({ "tags": ["", "x", { "k": "" }] });
        let expected = body.clone();
        remove_blanks(&mut body);
        assert_eq!(body, expected);
    }

    #[test]
    fn non_object_root_is_untouched() {
        let mut body = json!("");
        remove_blanks(&mut body);
        assert_eq!(body, json!(""));
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            prop_oneof![Just(String::new()), Just(" ".to_string()), "[a-z]{1,8}"].prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-e]", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn contains_blank_field(value: &Value) -> bool {
        match value {
            Value::Object(map) => map
                .values()
                .any(|v| matches!(v, Value::String(s) if s.is_empty()) || contains_blank_field(v)),
            _ => false,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: no object reachable through objects holds a blank string.
        #[test]
        fn no_blank_fields_remain(mut value in arb_json()) {
            remove_blanks(&mut value);
            prop_assert!(!contains_blank_field(&value));
        }

        /// Property: sanitising twice changes nothing the first pass did not.
        #[test]
        fn idempotent(mut value in arb_json()) {
            remove_blanks(&mut value);
            let once = value.clone();
            remove_blanks(&mut value);
            prop_assert_eq!(value, once);
        }

        /// Property: non-blank top-level fields survive unchanged.
        #[test]
        fn keeps_non_blank_strings(key in "[a-z]{1,6}", text in "[a-z ]{1,12}") {
            let mut map = serde_json::Map::new();
            map.insert(key.clone(), Value::String(text.clone()));
            let mut value = Value::Object(map);
            remove_blanks(&mut value);
            prop_assert_eq!(&value[&key], &Value::String(text));
        }
    }
}
