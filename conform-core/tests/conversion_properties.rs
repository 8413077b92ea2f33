//! Property-based tests for the converters and the validator.
//!
//! Checks that accepted inputs convert to the value they denote, that
//! rejected inputs are rejected regardless of surrounding data, and that
//! array conversion is element-wise and order preserving.

mod common;

use conform_core::convert;
use conform_core::{EnumSpec, ErrorContext, ErrorKind, Validator};
use proptest::prelude::*;
use serde_json::{json, Value};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn finite_number_strategy() -> impl Strategy<Value = f64> {
    -1.0e12f64..1.0e12
}

fn padding_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ \t\n]{0,3}").unwrap()
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ]{0,40}").unwrap()
}

/// Randomly upper-cases each character of `word`.
fn casing_strategy(word: &'static str) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<bool>(), word.len()).prop_map(move |mask| {
        word.chars()
            .zip(mask)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

fn enum_entries_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::btree_map("[0-9]{1,3}", "[A-Z][a-z]{1,8}", 1..10)
        .prop_map(|map| map.into_iter().collect())
}

// =============================================================================
// BASIC CONVERTER PROPERTIES
// =============================================================================

mod basic_properties {
    use super::*;

    proptest! {
        /// Numeric strings convert to the number they render.
        #[test]
        fn number_strings_round_trip(n in finite_number_strategy(), pad in padding_strategy()) {
            let raw = format!("{pad}{n}{pad}");
            prop_assert_eq!(convert::convert_number(&json!(raw)).unwrap(), n);
        }

        /// JSON numbers pass through unchanged.
        #[test]
        fn json_numbers_pass_through(n in finite_number_strategy()) {
            prop_assert_eq!(convert::convert_number(&json!(n)).unwrap(), n);
        }

        /// Integers render as strings without a fractional part.
        #[test]
        fn integers_render_as_plain_text(i in any::<i64>()) {
            prop_assert_eq!(convert::convert_string(&json!(i)).unwrap(), i.to_string());
        }

        /// Strings always pass through untouched.
        #[test]
        fn strings_pass_through(s in ".*") {
            prop_assert_eq!(convert::convert_string(&json!(s.clone())).unwrap(), s);
        }

        /// Boolean strings are matched case-insensitively.
        #[test]
        fn boolean_strings_ignore_case(
            t in casing_strategy("true"),
            f in casing_strategy("false"),
            pad in padding_strategy(),
        ) {
            let yes = format!("{pad}{t}");
            let no = format!("{f}{pad}");
            prop_assert!(convert::convert_boolean(&json!(yes)).unwrap());
            prop_assert!(!convert::convert_boolean(&json!(no)).unwrap());
        }

        /// Alphabetic strings other than true/false never convert to booleans.
        #[test]
        fn other_words_are_not_booleans(word in "[a-z]{1,10}") {
            prop_assume!(word != "true" && word != "false");
            let err = convert::convert_boolean(&json!(word)).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::ConversionFailed);
        }

        /// Trailing text after a numeric prefix is ignored.
        #[test]
        fn numeric_prefix_is_kept(n in 0u32..1000, word in "[g-z ]{1,5}") {
            let raw = format!("{n}{word}");
            prop_assert_eq!(convert::convert_number(&json!(raw)).unwrap(), f64::from(n));
        }

        /// Strings without a leading number never convert.
        #[test]
        fn words_are_not_numbers(word in "[a-z]{1,8}") {
            let err = convert::convert_number(&json!(word)).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::ConversionFailed);
        }
    }
}

// =============================================================================
// ENUM PROPERTIES
// =============================================================================

mod enum_properties {
    use super::*;

    proptest! {
        /// Every declared key maps to its internal value.
        #[test]
        fn declared_keys_map(entries in enum_entries_strategy()) {
            let spec = EnumSpec::mapped(entries.clone()).unwrap();
            for (external, internal) in &entries {
                prop_assert_eq!(convert::convert_enum(&json!(external), &spec).unwrap(), internal.clone());
            }
        }

        /// Undeclared keys are rejected and the message lists every valid key.
        #[test]
        fn undeclared_keys_are_rejected(entries in enum_entries_strategy(), key in "[a-z]{1,4}") {
            let spec = EnumSpec::mapped(entries.clone()).unwrap();
            let err = convert::convert_enum(&json!(key), &spec).unwrap_err();
            prop_assert_eq!(err.kind(), ErrorKind::EnumMismatch);
            let message = err.to_string();
            for (external, _) in &entries {
                prop_assert!(message.contains(external.as_str()));
            }
        }
    }
}

// =============================================================================
// VALIDATOR PROPERTIES
// =============================================================================

mod validator_properties {
    use super::*;

    proptest! {
        /// Basic arrays convert element-wise and keep their order.
        #[test]
        fn number_arrays_preserve_order(numbers in prop::collection::vec(finite_number_strategy(), 0..30)) {
            let input = Value::Array(numbers.iter().map(|n| json!(n.to_string())).collect());
            let converted: Vec<f64> = Validator::new()
                .validate_and_convert_basic_type_array(&input)
                .unwrap();
            prop_assert_eq!(converted, numbers);
        }

        /// One bad element fails the array, and the error names that element.
        #[test]
        fn one_bad_element_fails_the_array(
            numbers in prop::collection::vec(finite_number_strategy(), 1..20),
            position in any::<prop::sample::Index>(),
        ) {
            let mut elements: Vec<Value> = numbers.iter().map(|n| json!(n)).collect();
            let at = position.index(elements.len() + 1);
            elements.insert(at, json!("abc"));

            let err = Validator::new()
                .validate_and_convert_basic_type_array::<f64>(&Value::Array(elements))
                .unwrap_err();
            prop_assert_eq!(err.context(), vec![ErrorContext::Element("abc")]);
        }

        /// Converted objects carry exactly the input's values.
        #[test]
        fn objects_carry_input_values(
            name in name_strategy(),
            price in 0u32..100_000,
            unit in 0u8..4,
            in_stock in any::<bool>(),
        ) {
            let input = json!({
                "DisplayName": name.clone(),
                "PricePerUnit": price.to_string(),
                "Unit": unit,
                "InStock": in_stock,
                "DateAdded": "2002-01-17"
            });
            let item = Validator::new()
                .validate_and_convert_object(
                    &input,
                    &common::catalogue_binding(),
                    &common::catalogue_schema(),
                )
                .unwrap();
            prop_assert_eq!(item.display_name, name);
            prop_assert_eq!(item.price_per_unit, f64::from(price));
            prop_assert_eq!(item.in_stock, in_stock);
        }
    }
}
