/// Property-based roundtrip tests for the JSON codec.
///
/// Uses the `proptest` crate to generate random document trees and verify
/// that `from_str(to_string(tree)) == tree` holds for all generated inputs,
/// in both compact and pretty modes.
///
/// Strategies generate:
/// - Random strings (including edge cases: empty, unicode, control chars)
/// - Random numbers (integers within the interoperable range, floats with
///   a decimal fraction — excluding NaN/Infinity, which the writer rejects)
/// - Random booleans and null
/// - Random objects and arrays nested up to 3 levels deep
///
/// Whole-number floats are excluded by construction: the writer prints
/// `2.0` as `2`, so such values come back as integers. That is the
/// documented fraction-free conversion rule, not a roundtrip defect.
use proptest::prelude::*;
use serde_json::{json, Map, Number, Value};

// ============================================================================
// Strategies for generating document trees
// ============================================================================

/// Generate an object key (non-empty, limited length).
fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,15}").unwrap()
}

/// Generate a string value with edge cases the escaper must handle.
fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        // Simple ASCII strings
        "[a-zA-Z0-9 ]{0,30}",
        // Edge case: empty string
        Just("".to_string()),
        // Characters that take the two-character escape forms
        Just("say \"hi\"".to_string()),
        Just("path\\to\\file".to_string()),
        Just("line1\nline2".to_string()),
        Just("col1\tcol2".to_string()),
        Just("cr\rlf".to_string()),
        // Characters that take the \u00XX form
        Just("\u{0001}\u{001f}".to_string()),
        // Unicode passes through unescaped
        Just("caf\u{00e9}".to_string()),
        Just("\u{4f60}\u{597d}".to_string()),
    ]
}

/// Generate an integer within the interoperable range the writer accepts.
fn arb_integer() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1_000_000i64..1_000_000i64).prop_map(|n| Value::Number(Number::from(n))),
        (-9_007_199_254_740_992i64..=9_007_199_254_740_992i64)
            .prop_map(|n| Value::Number(Number::from(n))),
    ]
}

/// Generate a float with a nonzero fraction.
///
/// Built as integer mantissa / 10^n so the value survives the writer's
/// `Display` formatting exactly. Whole numbers are skipped: they print
/// without a decimal point and come back as integers.
fn arb_float() -> impl Strategy<Value = Value> {
    (-100_000_000i64..100_000_000i64, 1u32..5u32).prop_filter_map(
        "must be finite and not a whole number",
        |(mantissa, decimals)| {
            let f = mantissa as f64 / 10f64.powi(decimals as i32);
            if !f.is_finite() || f.fract() == 0.0 {
                return None;
            }
            Number::from_f64(f).map(Value::Number)
        },
    )
}

/// Generate a leaf value (string, number, bool, null).
fn arb_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => arb_string().prop_map(Value::String),
        3 => arb_integer(),
        1 => arb_float(),
        1 => any::<bool>().prop_map(Value::Bool),
        1 => Just(Value::Null),
    ]
}

/// Generate a tree with limited nesting (recursive).
fn arb_tree_inner(depth: u32) -> impl Strategy<Value = Value> {
    if depth == 0 {
        arb_leaf().boxed()
    } else {
        prop_oneof![
            4 => arb_leaf(),
            2 => prop::collection::vec((arb_key(), arb_tree_inner(depth - 1)), 0..5)
                .prop_map(|pairs| {
                    let mut map = Map::new();
                    for (k, v) in pairs {
                        map.insert(k, v);
                    }
                    Value::Object(map)
                }),
            2 => prop::collection::vec(arb_tree_inner(depth - 1), 0..5)
                .prop_map(Value::Array),
        ]
        .boxed()
    }
}

/// Top-level strategy: random trees up to 3 levels deep.
fn arb_tree() -> impl Strategy<Value = Value> {
    arb_tree_inner(3)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Core roundtrip property: from_str(to_string(tree)) == tree.
    #[test]
    fn compact_roundtrip_preserves_tree(tree in arb_tree()) {
        let text = grove_core::to_string(&tree).unwrap();
        let back: Value = grove_core::from_str(&text).unwrap();
        prop_assert_eq!(
            &tree,
            &back,
            "roundtrip failed!\n  text: {}",
            text
        );
    }

    /// Pretty mode describes the identical tree.
    #[test]
    fn pretty_roundtrip_preserves_tree(tree in arb_tree()) {
        let text = grove_core::to_string_pretty(&tree).unwrap();
        let back: Value = grove_core::from_str(&text).unwrap();
        prop_assert_eq!(
            &tree,
            &back,
            "pretty roundtrip failed!\n  text: {}",
            text
        );
    }

    /// Compact output is standard JSON: a third-party parser accepts it and
    /// reads the same tree.
    #[test]
    fn compact_output_is_valid_json(tree in arb_tree()) {
        let text = grove_core::to_string(&tree).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(tree, parsed);
    }

    /// Compact output never contains structural whitespace.
    #[test]
    fn compact_output_has_no_newlines(tree in arb_tree()) {
        let text = grove_core::to_string(&tree).unwrap();
        prop_assert!(!text.contains('\n'), "compact output has a newline: {:?}", text);
    }

    /// Pretty output never has trailing spaces on any line.
    #[test]
    fn pretty_output_has_no_trailing_spaces(tree in arb_tree()) {
        let text = grove_core::to_string_pretty(&tree).unwrap();
        for (i, line) in text.lines().enumerate() {
            prop_assert!(
                !line.ends_with(' '),
                "line {} has a trailing space: {:?}",
                i,
                line
            );
        }
    }

    /// Encoding an in-range tree never fails or panics.
    #[test]
    fn encode_never_fails_in_range(tree in arb_tree()) {
        prop_assert!(grove_core::to_string(&tree).is_ok());
    }

    /// Strings always roundtrip exactly as object values, whatever escaping
    /// the writer applied.
    #[test]
    fn string_value_roundtrip(s in arb_string()) {
        let tree = json!({"key": s});
        let text = grove_core::to_string(&tree).unwrap();
        let back: Value = grove_core::from_str(&text).unwrap();
        prop_assert_eq!(
            tree,
            back,
            "string roundtrip failed for {:?}\n  text: {:?}",
            s,
            text
        );
    }

    /// Integers within the interoperable range roundtrip exactly.
    #[test]
    fn integer_roundtrip(n in arb_integer()) {
        let tree = json!({"val": n});
        let text = grove_core::to_string(&tree).unwrap();
        let back: Value = grove_core::from_str(&text).unwrap();
        prop_assert_eq!(tree, back);
    }

    /// Fractional floats roundtrip exactly through `Display` formatting.
    #[test]
    fn float_roundtrip(n in arb_float()) {
        let tree = json!({"val": n});
        let text = grove_core::to_string(&tree).unwrap();
        let back: Value = grove_core::from_str(&text).unwrap();
        prop_assert_eq!(tree, back);
    }
}
