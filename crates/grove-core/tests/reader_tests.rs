//! Reader contract tests: navigation, type checking, numeric conversion,
//! and the single-pass key iteration.

use grove_core::{Deserializer, GroveError, JsonReader, TypeMask};
use serde_json::Value;

/// Helper: parse `json` and run `f` against a deserializer over it.
fn read<R>(
    json: &str,
    f: impl FnOnce(&Deserializer<JsonReader<'_>>) -> grove_core::Result<R>,
) -> grove_core::Result<R> {
    let doc: Value = serde_json::from_str(json).unwrap();
    let de = Deserializer::new(JsonReader::new(&doc));
    let out = f(&de)?;
    de.finish()?;
    Ok(out)
}

// ============================================================================
// Key and index navigation
// ============================================================================

#[test]
fn key_reads_required_member() {
    let v: i32 = read(r#"{"a":1,"b":2}"#, |de| {
        let obj = de.root().object()?;
        obj.value("b")
    })
    .unwrap();
    assert_eq!(v, 2);
}

#[test]
fn missing_key_fails() {
    let err = read(r#"{"a":1}"#, |de| {
        let obj = de.root().object()?;
        obj.value::<i32>("x")
    })
    .unwrap_err();
    assert!(matches!(err, GroveError::KeyNotFound { key } if key == "x"));
}

#[test]
fn try_key_reports_absence_without_failing() {
    read(r#"{"a":1}"#, |de| {
        let obj = de.root().object()?;
        assert!(obj.try_key("x")?.is_none());
        let node = obj.try_key("a")?.expect("a is present");
        assert_eq!(node.value::<i32>()?, 1);
        Ok(())
    })
    .unwrap();
}

#[test]
fn opt_value_absent_yields_none() {
    let v: Option<i32> = read(r#"{"a":1}"#, |de| {
        let obj = de.root().object()?;
        obj.opt_value("x")
    })
    .unwrap();
    assert_eq!(v, None);
}

#[test]
fn opt_value_present_yields_inner() {
    let v: Option<i32> = read(r#"{"x":5}"#, |de| {
        let obj = de.root().object()?;
        obj.opt_value("x")
    })
    .unwrap();
    assert_eq!(v, Some(5));
}

#[test]
fn index_reads_elements_in_any_order() {
    read(r#"[10,20,30]"#, |de| {
        let ar = de.root().array()?;
        assert_eq!(ar.value::<i32>(2)?, 30);
        assert_eq!(ar.value::<i32>(0)?, 10);
        Ok(())
    })
    .unwrap();
}

#[test]
fn index_out_of_range_fails_with_length() {
    let err = read(r#"[1,2]"#, |de| {
        let ar = de.root().array()?;
        ar.value::<i32>(2)
    })
    .unwrap_err();
    assert!(matches!(
        err,
        GroveError::IndexOutOfRange { index: 2, len: 2 }
    ));
}

#[test]
fn length_counts_direct_children() {
    read(r#"{"a":[1,2,3],"b":1}"#, |de| {
        let obj = de.root().object()?;
        assert_eq!(obj.length()?, 2);
        let ar = obj.array("a")?;
        assert_eq!(ar.length()?, 3);
        Ok(())
    })
    .unwrap();
}

// ============================================================================
// Type tags and mismatches
// ============================================================================

#[test]
fn pending_type_reports_disjoint_leaf_tags() {
    read(r#"{"t":true,"f":false,"i":3,"x":2.5,"s":"s","n":null,"o":{},"a":[]}"#, |de| {
        let obj = de.root().object()?;
        assert_eq!(obj.key("t")?.node_type()?, TypeMask::TRUE);
        assert_eq!(obj.key("f")?.node_type()?, TypeMask::FALSE);
        assert_eq!(obj.key("i")?.node_type()?, TypeMask::INTEGER);
        assert_eq!(obj.key("x")?.node_type()?, TypeMask::FLOAT);
        assert_eq!(obj.key("s")?.node_type()?, TypeMask::STRING);
        assert_eq!(obj.key("n")?.node_type()?, TypeMask::NULL);
        assert_eq!(obj.key("o")?.node_type()?, TypeMask::OBJECT);
        assert_eq!(obj.key("a")?.node_type()?, TypeMask::ARRAY);
        Ok(())
    })
    .unwrap();
}

#[test]
fn combined_queries_cover_categories() {
    read(r#"{"t":true,"i":3,"x":2.5}"#, |de| {
        let obj = de.root().object()?;
        assert!(obj.key("t")?.node_type()?.is(TypeMask::BOOLEAN));
        assert!(obj.key("i")?.node_type()?.is(TypeMask::NUMBER));
        assert!(obj.key("x")?.node_type()?.is(TypeMask::NUMBER));
        assert!(!obj.key("t")?.node_type()?.is(TypeMask::NUMBER));
        Ok(())
    })
    .unwrap();
}

#[test]
fn reading_integer_where_string_pending_fails() {
    let err = read(r#"{"a":"one"}"#, |de| {
        let obj = de.root().object()?;
        obj.value::<i32>("a")
    })
    .unwrap_err();
    assert!(matches!(
        err,
        GroveError::TypeMismatch {
            expected: "integer",
            found: "string"
        }
    ));
}

#[test]
fn entering_scalar_as_object_fails() {
    let err = read(r#"[1]"#, |de| {
        de.root().object().map(|_| ())
    })
    .unwrap_err();
    assert!(matches!(
        err,
        GroveError::TypeMismatch {
            expected: "object",
            found: "array"
        }
    ));
}

// ============================================================================
// Numeric conversion policy
// ============================================================================

#[test]
fn narrowing_out_of_width_fails() {
    let err = read(r#"[300]"#, |de| {
        let ar = de.root().array()?;
        ar.value::<u8>(0)
    })
    .unwrap_err();
    assert!(matches!(err, GroveError::IntegerRange { .. }));
}

#[test]
fn negative_as_unsigned_fails() {
    let err = read(r#"[-1]"#, |de| {
        let ar = de.root().array()?;
        ar.value::<u32>(0)
    })
    .unwrap_err();
    assert!(matches!(err, GroveError::IntegerRange { .. }));
}

#[test]
fn fractional_token_as_integer_fails() {
    let err = read(r#"[1.5]"#, |de| {
        let ar = de.root().array()?;
        ar.value::<i64>(0)
    })
    .unwrap_err();
    assert!(matches!(err, GroveError::PrecisionLoss { .. }));
}

#[test]
fn fraction_free_float_token_converts() {
    let v: i64 = read(r#"[2.0]"#, |de| {
        let ar = de.root().array()?;
        ar.value(0)
    })
    .unwrap();
    assert_eq!(v, 2);
}

#[test]
fn float_token_at_two_pow_63_as_signed_fails() {
    // 9.223372036854776e18 == 2^63, one past i64::MAX. The cast must not
    // saturate to i64::MAX.
    let err = read(r#"[9.223372036854776e18]"#, |de| {
        let ar = de.root().array()?;
        ar.value::<i64>(0)
    })
    .unwrap_err();
    assert!(matches!(err, GroveError::IntegerRange { .. }));
}

#[test]
fn float_token_at_two_pow_64_as_unsigned_fails() {
    // 1.8446744073709552e19 == 2^64, one past u64::MAX.
    let err = read(r#"[1.8446744073709552e19]"#, |de| {
        let ar = de.root().array()?;
        ar.value::<u64>(0)
    })
    .unwrap_err();
    assert!(matches!(err, GroveError::IntegerRange { .. }));
}

#[test]
fn double_past_f32_range_fails() {
    // 1e300 is finite as f64 but casts to infinity as f32.
    let err = read(r#"[1e300]"#, |de| {
        let ar = de.root().array()?;
        ar.value::<f32>(0)
    })
    .unwrap_err();
    assert!(matches!(err, GroveError::PrecisionLoss { target: "f32", .. }));
}

#[test]
fn double_within_f32_range_narrows() {
    let v: f32 = read(r#"[2.5]"#, |de| {
        let ar = de.root().array()?;
        ar.value(0)
    })
    .unwrap();
    assert_eq!(v, 2.5);
}

#[test]
fn integer_token_reads_as_float() {
    let v: f64 = read(r#"[7]"#, |de| {
        let ar = de.root().array()?;
        ar.value(0)
    })
    .unwrap();
    assert_eq!(v, 7.0);
}

// ============================================================================
// Key iteration
// ============================================================================

#[test]
fn next_key_yields_each_member_once_in_document_order() {
    read(r#"{"a":1,"b":2}"#, |de| {
        let obj = de.root().object()?;

        let first = obj.next_key()?.expect("first member");
        assert_eq!(first.name, "a");
        assert_eq!(first.node.value::<i32>()?, 1);

        let second = obj.next_key()?.expect("second member");
        assert_eq!(second.name, "b");
        assert_eq!(second.node.value::<i32>()?, 2);

        assert!(obj.next_key()?.is_none());
        // The sequence stays exhausted; it is not restartable.
        assert!(obj.next_key()?.is_none());
        Ok(())
    })
    .unwrap();
}

#[test]
fn next_key_on_empty_object_is_immediately_exhausted() {
    read(r#"{}"#, |de| {
        let obj = de.root().object()?;
        assert!(obj.next_key()?.is_none());
        Ok(())
    })
    .unwrap();
}
