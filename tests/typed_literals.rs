//! Typed literal tests
//!
//! Boundary values for every datatype family plus the opt-in coercion path.

use aas_validation::{
    coerce_typed_literal, validate_tagged_literal, validate_typed_literal, CoerceOptions,
    DataTypeDefXsd, TypedValue,
};

fn rule(datatype: DataTypeDefXsd, raw: &str) -> Option<&'static str> {
    validate_typed_literal(datatype, raw).err().map(|e| e.rule())
}

fn assert_valid(datatype: DataTypeDefXsd, raws: &[&str]) {
    for raw in raws {
        assert!(
            validate_typed_literal(datatype, raw).is_ok(),
            "'{}' should be a valid {}",
            raw,
            datatype
        );
    }
}

fn assert_rule(datatype: DataTypeDefXsd, raws: &[&str], expected: &str) {
    for raw in raws {
        assert_eq!(
            rule(datatype, raw),
            Some(expected),
            "'{}' as {}",
            raw,
            datatype
        );
    }
}

// =============================================================================
// Integers
// =============================================================================

#[test]
fn test_unsigned_short_scenario() {
    let err = validate_typed_literal(DataTypeDefXsd::UnsignedShort, "65536").unwrap_err();
    assert_eq!(err.rule(), "range-error");
    assert!(err.to_string().contains("65535"));
    assert_valid(DataTypeDefXsd::UnsignedShort, &["65535", "0"]);
}

#[test]
fn test_inclusive_bounds() {
    assert_valid(DataTypeDefXsd::Byte, &["127", "-128", "0"]);
    assert_rule(DataTypeDefXsd::Byte, &["128", "-129"], "range-error");

    assert_valid(DataTypeDefXsd::Short, &["32767", "-32768"]);
    assert_rule(DataTypeDefXsd::Short, &["32768", "-32769"], "range-error");

    assert_valid(DataTypeDefXsd::Int, &["2147483647", "-2147483648"]);
    assert_rule(DataTypeDefXsd::Int, &["2147483648"], "range-error");

    assert_valid(DataTypeDefXsd::Long, &["9223372036854775807", "-9223372036854775808"]);
    assert_rule(DataTypeDefXsd::Long, &["9223372036854775808"], "range-error");

    assert_valid(DataTypeDefXsd::UnsignedByte, &["255"]);
    assert_rule(DataTypeDefXsd::UnsignedByte, &["256", "-1"], "range-error");

    assert_valid(DataTypeDefXsd::UnsignedInt, &["4294967295"]);
    assert_rule(DataTypeDefXsd::UnsignedInt, &["4294967296"], "range-error");

    assert_valid(DataTypeDefXsd::UnsignedLong, &["18446744073709551615"]);
    assert_rule(DataTypeDefXsd::UnsignedLong, &["18446744073709551616"], "range-error");
}

#[test]
fn test_sign_constrained_integers() {
    assert_valid(DataTypeDefXsd::NonPositiveInteger, &["0", "-5", "-0"]);
    assert_rule(DataTypeDefXsd::NonPositiveInteger, &["1"], "range-error");

    assert_valid(DataTypeDefXsd::NegativeInteger, &["-1"]);
    assert_rule(DataTypeDefXsd::NegativeInteger, &["0", "-0"], "range-error");

    assert_valid(DataTypeDefXsd::NonNegativeInteger, &["0", "+3"]);
    assert_rule(DataTypeDefXsd::NonNegativeInteger, &["-1"], "range-error");

    assert_valid(
        DataTypeDefXsd::PositiveInteger,
        &["1", "123456789012345678901234567890123456789012345"],
    );
    assert_rule(DataTypeDefXsd::PositiveInteger, &["0"], "range-error");
}

#[test]
fn test_non_integer_lexemes() {
    assert_rule(DataTypeDefXsd::Int, &["1.5", "abc", "", "1e3"], "type-mismatch");
    assert_rule(DataTypeDefXsd::PositiveInteger, &["one"], "type-mismatch");
}

// =============================================================================
// Other scalar types
// =============================================================================

#[test]
fn test_booleans() {
    assert_valid(DataTypeDefXsd::Boolean, &["true", "false", "1", "0", ""]);
    assert_rule(DataTypeDefXsd::Boolean, &["True", "yes", "2"], "type-mismatch");
}

#[test]
fn test_floating_point() {
    assert_valid(DataTypeDefXsd::Double, &["1.5", "-0.0", "1e10", "3"]);
    assert_valid(DataTypeDefXsd::Float, &["2.5E-3"]);
    assert_rule(DataTypeDefXsd::Double, &["1,5", "abc"], "type-mismatch");
    assert_valid(DataTypeDefXsd::Decimal, &["123.456", "-0.001", "100000000000000000000000.5"]);
    assert_rule(DataTypeDefXsd::Decimal, &["12.3.4"], "type-mismatch");
}

#[test]
fn test_strings() {
    assert_valid(DataTypeDefXsd::String, &["anything\n\tgoes", ""]);
    assert_valid(DataTypeDefXsd::NormalizedString, &["single line"]);
    assert_rule(DataTypeDefXsd::NormalizedString, &["a\nb", "a\rb", "a\tb"], "format-error");
}

#[test]
fn test_hex_binary() {
    assert_valid(DataTypeDefXsd::HexBinary, &["", "af01", "AF01"]);
    assert_rule(DataTypeDefXsd::HexBinary, &["A", "zz", "abc"], "format-error");
}

#[test]
fn test_base64_binary() {
    assert_valid(DataTypeDefXsd::Base64Binary, &["aGVsbG8=", "aGVsbG8gd29ybGQ="]);
    assert_rule(DataTypeDefXsd::Base64Binary, &["aGVsbG8", "not base64!"], "format-error");
}

#[test]
fn test_any_uri() {
    assert_valid(
        DataTypeDefXsd::AnyUri,
        &["https://example.com/a?b=c", "urn:isbn:123", "relative/path"],
    );
    assert_rule(DataTypeDefXsd::AnyUri, &["?only=query"], "format-error");
}

// =============================================================================
// Temporal types
// =============================================================================

#[test]
fn test_dates() {
    assert_valid(DataTypeDefXsd::Date, &["2024-02-29", "0001-01-01"]);
    assert_rule(
        DataTypeDefXsd::Date,
        &["2023-02-29", "2024-13-01", "24-01-01", "2024-1-1"],
        "format-error",
    );
}

#[test]
fn test_times() {
    assert_valid(
        DataTypeDefXsd::Time,
        &["10:00", "23:59:59", "08:15:30.25", "10:00Z", "10:00:00+14:00", "10:00-03:30"],
    );
    assert_rule(DataTypeDefXsd::Time, &["24:00", "10:60", "10:00:60", "10:00+15:00", "10:00+14:60"], "range-error");
    assert_rule(DataTypeDefXsd::Time, &["10", "10:00 Z", "ten"], "format-error");
}

#[test]
fn test_date_times() {
    assert_valid(
        DataTypeDefXsd::DateTime,
        &["2024-01-01T10:00:00Z", "2024-01-01T10:00", "2024-02-29T23:59:59.999+01:00"],
    );
    assert_rule(DataTypeDefXsd::DateTime, &["2023-02-29T10:00:00Z", "2024-01-01 10:00"], "format-error");
    assert_rule(
        DataTypeDefXsd::DateTime,
        &["2024-01-01T25:00:00", "2024-01-01T10:00:60Z", "2024-01-01T10:00:00-03:60"],
        "range-error",
    );
}

// =============================================================================
// Tags and configuration errors
// =============================================================================

#[test]
fn test_tagged_literals() {
    assert_eq!(validate_tagged_literal("xs:int", "5").unwrap(), DataTypeDefXsd::Int);
    assert_eq!(validate_tagged_literal("anyURI", "urn:x").unwrap(), DataTypeDefXsd::AnyUri);

    let err = validate_tagged_literal("gYear", "2024").unwrap_err();
    assert_eq!(err.rule(), "unsupported-type");

    let err = validate_tagged_literal("xs:byte", "300").unwrap_err();
    assert_eq!(err.rule(), "range-error");
}

#[test]
fn test_every_datatype_has_a_rule() {
    for datatype in DataTypeDefXsd::ALL {
        let tag = datatype.as_str();
        let parsed: DataTypeDefXsd = tag.parse().unwrap();
        assert_eq!(parsed, datatype);

        let sample = match datatype {
            DataTypeDefXsd::String | DataTypeDefXsd::NormalizedString => "text",
            DataTypeDefXsd::Boolean => "true",
            DataTypeDefXsd::Decimal | DataTypeDefXsd::Float | DataTypeDefXsd::Double => "1.5",
            DataTypeDefXsd::NonPositiveInteger | DataTypeDefXsd::NegativeInteger => "-1",
            DataTypeDefXsd::Date => "2024-01-01",
            DataTypeDefXsd::DateTime => "2024-01-01T10:00:00Z",
            DataTypeDefXsd::Time => "10:00:00",
            DataTypeDefXsd::AnyUri => "https://example.com/x",
            DataTypeDefXsd::Base64Binary => "AQID",
            DataTypeDefXsd::HexBinary => "0aFF",
            _ => "1",
        };
        assert_valid(datatype, &[sample]);
    }
}

// =============================================================================
// Coercion
// =============================================================================

#[test]
fn test_coercion_requires_opt_in() {
    let plain = coerce_typed_literal(DataTypeDefXsd::Boolean, "true", CoerceOptions::default());
    assert_eq!(plain, TypedValue::Text("true".into()));
    let typed = coerce_typed_literal(DataTypeDefXsd::Boolean, "true", CoerceOptions::typed());
    assert_eq!(typed, TypedValue::Boolean(true));
}

#[test]
fn test_zulu_equals_explicit_offset() {
    let zulu = coerce_typed_literal(DataTypeDefXsd::DateTime, "2024-01-01T10:00:00Z", CoerceOptions::typed());
    let explicit = coerce_typed_literal(
        DataTypeDefXsd::DateTime,
        "2024-01-01T10:00:00+00:00",
        CoerceOptions::typed(),
    );
    assert_eq!(zulu, explicit);
    assert!(!zulu.is_text());
}

#[test]
fn test_validated_literals_coerce() {
    let cases = [
        (DataTypeDefXsd::Byte, "-128"),
        (DataTypeDefXsd::UnsignedLong, "18446744073709551615"),
        (DataTypeDefXsd::Decimal, "3.25"),
        (DataTypeDefXsd::Date, "2024-02-29"),
        (DataTypeDefXsd::Time, "23:59:59.5Z"),
    ];
    for (datatype, raw) in cases {
        validate_typed_literal(datatype, raw).unwrap();
        let value = coerce_typed_literal(datatype, raw, CoerceOptions::typed());
        assert!(!value.is_text(), "{} '{}' stayed text", datatype, raw);
    }
}
