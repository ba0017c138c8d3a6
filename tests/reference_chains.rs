//! Reference key-chain tests
//!
//! Exercises the chain grammar through the public API: direct validation,
//! construction, and JSON deserialization.

use aas_validation::reference::grammar::{FRAGMENT_KEYS, MODEL_FIRST_KEYS};
use aas_validation::{validate_reference, Key, KeyType, Reference, ReferenceType};

fn k(key_type: KeyType, value: &str) -> Key {
    Key::new(key_type, value)
}

fn rule(kind: ReferenceType, keys: &[Key]) -> Option<&'static str> {
    validate_reference(kind, keys).err().map(|e| e.rule())
}

// =============================================================================
// Single-key chains
// =============================================================================

#[test]
fn test_single_key_model_reference() {
    for key_type in KeyType::ALL {
        let result = validate_reference(ReferenceType::ModelReference, &[k(key_type, "x")]);
        assert_eq!(
            result.is_ok(),
            MODEL_FIRST_KEYS.contains(&key_type),
            "single-key ModelReference starting with {}",
            key_type
        );
    }
}

#[test]
fn test_single_key_external_reference() {
    for key_type in KeyType::ALL {
        let result = validate_reference(ReferenceType::ExternalReference, &[k(key_type, "x")]);
        assert_eq!(result.is_ok(), key_type == KeyType::GlobalReference, "{}", key_type);
    }
}

#[test]
fn test_empty_chain() {
    assert_eq!(rule(ReferenceType::ModelReference, &[]), Some("empty-chain"));
    assert_eq!(rule(ReferenceType::ExternalReference, &[]), Some("empty-chain"));
}

// =============================================================================
// Model reference tails
// =============================================================================

#[test]
fn test_list_index_scenario() {
    let keys = [
        k(KeyType::Submodel, "S1"),
        k(KeyType::SubmodelElementList, "Items"),
        k(KeyType::Property, "2"),
    ];
    assert!(validate_reference(ReferenceType::ModelReference, &keys).is_ok());
}

#[test]
fn test_list_index_must_be_digits() {
    for bad in ["", "-1", "+1", "1.0", "x", " 1"] {
        let keys = [
            k(KeyType::Submodel, "S1"),
            k(KeyType::SubmodelElementList, "Items"),
            k(KeyType::Property, bad),
        ];
        assert_eq!(
            rule(ReferenceType::ModelReference, &keys),
            Some("list-index-not-integer"),
            "index '{}'",
            bad
        );
    }
    for good in ["0", "42", "007"] {
        let keys = [
            k(KeyType::Submodel, "S1"),
            k(KeyType::SubmodelElementList, "Items"),
            k(KeyType::SubmodelElementCollection, good),
        ];
        assert!(validate_reference(ReferenceType::ModelReference, &keys).is_ok());
    }
}

#[test]
fn test_nested_lists() {
    let keys = [
        k(KeyType::Submodel, "S1"),
        k(KeyType::SubmodelElementList, "Outer"),
        k(KeyType::SubmodelElementList, "0"),
        k(KeyType::Property, "3"),
    ];
    assert!(validate_reference(ReferenceType::ModelReference, &keys).is_ok());
}

#[test]
fn test_tail_keys_must_be_fragments() {
    let keys = [k(KeyType::Submodel, "S1"), k(KeyType::Submodel, "S2")];
    let err = validate_reference(ReferenceType::ModelReference, &keys).unwrap_err();
    assert_eq!(err.rule(), "non-fragment-key-in-tail");
    assert!(err.to_string().contains("key 1"));

    for key_type in FRAGMENT_KEYS.iter().filter(|t| **t != KeyType::FragmentReference) {
        let keys = [k(KeyType::Submodel, "S1"), k(*key_type, "x")];
        assert!(
            validate_reference(ReferenceType::ModelReference, &keys).is_ok(),
            "{} in tail",
            key_type
        );
    }
}

#[test]
fn test_fragment_reference_placement() {
    let on_file = [
        k(KeyType::Submodel, "S1"),
        k(KeyType::File, "Manual"),
        k(KeyType::FragmentReference, "page=3"),
    ];
    assert!(validate_reference(ReferenceType::ModelReference, &on_file).is_ok());

    let on_blob = [
        k(KeyType::Submodel, "S1"),
        k(KeyType::Blob, "Image"),
        k(KeyType::FragmentReference, "offset=10"),
    ];
    assert!(validate_reference(ReferenceType::ModelReference, &on_blob).is_ok());

    let moved = [
        k(KeyType::Submodel, "S1"),
        k(KeyType::File, "Manual"),
        k(KeyType::FragmentReference, "page=3"),
        k(KeyType::Property, "p"),
    ];
    assert_eq!(
        rule(ReferenceType::ModelReference, &moved),
        Some("fragment-reference-not-last")
    );

    let on_property = [
        k(KeyType::Submodel, "S1"),
        k(KeyType::Property, "p"),
        k(KeyType::FragmentReference, "x"),
    ];
    assert_eq!(
        rule(ReferenceType::ModelReference, &on_property),
        Some("fragment-reference-requires-file-or-blob")
    );
}

#[test]
fn test_only_last_fragment_reference_is_positioned() {
    let keys = [
        k(KeyType::Submodel, "S1"),
        k(KeyType::File, "Manual"),
        k(KeyType::FragmentReference, "a"),
        k(KeyType::Blob, "Image"),
        k(KeyType::FragmentReference, "b"),
    ];
    assert!(validate_reference(ReferenceType::ModelReference, &keys).is_ok());

    // the last occurrence decides the position, and it is reported
    let keys = [
        k(KeyType::Submodel, "S1"),
        k(KeyType::FragmentReference, "a"),
        k(KeyType::File, "Manual"),
        k(KeyType::FragmentReference, "b"),
        k(KeyType::Property, "p"),
    ];
    let err = validate_reference(ReferenceType::ModelReference, &keys).unwrap_err();
    assert_eq!(err.rule(), "fragment-reference-not-last");
    assert!(err.to_string().contains("key 3"));
}

#[test]
fn test_first_violation_wins() {
    // bad tail key and bad list index: the tail rule runs first
    let keys = [
        k(KeyType::Submodel, "S1"),
        k(KeyType::SubmodelElementList, "L"),
        k(KeyType::GlobalReference, "x"),
    ];
    assert_eq!(
        rule(ReferenceType::ModelReference, &keys),
        Some("non-fragment-key-in-tail")
    );
}

// =============================================================================
// External references
// =============================================================================

#[test]
fn test_external_terminals() {
    let to_fragment = [
        k(KeyType::GlobalReference, "https://example.com/doc"),
        k(KeyType::FragmentReference, "section-2"),
    ];
    assert!(validate_reference(ReferenceType::ExternalReference, &to_fragment).is_ok());

    let to_property = [
        k(KeyType::GlobalReference, "https://example.com/doc"),
        k(KeyType::Property, "p"),
    ];
    assert_eq!(
        rule(ReferenceType::ExternalReference, &to_property),
        Some("external-reference-bad-terminal")
    );
}

#[test]
fn test_idempotent() {
    let keys = [k(KeyType::Submodel, "S1"), k(KeyType::Submodel, "S2")];
    let first = validate_reference(ReferenceType::ModelReference, &keys);
    let second = validate_reference(ReferenceType::ModelReference, &keys);
    assert_eq!(first, second);
}

// =============================================================================
// Construction and JSON
// =============================================================================

#[test]
fn test_reference_from_json() {
    let json = r#"{
        "type": "ModelReference",
        "keys": [
            {"type": "Submodel", "value": "S1"},
            {"type": "SubmodelElementList", "value": "Items"},
            {"type": "Property", "value": "2"}
        ]
    }"#;
    let reference: Reference = serde_json::from_str(json).unwrap();
    assert!(reference.is_model_reference_to(KeyType::Submodel));
    assert_eq!(reference.last_key().value, "2");
    assert_eq!(
        reference.to_string(),
        "ModelReference[(Submodel)S1, (SubmodelElementList)Items, (Property)2]"
    );

    let back = serde_json::to_value(&reference).unwrap();
    assert_eq!(back["type"], "ModelReference");
    assert_eq!(back["keys"][1]["type"], "SubmodelElementList");
}

#[test]
fn test_invalid_reference_json_rejected() {
    let json = r#"{"type": "ExternalReference", "keys": [{"type": "Submodel", "value": "S1"}]}"#;
    let err = serde_json::from_str::<Reference>(json).unwrap_err();
    assert!(err.to_string().contains("first-key-kind-mismatch"));

    let json = r#"{"type": "ModelReference", "keys": [{"type": "Widget", "value": "S1"}]}"#;
    assert!(serde_json::from_str::<Reference>(json).is_err());
}

#[test]
fn test_keys_from_command_line_form() {
    let keys: Vec<Key> = ["Submodel=urn:sm:1", "Property=Speed"]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect();
    let reference = Reference::new(ReferenceType::ModelReference, keys).unwrap();
    assert_eq!(reference.first_key().value, "urn:sm:1");
    assert!("Property".parse::<Key>().is_err());
}
