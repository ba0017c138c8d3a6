//! Key-chain grammar tables
//!
//! Which key types may open a chain for each reference kind, which may
//! appear after the first key, and which may terminate an external chain.

use super::key::KeyType;
use super::ReferenceType;

/// Identifiables a model reference may start from
pub const MODEL_FIRST_KEYS: &[KeyType] = &[
    KeyType::AssetAdministrationShell,
    KeyType::Submodel,
    KeyType::ConceptDescription,
];

/// Globally identifiable key types an external reference may start from
pub const EXTERNAL_FIRST_KEYS: &[KeyType] = &[KeyType::GlobalReference];

/// Key types allowed in non-first position of a model reference
pub const FRAGMENT_KEYS: &[KeyType] = &[
    KeyType::SubmodelElement,
    KeyType::Property,
    KeyType::MultiLanguageProperty,
    KeyType::Range,
    KeyType::ReferenceElement,
    KeyType::RelationshipElement,
    KeyType::AnnotatedRelationshipElement,
    KeyType::SubmodelElementCollection,
    KeyType::SubmodelElementList,
    KeyType::File,
    KeyType::Blob,
    KeyType::Entity,
    KeyType::BasicEventElement,
    KeyType::Operation,
    KeyType::FragmentReference,
];

/// Key types a `FragmentReference` may directly follow
pub const FRAGMENT_HOLDERS: &[KeyType] = &[KeyType::File, KeyType::Blob];

/// Valid last keys of a multi-key external reference
pub const EXTERNAL_TERMINALS: &[KeyType] =
    &[KeyType::GlobalReference, KeyType::FragmentReference];

/// First-key table for a reference kind
pub fn allowed_first_keys(kind: ReferenceType) -> &'static [KeyType] {
    match kind {
        ReferenceType::ModelReference => MODEL_FIRST_KEYS,
        ReferenceType::ExternalReference => EXTERNAL_FIRST_KEYS,
    }
}

pub fn is_fragment_key(key_type: KeyType) -> bool {
    FRAGMENT_KEYS.contains(&key_type)
}

pub fn is_fragment_holder(key_type: KeyType) -> bool {
    FRAGMENT_HOLDERS.contains(&key_type)
}

pub fn is_external_terminal(key_type: KeyType) -> bool {
    EXTERNAL_TERMINALS.contains(&key_type)
}

/// List indices are plain base-10 digits, no sign
pub fn is_list_index(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}
