//! References and the key-chain validator
//!
//! A [`Reference`] is a typed chain of [`Key`]s. Every constructed
//! `Reference` satisfies the chain grammar: construction, including serde
//! deserialization, goes through [`validate_reference`].
//!
//! Rules are checked in a fixed order and the first violation is reported:
//!
//! 1. the chain is non-empty
//! 2. the first key matches the reference kind
//! 3. (ModelReference) every later key is a fragment key, the last
//!    `FragmentReference` closes the chain right after a `File` or `Blob`, and a
//!    `SubmodelElementList` key is followed by an integer index
//! 4. (ExternalReference) a multi-key chain ends in `GlobalReference` or
//!    `FragmentReference`

pub mod grammar;
pub mod key;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StructuralError;

pub use key::{Key, KeyType};

/// Whether a reference points into the model or to an external concept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceType {
    ExternalReference,
    ModelReference,
}

impl ReferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceType::ExternalReference => "ExternalReference",
            ReferenceType::ModelReference => "ModelReference",
        }
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReferenceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ExternalReference" | "external" => Ok(ReferenceType::ExternalReference),
            "ModelReference" | "model" => Ok(ReferenceType::ModelReference),
            other => Err(format!("unknown reference type '{}'", other)),
        }
    }
}

/// Validate a key chain for the given reference kind.
///
/// Pure and O(n) in the chain length; reports the first violated rule.
pub fn validate_reference(kind: ReferenceType, keys: &[Key]) -> Result<(), StructuralError> {
    let result = check_chain(kind, keys);
    if let Err(e) = &result {
        tracing::trace!(%kind, keys = keys.len(), rule = e.rule(), "reference rejected");
    }
    result
}

fn check_chain(kind: ReferenceType, keys: &[Key]) -> Result<(), StructuralError> {
    let first = keys.first().ok_or(StructuralError::EmptyChain)?;

    let allowed = grammar::allowed_first_keys(kind);
    if !allowed.contains(&first.key_type) {
        return Err(StructuralError::FirstKeyKindMismatch {
            kind,
            found: first.key_type,
            expected: allowed
                .iter()
                .map(KeyType::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    if keys.len() == 1 {
        return Ok(());
    }

    match kind {
        ReferenceType::ModelReference => check_model_tail(keys),
        ReferenceType::ExternalReference => {
            let last = keys[keys.len() - 1].key_type;
            if grammar::is_external_terminal(last) {
                Ok(())
            } else {
                Err(StructuralError::ExternalReferenceBadTerminal { found: last })
            }
        }
    }
}

fn check_model_tail(keys: &[Key]) -> Result<(), StructuralError> {
    let last_index = keys.len() - 1;

    for (index, key) in keys.iter().enumerate().skip(1) {
        if !grammar::is_fragment_key(key.key_type) {
            return Err(StructuralError::NonFragmentKeyInTail {
                index,
                found: key.key_type,
            });
        }
    }

    // only the last FragmentReference is positioned; earlier ones pass as
    // plain fragment keys
    let last_fragment = keys
        .iter()
        .rposition(|k| k.key_type == KeyType::FragmentReference);
    if let Some(index) = last_fragment {
        if index != last_index {
            return Err(StructuralError::FragmentReferenceNotLast { index });
        }
        let holder = keys[last_index - 1].key_type;
        if !grammar::is_fragment_holder(holder) {
            return Err(StructuralError::FragmentReferenceRequiresFileOrBlob { found: holder });
        }
    }

    for (index, pair) in keys.windows(2).enumerate() {
        if pair[0].key_type == KeyType::SubmodelElementList && !grammar::is_list_index(&pair[1].value) {
            return Err(StructuralError::ListIndexNotInteger {
                index: index + 1,
                value: pair[1].value.clone(),
            });
        }
    }

    Ok(())
}

/// A validated chain of keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ReferenceDef")]
pub struct Reference {
    #[serde(rename = "type")]
    kind: ReferenceType,
    keys: Vec<Key>,
}

/// Unchecked wire shape of a reference
#[derive(Deserialize)]
struct ReferenceDef {
    #[serde(rename = "type")]
    kind: ReferenceType,
    #[serde(default)]
    keys: Vec<Key>,
}

impl TryFrom<ReferenceDef> for Reference {
    type Error = StructuralError;

    fn try_from(def: ReferenceDef) -> Result<Self, Self::Error> {
        Reference::new(def.kind, def.keys)
    }
}

impl Reference {
    /// Build a reference, rejecting chains that break the grammar
    pub fn new(kind: ReferenceType, keys: Vec<Key>) -> Result<Self, StructuralError> {
        validate_reference(kind, &keys)?;
        Ok(Self { kind, keys })
    }

    /// ModelReference from a key chain
    pub fn model(keys: Vec<Key>) -> Result<Self, StructuralError> {
        Self::new(ReferenceType::ModelReference, keys)
    }

    /// Single-key ExternalReference to a global identifier
    pub fn global(value: impl Into<String>) -> Self {
        Self {
            kind: ReferenceType::ExternalReference,
            keys: vec![Key::new(KeyType::GlobalReference, value)],
        }
    }

    pub fn kind(&self) -> ReferenceType {
        self.kind
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// The root key; always present
    pub fn first_key(&self) -> &Key {
        &self.keys[0]
    }

    pub fn last_key(&self) -> &Key {
        &self.keys[self.keys.len() - 1]
    }

    pub fn is_model_reference(&self) -> bool {
        self.kind == ReferenceType::ModelReference
    }

    /// True for a ModelReference rooted at the given identifiable type
    pub fn is_model_reference_to(&self, key_type: KeyType) -> bool {
        self.is_model_reference() && self.first_key().key_type == key_type
    }

    pub fn into_keys(self) -> Vec<Key> {
        self.keys
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[", self.kind)?;
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", key)?;
        }
        f.write_str("]")
    }
}
