//! Keys: one typed hop in a reference's path

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed vocabulary of key types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    AnnotatedRelationshipElement,
    AssetAdministrationShell,
    BasicEventElement,
    Blob,
    Capability,
    ConceptDescription,
    DataElement,
    Entity,
    EventElement,
    File,
    FragmentReference,
    GlobalReference,
    Identifiable,
    MultiLanguageProperty,
    Operation,
    Property,
    Range,
    Referable,
    ReferenceElement,
    RelationshipElement,
    Submodel,
    SubmodelElement,
    SubmodelElementCollection,
    SubmodelElementList,
}

impl KeyType {
    pub const ALL: [KeyType; 24] = [
        KeyType::AnnotatedRelationshipElement,
        KeyType::AssetAdministrationShell,
        KeyType::BasicEventElement,
        KeyType::Blob,
        KeyType::Capability,
        KeyType::ConceptDescription,
        KeyType::DataElement,
        KeyType::Entity,
        KeyType::EventElement,
        KeyType::File,
        KeyType::FragmentReference,
        KeyType::GlobalReference,
        KeyType::Identifiable,
        KeyType::MultiLanguageProperty,
        KeyType::Operation,
        KeyType::Property,
        KeyType::Range,
        KeyType::Referable,
        KeyType::ReferenceElement,
        KeyType::RelationshipElement,
        KeyType::Submodel,
        KeyType::SubmodelElement,
        KeyType::SubmodelElementCollection,
        KeyType::SubmodelElementList,
    ];

    /// Name as it appears in documents
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
            KeyType::AssetAdministrationShell => "AssetAdministrationShell",
            KeyType::BasicEventElement => "BasicEventElement",
            KeyType::Blob => "Blob",
            KeyType::Capability => "Capability",
            KeyType::ConceptDescription => "ConceptDescription",
            KeyType::DataElement => "DataElement",
            KeyType::Entity => "Entity",
            KeyType::EventElement => "EventElement",
            KeyType::File => "File",
            KeyType::FragmentReference => "FragmentReference",
            KeyType::GlobalReference => "GlobalReference",
            KeyType::Identifiable => "Identifiable",
            KeyType::MultiLanguageProperty => "MultiLanguageProperty",
            KeyType::Operation => "Operation",
            KeyType::Property => "Property",
            KeyType::Range => "Range",
            KeyType::Referable => "Referable",
            KeyType::ReferenceElement => "ReferenceElement",
            KeyType::RelationshipElement => "RelationshipElement",
            KeyType::Submodel => "Submodel",
            KeyType::SubmodelElement => "SubmodelElement",
            KeyType::SubmodelElementCollection => "SubmodelElementCollection",
            KeyType::SubmodelElementList => "SubmodelElementList",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyType::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown key type '{}'", s))
    }
}

/// A (type, value) pair in a reference chain.
///
/// `value` is an opaque identifier, or a decimal list index when the key
/// follows a `SubmodelElementList` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    #[serde(rename = "type")]
    pub key_type: KeyType,
    pub value: String,
}

impl Key {
    pub fn new(key_type: KeyType, value: impl Into<String>) -> Self {
        Self {
            key_type,
            value: value.into(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}){}", self.key_type, self.value)
    }
}

/// Parses the `Type=value` form used on the command line
impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key_type, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <Type>=<value>, got '{}'", s))?;
        Ok(Key::new(key_type.trim().parse()?, value))
    }
}
