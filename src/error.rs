//! Error types for reference, literal, and entity validation
//!
//! Every error carries a stable kebab-case rule identifier (see `rule()`),
//! and its message starts with that identifier.

use thiserror::Error;

use crate::literal::DataTypeDefXsd;
use crate::model::ElementKind;
use crate::reference::{KeyType, ReferenceType};

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, AasError>;

/// A reference's key chain violates a chain-shape rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("empty-chain: a reference must contain at least one key")]
    EmptyChain,

    #[error("first-key-kind-mismatch: the first key of a {kind} must be one of {expected}, found {found}")]
    FirstKeyKindMismatch {
        kind: ReferenceType,
        found: KeyType,
        expected: String,
    },

    #[error("non-fragment-key-in-tail: key {index} of a ModelReference must be a fragment key, found {found}")]
    NonFragmentKeyInTail { index: usize, found: KeyType },

    #[error("fragment-reference-not-last: FragmentReference at key {index} must be the last key")]
    FragmentReferenceNotLast { index: usize },

    #[error("fragment-reference-requires-file-or-blob: FragmentReference must follow a File or Blob key, found {found}")]
    FragmentReferenceRequiresFileOrBlob { found: KeyType },

    #[error("list-index-not-integer: key {index} follows a SubmodelElementList and must be a non-negative integer, found '{value}'")]
    ListIndexNotInteger { index: usize, value: String },

    #[error("external-reference-bad-terminal: the last key of an ExternalReference must be GlobalReference or FragmentReference, found {found}")]
    ExternalReferenceBadTerminal { found: KeyType },
}

impl StructuralError {
    pub fn rule(&self) -> &'static str {
        match self {
            StructuralError::EmptyChain => "empty-chain",
            StructuralError::FirstKeyKindMismatch { .. } => "first-key-kind-mismatch",
            StructuralError::NonFragmentKeyInTail { .. } => "non-fragment-key-in-tail",
            StructuralError::FragmentReferenceNotLast { .. } => "fragment-reference-not-last",
            StructuralError::FragmentReferenceRequiresFileOrBlob { .. } => {
                "fragment-reference-requires-file-or-blob"
            }
            StructuralError::ListIndexNotInteger { .. } => "list-index-not-integer",
            StructuralError::ExternalReferenceBadTerminal { .. } => "external-reference-bad-terminal",
        }
    }
}

/// A literal does not conform to its declared datatype
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Grammar mismatch (date/time/hex/base64/URI and friends)
    #[error("format-error: {datatype} literal '{value}' {reason}")]
    Format {
        datatype: DataTypeDefXsd,
        value: String,
        reason: String,
    },

    /// Numeric value outside the declared bounds
    #[error("range-error: {datatype} literal '{value}' must be {constraint}")]
    Range {
        datatype: DataTypeDefXsd,
        value: String,
        constraint: String,
    },

    /// Not parseable as the base numeric/boolean kind at all
    #[error("type-mismatch: '{value}' is not a valid {datatype}")]
    TypeMismatch { datatype: DataTypeDefXsd, value: String },
}

impl ValueError {
    pub fn rule(&self) -> &'static str {
        match self {
            ValueError::Format { .. } => "format-error",
            ValueError::Range { .. } => "range-error",
            ValueError::TypeMismatch { .. } => "type-mismatch",
        }
    }

    pub fn datatype(&self) -> DataTypeDefXsd {
        match self {
            ValueError::Format { datatype, .. }
            | ValueError::Range { datatype, .. }
            | ValueError::TypeMismatch { datatype, .. } => *datatype,
        }
    }
}

/// The vocabulary and the validator disagree; a programming error, not a
/// document defect
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("unsupported-type: no validation rule for datatype '{0}'")]
    UnsupportedType(String),
}

impl ConfigurationError {
    pub fn rule(&self) -> &'static str {
        match self {
            ConfigurationError::UnsupportedType(_) => "unsupported-type",
        }
    }
}

/// Entity-level presence and shape rules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    #[error("supplemental-semantic-id-requires-semantic-id: supplementalSemanticId is set but semanticId is missing")]
    SupplementalSemanticIdWithoutSemanticId,

    #[error("version-too-long: version '{0}' exceeds 4 characters")]
    VersionTooLong(String),

    #[error("revision-too-long: revision '{0}' exceeds 4 characters")]
    RevisionTooLong(String),

    #[error("revision-requires-version: revision is set but version is missing")]
    RevisionWithoutVersion,

    #[error("property-requires-value-or-value-id: Property {id_short:?} has neither a value nor a valueId")]
    MissingValueOrValueId { id_short: Option<String> },

    #[error("range-requires-min-or-max: Range {id_short:?} has neither min nor max")]
    RangeWithoutBounds { id_short: Option<String> },

    #[error("relationship-requires-model-reference: '{field}' of a RelationshipElement must be a ModelReference")]
    RelationshipRequiresModelReference { field: &'static str },

    #[error("derived-from-must-reference-shell: derivedFrom must be a ModelReference to an AssetAdministrationShell")]
    DerivedFromMustReferenceShell,

    #[error("submodel-reference-must-target-submodel: submodels[{index}] must be a ModelReference to a Submodel")]
    SubmodelReferenceMustTargetSubmodel { index: usize },

    #[error("list-element-kind-mismatch: SubmodelElementList expects {expected} elements, item {index} is {found}")]
    ListElementKindMismatch {
        expected: ElementKind,
        found: ElementKind,
        index: usize,
    },

    #[error("list-value-type-mismatch: SubmodelElementList expects valueType {expected}, item {index} declares {found}")]
    ListValueTypeMismatch {
        expected: DataTypeDefXsd,
        found: DataTypeDefXsd,
        index: usize,
    },
}

impl ConstraintError {
    pub fn rule(&self) -> &'static str {
        match self {
            ConstraintError::SupplementalSemanticIdWithoutSemanticId => {
                "supplemental-semantic-id-requires-semantic-id"
            }
            ConstraintError::VersionTooLong(_) => "version-too-long",
            ConstraintError::RevisionTooLong(_) => "revision-too-long",
            ConstraintError::RevisionWithoutVersion => "revision-requires-version",
            ConstraintError::MissingValueOrValueId { .. } => "property-requires-value-or-value-id",
            ConstraintError::RangeWithoutBounds { .. } => "range-requires-min-or-max",
            ConstraintError::RelationshipRequiresModelReference { .. } => {
                "relationship-requires-model-reference"
            }
            ConstraintError::DerivedFromMustReferenceShell => "derived-from-must-reference-shell",
            ConstraintError::SubmodelReferenceMustTargetSubmodel { .. } => {
                "submodel-reference-must-target-submodel"
            }
            ConstraintError::ListElementKindMismatch { .. } => "list-element-kind-mismatch",
            ConstraintError::ListValueTypeMismatch { .. } => "list-value-type-mismatch",
        }
    }
}

/// Top-level error for entity construction and document handling
#[derive(Error, Debug)]
pub enum AasError {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AasError {
    /// Rule identifier, or a generic tag for IO/parse failures
    pub fn rule(&self) -> &'static str {
        match self {
            AasError::Structural(e) => e.rule(),
            AasError::Value(e) => e.rule(),
            AasError::Configuration(e) => e.rule(),
            AasError::Constraint(e) => e.rule(),
            AasError::Io(_) => "io-error",
            AasError::Json(_) => "parse-error",
        }
    }
}
