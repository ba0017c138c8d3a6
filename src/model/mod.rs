//! Entity layer
//!
//! Lean AAS metamodel entities that carry references and typed literals.
//! Every entity checks its own rules through [`Validate`], then its children,
//! and stops at the first failure.

pub mod administration;
pub mod capability;
pub mod element;
pub mod export;
pub mod identifiable;
pub mod qualifier;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::literal::{validate_typed_literal, DataTypeDefXsd};

pub use administration::AdministrativeInformation;
pub use capability::{
    ElementAttrs, HasDataSpecification, HasExtensions, HasKind, HasSemantics, Identifiable,
    IdentifiableAttrs, LangString, ModellingKind, Qualifiable, Referable, ReferableAttrs, Semantics,
};
pub use element::{
    Blob, ElementKind, File, MultiLanguageProperty, Property, Range, ReferenceElement,
    RelationshipElement, SubmodelElement, SubmodelElementCollection, SubmodelElementList,
};
pub use export::ExportOptions;
pub use identifiable::{
    AssetAdministrationShell, AssetInformation, AssetKind, ConceptDescription, IdentifiableElement,
    Resource, SpecificAssetId, Submodel,
};
pub use qualifier::{Extension, Qualifier};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Validate items in order, returning the first failure
pub fn validate_all<'a, T: Validate + 'a>(items: impl IntoIterator<Item = &'a T>) -> Result<()> {
    items.into_iter().try_for_each(Validate::validate)
}

/// Check an optional literal against an optional type; both must be present
/// and the literal non-empty for anything to be checked
pub(crate) fn validate_literal_field(value_type: Option<DataTypeDefXsd>, value: Option<&str>) -> Result<()> {
    match (value_type, value) {
        (Some(datatype), Some(raw)) if !raw.is_empty() => {
            validate_typed_literal(datatype, raw)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Deserialize an entity and run its validation rules
pub fn from_json<T: DeserializeOwned + Validate>(json: &str) -> Result<T> {
    let entity: T = serde_json::from_str(json)?;
    entity.validate()?;
    Ok(entity)
}

/// Parse a document holding one identifiable or an array of them
pub fn identifiables_from_json(json: &str) -> Result<Vec<IdentifiableElement>> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let entities: Vec<IdentifiableElement> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };
    validate_all(&entities)?;
    Ok(entities)
}
