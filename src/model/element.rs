//! Submodel elements
//!
//! Elements are a tagged union discriminated by `modelType`. List
//! homogeneity compares those tags, never runtime type identity.

use std::fmt;

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::capability::{
    ElementAttrs, HasDataSpecification, HasSemantics, LangString, Qualifiable, Referable,
    ReferableAttrs, Semantics,
};
use super::qualifier::Qualifier;
use super::{validate_all, validate_literal_field, Validate};
use crate::error::{ConstraintError, Result, ValueError};
use crate::literal::{coerce_typed_literal, validate_typed_literal, DataTypeDefXsd, TypedValue};
use crate::model::export::ExportOptions;
use crate::reference::Reference;

/// Discriminator of a submodel element, including the two abstract kinds
/// usable as list element types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    SubmodelElement,
    DataElement,
    Property,
    MultiLanguageProperty,
    Range,
    File,
    Blob,
    ReferenceElement,
    RelationshipElement,
    SubmodelElementCollection,
    SubmodelElementList,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::SubmodelElement => "SubmodelElement",
            ElementKind::DataElement => "DataElement",
            ElementKind::Property => "Property",
            ElementKind::MultiLanguageProperty => "MultiLanguageProperty",
            ElementKind::Range => "Range",
            ElementKind::File => "File",
            ElementKind::Blob => "Blob",
            ElementKind::ReferenceElement => "ReferenceElement",
            ElementKind::RelationshipElement => "RelationshipElement",
            ElementKind::SubmodelElementCollection => "SubmodelElementCollection",
            ElementKind::SubmodelElementList => "SubmodelElementList",
        }
    }

    pub fn is_data_element(&self) -> bool {
        matches!(
            self,
            ElementKind::DataElement
                | ElementKind::Property
                | ElementKind::MultiLanguageProperty
                | ElementKind::Range
                | ElementKind::File
                | ElementKind::Blob
                | ElementKind::ReferenceElement
        )
    }

    /// Whether an element tagged `other` may sit in a list declared as `self`
    pub fn admits(&self, other: ElementKind) -> bool {
        match self {
            ElementKind::SubmodelElement => true,
            ElementKind::DataElement => other.is_data_element(),
            _ => *self == other,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! impl_element_capabilities {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Referable for $ty {
                fn referable(&self) -> &ReferableAttrs {
                    &self.common.referable
                }
            }

            impl HasSemantics for $ty {
                fn semantics(&self) -> &Semantics {
                    &self.common.semantics
                }
            }

            impl Qualifiable for $ty {
                fn qualifiers(&self) -> &[Qualifier] {
                    &self.common.qualifiers
                }
            }

            impl HasDataSpecification for $ty {
                fn data_specifications(&self) -> &[Reference] {
                    &self.common.data_specifications
                }
            }
        )*
    };
}

impl_element_capabilities!(
    Property,
    MultiLanguageProperty,
    Range,
    File,
    Blob,
    ReferenceElement,
    RelationshipElement,
    SubmodelElementCollection,
    SubmodelElementList,
);

/// Element with a single typed literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(flatten)]
    pub common: ElementAttrs,
    pub value_type: DataTypeDefXsd,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<Reference>,
}

impl Property {
    /// Property with a literal value, validated against `value_type`
    pub fn new(id_short: impl Into<String>, value_type: DataTypeDefXsd, value: impl Into<String>) -> Result<Self> {
        let property = Self {
            common: ElementAttrs::with_id_short(id_short),
            value_type,
            value: Some(value.into()),
            value_id: None,
        };
        property.validate()?;
        Ok(property)
    }

    /// Property whose value is given only by a coded-value reference
    pub fn with_value_id(id_short: impl Into<String>, value_type: DataTypeDefXsd, value_id: Reference) -> Self {
        Self {
            common: ElementAttrs::with_id_short(id_short),
            value_type,
            value: None,
            value_id: Some(value_id),
        }
    }

    fn literal(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    /// Coerced value for export; `None` when typed output is off or there
    /// is no literal
    pub fn typed_value(&self, options: ExportOptions) -> Option<TypedValue> {
        if !options.typed_values {
            return None;
        }
        self.literal()
            .map(|raw| coerce_typed_literal(self.value_type, raw, options.coerce_options()))
    }
}

impl Validate for Property {
    fn validate(&self) -> Result<()> {
        self.common.validate()?;
        match self.literal() {
            Some(raw) => validate_typed_literal(self.value_type, raw)?,
            None if self.value_id.is_none() => {
                return Err(ConstraintError::MissingValueOrValueId {
                    id_short: self.common.referable.id_short.clone(),
                }
                .into())
            }
            None => {}
        }
        Ok(())
    }
}

/// Element with per-language text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiLanguageProperty {
    #[serde(flatten)]
    pub common: ElementAttrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<LangString>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<Reference>,
}

impl Validate for MultiLanguageProperty {
    fn validate(&self) -> Result<()> {
        self.common.validate()
    }
}

/// Interval of values of one type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    #[serde(flatten)]
    pub common: ElementAttrs,
    pub value_type: DataTypeDefXsd,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
}

impl Validate for Range {
    fn validate(&self) -> Result<()> {
        self.common.validate()?;
        if self.min.is_none() && self.max.is_none() {
            return Err(ConstraintError::RangeWithoutBounds {
                id_short: self.common.referable.id_short.clone(),
            }
            .into());
        }
        validate_literal_field(Some(self.value_type), self.min.as_deref())?;
        validate_literal_field(Some(self.value_type), self.max.as_deref())
    }
}

/// Reference to a file by path or URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    #[serde(flatten)]
    pub common: ElementAttrs,
    pub content_type: String,
    pub value: String,
}

impl Validate for File {
    fn validate(&self) -> Result<()> {
        self.common.validate()
    }
}

/// Inline binary content, base64-encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    #[serde(flatten)]
    pub common: ElementAttrs,
    pub content_type: String,
    pub value: String,
}

impl Blob {
    pub fn decoded(&self) -> Result<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.value)
            .map_err(|e| {
                ValueError::Format {
                    datatype: DataTypeDefXsd::Base64Binary,
                    value: self.value.clone(),
                    reason: format!("is not valid base64 ({})", e),
                }
                .into()
            })
    }
}

impl Validate for Blob {
    fn validate(&self) -> Result<()> {
        self.common.validate()?;
        validate_typed_literal(DataTypeDefXsd::Base64Binary, &self.value)?;
        Ok(())
    }
}

/// Element whose value is a reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceElement {
    #[serde(flatten)]
    pub common: ElementAttrs,
    pub value: Reference,
}

impl Validate for ReferenceElement {
    fn validate(&self) -> Result<()> {
        self.common.validate()
    }
}

/// Relationship between two model elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipElement {
    #[serde(flatten)]
    pub common: ElementAttrs,
    pub first: Reference,
    pub second: Reference,
}

impl Validate for RelationshipElement {
    fn validate(&self) -> Result<()> {
        self.common.validate()?;
        for (field, reference) in [("first", &self.first), ("second", &self.second)] {
            if !reference.is_model_reference() {
                return Err(ConstraintError::RelationshipRequiresModelReference { field }.into());
            }
        }
        Ok(())
    }
}

/// Set of elements addressed by idShort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelElementCollection {
    #[serde(flatten)]
    pub common: ElementAttrs,
    #[serde(default = "default_true")]
    pub order_relevant: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<SubmodelElement>,
}

impl Validate for SubmodelElementCollection {
    fn validate(&self) -> Result<()> {
        self.common.validate()?;
        validate_all(&self.value)
    }
}

/// Homogeneous list of elements, addressed by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmodelElementList {
    #[serde(flatten)]
    pub common: ElementAttrs,
    #[serde(default = "default_true")]
    pub order_relevant: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_value_list_element: Option<ElementKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id_list_element: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type_list_element: Option<DataTypeDefXsd>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub value: Vec<SubmodelElement>,
}

fn default_true() -> bool {
    true
}

impl SubmodelElementList {
    pub fn new(id_short: impl Into<String>, type_value_list_element: ElementKind) -> Self {
        Self {
            common: ElementAttrs::with_id_short(id_short),
            order_relevant: true,
            type_value_list_element: Some(type_value_list_element),
            semantic_id_list_element: None,
            value_type_list_element: None,
            value: Vec::new(),
        }
    }

    /// Append an element, keeping the list valid
    pub fn push(&mut self, element: SubmodelElement) -> Result<()> {
        self.check_item(self.value.len(), &element)?;
        element.validate()?;
        self.value.push(element);
        Ok(())
    }

    fn check_item(&self, index: usize, element: &SubmodelElement) -> Result<()> {
        if let Some(expected) = self.type_value_list_element {
            let found = element.kind();
            if !expected.admits(found) {
                return Err(ConstraintError::ListElementKindMismatch { expected, found, index }.into());
            }
        }
        if let (Some(expected), Some(found)) = (self.value_type_list_element, element.value_type()) {
            if expected != found {
                return Err(ConstraintError::ListValueTypeMismatch { expected, found, index }.into());
            }
        }
        Ok(())
    }
}

impl Validate for SubmodelElementList {
    fn validate(&self) -> Result<()> {
        self.common.validate()?;
        for (index, element) in self.value.iter().enumerate() {
            self.check_item(index, element)?;
        }
        validate_all(&self.value)
    }
}

/// Any submodel element, tagged by `modelType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modelType")]
pub enum SubmodelElement {
    Property(Property),
    MultiLanguageProperty(MultiLanguageProperty),
    Range(Range),
    File(File),
    Blob(Blob),
    ReferenceElement(ReferenceElement),
    RelationshipElement(RelationshipElement),
    SubmodelElementCollection(SubmodelElementCollection),
    SubmodelElementList(SubmodelElementList),
}

impl SubmodelElement {
    pub fn kind(&self) -> ElementKind {
        match self {
            SubmodelElement::Property(_) => ElementKind::Property,
            SubmodelElement::MultiLanguageProperty(_) => ElementKind::MultiLanguageProperty,
            SubmodelElement::Range(_) => ElementKind::Range,
            SubmodelElement::File(_) => ElementKind::File,
            SubmodelElement::Blob(_) => ElementKind::Blob,
            SubmodelElement::ReferenceElement(_) => ElementKind::ReferenceElement,
            SubmodelElement::RelationshipElement(_) => ElementKind::RelationshipElement,
            SubmodelElement::SubmodelElementCollection(_) => ElementKind::SubmodelElementCollection,
            SubmodelElement::SubmodelElementList(_) => ElementKind::SubmodelElementList,
        }
    }

    fn common(&self) -> &ElementAttrs {
        match self {
            SubmodelElement::Property(e) => &e.common,
            SubmodelElement::MultiLanguageProperty(e) => &e.common,
            SubmodelElement::Range(e) => &e.common,
            SubmodelElement::File(e) => &e.common,
            SubmodelElement::Blob(e) => &e.common,
            SubmodelElement::ReferenceElement(e) => &e.common,
            SubmodelElement::RelationshipElement(e) => &e.common,
            SubmodelElement::SubmodelElementCollection(e) => &e.common,
            SubmodelElement::SubmodelElementList(e) => &e.common,
        }
    }

    /// Declared value type of Property and Range elements
    pub fn value_type(&self) -> Option<DataTypeDefXsd> {
        match self {
            SubmodelElement::Property(p) => Some(p.value_type),
            SubmodelElement::Range(r) => Some(r.value_type),
            _ => None,
        }
    }

    /// Child elements of collections and lists
    pub fn children(&self) -> &[SubmodelElement] {
        match self {
            SubmodelElement::SubmodelElementCollection(c) => &c.value,
            SubmodelElement::SubmodelElementList(l) => &l.value,
            _ => &[],
        }
    }
}

impl Referable for SubmodelElement {
    fn referable(&self) -> &ReferableAttrs {
        &self.common().referable
    }
}

impl HasSemantics for SubmodelElement {
    fn semantics(&self) -> &Semantics {
        &self.common().semantics
    }
}

impl Qualifiable for SubmodelElement {
    fn qualifiers(&self) -> &[Qualifier] {
        &self.common().qualifiers
    }
}

impl Validate for SubmodelElement {
    fn validate(&self) -> Result<()> {
        match self {
            SubmodelElement::Property(e) => e.validate(),
            SubmodelElement::MultiLanguageProperty(e) => e.validate(),
            SubmodelElement::Range(e) => e.validate(),
            SubmodelElement::File(e) => e.validate(),
            SubmodelElement::Blob(e) => e.validate(),
            SubmodelElement::ReferenceElement(e) => e.validate(),
            SubmodelElement::RelationshipElement(e) => e.validate(),
            SubmodelElement::SubmodelElementCollection(e) => e.validate(),
            SubmodelElement::SubmodelElementList(e) => e.validate(),
        }
    }
}

impl From<Property> for SubmodelElement {
    fn from(p: Property) -> Self {
        SubmodelElement::Property(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{Key, KeyType};

    fn property(id_short: &str, value_type: DataTypeDefXsd, value: &str) -> SubmodelElement {
        Property::new(id_short, value_type, value).unwrap().into()
    }

    #[test]
    fn test_property_value_checked() {
        assert!(Property::new("Speed", DataTypeDefXsd::Double, "12.5").is_ok());
        let err = Property::new("Speed", DataTypeDefXsd::UnsignedShort, "65536").unwrap_err();
        assert_eq!(err.rule(), "range-error");
    }

    #[test]
    fn test_property_needs_value_or_value_id() {
        let err = Property::new("Empty", DataTypeDefXsd::String, "").unwrap_err();
        assert_eq!(err.rule(), "property-requires-value-or-value-id");

        let coded = Property::with_value_id(
            "Coded",
            DataTypeDefXsd::String,
            Reference::global("urn:value:1"),
        );
        assert!(coded.validate().is_ok());
    }

    #[test]
    fn test_range_bounds() {
        let json = r#"{"idShort": "R", "valueType": "xs:int"}"#;
        let range: Range = serde_json::from_str(json).unwrap();
        assert_eq!(range.validate().unwrap_err().rule(), "range-requires-min-or-max");

        let json = r#"{"idShort": "R", "valueType": "xs:int", "min": "0", "max": "3000000000"}"#;
        let range: Range = serde_json::from_str(json).unwrap();
        assert_eq!(range.validate().unwrap_err().rule(), "range-error");
    }

    #[test]
    fn test_blob_must_be_base64() {
        let blob = Blob {
            common: ElementAttrs::with_id_short("B"),
            content_type: "application/octet-stream".into(),
            value: "aGVsbG8=".into(),
        };
        assert!(blob.validate().is_ok());
        assert_eq!(blob.decoded().unwrap(), b"hello");

        let broken = Blob { value: "not base64!".into(), ..blob };
        assert_eq!(broken.validate().unwrap_err().rule(), "format-error");
    }

    #[test]
    fn test_relationship_requires_model_references() {
        let model = Reference::model(vec![Key::new(KeyType::Submodel, "urn:sm")]).unwrap();
        let rel = RelationshipElement {
            common: ElementAttrs::with_id_short("Rel"),
            first: model.clone(),
            second: Reference::global("urn:outside"),
        };
        let err = rel.validate().unwrap_err();
        assert_eq!(err.rule(), "relationship-requires-model-reference");
        assert!(err.to_string().contains("'second'"));
    }

    #[test]
    fn test_list_homogeneity_by_tag() {
        let mut list = SubmodelElementList::new("Temps", ElementKind::Property);
        list.push(property("T0", DataTypeDefXsd::Double, "20.5")).unwrap();

        let mlp = SubmodelElement::MultiLanguageProperty(MultiLanguageProperty {
            common: ElementAttrs::with_id_short("Label"),
            value: vec![LangString::new("en", "label")],
            value_id: None,
        });
        let err = list.push(mlp).unwrap_err();
        assert_eq!(err.rule(), "list-element-kind-mismatch");
        assert_eq!(list.value.len(), 1);
    }

    #[test]
    fn test_list_wildcards() {
        assert!(ElementKind::SubmodelElement.admits(ElementKind::SubmodelElementList));
        assert!(ElementKind::DataElement.admits(ElementKind::Blob));
        assert!(!ElementKind::DataElement.admits(ElementKind::SubmodelElementCollection));
        assert!(!ElementKind::Property.admits(ElementKind::Range));
    }

    #[test]
    fn test_list_value_type() {
        let mut list = SubmodelElementList::new("Counts", ElementKind::Property);
        list.value_type_list_element = Some(DataTypeDefXsd::Int);
        list.push(property("C0", DataTypeDefXsd::Int, "1")).unwrap();
        let err = list.push(property("C1", DataTypeDefXsd::Long, "1")).unwrap_err();
        assert_eq!(err.rule(), "list-value-type-mismatch");
    }

    #[test]
    fn test_model_type_tag() {
        let element = property("P", DataTypeDefXsd::Boolean, "true");
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(json["modelType"], "Property");
        assert_eq!(json["valueType"], "boolean");

        let back: SubmodelElement = serde_json::from_value(json).unwrap();
        assert_eq!(back.kind(), ElementKind::Property);
        assert_eq!(back.id_short(), Some("P"));
    }

    #[test]
    fn test_collection_order_relevant() {
        let json = r#"{"modelType": "SubmodelElementCollection", "idShort": "Bag"}"#;
        let element: SubmodelElement = serde_json::from_str(json).unwrap();
        match &element {
            SubmodelElement::SubmodelElementCollection(c) => assert!(c.order_relevant),
            other => panic!("Expected SubmodelElementCollection, got {:?}", other),
        }
        assert_eq!(serde_json::to_value(&element).unwrap()["orderRelevant"], serde_json::json!(true));

        let json = r#"{"modelType": "SubmodelElementCollection", "idShort": "Bag", "orderRelevant": false}"#;
        match serde_json::from_str::<SubmodelElement>(json).unwrap() {
            SubmodelElement::SubmodelElementCollection(c) => assert!(!c.order_relevant),
            other => panic!("Expected SubmodelElementCollection, got {:?}", other),
        }
    }
}
