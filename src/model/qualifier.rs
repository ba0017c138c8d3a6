//! Qualifiers and extensions: name/value pairs with an optional value type

use serde::{Deserialize, Serialize};

use super::capability::{HasSemantics, Semantics};
use super::{validate_literal_field, Validate};
use crate::error::Result;
use crate::literal::DataTypeDefXsd;
use crate::reference::Reference;

/// Qualifier attached to a qualifiable element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Qualifier {
    #[serde(rename = "type")]
    pub qualifier_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<DataTypeDefXsd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_id: Option<Reference>,
    #[serde(flatten)]
    pub semantics: Semantics,
}

impl Qualifier {
    pub fn new(
        qualifier_type: impl Into<String>,
        value_type: DataTypeDefXsd,
        value: impl Into<String>,
    ) -> Result<Self> {
        let qualifier = Self {
            qualifier_type: qualifier_type.into(),
            value_type: Some(value_type),
            value: Some(value.into()),
            value_id: None,
            semantics: Semantics::default(),
        };
        qualifier.validate()?;
        Ok(qualifier)
    }
}

impl Validate for Qualifier {
    fn validate(&self) -> Result<()> {
        self.semantics.validate()?;
        validate_literal_field(self.value_type, self.value.as_deref())
    }
}

impl HasSemantics for Qualifier {
    fn semantics(&self) -> &Semantics {
        &self.semantics
    }
}

/// Proprietary extension of a referable element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<DataTypeDefXsd>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refers_to: Vec<Reference>,
    #[serde(flatten)]
    pub semantics: Semantics,
}

impl Validate for Extension {
    fn validate(&self) -> Result<()> {
        self.semantics.validate()?;
        validate_literal_field(self.value_type, self.value.as_deref())
    }
}

impl HasSemantics for Extension {
    fn semantics(&self) -> &Semantics {
        &self.semantics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_value_checked() {
        assert!(Qualifier::new("Multiplicity", DataTypeDefXsd::UnsignedInt, "3").is_ok());
        let err = Qualifier::new("Multiplicity", DataTypeDefXsd::UnsignedInt, "-3").unwrap_err();
        assert_eq!(err.rule(), "range-error");
    }

    #[test]
    fn test_untyped_extension_is_free_text() {
        let json = r#"{"name": "vendor", "value": "anything\ngoes"}"#;
        let extension: Extension = serde_json::from_str(json).unwrap();
        assert!(extension.validate().is_ok());

        let json = r#"{"name": "vendor", "valueType": "xs:boolean", "value": "maybe"}"#;
        let extension: Extension = serde_json::from_str(json).unwrap();
        assert_eq!(extension.validate().unwrap_err().rule(), "type-mismatch");
    }
}
