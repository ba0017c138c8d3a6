//! JSON export of validated entities
//!
//! Typed output is requested per call through [`ExportOptions`]; nothing
//! here reads global state.

use serde_json::Value;

use super::element::{Property, SubmodelElement};
use super::identifiable::{IdentifiableElement, Submodel};
use crate::error::Result;
use crate::literal::CoerceOptions;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Replace Property values with their coerced, typed form
    pub typed_values: bool,
}

impl ExportOptions {
    pub fn typed() -> Self {
        Self { typed_values: true }
    }

    pub fn coerce_options(&self) -> CoerceOptions {
        CoerceOptions {
            produce_typed: self.typed_values,
        }
    }
}

impl Property {
    pub fn export(&self, options: ExportOptions) -> Result<Value> {
        let mut json = serde_json::to_value(self)?;
        if let Some(typed) = self.typed_value(options) {
            json["value"] = typed.to_json();
        }
        Ok(json)
    }
}

impl SubmodelElement {
    /// Export with the `modelType` tag, recursing into collections and lists
    pub fn export(&self, options: ExportOptions) -> Result<Value> {
        let mut json = serde_json::to_value(self)?;
        if !options.typed_values {
            return Ok(json);
        }
        match self {
            SubmodelElement::Property(p) => {
                if let Some(typed) = p.typed_value(options) {
                    json["value"] = typed.to_json();
                }
            }
            SubmodelElement::SubmodelElementCollection(_) | SubmodelElement::SubmodelElementList(_)
                if !self.children().is_empty() =>
            {
                json["value"] = export_elements(self.children(), options)?;
            }
            _ => {}
        }
        Ok(json)
    }
}

fn export_elements(elements: &[SubmodelElement], options: ExportOptions) -> Result<Value> {
    elements
        .iter()
        .map(|e| e.export(options))
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

impl Submodel {
    pub fn export(&self, options: ExportOptions) -> Result<Value> {
        let mut json = serde_json::to_value(self)?;
        if options.typed_values && !self.submodel_elements.is_empty() {
            json["submodelElements"] = export_elements(&self.submodel_elements, options)?;
        }
        Ok(json)
    }
}

impl IdentifiableElement {
    pub fn export(&self, options: ExportOptions) -> Result<Value> {
        match self {
            IdentifiableElement::Submodel(submodel) => {
                let mut json = submodel.export(options)?;
                json["modelType"] = Value::from("Submodel");
                Ok(json)
            }
            other => Ok(serde_json::to_value(other)?),
        }
    }
}
