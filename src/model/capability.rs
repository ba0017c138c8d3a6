//! Capability traits and the attribute blocks that back them
//!
//! Entities compose the blocks they need with `#[serde(flatten)]` and
//! implement only the matching traits.

use serde::{Deserialize, Serialize};

use super::administration::AdministrativeInformation;
use super::qualifier::{Extension, Qualifier};
use super::{validate_all, Validate};
use crate::error::{ConstraintError, Result};
use crate::reference::Reference;

/// Text in one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangString {
    pub language: String,
    pub text: String,
}

impl LangString {
    pub fn new(language: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            text: text.into(),
        }
    }
}

/// Template vs. instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModellingKind {
    Template,
    #[default]
    Instance,
}

/// Attributes of every referable element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferableAttrs {
    /// Deprecated, kept for compatibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_short: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub display_name: Vec<LangString>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub description: Vec<LangString>,
    #[serde(default, alias = "extension", skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<Extension>,
}

impl ReferableAttrs {
    pub fn with_id_short(id_short: impl Into<String>) -> Self {
        Self {
            id_short: Some(id_short.into()),
            ..Default::default()
        }
    }
}

impl Validate for ReferableAttrs {
    fn validate(&self) -> Result<()> {
        validate_all(&self.extensions)
    }
}

/// Attributes of identifiables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifiableAttrs {
    #[serde(flatten)]
    pub referable: ReferableAttrs,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administration: Option<AdministrativeInformation>,
}

impl IdentifiableAttrs {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl Validate for IdentifiableAttrs {
    fn validate(&self) -> Result<()> {
        self.referable.validate()?;
        if let Some(administration) = &self.administration {
            administration.validate()?;
        }
        Ok(())
    }
}

/// Semantic identifiers of an element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semantics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    #[serde(default, alias = "supplementalSemanticId", skip_serializing_if = "Vec::is_empty")]
    pub supplemental_semantic_ids: Vec<Reference>,
}

impl Semantics {
    pub fn new(semantic_id: Reference) -> Self {
        Self {
            semantic_id: Some(semantic_id),
            supplemental_semantic_ids: Vec::new(),
        }
    }
}

impl Validate for Semantics {
    fn validate(&self) -> Result<()> {
        if !self.supplemental_semantic_ids.is_empty() && self.semantic_id.is_none() {
            return Err(ConstraintError::SupplementalSemanticIdWithoutSemanticId.into());
        }
        Ok(())
    }
}

/// Attributes shared by all submodel elements
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementAttrs {
    #[serde(flatten)]
    pub referable: ReferableAttrs,
    #[serde(flatten)]
    pub semantics: Semantics,
    #[serde(default, alias = "qualifier", skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<Qualifier>,
    #[serde(default, alias = "dataSpecification", skip_serializing_if = "Vec::is_empty")]
    pub data_specifications: Vec<Reference>,
}

impl ElementAttrs {
    pub fn with_id_short(id_short: impl Into<String>) -> Self {
        Self {
            referable: ReferableAttrs::with_id_short(id_short),
            ..Default::default()
        }
    }
}

impl Validate for ElementAttrs {
    fn validate(&self) -> Result<()> {
        self.referable.validate()?;
        self.semantics.validate()?;
        validate_all(&self.qualifiers)
    }
}

pub trait Referable {
    fn referable(&self) -> &ReferableAttrs;

    fn id_short(&self) -> Option<&str> {
        self.referable().id_short.as_deref()
    }
}

pub trait HasExtensions {
    fn extensions(&self) -> &[Extension];
}

impl<T: Referable + ?Sized> HasExtensions for T {
    fn extensions(&self) -> &[Extension] {
        &self.referable().extensions
    }
}

pub trait Identifiable: Referable {
    fn identity(&self) -> &IdentifiableAttrs;

    fn id(&self) -> &str {
        &self.identity().id
    }

    fn administration(&self) -> Option<&AdministrativeInformation> {
        self.identity().administration.as_ref()
    }
}

pub trait HasSemantics {
    fn semantics(&self) -> &Semantics;

    fn semantic_id(&self) -> Option<&Reference> {
        self.semantics().semantic_id.as_ref()
    }
}

pub trait Qualifiable {
    fn qualifiers(&self) -> &[Qualifier];
}

pub trait HasDataSpecification {
    fn data_specifications(&self) -> &[Reference];
}

pub trait HasKind {
    fn kind(&self) -> ModellingKind;
}
