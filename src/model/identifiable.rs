//! Identifiable entities: shells, submodels, concept descriptions

use serde::{Deserialize, Serialize};

use super::capability::{
    HasDataSpecification, HasKind, HasSemantics, Identifiable, IdentifiableAttrs, ModellingKind,
    Qualifiable, Referable, ReferableAttrs, Semantics,
};
use super::element::SubmodelElement;
use super::qualifier::Qualifier;
use super::{validate_all, Validate};
use crate::error::{ConstraintError, Result};
use crate::reference::{KeyType, Reference};

/// Asset kind of a shell's asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetKind {
    Type,
    Instance,
    NotApplicable,
}

/// Addressable resource such as a thumbnail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub path: String,
    pub content_type: String,
}

/// Name/value identifier of the asset within some external domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificAssetId {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_subject_id: Option<Reference>,
    #[serde(flatten)]
    pub semantics: Semantics,
}

impl HasSemantics for SpecificAssetId {
    fn semantics(&self) -> &Semantics {
        &self.semantics
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetInformation {
    pub asset_kind: AssetKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_asset_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specific_asset_ids: Vec<SpecificAssetId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_thumbnail: Option<Resource>,
}

impl AssetInformation {
    pub fn new(asset_kind: AssetKind) -> Self {
        Self {
            asset_kind,
            global_asset_id: None,
            specific_asset_ids: Vec::new(),
            asset_type: None,
            default_thumbnail: None,
        }
    }
}

impl Validate for AssetInformation {
    fn validate(&self) -> Result<()> {
        for id in &self.specific_asset_ids {
            id.semantics.validate()?;
        }
        Ok(())
    }
}

/// Digital representation of an asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAdministrationShell {
    #[serde(flatten)]
    pub identity: IdentifiableAttrs,
    pub asset_information: AssetInformation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodels: Vec<Reference>,
    #[serde(default, alias = "dataSpecification", skip_serializing_if = "Vec::is_empty")]
    pub data_specifications: Vec<Reference>,
}

impl AssetAdministrationShell {
    pub fn new(id: impl Into<String>, asset_information: AssetInformation) -> Self {
        Self {
            identity: IdentifiableAttrs::new(id),
            asset_information,
            derived_from: None,
            submodels: Vec::new(),
            data_specifications: Vec::new(),
        }
    }
}

impl Validate for AssetAdministrationShell {
    fn validate(&self) -> Result<()> {
        self.identity.validate()?;
        self.asset_information.validate()?;
        if let Some(derived_from) = &self.derived_from {
            if !derived_from.is_model_reference_to(KeyType::AssetAdministrationShell) {
                return Err(ConstraintError::DerivedFromMustReferenceShell.into());
            }
        }
        for (index, submodel) in self.submodels.iter().enumerate() {
            if !submodel.is_model_reference_to(KeyType::Submodel) {
                return Err(ConstraintError::SubmodelReferenceMustTargetSubmodel { index }.into());
            }
        }
        Ok(())
    }
}

/// One aspect of an asset, as a tree of submodel elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submodel {
    #[serde(flatten)]
    pub identity: IdentifiableAttrs,
    #[serde(default)]
    pub kind: ModellingKind,
    #[serde(flatten)]
    pub semantics: Semantics,
    #[serde(default, alias = "qualifier", skip_serializing_if = "Vec::is_empty")]
    pub qualifiers: Vec<Qualifier>,
    #[serde(default, alias = "dataSpecification", skip_serializing_if = "Vec::is_empty")]
    pub data_specifications: Vec<Reference>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub submodel_elements: Vec<SubmodelElement>,
}

impl Submodel {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            identity: IdentifiableAttrs::new(id),
            kind: ModellingKind::default(),
            semantics: Semantics::default(),
            qualifiers: Vec::new(),
            data_specifications: Vec::new(),
            submodel_elements: Vec::new(),
        }
    }

    /// Top-level element by idShort
    pub fn element(&self, id_short: &str) -> Option<&SubmodelElement> {
        self.submodel_elements
            .iter()
            .find(|e| e.id_short() == Some(id_short))
    }
}

impl Validate for Submodel {
    fn validate(&self) -> Result<()> {
        self.identity.validate()?;
        self.semantics.validate()?;
        validate_all(&self.qualifiers)?;
        validate_all(&self.submodel_elements)
    }
}

impl HasSemantics for Submodel {
    fn semantics(&self) -> &Semantics {
        &self.semantics
    }
}

impl Qualifiable for Submodel {
    fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }
}

impl HasKind for Submodel {
    fn kind(&self) -> ModellingKind {
        self.kind
    }
}

/// Concept definition giving semantics to elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDescription {
    #[serde(flatten)]
    pub identity: IdentifiableAttrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub is_case_of: Vec<Reference>,
    #[serde(default, alias = "dataSpecification", skip_serializing_if = "Vec::is_empty")]
    pub data_specifications: Vec<Reference>,
}

impl Validate for ConceptDescription {
    fn validate(&self) -> Result<()> {
        self.identity.validate()
    }
}

macro_rules! impl_identifiable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Referable for $ty {
                fn referable(&self) -> &ReferableAttrs {
                    &self.identity.referable
                }
            }

            impl Identifiable for $ty {
                fn identity(&self) -> &IdentifiableAttrs {
                    &self.identity
                }
            }

            impl HasDataSpecification for $ty {
                fn data_specifications(&self) -> &[Reference] {
                    &self.data_specifications
                }
            }
        )*
    };
}

impl_identifiable!(AssetAdministrationShell, Submodel, ConceptDescription);

/// Any top-level identifiable, tagged by `modelType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modelType")]
pub enum IdentifiableElement {
    AssetAdministrationShell(AssetAdministrationShell),
    Submodel(Submodel),
    ConceptDescription(ConceptDescription),
}

impl IdentifiableElement {
    pub fn model_type(&self) -> &'static str {
        match self {
            IdentifiableElement::AssetAdministrationShell(_) => "AssetAdministrationShell",
            IdentifiableElement::Submodel(_) => "Submodel",
            IdentifiableElement::ConceptDescription(_) => "ConceptDescription",
        }
    }
}

impl Referable for IdentifiableElement {
    fn referable(&self) -> &ReferableAttrs {
        &self.identity().referable
    }
}

impl Identifiable for IdentifiableElement {
    fn identity(&self) -> &IdentifiableAttrs {
        match self {
            IdentifiableElement::AssetAdministrationShell(e) => &e.identity,
            IdentifiableElement::Submodel(e) => &e.identity,
            IdentifiableElement::ConceptDescription(e) => &e.identity,
        }
    }
}

impl Validate for IdentifiableElement {
    fn validate(&self) -> Result<()> {
        match self {
            IdentifiableElement::AssetAdministrationShell(e) => e.validate(),
            IdentifiableElement::Submodel(e) => e.validate(),
            IdentifiableElement::ConceptDescription(e) => e.validate(),
        }
    }
}

impl From<Submodel> for IdentifiableElement {
    fn from(submodel: Submodel) -> Self {
        IdentifiableElement::Submodel(submodel)
    }
}

impl From<AssetAdministrationShell> for IdentifiableElement {
    fn from(shell: AssetAdministrationShell) -> Self {
        IdentifiableElement::AssetAdministrationShell(shell)
    }
}
