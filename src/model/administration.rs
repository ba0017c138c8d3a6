//! Administrative metadata of identifiables

use serde::{Deserialize, Serialize};

use super::Validate;
use crate::error::{ConstraintError, Result};
use crate::reference::Reference;

const MAX_VERSION_LEN: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdministrativeInformation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
}

impl AdministrativeInformation {
    pub fn new(version: impl Into<String>, revision: Option<String>) -> Result<Self> {
        let info = Self {
            version: Some(version.into()),
            revision,
            ..Default::default()
        };
        info.validate()?;
        Ok(info)
    }
}

impl Validate for AdministrativeInformation {
    fn validate(&self) -> Result<()> {
        if let Some(version) = &self.version {
            if version.chars().count() > MAX_VERSION_LEN {
                return Err(ConstraintError::VersionTooLong(version.clone()).into());
            }
        }
        if let Some(revision) = &self.revision {
            if revision.chars().count() > MAX_VERSION_LEN {
                return Err(ConstraintError::RevisionTooLong(revision.clone()).into());
            }
            // an empty version counts as missing
            if self.version.as_deref().map_or(true, str::is_empty) {
                return Err(ConstraintError::RevisionWithoutVersion.into());
            }
        }
        Ok(())
    }
}
