//! Subnodes: versioned, deployable configuration units attached to stages.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One configuration version of a subnode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubnodeVersion {
    pub version: u32,
    #[serde(default)]
    pub is_deployed: bool,
    #[serde(default)]
    pub parameter_values: BTreeMap<String, String>,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub version_comment: Option<String>,
}

impl SubnodeVersion {
    /// Parameter rows in name order, as displayed in the parameter table.
    pub fn parameter_rows(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameter_values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subnode {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub versions: Vec<SubnodeVersion>,
}

impl Subnode {
    pub fn version(&self, version: u32) -> Option<&SubnodeVersion> {
        self.versions.iter().find(|v| v.version == version)
    }

    pub fn deployed_version(&self) -> Option<&SubnodeVersion> {
        self.versions.iter().find(|v| v.is_deployed)
    }

    pub fn latest_version(&self) -> Option<&SubnodeVersion> {
        self.versions.iter().max_by_key(|v| v.version)
    }

    /// The version a detail view opens on: the deployed one, else the newest.
    pub fn default_version(&self) -> Option<&SubnodeVersion> {
        self.deployed_version().or_else(|| self.latest_version())
    }
}

/// Request body for creating an editable copy of a subnode's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateVersionRequest {
    pub version_comment: String,
    #[serde(default)]
    pub created_by: Option<String>,
}
