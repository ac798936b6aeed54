use serde::{Deserialize, Serialize};

/// One entry of a flow's version history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowVersion {
    pub id: String,
    pub version: u32,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_by: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Returns the active version number, if any.
pub fn active_version(versions: &[FlowVersion]) -> Option<u32> {
    versions.iter().find(|v| v.is_active).map(|v| v.version)
}

/// Marks `version` active and every other entry inactive.
pub fn mark_active(versions: &mut [FlowVersion], version: u32) {
    for v in versions.iter_mut() {
        v.is_active = v.version == version;
    }
}
