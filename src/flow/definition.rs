use crate::role::RoleTag;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One processing stage of a mediation flow, as described by the backend.
///
/// Every field except `id` is optional on the wire; a partial descriptor still
/// renders (missing names classify as `generic`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageDescriptor {
    pub id: String,
    pub name: Option<String>,
    /// Advisory ordering. Shown in the node description, never used for layout.
    /// Missing, null or non-numeric values read as 0.
    #[serde(deserialize_with = "deserialize_order")]
    pub order: i64,
    #[serde(alias = "selectedSubnodeId")]
    pub selected_subnode_id: Option<String>,
    /// Explicit role supplied by builder-style flows (`"type": "conditional"`).
    /// Takes precedence over name classification. Unknown values are ignored.
    #[serde(
        alias = "type",
        deserialize_with = "deserialize_role_hint",
        skip_serializing_if = "Option::is_none"
    )]
    pub role: Option<RoleTag>,
}

impl StageDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            name: Some(name.into()),
            order,
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: RoleTag) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_subnode(mut self, subnode_id: impl Into<String>) -> Self {
        self.selected_subnode_id = Some(subnode_id.into());
        self
    }
}

/// A directed connection between two stages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeDescriptor {
    pub id: String,
    #[serde(alias = "source", alias = "fromNode")]
    pub from_node: String,
    #[serde(alias = "target", alias = "toNode")]
    pub to_node: String,
    /// Labels the edge and selects the named output handle on the source node.
    pub condition: Option<String>,
}

impl EdgeDescriptor {
    pub fn new(id: impl Into<String>, from_node: impl Into<String>, to_node: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from_node: from_node.into(),
            to_node: to_node.into(),
            condition: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// The condition, with blank strings treated as absent.
    pub fn effective_condition(&self) -> Option<&str> {
        self.condition
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// A flow as returned by the backend: metadata plus its stage graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowGraph {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_version_label")]
    pub version: Option<String>,
    pub is_running: bool,
    pub is_deployed: bool,
    pub created_at: Option<String>,
    pub created_by: Option<String>,
    pub nodes: Vec<StageDescriptor>,
    pub edges: Vec<EdgeDescriptor>,
}

impl FlowGraph {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_stages(mut self, nodes: Vec<StageDescriptor>, edges: Vec<EdgeDescriptor>) -> Self {
        self.nodes = nodes;
        self.edges = edges;
        self
    }
}

fn deserialize_role_hint<'de, D>(deserializer: D) -> Result<Option<RoleTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(raw.as_str().and_then(|s| s.parse().ok()))
}

fn deserialize_order<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let order = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(order.unwrap_or_default())
}

/// Versions arrive as `"1.0.0"`, `3` or `null` depending on the endpoint.
fn deserialize_version_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(serde_json::Number),
    }

    let raw: Option<Label> = Option::deserialize(deserializer)?;
    Ok(raw.map(|label| match label {
        Label::Text(s) => s,
        Label::Number(n) => n.to_string(),
    }))
}
