use super::{EdgeDescriptor, FlowGraph, StageDescriptor};
use crate::assembler::sequential_edges;
use crate::error::FlowConversionError;
use serde::Deserialize;

/// A trait for external data models that can be converted into a `FlowGraph`.
///
/// This is the seam for feeding the assembler from sources other than the flow
/// endpoint, such as exported pipeline listings or test fixtures.
///
/// # Example
///
/// ```rust
/// use medflow::error::FlowConversionError;
/// use medflow::flow::{FlowGraph, IntoFlowGraph, StageDescriptor};
///
/// struct Legacy { steps: Vec<(String, String)> }
///
/// impl IntoFlowGraph for Legacy {
///     fn into_flow_graph(self) -> Result<FlowGraph, FlowConversionError> {
///         let nodes = self
///             .steps
///             .into_iter()
///             .enumerate()
///             .map(|(i, (id, name))| StageDescriptor::new(id, name, i as i64))
///             .collect();
///         Ok(FlowGraph::new("legacy", "Legacy Flow").with_stages(nodes, vec![]))
///     }
/// }
/// ```
pub trait IntoFlowGraph {
    /// Consumes the object and converts it into a flow graph.
    fn into_flow_graph(self) -> Result<FlowGraph, FlowConversionError>;
}

impl FlowGraph {
    /// Parses the flow endpoint's JSON body. Missing metadata is defaulted.
    pub fn from_json(json: &str) -> Result<Self, FlowConversionError> {
        serde_json::from_str(json).map_err(|e| FlowConversionError::JsonParseError(e.to_string()))
    }
}

/// A stage row from the stream-detail listing, which carries no edges.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineStageRecord {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "type")]
    pub stage_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "subnodeName")]
    pub subnode_name: Option<String>,
}

/// An ordered stage listing. Converted into a linear chain.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineListing {
    pub flow_id: String,
    pub flow_name: String,
    pub stages: Vec<PipelineStageRecord>,
}

impl IntoFlowGraph for PipelineListing {
    fn into_flow_graph(self) -> Result<FlowGraph, FlowConversionError> {
        if let Some(pos) = self.stages.iter().position(|s| s.id.trim().is_empty()) {
            return Err(FlowConversionError::ValidationError(format!(
                "stage at position {} has an empty id",
                pos
            )));
        }

        let nodes: Vec<StageDescriptor> = self
            .stages
            .into_iter()
            .enumerate()
            .map(|(index, record)| StageDescriptor {
                id: record.id,
                name: Some(record.name),
                order: index as i64,
                selected_subnode_id: record.subnode_name,
                role: record.stage_type.and_then(|t| t.parse().ok()),
            })
            .collect();
        let edges: Vec<EdgeDescriptor> = sequential_edges(&nodes);

        Ok(FlowGraph::new(self.flow_id, self.flow_name).with_stages(nodes, edges))
    }
}
