//! Renderer-agnostic graph produced by the assembler and consumed by the canvas.

use crate::contract::VisualContract;
use crate::role::RoleTag;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canvas coordinates in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A positioned, classified stage ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub role: RoleTag,
    pub position: Position,
    pub label: String,
    pub description: String,
    pub selected_subnode_id: Option<String>,
    pub contract: &'static VisualContract,
}

/// An edge attached to concrete handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderEdge {
    pub id: String,
    pub source_node_id: String,
    pub source_handle_id: String,
    pub target_node_id: String,
    pub target_handle_id: Option<String>,
    pub label: Option<String>,
}

/// Why an input edge did not make it into the render set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OmissionReason {
    UnknownSource { node_id: String },
    UnknownTarget { node_id: String },
    Unattachable {
        source_role: RoleTag,
        condition: Option<String>,
    },
}

impl fmt::Display for OmissionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OmissionReason::UnknownSource { node_id } => {
                write!(f, "source node '{}' is not in the flow", node_id)
            }
            OmissionReason::UnknownTarget { node_id } => {
                write!(f, "target node '{}' is not in the flow", node_id)
            }
            OmissionReason::Unattachable {
                source_role,
                condition: Some(cond),
            } => write!(
                f,
                "condition '{}' matches no output of a {} node",
                cond, source_role
            ),
            OmissionReason::Unattachable {
                source_role,
                condition: None,
            } => write!(f, "a {} node has no default output", source_role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeOmission {
    pub edge_id: String,
    pub reason: OmissionReason,
}

/// Output of one assembler run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssembledGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    /// Input edges left out of `edges`, in input order.
    pub omissions: Vec<EdgeOmission>,
}

impl AssembledGraph {
    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&RenderEdge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn positions(&self) -> Vec<Position> {
        self.nodes.iter().map(|n| n.position).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
