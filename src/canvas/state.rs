use crate::render::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    Source,
    Target,
}

impl HandleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HandleKind::Source => "source",
            HandleKind::Target => "target",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            HandleKind::Source => HandleKind::Target,
            HandleKind::Target => HandleKind::Source,
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete handle on a concrete node, as reported by the drawing layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleRef {
    pub node_id: String,
    pub handle_id: String,
    pub kind: HandleKind,
}

impl HandleRef {
    pub fn source(node_id: impl Into<String>, handle_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            handle_id: handle_id.into(),
            kind: HandleKind::Source,
        }
    }

    pub fn target(node_id: impl Into<String>, handle_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            handle_id: handle_id.into(),
            kind: HandleKind::Target,
        }
    }
}

/// Pointer gesture currently in progress.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        node_id: String,
        origin: Position,
    },
    Connecting {
        from: HandleRef,
    },
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::Dragging { .. } => "dragging",
            Interaction::Connecting { .. } => "connecting",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}

/// Serializable view state of one canvas instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasState {
    pub interaction: Interaction,
    pub selected_node_id: Option<String>,
}
