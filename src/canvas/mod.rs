//! Interactive canvas state: a detached, editable copy of an assembled graph.
//!
//! The canvas tracks one pointer gesture at a time:
//!
//! ```text
//! Idle --begin_drag--> Dragging --end_drag--> Idle
//! Idle --begin_connect--> Connecting --end_connect--> Idle
//! ```
//!
//! Edits never touch the assembler's output or the backend flow. Persisting them
//! is the host's job, driven by the [`CanvasObserver`] notifications.

use crate::error::CanvasError;
use crate::render::{AssembledGraph, Position, RenderEdge, RenderNode};

mod state;
mod surface;

pub use state::{CanvasState, HandleKind, HandleRef, Interaction};
pub use surface::{CanvasEvent, CanvasObserver, NoopObserver, RecordingObserver, RenderSurface};

pub struct Canvas<O: CanvasObserver = NoopObserver> {
    nodes: Vec<RenderNode>,
    edges: Vec<RenderEdge>,
    state: CanvasState,
    observer: O,
}

impl Canvas<NoopObserver> {
    pub fn new(graph: &AssembledGraph) -> Self {
        Self::with_observer(graph, NoopObserver)
    }
}

impl<O: CanvasObserver> Canvas<O> {
    pub fn with_observer(graph: &AssembledGraph, observer: O) -> Self {
        Self {
            nodes: graph.nodes.clone(),
            edges: graph.edges.clone(),
            state: CanvasState::default(),
            observer,
        }
    }

    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[RenderEdge] {
        &self.edges
    }

    pub fn state(&self) -> &CanvasState {
        &self.state
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn selected_node(&self) -> Option<&RenderNode> {
        self.state
            .selected_node_id
            .as_deref()
            .and_then(|id| self.node(id))
    }

    /// Replaces the node and edge sets with a freshly assembled graph.
    ///
    /// Any gesture in progress is abandoned. The selection survives if the
    /// selected node still exists; otherwise the host is told it was cleared.
    pub fn reload(&mut self, graph: &AssembledGraph) {
        self.nodes = graph.nodes.clone();
        self.edges = graph.edges.clone();
        self.state.interaction = Interaction::Idle;
        if let Some(id) = self.state.selected_node_id.take() {
            if self.nodes.iter().any(|n| n.id == id) {
                self.state.selected_node_id = Some(id);
            } else {
                self.observer.selection_changed(None);
            }
        }
    }

    pub fn begin_drag(&mut self, node_id: &str) -> Result<(), CanvasError> {
        self.ensure_idle()?;
        let origin = self
            .node(node_id)
            .map(|n| n.position)
            .ok_or_else(|| CanvasError::UnknownNode(node_id.to_string()))?;
        self.state.interaction = Interaction::Dragging {
            node_id: node_id.to_string(),
            origin,
        };
        Ok(())
    }

    /// Moves the dragged node. Only that node's position changes.
    pub fn drag_to(&mut self, position: Position) -> Result<(), CanvasError> {
        let Interaction::Dragging { node_id, .. } = &self.state.interaction else {
            return Err(CanvasError::NoGesture("drag"));
        };
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == *node_id)
            .ok_or_else(|| CanvasError::UnknownNode(node_id.clone()))?;
        node.position = position;
        self.observer.node_moved(&node.id, position);
        Ok(())
    }

    /// Ends the drag, returning the node's final position.
    pub fn end_drag(&mut self) -> Result<Position, CanvasError> {
        let node_id = match std::mem::take(&mut self.state.interaction) {
            Interaction::Dragging { node_id, .. } => node_id,
            other => {
                self.state.interaction = other;
                return Err(CanvasError::NoGesture("drag"));
            }
        };
        self.node(&node_id)
            .map(|n| n.position)
            .ok_or(CanvasError::UnknownNode(node_id))
    }

    pub fn begin_connect(&mut self, from: HandleRef) -> Result<(), CanvasError> {
        self.ensure_idle()?;
        self.check_handle(&from)?;
        self.state.interaction = Interaction::Connecting { from };
        Ok(())
    }

    /// Ends a connect gesture over `over` (or over empty canvas when `None`).
    ///
    /// Returns the new edge when one was appended. Releasing over empty canvas,
    /// over a handle of the same kind, over an unknown handle, or reproducing an
    /// existing connection leaves the edge set untouched.
    pub fn end_connect(&mut self, over: Option<HandleRef>) -> Result<Option<RenderEdge>, CanvasError> {
        let from = match std::mem::take(&mut self.state.interaction) {
            Interaction::Connecting { from } => from,
            other => {
                self.state.interaction = other;
                return Err(CanvasError::NoGesture("connect"));
            }
        };
        let Some(over) = over else {
            return Ok(None);
        };
        if over.kind != from.kind.opposite() || self.check_handle(&over).is_err() {
            tracing::debug!(node_id = %over.node_id, handle = %over.handle_id, "connect released over incompatible handle");
            return Ok(None);
        }

        let (mut source, mut target) = match from.kind {
            HandleKind::Source => (from, over),
            HandleKind::Target => (over, from),
        };
        // Handles match case-insensitively; edges always carry the declared id.
        source.handle_id = self.check_handle(&source)?.to_string();
        target.handle_id = self.check_handle(&target)?.to_string();
        let duplicate = self.edges.iter().any(|e| {
            e.source_node_id == source.node_id
                && e.source_handle_id == source.handle_id
                && e.target_node_id == target.node_id
                && e.target_handle_id.as_deref() == Some(target.handle_id.as_str())
        });
        if duplicate {
            return Ok(None);
        }

        let edge = RenderEdge {
            id: format!(
                "xy-edge__{}{}-{}{}",
                source.node_id, source.handle_id, target.node_id, target.handle_id
            ),
            source_node_id: source.node_id,
            source_handle_id: source.handle_id,
            target_node_id: target.node_id,
            target_handle_id: Some(target.handle_id),
            label: None,
        };
        self.edges.push(edge.clone());
        self.observer.edge_created(&edge);
        Ok(Some(edge))
    }

    /// Abandons any gesture. A dragged node keeps its last position.
    pub fn cancel(&mut self) {
        self.state.interaction = Interaction::Idle;
    }

    pub fn click_node(&mut self, node_id: &str) -> Result<(), CanvasError> {
        let node = self
            .nodes
            .iter()
            .find(|n| n.id == node_id)
            .ok_or_else(|| CanvasError::UnknownNode(node_id.to_string()))?;
        self.state.selected_node_id = Some(node.id.clone());
        self.observer.selection_changed(Some(node));
        Ok(())
    }

    pub fn click_background(&mut self) {
        self.state.selected_node_id = None;
        self.observer.selection_changed(None);
    }

    /// Hands the current node and edge sets to the drawing layer.
    pub fn present<S: RenderSurface>(&self, surface: &mut S) -> S::Handle {
        surface.render(&self.nodes, &self.edges)
    }

    fn ensure_idle(&self) -> Result<(), CanvasError> {
        if self.state.interaction.is_idle() {
            Ok(())
        } else {
            Err(CanvasError::Busy(self.state.interaction.name()))
        }
    }

    /// Resolves a handle against the node's contract, returning the declared id.
    fn check_handle(&self, handle: &HandleRef) -> Result<&'static str, CanvasError> {
        let node = self
            .node(&handle.node_id)
            .ok_or_else(|| CanvasError::UnknownNode(handle.node_id.clone()))?;
        let declared = match handle.kind {
            HandleKind::Source => node.contract.source_handle(&handle.handle_id),
            HandleKind::Target => node.contract.target_handle(&handle.handle_id),
        };
        declared.map(|spec| spec.id).ok_or_else(|| CanvasError::UnknownHandle {
            node_id: handle.node_id.clone(),
            handle_id: handle.handle_id.clone(),
            kind: handle.kind.as_str(),
        })
    }
}
