use crate::render::{Position, RenderEdge, RenderNode};

/// Receives the canvas's notifications. All methods default to no-ops.
pub trait CanvasObserver {
    /// `None` when the background was clicked.
    fn selection_changed(&mut self, _node: Option<&RenderNode>) {}
    fn node_moved(&mut self, _node_id: &str, _position: Position) {}
    fn edge_created(&mut self, _edge: &RenderEdge) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CanvasObserver for NoopObserver {}

/// Events captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    SelectionChanged(Option<String>),
    NodeMoved { node_id: String, position: Position },
    EdgeCreated(RenderEdge),
}

/// Collects every notification in order. Useful for hosts that apply changes in batches.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub events: Vec<CanvasEvent>,
}

impl RecordingObserver {
    pub fn drain(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }
}

impl CanvasObserver for RecordingObserver {
    fn selection_changed(&mut self, node: Option<&RenderNode>) {
        self.events
            .push(CanvasEvent::SelectionChanged(node.map(|n| n.id.clone())));
    }

    fn node_moved(&mut self, node_id: &str, position: Position) {
        self.events.push(CanvasEvent::NodeMoved {
            node_id: node_id.to_string(),
            position,
        });
    }

    fn edge_created(&mut self, edge: &RenderEdge) {
        self.events.push(CanvasEvent::EdgeCreated(edge.clone()));
    }
}

/// The drawing layer. Implementations own pan, zoom and pixels; the canvas only
/// hands over the current node and edge sets.
pub trait RenderSurface {
    type Handle;

    fn render(&mut self, nodes: &[RenderNode], edges: &[RenderEdge]) -> Self::Handle;
}
