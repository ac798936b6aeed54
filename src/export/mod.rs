//! Plain-text renderings of an assembled graph.
//!
//! These are what the CLI prints in place of a browser canvas: a Graphviz digraph
//! and a fixed-width summary table.

use crate::canvas::RenderSurface;
use crate::render::{AssembledGraph, RenderEdge, RenderNode};

mod dot;
mod summary;

pub use dot::{DotExport, to_dot};
pub use summary::{SummaryTable, summarize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Summary,
    Dot,
}

/// A [`RenderSurface`] that renders into a string.
#[derive(Debug, Clone, Default)]
pub struct TextSurface {
    pub format: TextFormat,
    pub name: String,
}

impl TextSurface {
    pub fn new(format: TextFormat, name: impl Into<String>) -> Self {
        Self {
            format,
            name: name.into(),
        }
    }
}

impl RenderSurface for TextSurface {
    type Handle = String;

    fn render(&mut self, nodes: &[RenderNode], edges: &[RenderEdge]) -> String {
        let graph = AssembledGraph {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
            omissions: Vec::new(),
        };
        match self.format {
            TextFormat::Summary => summarize(&graph),
            TextFormat::Dot => to_dot(&graph, &self.name),
        }
    }
}
