//! Turns a backend flow description into a positioned, handle-resolved graph.
//!
//! Assembly is a pure function of its inputs. It never fails: duplicate stages
//! are dropped (first occurrence wins), unnamed stages classify as `generic`, and
//! edges that cannot be attached are omitted and reported in
//! [`AssembledGraph::omissions`].

use crate::config::LayoutConfig;
use crate::contract::contract_for;
use crate::flow::{EdgeDescriptor, FlowGraph, StageDescriptor};
use crate::render::{AssembledGraph, EdgeOmission, OmissionReason, RenderEdge, RenderNode};
use crate::role::classify_optional;
use ahash::AHashMap;
use itertools::Itertools;

mod layout;
mod resolve;

pub use layout::{GridLayout, Layout, PipelineLayout};
use resolve::{HandleResolution, resolve_source_handle};

pub struct Assembler {
    layout: Box<dyn Layout>,
}

pub struct AssemblerBuilder {
    layout: Box<dyn Layout>,
}

impl AssemblerBuilder {
    pub fn new() -> Self {
        Self {
            layout: Box::new(GridLayout::default()),
        }
    }

    pub fn with_layout(mut self, layout: impl Layout + 'static) -> Self {
        self.layout = Box::new(layout);
        self
    }

    pub fn with_layout_config(mut self, config: &LayoutConfig) -> Self {
        self.layout = config.build_layout();
        self
    }

    pub fn build(self) -> Assembler {
        Assembler {
            layout: self.layout,
        }
    }
}

impl Default for AssemblerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Assembler {
    fn default() -> Self {
        AssemblerBuilder::new().build()
    }
}

impl Assembler {
    pub fn builder() -> AssemblerBuilder {
        AssemblerBuilder::new()
    }

    pub fn layout_name(&self) -> &str {
        self.layout.name()
    }

    pub fn assemble_flow(&self, flow: &FlowGraph) -> AssembledGraph {
        self.assemble(&flow.nodes, &flow.edges)
    }

    pub fn assemble(&self, nodes: &[StageDescriptor], edges: &[EdgeDescriptor]) -> AssembledGraph {
        let render_nodes: Vec<RenderNode> = nodes
            .iter()
            .unique_by(|stage| stage.id.as_str())
            .enumerate()
            .map(|(index, stage)| self.build_node(index, stage))
            .collect();

        let duplicates = nodes.len() - render_nodes.len();
        if duplicates > 0 {
            tracing::debug!(duplicates, "dropped duplicate stage ids");
        }

        let by_id: AHashMap<&str, &RenderNode> =
            render_nodes.iter().map(|n| (n.id.as_str(), n)).collect();

        let mut render_edges = Vec::with_capacity(edges.len());
        let mut omissions = Vec::new();
        for edge in edges {
            match Self::attach_edge(edge, &by_id) {
                Ok(render_edge) => render_edges.push(render_edge),
                Err(reason) => {
                    tracing::warn!(edge_id = %edge.id, %reason, "edge omitted from render set");
                    omissions.push(EdgeOmission {
                        edge_id: edge.id.clone(),
                        reason,
                    });
                }
            }
        }

        AssembledGraph {
            nodes: render_nodes,
            edges: render_edges,
            omissions,
        }
    }

    fn build_node(&self, index: usize, stage: &StageDescriptor) -> RenderNode {
        let role = stage
            .role
            .unwrap_or_else(|| classify_optional(stage.name.as_deref()));
        RenderNode {
            id: stage.id.clone(),
            role,
            position: self.layout.position(index),
            label: stage.name.clone().unwrap_or_default(),
            description: format!("Order: {}", stage.order),
            selected_subnode_id: stage.selected_subnode_id.clone(),
            contract: contract_for(role),
        }
    }

    fn attach_edge(
        edge: &EdgeDescriptor,
        by_id: &AHashMap<&str, &RenderNode>,
    ) -> Result<RenderEdge, OmissionReason> {
        let source = by_id
            .get(edge.from_node.as_str())
            .ok_or_else(|| OmissionReason::UnknownSource {
                node_id: edge.from_node.clone(),
            })?;
        let target = by_id
            .get(edge.to_node.as_str())
            .ok_or_else(|| OmissionReason::UnknownTarget {
                node_id: edge.to_node.clone(),
            })?;

        let condition = edge.effective_condition();
        let resolution = resolve_source_handle(source.contract, condition);
        if let HandleResolution::Default(handle) = resolution {
            if condition.is_some() {
                tracing::debug!(edge_id = %edge.id, handle, "condition matched no output, using default");
            }
        }
        let source_handle = resolution
            .handle_id()
            .ok_or_else(|| OmissionReason::Unattachable {
                source_role: source.role,
                condition: condition.map(str::to_string),
            })?;

        Ok(RenderEdge {
            id: edge.id.clone(),
            source_node_id: source.id.clone(),
            source_handle_id: source_handle.to_string(),
            target_node_id: target.id.clone(),
            target_handle_id: target.contract.sole_target_handle().map(|h| h.id.to_string()),
            label: condition.map(str::to_string),
        })
    }
}

/// Assembles with the default grid layout.
pub fn assemble(nodes: &[StageDescriptor], edges: &[EdgeDescriptor]) -> AssembledGraph {
    Assembler::default().assemble(nodes, edges)
}

/// Chains stages in the given order: `e{a}-{b}` for each consecutive pair.
pub fn sequential_edges(nodes: &[StageDescriptor]) -> Vec<EdgeDescriptor> {
    nodes
        .iter()
        .tuple_windows()
        .map(|(a, b)| EdgeDescriptor::new(format!("e{}-{}", a.id, b.id), &a.id, &b.id))
        .collect()
}
