use crate::render::AssembledGraph;
use std::fmt;

/// Graphviz rendering of an assembled graph.
///
/// Nodes are pinned at their assembled positions (`pos`, y flipped for Graphviz's
/// bottom-up axis) and edges leave from their source handle via `tailport`.
pub struct DotExport<'a> {
    graph: &'a AssembledGraph,
    name: &'a str,
}

impl<'a> DotExport<'a> {
    pub fn new(graph: &'a AssembledGraph, name: &'a str) -> Self {
        Self { graph, name }
    }
}

pub fn to_dot(graph: &AssembledGraph, name: &str) -> String {
    DotExport::new(graph, name).to_string()
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

impl fmt::Display for DotExport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph \"{}\" {{", escape(self.name))?;
        writeln!(f, "  rankdir=LR;")?;
        writeln!(f, "  node [shape=box, style=\"rounded,filled\", fillcolor=white];")?;

        for node in &self.graph.nodes {
            // CSS colors (`hsl(var(--x))`) are not Graphviz colors; keep them as a comment.
            writeln!(f, "  // {} color: {}", node.id, node.contract.color)?;
            writeln!(
                f,
                "  \"{}\" [label=\"{}\\n{}\", pos=\"{},{}!\"];",
                escape(&node.id),
                escape(&node.label),
                node.role.caption(),
                node.position.x,
                -node.position.y
            )?;
        }

        for edge in &self.graph.edges {
            write!(
                f,
                "  \"{}\" -> \"{}\" [id=\"{}\", tailport=\"{}\"",
                escape(&edge.source_node_id),
                escape(&edge.target_node_id),
                escape(&edge.id),
                escape(&edge.source_handle_id)
            )?;
            if let Some(label) = &edge.label {
                write!(f, ", label=\"{}\"", escape(label))?;
            }
            writeln!(f, "];")?;
        }

        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::assemble;
    use crate::flow::{EdgeDescriptor, StageDescriptor};

    #[test]
    fn quotes_in_labels_are_escaped() {
        let nodes = vec![StageDescriptor::new("a", "The \"Collector\"", 1)];
        let graph = assemble(&nodes, &[]);
        let dot = to_dot(&graph, "x");
        assert!(dot.contains("The \\\"Collector\\\""));
    }

    #[test]
    fn edges_leave_from_their_handle() {
        let nodes = vec![
            StageDescriptor::new("v", "Validation BLN", 1),
            StageDescriptor::new("e", "Encoder", 2),
        ];
        let edges = vec![EdgeDescriptor::new("e1", "v", "e").with_condition("Valid")];
        let dot = to_dot(&assemble(&nodes, &edges), "flow");
        assert!(dot.contains("tailport=\"valid\""));
        assert!(dot.contains("label=\"Valid\""));
    }
}
