use crate::render::AssembledGraph;
use std::fmt;

/// Fixed-width table of nodes, edges and omitted edges.
pub struct SummaryTable<'a>(pub &'a AssembledGraph);

pub fn summarize(graph: &AssembledGraph) -> String {
    SummaryTable(graph).to_string()
}

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let graph = self.0;
        writeln!(f, "--- NODES ({}) ---", graph.nodes.len())?;
        writeln!(f, "{:<16} {:<28} {:<16} {:>14}", "ID", "LABEL", "ROLE", "POSITION")?;
        for node in &graph.nodes {
            writeln!(
                f,
                "{:<16} {:<28} {:<16} {:>14}",
                node.id,
                node.label,
                node.role,
                node.position.to_string()
            )?;
        }

        writeln!(f, "\n--- EDGES ({}) ---", graph.edges.len())?;
        for edge in &graph.edges {
            write!(
                f,
                "{:<16} {} [{}] -> {}",
                edge.id, edge.source_node_id, edge.source_handle_id, edge.target_node_id
            )?;
            match &edge.label {
                Some(label) => writeln!(f, "  ({})", label)?,
                None => writeln!(f)?,
            }
        }

        if !graph.omissions.is_empty() {
            writeln!(f, "\n--- OMITTED ({}) ---", graph.omissions.len())?;
            for omission in &graph.omissions {
                writeln!(f, "{:<16} {}", omission.edge_id, omission.reason)?;
            }
        }
        Ok(())
    }
}
