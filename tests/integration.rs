//! Integration tests for Medflow
//!
//! End-to-end tests: fetch a flow through the services, assemble it, edit it on
//! the canvas and export the result.
//!
mod common;
use common::*;
use medflow::canvas::{CanvasEvent, RecordingObserver};
use medflow::export::{summarize, to_dot};
use medflow::flow::{IntoFlowGraph, PipelineListing};
use medflow::prelude::*;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_service_to_canvas_round() {
        let service = InMemoryFlowService::seeded();
        let mut view = FlowDetailView::new("1");
        view.load(&service);
        let graph = view.assembled().expect("flow 1 should load");

        let mut canvas = Canvas::with_observer(graph, RecordingObserver::default());
        let backup = canvas
            .nodes()
            .iter()
            .find(|n| n.role == RoleTag::RawBackup)
            .map(|n| n.id.clone())
            .unwrap();
        let encoder = canvas
            .nodes()
            .iter()
            .find(|n| n.role == RoleTag::Encoder)
            .map(|n| n.id.clone())
            .unwrap();

        canvas.begin_connect(HandleRef::source(&encoder, "output")).unwrap();
        let created = canvas
            .end_connect(Some(HandleRef::target(&backup, "input")))
            .unwrap();
        assert!(created.is_some());
        assert_eq!(canvas.edges().len(), graph.edges.len() + 1);
        // The assembler's output is untouched by canvas edits.
        assert_eq!(view.assembled().map(|g| g.edges.len()), Some(graph.edges.len()));
        assert!(matches!(
            canvas.observer().events.as_slice(),
            [CanvasEvent::EdgeCreated(_)]
        ));
    }

    #[test]
    fn test_pipeline_listing_converts_to_chain() {
        let json = r#"{
            "flow_id": "s1",
            "flow_name": "Charging Stream",
            "stages": [
                { "id": "1", "name": "SFTP Collector", "type": "collector" },
                { "id": "2", "name": "ASN1 Decoder" },
                { "id": "3", "name": "Raw Backup", "subnodeName": "backup-main" }
            ]
        }"#;
        let listing: PipelineListing = serde_json::from_str(json).unwrap();
        let flow = listing.into_flow_graph().unwrap();

        let graph = Assembler::default().assemble_flow(&flow);
        assert_eq!(graph.nodes.len(), 3);
        assert_eq!(graph.edges.len(), 2);
        assert!(graph.omissions.is_empty());
    }

    #[test]
    fn test_exports_describe_the_graph() {
        let (nodes, edges) = sample_stages();
        let mut edges = edges;
        edges.push(EdgeDescriptor::new("bad", "c", "d").with_condition("Maybe"));
        let graph = Assembler::default().assemble(&nodes, &edges);

        let dot = to_dot(&graph, "NCC Sample Flow");
        assert!(dot.starts_with("digraph \"NCC Sample Flow\" {"));
        assert_eq!(dot.matches(" -> ").count(), 4);
        assert!(dot.contains("tailport=\"invalid\""));

        let summary = summarize(&graph);
        assert!(summary.contains("--- NODES (5) ---"));
        assert!(summary.contains("--- OMITTED (1) ---"));
        assert!(summary.contains("validation_bln"));
    }

    #[test]
    fn test_assembled_graph_serializes_with_contracts() {
        let graph = Assembler::default().assemble_flow(&sample_flow());
        let json = serde_json::to_value(&graph).unwrap();

        let validation = &json["nodes"][2];
        assert_eq!(validation["role"], "validation_bln");
        assert_eq!(validation["contract"]["source_handles"][1]["id"], "invalid");
        assert_eq!(json["edges"][2]["source_handle_id"], "valid");
    }
}
