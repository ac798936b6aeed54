//! Canvas interaction tests: selection, dragging and drawing connections.
mod common;
use common::*;
use medflow::assembler::assemble;
use medflow::canvas::{CanvasEvent, RecordingObserver};
use medflow::prelude::*;

fn sample_canvas() -> Canvas<RecordingObserver> {
    let (nodes, edges) = sample_stages();
    Canvas::with_observer(&assemble(&nodes, &edges), RecordingObserver::default())
}

#[cfg(test)]
mod canvas_tests {
    use super::*;

    #[test]
    fn test_click_selects_and_background_clears() {
        let mut canvas = sample_canvas();
        canvas.click_node("c").unwrap();
        assert_eq!(canvas.selected_node().map(|n| n.role), Some(RoleTag::ValidationBln));

        canvas.click_background();
        assert!(canvas.selected_node().is_none());
        assert_eq!(
            canvas.observer_mut().drain(),
            [
                CanvasEvent::SelectionChanged(Some("c".to_string())),
                CanvasEvent::SelectionChanged(None),
            ]
        );
    }

    #[test]
    fn test_click_on_unknown_node_fails() {
        let mut canvas = sample_canvas();
        assert_eq!(
            canvas.click_node("zz"),
            Err(CanvasError::UnknownNode("zz".to_string()))
        );
        assert!(canvas.observer().events.is_empty());
    }

    #[test]
    fn test_drag_moves_only_the_dragged_node() {
        let mut canvas = sample_canvas();
        let before: Vec<_> = canvas.nodes().iter().map(|n| n.position).collect();

        canvas.begin_drag("b").unwrap();
        canvas.drag_to(Position::new(420.0, 180.0)).unwrap();
        canvas.drag_to(Position::new(450.0, 200.0)).unwrap();
        let end = canvas.end_drag().unwrap();

        assert_eq!(end, Position::new(450.0, 200.0));
        assert!(canvas.state().interaction.is_idle());
        for (node, old) in canvas.nodes().iter().zip(before) {
            if node.id != "b" {
                assert_eq!(node.position, old);
            }
        }
        let moves = canvas
            .observer()
            .events
            .iter()
            .filter(|e| matches!(e, CanvasEvent::NodeMoved { .. }))
            .count();
        assert_eq!(moves, 2);
    }

    #[test]
    fn test_gestures_do_not_overlap() {
        let mut canvas = sample_canvas();
        canvas.begin_drag("a").unwrap();
        assert_eq!(
            canvas.begin_connect(HandleRef::source("a", "output")),
            Err(CanvasError::Busy("dragging"))
        );
        assert_eq!(canvas.end_connect(None), Err(CanvasError::NoGesture("connect")));
        // The failed end_connect must not have cancelled the drag.
        assert!(canvas.end_drag().is_ok());
        assert_eq!(canvas.drag_to(Position::default()), Err(CanvasError::NoGesture("drag")));
    }

    #[test]
    fn test_connect_source_to_target_appends_edge() {
        let mut canvas = sample_canvas();
        canvas.begin_connect(HandleRef::source("a", "output")).unwrap();
        let edge = canvas
            .end_connect(Some(HandleRef::target("e", "input")))
            .unwrap()
            .expect("edge should be created");

        assert_eq!(edge.id, "xy-edge__aoutput-einput");
        assert_eq!(edge.target_handle_id.as_deref(), Some("input"));
        assert_eq!(canvas.edges().len(), 5);
        assert_eq!(canvas.observer().events, [CanvasEvent::EdgeCreated(edge)]);
    }

    #[test]
    fn test_connect_from_target_is_normalized() {
        let mut canvas = sample_canvas();
        canvas.begin_connect(HandleRef::target("d", "input")).unwrap();
        let edge = canvas
            .end_connect(Some(HandleRef::source("c", "invalid")))
            .unwrap()
            .unwrap();
        assert_eq!(edge.source_node_id, "c");
        assert_eq!(edge.source_handle_id, "invalid");
        assert_eq!(edge.target_node_id, "d");
    }

    #[test]
    fn test_connect_released_over_nothing_or_same_kind_is_noop() {
        let mut canvas = sample_canvas();

        canvas.begin_connect(HandleRef::source("a", "output")).unwrap();
        assert_eq!(canvas.end_connect(None), Ok(None));

        canvas.begin_connect(HandleRef::source("a", "output")).unwrap();
        assert_eq!(canvas.end_connect(Some(HandleRef::source("b", "output"))), Ok(None));

        canvas.begin_connect(HandleRef::source("a", "output")).unwrap();
        assert_eq!(canvas.end_connect(Some(HandleRef::target("a", "input"))), Ok(None));

        assert_eq!(canvas.edges().len(), 4);
        assert!(canvas.state().interaction.is_idle());
    }

    #[test]
    fn test_duplicate_connection_is_ignored() {
        let mut canvas = sample_canvas();
        for _ in 0..2 {
            canvas.begin_connect(HandleRef::source("b", "output")).unwrap();
            canvas.end_connect(Some(HandleRef::target("e", "input"))).unwrap();
        }
        assert_eq!(canvas.edges().len(), 5);
    }

    #[test]
    fn test_connect_stores_declared_handle_ids() {
        let mut canvas = sample_canvas();
        canvas.begin_connect(HandleRef::source("b", "OUTPUT")).unwrap();
        let edge = canvas
            .end_connect(Some(HandleRef::target("e", "Input")))
            .unwrap()
            .unwrap();
        assert_eq!(edge.id, "xy-edge__boutput-einput");
        assert_eq!(edge.source_handle_id, "output");
        assert_eq!(edge.target_handle_id.as_deref(), Some("input"));

        // Same connection in a different spelling is a duplicate.
        canvas.begin_connect(HandleRef::source("b", "output")).unwrap();
        assert_eq!(canvas.end_connect(Some(HandleRef::target("e", "INPUT"))), Ok(None));
        assert_eq!(canvas.edges().len(), 5);
    }

    #[test]
    fn test_connect_from_undeclared_handle_fails() {
        let mut canvas = sample_canvas();
        let err = canvas
            .begin_connect(HandleRef::source("b", "valid"))
            .unwrap_err();
        assert!(matches!(err, CanvasError::UnknownHandle { kind: "source", .. }));
        assert!(canvas.state().interaction.is_idle());
    }

    #[test]
    fn test_reload_keeps_surviving_selection() {
        let mut canvas = sample_canvas();
        canvas.click_node("a").unwrap();
        canvas.observer_mut().drain();

        let (nodes, edges) = sample_stages();
        canvas.reload(&assemble(&nodes[..3], &edges));
        assert_eq!(canvas.state().selected_node_id.as_deref(), Some("a"));
        assert!(canvas.observer().events.is_empty());

        canvas.reload(&assemble(&nodes[1..], &edges));
        assert!(canvas.selected_node().is_none());
        assert_eq!(canvas.observer().events, [CanvasEvent::SelectionChanged(None)]);
    }

    #[test]
    fn test_present_hands_current_sets_to_surface() {
        let mut canvas = sample_canvas();
        canvas.begin_drag("a").unwrap();
        canvas.drag_to(Position::new(0.0, 0.0)).unwrap();
        canvas.end_drag().unwrap();

        let mut surface = medflow::export::TextSurface::new(medflow::export::TextFormat::Summary, "sample");
        let text = canvas.present(&mut surface);
        assert!(text.contains("(0, 0)"));
        assert!(text.contains("--- EDGES (4) ---"));
    }
}
