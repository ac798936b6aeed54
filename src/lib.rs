//! # Medflow - Mediation Flow Graph Model
//!
//! **Medflow** turns the stage-and-edge description of a telecom mediation flow
//! (CDR collection, decoding, validation, enrichment, encoding, backup) into a
//! positioned, classified graph that a canvas can draw and edit.
//!
//! ## Core Workflow
//!
//! 1.  **Fetch**: Obtain a `FlowGraph` from a `FlowService` (or parse one with `FlowGraph::from_json`,
//!     or convert your own format through `IntoFlowGraph`).
//! 2.  **Assemble**: Use an `Assembler` to deduplicate stages, lay them out, classify each one
//!     into a `RoleTag` and attach every edge to a handle of the node's `VisualContract`.
//! 3.  **Interact**: Load the `AssembledGraph` into a `Canvas` to drag nodes, draw new
//!     connections and track selection. A `CanvasObserver` receives every change.
//!
//! ## Quick Start
//!
//! ```rust
//! use medflow::prelude::*;
//!
//! let flow = FlowGraph::new("1", "NCC Payment Flow").with_stages(
//!     vec![
//!         StageDescriptor::new("n1", "SFTP Collector", 1),
//!         StageDescriptor::new("n2", "Validation BLN", 2),
//!         StageDescriptor::new("n3", "Encoder", 3),
//!     ],
//!     vec![
//!         EdgeDescriptor::new("e1", "n1", "n2"),
//!         EdgeDescriptor::new("e2", "n2", "n3").with_condition("Valid"),
//!     ],
//! );
//!
//! let graph = Assembler::default().assemble_flow(&flow);
//! assert_eq!(graph.nodes[1].role, RoleTag::ValidationBln);
//! assert_eq!(graph.edges[1].source_handle_id, "valid");
//!
//! let mut canvas = Canvas::new(&graph);
//! canvas.click_node("n3").unwrap();
//! assert_eq!(canvas.selected_node().map(|n| n.label.as_str()), Some("Encoder"));
//! ```

pub mod assembler;
pub mod canvas;
pub mod config;
pub mod contract;
pub mod error;
pub mod export;
pub mod flow;
pub mod prelude;
pub mod render;
pub mod role;
pub mod service;
pub mod subnode;
pub mod view;
