//! Prelude module for convenient imports
//!
//! Re-exports the types most hosts need to fetch, assemble and edit a flow.
//!
//! # Example
//!
//! ```rust,no_run
//! use medflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/flow.json")?;
//! let flow = FlowGraph::from_json(&json)?;
//!
//! let config = MedflowConfig::from_file("path/to/medflow.json")?;
//! let assembler = Assembler::builder().with_layout_config(&config.layout).build();
//! let graph = assembler.assemble_flow(&flow);
//!
//! for omission in &graph.omissions {
//!     println!("skipped {}: {}", omission.edge_id, omission.reason);
//! }
//! # Ok(())
//! # }
//! ```

// Assembly
pub use crate::assembler::{Assembler, GridLayout, Layout, PipelineLayout};
pub use crate::config::{LayoutConfig, MedflowConfig};
pub use crate::render::{AssembledGraph, EdgeOmission, OmissionReason, Position, RenderEdge, RenderNode};

// Classification and contracts
pub use crate::contract::{HandleSpec, Side, VisualContract, contract_for};
pub use crate::role::{RoleTag, classify};

// Flow data
pub use crate::flow::{
    EdgeDescriptor, FlowGraph, FlowStatus, FlowSummary, FlowVersion, IntoFlowGraph, MediationType,
    StageDescriptor,
};
pub use crate::subnode::{Subnode, SubnodeVersion};

// Canvas
pub use crate::canvas::{Canvas, CanvasObserver, HandleKind, HandleRef, Interaction, RenderSurface};

// Services and views
pub use crate::service::{FlowService, InMemoryFlowService, InMemorySubnodeService, SubnodeService};
pub use crate::view::{FlowDetailView, LoadState, SubnodeAction, SubnodeDetailView};

// Error types
pub use crate::error::{CanvasError, ConfigError, FlowConversionError, ServiceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
