//! Typed interfaces over the flow and subnode endpoints.
//!
//! Transport is out of scope: hosts implement these traits over their HTTP client.
//! [`InMemoryFlowService`] and [`InMemorySubnodeService`] stand in for the backend
//! and enforce the same invariants it does (one active flow version, one
//! deployed subnode version).

use crate::error::ServiceError;
use crate::flow::{FlowGraph, FlowSummary, FlowVersion};
use crate::subnode::{CreateVersionRequest, Subnode, SubnodeVersion};

mod memory;
pub mod mock;

pub use memory::{InMemoryFlowService, InMemorySubnodeService};

pub trait FlowService: Send + Sync {
    fn list_flows(&self) -> Result<Vec<FlowSummary>, ServiceError>;

    fn get_flow_graph(&self, flow_id: &str) -> Result<FlowGraph, ServiceError>;

    fn list_flow_versions(&self, flow_id: &str) -> Result<Vec<FlowVersion>, ServiceError>;

    /// Fails with `VersionNotFound` if `version` does not exist for the flow.
    fn activate_flow_version(&self, flow_id: &str, version: u32) -> Result<(), ServiceError>;

    fn run_flow(&self, flow_id: &str) -> Result<(), ServiceError>;

    fn stop_flow(&self, flow_id: &str) -> Result<(), ServiceError>;
}

pub trait SubnodeService: Send + Sync {
    fn get_subnode(&self, subnode_id: &str) -> Result<Subnode, ServiceError>;

    /// Deploys `version`, undeploying whichever version was deployed before.
    fn activate_version(&self, subnode_id: &str, version: u32) -> Result<(), ServiceError>;

    fn undeploy_version(&self, subnode_id: &str, version: u32) -> Result<(), ServiceError>;

    fn create_editable_version(
        &self,
        subnode_id: &str,
        request: CreateVersionRequest,
    ) -> Result<SubnodeVersion, ServiceError>;
}
