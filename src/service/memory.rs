use super::{FlowService, SubnodeService, mock};
use crate::error::ServiceError;
use crate::flow::{FlowGraph, FlowSummary, FlowVersion, mark_active};
use crate::subnode::{CreateVersionRequest, Subnode, SubnodeVersion};
use ahash::AHashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct FlowRecord {
    graph: FlowGraph,
    versions: Vec<FlowVersion>,
}

/// Flow service backed by an in-process map.
#[derive(Default)]
pub struct InMemoryFlowService {
    flows: RwLock<AHashMap<String, FlowRecord>>,
}

impl InMemoryFlowService {
    pub fn new() -> Self {
        Self::default()
    }

    /// A service preloaded with the mock mediation flows.
    pub fn seeded() -> Self {
        let flows = mock::flows()
            .into_iter()
            .map(|(graph, versions)| (graph.id.clone(), FlowRecord { graph, versions }))
            .collect();
        Self {
            flows: RwLock::new(flows),
        }
    }

    /// Inserts or replaces a flow together with its version history.
    pub fn insert_flow(&self, graph: FlowGraph, versions: Vec<FlowVersion>) -> Result<(), ServiceError> {
        let mut flows = self.write()?;
        flows.insert(graph.id.clone(), FlowRecord { graph, versions });
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, AHashMap<String, FlowRecord>>, ServiceError> {
        self.flows
            .read()
            .map_err(|_| ServiceError::Unavailable("flow store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, AHashMap<String, FlowRecord>>, ServiceError> {
        self.flows
            .write()
            .map_err(|_| ServiceError::Unavailable("flow store lock poisoned".to_string()))
    }
}

impl FlowService for InMemoryFlowService {
    fn list_flows(&self) -> Result<Vec<FlowSummary>, ServiceError> {
        let flows = self.read()?;
        let mut summaries: Vec<FlowSummary> = flows.values().map(|r| r.graph.summary()).collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(summaries)
    }

    fn get_flow_graph(&self, flow_id: &str) -> Result<FlowGraph, ServiceError> {
        let flows = self.read()?;
        flows
            .get(flow_id)
            .map(|r| r.graph.clone())
            .ok_or_else(|| ServiceError::FlowNotFound(flow_id.to_string()))
    }

    fn list_flow_versions(&self, flow_id: &str) -> Result<Vec<FlowVersion>, ServiceError> {
        let flows = self.read()?;
        flows
            .get(flow_id)
            .map(|r| r.versions.clone())
            .ok_or_else(|| ServiceError::FlowNotFound(flow_id.to_string()))
    }

    fn activate_flow_version(&self, flow_id: &str, version: u32) -> Result<(), ServiceError> {
        let mut flows = self.write()?;
        let record = flows
            .get_mut(flow_id)
            .ok_or_else(|| ServiceError::FlowNotFound(flow_id.to_string()))?;
        if !record.versions.iter().any(|v| v.version == version) {
            return Err(ServiceError::VersionNotFound {
                owner_id: flow_id.to_string(),
                version,
            });
        }
        mark_active(&mut record.versions, version);
        record.graph.version = Some(version.to_string());
        tracing::info!(flow_id, version, "flow version activated");
        Ok(())
    }

    fn run_flow(&self, flow_id: &str) -> Result<(), ServiceError> {
        let mut flows = self.write()?;
        let record = flows
            .get_mut(flow_id)
            .ok_or_else(|| ServiceError::FlowNotFound(flow_id.to_string()))?;
        if !record.graph.status().can_start() {
            return Err(ServiceError::InvalidState {
                id: flow_id.to_string(),
                message: format!("cannot start a {} flow", record.graph.status()),
            });
        }
        record.graph.is_running = true;
        tracing::info!(flow_id, "flow started");
        Ok(())
    }

    fn stop_flow(&self, flow_id: &str) -> Result<(), ServiceError> {
        let mut flows = self.write()?;
        let record = flows
            .get_mut(flow_id)
            .ok_or_else(|| ServiceError::FlowNotFound(flow_id.to_string()))?;
        if !record.graph.is_running {
            return Err(ServiceError::InvalidState {
                id: flow_id.to_string(),
                message: "flow is not running".to_string(),
            });
        }
        record.graph.is_running = false;
        tracing::info!(flow_id, "flow stopped");
        Ok(())
    }
}

/// Subnode service backed by an in-process map.
#[derive(Default)]
pub struct InMemorySubnodeService {
    subnodes: RwLock<AHashMap<String, Subnode>>,
}

impl InMemorySubnodeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let subnodes = mock::subnodes()
            .into_iter()
            .map(|subnode| (subnode.id.clone(), subnode))
            .collect();
        Self {
            subnodes: RwLock::new(subnodes),
        }
    }

    pub fn insert_subnode(&self, subnode: Subnode) -> Result<(), ServiceError> {
        let mut subnodes = self.write()?;
        subnodes.insert(subnode.id.clone(), subnode);
        Ok(())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, AHashMap<String, Subnode>>, ServiceError> {
        self.subnodes
            .write()
            .map_err(|_| ServiceError::Unavailable("subnode store lock poisoned".to_string()))
    }

    fn with_subnode<T>(
        &self,
        subnode_id: &str,
        f: impl FnOnce(&mut Subnode) -> Result<T, ServiceError>,
    ) -> Result<T, ServiceError> {
        let mut subnodes = self.write()?;
        let subnode = subnodes
            .get_mut(subnode_id)
            .ok_or_else(|| ServiceError::SubnodeNotFound(subnode_id.to_string()))?;
        f(subnode)
    }
}

fn find_version_mut<'a>(
    subnode: &'a mut Subnode,
    version: u32,
) -> Result<&'a mut SubnodeVersion, ServiceError> {
    let owner_id = subnode.id.clone();
    subnode
        .versions
        .iter_mut()
        .find(|v| v.version == version)
        .ok_or(ServiceError::VersionNotFound { owner_id, version })
}

impl SubnodeService for InMemorySubnodeService {
    fn get_subnode(&self, subnode_id: &str) -> Result<Subnode, ServiceError> {
        let subnodes = self
            .subnodes
            .read()
            .map_err(|_| ServiceError::Unavailable("subnode store lock poisoned".to_string()))?;
        subnodes
            .get(subnode_id)
            .cloned()
            .ok_or_else(|| ServiceError::SubnodeNotFound(subnode_id.to_string()))
    }

    fn activate_version(&self, subnode_id: &str, version: u32) -> Result<(), ServiceError> {
        self.with_subnode(subnode_id, |subnode| {
            find_version_mut(subnode, version)?;
            for v in subnode.versions.iter_mut() {
                v.is_deployed = v.version == version;
            }
            tracing::info!(subnode_id, version, "subnode version deployed");
            Ok(())
        })
    }

    fn undeploy_version(&self, subnode_id: &str, version: u32) -> Result<(), ServiceError> {
        self.with_subnode(subnode_id, |subnode| {
            let entry = find_version_mut(subnode, version)?;
            if !entry.is_deployed {
                return Err(ServiceError::InvalidState {
                    id: subnode_id.to_string(),
                    message: format!("version {} is not deployed", version),
                });
            }
            entry.is_deployed = false;
            tracing::info!(subnode_id, version, "subnode version undeployed");
            Ok(())
        })
    }

    fn create_editable_version(
        &self,
        subnode_id: &str,
        request: CreateVersionRequest,
    ) -> Result<SubnodeVersion, ServiceError> {
        self.with_subnode(subnode_id, |subnode| {
            let base = subnode.default_version();
            let parameter_values = base.map(|v| v.parameter_values.clone()).unwrap_or_default();
            let next = subnode.latest_version().map_or(1, |v| v.version + 1);
            let created = SubnodeVersion {
                version: next,
                is_deployed: false,
                parameter_values,
                created_by: request.created_by.unwrap_or_else(|| "system".to_string()),
                created_at: String::new(),
                version_comment: Some(request.version_comment),
            };
            subnode.versions.push(created.clone());
            tracing::info!(subnode_id, version = next, "editable subnode version created");
            Ok(created)
        })
    }
}
