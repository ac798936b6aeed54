use super::{Generation, LoadState, LoadTicket};
use crate::error::ServiceError;
use crate::service::SubnodeService;
use crate::subnode::{CreateVersionRequest, Subnode, SubnodeVersion};
use serde::Serialize;
use std::fmt;

/// Header actions offered for the selected subnode version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnodeAction {
    EditVersion,
    Deploy,
    CreateNewVersion,
    Undeploy,
}

impl fmt::Display for SubnodeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubnodeAction::EditVersion => "Edit Version",
            SubnodeAction::Deploy => "Deploy",
            SubnodeAction::CreateNewVersion => "Create New Version",
            SubnodeAction::Undeploy => "Undeploy",
        };
        f.write_str(s)
    }
}

pub struct SubnodeDetailView {
    subnode_id: String,
    generation: Generation,
    state: LoadState,
    subnode: Option<Subnode>,
    selected: Option<u32>,
}

impl SubnodeDetailView {
    pub fn new(subnode_id: impl Into<String>) -> Self {
        Self {
            subnode_id: subnode_id.into(),
            generation: Generation::default(),
            state: LoadState::Loading,
            subnode: None,
            selected: None,
        }
    }

    pub fn subnode_id(&self) -> &str {
        &self.subnode_id
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn subnode(&self) -> Option<&Subnode> {
        self.subnode.as_ref()
    }

    pub fn selected_version(&self) -> Option<&SubnodeVersion> {
        let version = self.selected?;
        self.subnode.as_ref()?.version(version)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        if self.subnode.is_none() {
            self.state = LoadState::Loading;
        }
        self.generation.next()
    }

    /// Applies a fetch result. The current selection survives a refresh when that
    /// version still exists; otherwise the deployed (else newest) version is selected.
    pub fn apply_subnode(&mut self, ticket: LoadTicket, result: Result<Subnode, ServiceError>) -> bool {
        if !self.generation.accepts(ticket) {
            tracing::debug!(subnode_id = %self.subnode_id, "discarding stale subnode");
            return false;
        }
        match result {
            Ok(subnode) => {
                let kept = self.selected.filter(|v| subnode.version(*v).is_some());
                self.selected = kept.or_else(|| subnode.default_version().map(|v| v.version));
                self.subnode = Some(subnode);
                self.state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!(subnode_id = %self.subnode_id, error = %e, "subnode fetch failed");
                self.subnode = None;
                self.selected = None;
                self.state = LoadState::from_error(&e);
            }
        }
        true
    }

    pub fn load(&mut self, service: &dyn SubnodeService) {
        let ticket = self.begin_load();
        self.apply_subnode(ticket, service.get_subnode(&self.subnode_id));
    }

    pub fn select_version(&mut self, version: u32) -> Result<(), ServiceError> {
        let exists = self
            .subnode
            .as_ref()
            .is_some_and(|s| s.version(version).is_some());
        if !exists {
            return Err(ServiceError::VersionNotFound {
                owner_id: self.subnode_id.clone(),
                version,
            });
        }
        self.selected = Some(version);
        Ok(())
    }

    pub fn available_actions(&self) -> Vec<SubnodeAction> {
        match self.selected_version() {
            Some(v) if v.is_deployed => vec![SubnodeAction::CreateNewVersion, SubnodeAction::Undeploy],
            Some(_) => vec![SubnodeAction::EditVersion, SubnodeAction::Deploy],
            None => Vec::new(),
        }
    }

    /// Parameter rows of the selected version, in name order.
    pub fn parameter_rows(&self) -> Vec<(&str, &str)> {
        self.selected_version()
            .map(|v| v.parameter_rows().collect())
            .unwrap_or_default()
    }

    /// Deploys the selected version.
    pub fn deploy(&mut self, service: &dyn SubnodeService) -> Result<(), ServiceError> {
        let version = self.require_action(SubnodeAction::Deploy)?;
        service.activate_version(&self.subnode_id, version)?;
        self.load(service);
        Ok(())
    }

    pub fn undeploy(&mut self, service: &dyn SubnodeService) -> Result<(), ServiceError> {
        let version = self.require_action(SubnodeAction::Undeploy)?;
        service.undeploy_version(&self.subnode_id, version)?;
        self.load(service);
        Ok(())
    }

    /// Deploys any version picked from the history table, selecting it once the
    /// deployment succeeds.
    pub fn activate_from_history(&mut self, service: &dyn SubnodeService, version: u32) -> Result<(), ServiceError> {
        self.ensure_live()?;
        service.activate_version(&self.subnode_id, version)?;
        self.load(service);
        self.select_version(version)
    }

    /// Creates an editable copy and selects it.
    pub fn create_new_version(
        &mut self,
        service: &dyn SubnodeService,
        comment: impl Into<String>,
    ) -> Result<SubnodeVersion, ServiceError> {
        self.require_action(SubnodeAction::CreateNewVersion)?;
        let request = CreateVersionRequest {
            version_comment: comment.into(),
            created_by: None,
        };
        let created = service.create_editable_version(&self.subnode_id, request)?;
        self.selected = Some(created.version);
        self.load(service);
        Ok(created)
    }

    pub fn dispose(&mut self) {
        self.generation.dispose();
    }

    fn ensure_live(&self) -> Result<(), ServiceError> {
        if self.generation.is_disposed() {
            return Err(ServiceError::InvalidState {
                id: self.subnode_id.clone(),
                message: "view was disposed".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the selected version number if `action` is currently offered.
    fn require_action(&self, action: SubnodeAction) -> Result<u32, ServiceError> {
        self.ensure_live()?;
        let version = self.selected_version().map(|v| v.version);
        match version {
            Some(v) if self.available_actions().contains(&action) => Ok(v),
            _ => Err(ServiceError::InvalidState {
                id: self.subnode_id.clone(),
                message: format!("'{}' is not available for the selected version", action),
            }),
        }
    }
}
