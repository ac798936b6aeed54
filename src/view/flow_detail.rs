use super::{Generation, LoadState, LoadTicket};
use crate::assembler::Assembler;
use crate::error::ServiceError;
use crate::flow::{FlowGraph, FlowStatus, FlowVersion, MediationType, active_version, mark_active};
use crate::render::AssembledGraph;
use crate::service::FlowService;

/// State behind the flow detail page: the flow, its rendered graph and its versions.
///
/// The graph and the version list are fetched independently. Each tracks the
/// latest ticket issued for it, so re-fetching the graph never invalidates a
/// version list that is still in flight.
pub struct FlowDetailView {
    flow_id: String,
    assembler: Assembler,
    generation: Generation,
    graph_ticket: Option<LoadTicket>,
    versions_ticket: Option<LoadTicket>,
    /// Set while the latest graph ticket re-fetches an already loaded graph.
    refreshing: bool,
    refresh_error: Option<ServiceError>,
    state: LoadState,
    graph: Option<FlowGraph>,
    assembled: Option<AssembledGraph>,
    versions: Vec<FlowVersion>,
}

impl FlowDetailView {
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self::with_assembler(flow_id, Assembler::default())
    }

    pub fn with_assembler(flow_id: impl Into<String>, assembler: Assembler) -> Self {
        Self {
            flow_id: flow_id.into(),
            assembler,
            generation: Generation::default(),
            graph_ticket: None,
            versions_ticket: None,
            refreshing: false,
            refresh_error: None,
            state: LoadState::Loading,
            graph: None,
            assembled: None,
            versions: Vec::new(),
        }
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn graph(&self) -> Option<&FlowGraph> {
        self.graph.as_ref()
    }

    pub fn assembled(&self) -> Option<&AssembledGraph> {
        self.assembled.as_ref()
    }

    pub fn versions(&self) -> &[FlowVersion] {
        &self.versions
    }

    pub fn status(&self) -> Option<FlowStatus> {
        self.graph.as_ref().map(FlowGraph::status)
    }

    pub fn mediation_type(&self) -> Option<MediationType> {
        self.graph.as_ref().map(FlowGraph::mediation_type)
    }

    pub fn active_version(&self) -> Option<u32> {
        active_version(&self.versions)
    }

    /// The error of the last failed graph refresh, cleared by the next successful fetch.
    pub fn refresh_error(&self) -> Option<&ServiceError> {
        self.refresh_error.as_ref()
    }

    /// Starts a new load of both the graph and the version list. Results for any
    /// earlier ticket are ignored from now on.
    pub fn begin_load(&mut self) -> LoadTicket {
        if self.graph.is_none() {
            self.state = LoadState::Loading;
        }
        let ticket = self.generation.next();
        self.graph_ticket = Some(ticket);
        self.versions_ticket = Some(ticket);
        self.refreshing = false;
        ticket
    }

    /// Starts a graph-only re-fetch. Earlier graph tickets are superseded; the
    /// version-list ticket is left alone.
    pub fn begin_refresh(&mut self) -> LoadTicket {
        let ticket = self.generation.next();
        self.graph_ticket = Some(ticket);
        self.refreshing = self.graph.is_some();
        ticket
    }

    /// Applies a graph fetch result. Returns `false` if the result was discarded.
    ///
    /// A failed refresh keeps the graph already on screen and records the error in
    /// [`refresh_error`](Self::refresh_error).
    pub fn apply_graph(&mut self, ticket: LoadTicket, result: Result<FlowGraph, ServiceError>) -> bool {
        if !self.is_current(self.graph_ticket, ticket) {
            tracing::debug!(flow_id = %self.flow_id, "discarding stale flow graph");
            return false;
        }
        let refreshing = std::mem::take(&mut self.refreshing);
        match result {
            Ok(graph) => {
                self.assembled = Some(self.assembler.assemble_flow(&graph));
                self.graph = Some(graph);
                self.refresh_error = None;
                self.state = LoadState::Loaded;
            }
            Err(e) if refreshing => {
                tracing::warn!(flow_id = %self.flow_id, error = %e, "flow graph refresh failed, keeping current graph");
                self.refresh_error = Some(e);
            }
            Err(e) => {
                tracing::warn!(flow_id = %self.flow_id, error = %e, "flow graph fetch failed");
                self.graph = None;
                self.assembled = None;
                self.state = LoadState::from_error(&e);
            }
        }
        true
    }

    /// Applies a version-list fetch result. A failure leaves the list empty but does
    /// not fail the page; the graph is what the page is about.
    pub fn apply_versions(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<FlowVersion>, ServiceError>,
    ) -> bool {
        if !self.is_current(self.versions_ticket, ticket) {
            tracing::debug!(flow_id = %self.flow_id, "discarding stale version list");
            return false;
        }
        match result {
            Ok(versions) => self.versions = versions,
            Err(e) => {
                tracing::warn!(flow_id = %self.flow_id, error = %e, "flow version fetch failed");
                self.versions.clear();
            }
        }
        true
    }

    /// Fetches graph and versions under one ticket.
    pub fn load(&mut self, service: &dyn FlowService) {
        let ticket = self.begin_load();
        self.apply_graph(ticket, service.get_flow_graph(&self.flow_id));
        self.apply_versions(ticket, service.list_flow_versions(&self.flow_id));
    }

    /// Re-fetches only the graph, keeping the version list.
    pub fn refresh_graph(&mut self, service: &dyn FlowService) {
        let ticket = self.begin_refresh();
        self.apply_graph(ticket, service.get_flow_graph(&self.flow_id));
    }

    /// Activates `version`, marks it locally and re-fetches the graph. The call
    /// succeeds once the service accepts the activation, even if the refresh fails.
    pub fn activate_version(&mut self, service: &dyn FlowService, version: u32) -> Result<(), ServiceError> {
        self.ensure_live()?;
        service.activate_flow_version(&self.flow_id, version)?;
        mark_active(&mut self.versions, version);
        self.refresh_graph(service);
        Ok(())
    }

    /// Starts the flow. Only a deployed, stopped flow may be started.
    pub fn run(&mut self, service: &dyn FlowService) -> Result<(), ServiceError> {
        self.ensure_live()?;
        self.require_status(FlowStatus::can_start, "start")?;
        service.run_flow(&self.flow_id)?;
        if let Some(graph) = self.graph.as_mut() {
            graph.is_running = true;
        }
        Ok(())
    }

    pub fn stop(&mut self, service: &dyn FlowService) -> Result<(), ServiceError> {
        self.ensure_live()?;
        self.require_status(FlowStatus::can_stop, "stop")?;
        service.stop_flow(&self.flow_id)?;
        if let Some(graph) = self.graph.as_mut() {
            graph.is_running = false;
        }
        Ok(())
    }

    /// Detaches the view. Every in-flight result is discarded after this.
    pub fn dispose(&mut self) {
        self.generation.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.generation.is_disposed()
    }

    fn is_current(&self, latest: Option<LoadTicket>, ticket: LoadTicket) -> bool {
        !self.generation.is_disposed() && latest == Some(ticket)
    }

    fn ensure_live(&self) -> Result<(), ServiceError> {
        if self.generation.is_disposed() {
            return Err(ServiceError::InvalidState {
                id: self.flow_id.clone(),
                message: "view was disposed".to_string(),
            });
        }
        Ok(())
    }

    fn require_status(&self, allowed: fn(FlowStatus) -> bool, action: &str) -> Result<(), ServiceError> {
        match self.status() {
            Some(status) if allowed(status) => Ok(()),
            Some(status) => Err(ServiceError::InvalidState {
                id: self.flow_id.clone(),
                message: format!("cannot {} a {} flow", action, status),
            }),
            None => Err(ServiceError::InvalidState {
                id: self.flow_id.clone(),
                message: "flow is not loaded".to_string(),
            }),
        }
    }
}
