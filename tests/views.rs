//! Detail view tests: load lifecycle, stale results and version actions.
mod common;
use common::*;
use medflow::prelude::*;
use medflow::subnode::CreateVersionRequest;

type ServiceResult<T> = std::result::Result<T, ServiceError>;

fn outage<T>() -> ServiceResult<T> {
    Err(ServiceError::Unavailable("backend down".to_string()))
}

/// Delegates to a flow service, except that graph fetches fail.
struct GraphOutage<'a>(&'a InMemoryFlowService);

impl FlowService for GraphOutage<'_> {
    fn list_flows(&self) -> ServiceResult<Vec<FlowSummary>> {
        self.0.list_flows()
    }

    fn get_flow_graph(&self, _flow_id: &str) -> ServiceResult<FlowGraph> {
        outage()
    }

    fn list_flow_versions(&self, flow_id: &str) -> ServiceResult<Vec<FlowVersion>> {
        self.0.list_flow_versions(flow_id)
    }

    fn activate_flow_version(&self, flow_id: &str, version: u32) -> ServiceResult<()> {
        self.0.activate_flow_version(flow_id, version)
    }

    fn run_flow(&self, flow_id: &str) -> ServiceResult<()> {
        self.0.run_flow(flow_id)
    }

    fn stop_flow(&self, flow_id: &str) -> ServiceResult<()> {
        self.0.stop_flow(flow_id)
    }
}

/// Delegates to a subnode service, except that activations fail.
struct ActivationOutage<'a>(&'a InMemorySubnodeService);

impl SubnodeService for ActivationOutage<'_> {
    fn get_subnode(&self, subnode_id: &str) -> ServiceResult<Subnode> {
        self.0.get_subnode(subnode_id)
    }

    fn activate_version(&self, _subnode_id: &str, _version: u32) -> ServiceResult<()> {
        outage()
    }

    fn undeploy_version(&self, subnode_id: &str, version: u32) -> ServiceResult<()> {
        self.0.undeploy_version(subnode_id, version)
    }

    fn create_editable_version(
        &self,
        subnode_id: &str,
        request: CreateVersionRequest,
    ) -> ServiceResult<SubnodeVersion> {
        self.0.create_editable_version(subnode_id, request)
    }
}

#[cfg(test)]
mod flow_view_tests {
    use super::*;

    #[test]
    fn test_load_assembles_graph_and_versions() {
        let service = versioned_flow_service();
        let mut view = FlowDetailView::new("sample");
        assert_eq!(view.state(), &LoadState::Loading);

        view.load(&service);
        assert_eq!(view.state(), &LoadState::Loaded);
        assert_eq!(view.assembled().map(|g| g.nodes.len()), Some(5));
        assert_eq!(view.active_version(), Some(2));
        assert_eq!(view.status(), Some(FlowStatus::Deployed));
        assert_eq!(view.mediation_type(), Some(MediationType::Ncc));
    }

    #[test]
    fn test_missing_flow_is_not_found() {
        let mut view = FlowDetailView::new("ghost");
        view.load(&InMemoryFlowService::new());
        assert_eq!(view.state(), &LoadState::NotFound);
        assert!(view.assembled().is_none());
    }

    #[test]
    fn test_stale_results_are_discarded() {
        let service = versioned_flow_service();
        let mut view = FlowDetailView::new("sample");

        let stale = view.begin_load();
        let current = view.begin_load();
        // Results land out of order: versions for the current load first, then the
        // stale graph, then the current graph.
        assert!(view.apply_versions(current, service.list_flow_versions("sample")));
        assert!(!view.apply_graph(stale, Err(ServiceError::Unavailable("timeout".into()))));
        assert_eq!(view.state(), &LoadState::Loading);
        assert!(view.apply_graph(current, service.get_flow_graph("sample")));
        assert_eq!(view.state(), &LoadState::Loaded);
    }

    #[test]
    fn test_disposed_view_ignores_results() {
        let service = versioned_flow_service();
        let mut view = FlowDetailView::new("sample");
        let ticket = view.begin_load();
        view.dispose();

        assert!(!view.apply_graph(ticket, service.get_flow_graph("sample")));
        assert!(view.graph().is_none());
        assert!(view.run(&service).is_err());
    }

    #[test]
    fn test_activate_version_marks_locally_and_refreshes() {
        let service = versioned_flow_service();
        let mut view = FlowDetailView::new("sample");
        view.load(&service);

        view.activate_version(&service, 1).unwrap();
        assert_eq!(view.active_version(), Some(1));
        assert_eq!(view.graph().and_then(|g| g.version.as_deref()), Some("1"));
        assert_eq!(view.state(), &LoadState::Loaded);
    }

    #[test]
    fn test_activation_keeps_pending_version_list() {
        let service = versioned_flow_service();
        let mut view = FlowDetailView::new("sample");
        let ticket = view.begin_load();
        let initial_graph = service.get_flow_graph("sample");
        assert!(view.apply_graph(ticket, initial_graph.clone()));

        // The version list of the initial load is still in flight.
        view.activate_version(&service, 1).unwrap();
        assert!(view.apply_versions(ticket, service.list_flow_versions("sample")));
        assert_eq!(view.versions().len(), 3);
        assert_eq!(view.active_version(), Some(1));

        // A late duplicate of the initial graph cannot overwrite the refreshed one.
        assert!(!view.apply_graph(ticket, initial_graph));
        assert_eq!(view.graph().and_then(|g| g.version.as_deref()), Some("1"));
    }

    #[test]
    fn test_failed_refresh_keeps_current_graph() {
        let service = versioned_flow_service();
        let mut view = FlowDetailView::new("sample");
        view.load(&service);

        view.activate_version(&GraphOutage(&service), 1).unwrap();
        assert_eq!(view.state(), &LoadState::Loaded);
        assert_eq!(view.assembled().map(|g| g.nodes.len()), Some(5));
        assert_eq!(view.active_version(), Some(1));
        assert!(matches!(view.refresh_error(), Some(ServiceError::Unavailable(_))));

        view.refresh_graph(&service);
        assert!(view.refresh_error().is_none());
        assert_eq!(view.graph().and_then(|g| g.version.as_deref()), Some("1"));
    }

    #[test]
    fn test_failed_first_load_clears_the_page() {
        let service = versioned_flow_service();
        let mut view = FlowDetailView::new("sample");
        view.load(&GraphOutage(&service));
        assert!(matches!(view.state(), LoadState::Failed { .. }));
        assert!(view.graph().is_none());
        assert!(view.refresh_error().is_none());
        assert_eq!(view.versions().len(), 3);
    }

    #[test]
    fn test_run_then_stop() {
        let service = versioned_flow_service();
        let mut view = FlowDetailView::new("sample");
        view.load(&service);

        assert!(view.stop(&service).is_err());
        view.run(&service).unwrap();
        assert_eq!(view.status(), Some(FlowStatus::Running));
        view.stop(&service).unwrap();
        assert_eq!(view.status(), Some(FlowStatus::Deployed));
    }
}

#[cfg(test)]
mod subnode_view_tests {
    use super::*;

    fn loaded_view(service: &InMemorySubnodeService) -> SubnodeDetailView {
        let mut view = SubnodeDetailView::new("sn-1");
        view.load(service);
        view
    }

    #[test]
    fn test_initial_selection_prefers_deployed_version() {
        let service = subnode_service();
        let view = loaded_view(&service);
        assert_eq!(view.selected_version().map(|v| v.version), Some(1));
        assert_eq!(
            view.available_actions(),
            [SubnodeAction::CreateNewVersion, SubnodeAction::Undeploy]
        );
        assert_eq!(view.parameter_rows(), [("host", "sftp.local"), ("timeout", "30")]);
    }

    #[test]
    fn test_initial_selection_falls_back_to_newest() {
        let service = subnode_service();
        service.undeploy_version("sn-1", 1).unwrap();
        let view = loaded_view(&service);
        assert_eq!(view.selected_version().map(|v| v.version), Some(2));
        assert_eq!(view.available_actions(), [SubnodeAction::EditVersion, SubnodeAction::Deploy]);
    }

    #[test]
    fn test_no_selection_offers_no_actions() {
        let mut view = SubnodeDetailView::new("missing");
        view.load(&subnode_service());
        assert_eq!(view.state(), &LoadState::NotFound);
        assert!(view.available_actions().is_empty());
        assert!(view.parameter_rows().is_empty());
    }

    #[test]
    fn test_select_unknown_version_fails() {
        let service = subnode_service();
        let mut view = loaded_view(&service);
        assert!(matches!(
            view.select_version(7),
            Err(ServiceError::VersionNotFound { version: 7, .. })
        ));
        assert_eq!(view.selected_version().map(|v| v.version), Some(1));
    }

    #[test]
    fn test_deploy_draft_swaps_deployment() {
        let service = subnode_service();
        let mut view = loaded_view(&service);
        view.select_version(2).unwrap();
        view.deploy(&service).unwrap();

        let subnode = view.subnode().unwrap();
        assert_eq!(subnode.deployed_version().map(|v| v.version), Some(2));
        assert_eq!(view.selected_version().map(|v| v.version), Some(2));
        assert_eq!(
            view.available_actions(),
            [SubnodeAction::CreateNewVersion, SubnodeAction::Undeploy]
        );
    }

    #[test]
    fn test_deploy_is_rejected_for_deployed_selection() {
        let service = subnode_service();
        let mut view = loaded_view(&service);
        assert!(matches!(view.deploy(&service), Err(ServiceError::InvalidState { .. })));
    }

    #[test]
    fn test_create_new_version_selects_the_copy() {
        let service = subnode_service();
        let mut view = loaded_view(&service);
        let created = view.create_new_version(&service, "raise timeout").unwrap();

        assert_eq!(created.version, 3);
        assert_eq!(view.selected_version().map(|v| v.version), Some(3));
        assert_eq!(view.available_actions(), [SubnodeAction::EditVersion, SubnodeAction::Deploy]);
    }

    #[test]
    fn test_activate_from_history() {
        let service = subnode_service();
        let mut view = loaded_view(&service);
        view.activate_from_history(&service, 2).unwrap();
        assert_eq!(view.subnode().and_then(|s| s.deployed_version()).map(|v| v.version), Some(2));

        view.undeploy(&service).unwrap();
        assert!(view.subnode().and_then(|s| s.deployed_version()).is_none());
        assert_eq!(view.selected_version().map(|v| v.version), Some(2));
    }

    #[test]
    fn test_failed_history_activation_keeps_selection() {
        let service = subnode_service();
        let mut view = loaded_view(&service);

        let err = view
            .activate_from_history(&ActivationOutage(&service), 2)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert_eq!(view.selected_version().map(|v| v.version), Some(1));
        assert_eq!(view.subnode().and_then(|s| s.deployed_version()).map(|v| v.version), Some(1));
    }
}
