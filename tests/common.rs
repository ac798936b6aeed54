//! Common test utilities for building flows and fixtures.
use medflow::prelude::*;

/// The five-stage sample flow: a collector feeding FDC, then a validation
/// stage that forks into two encoders.
///
/// Logic: `a -> b -> c`, `c -[Valid]-> d`, `c -[Invalid]-> e`
#[allow(dead_code)]
pub fn sample_stages() -> (Vec<StageDescriptor>, Vec<EdgeDescriptor>) {
    let nodes = vec![
        StageDescriptor::new("a", "SFTP Source", 1),
        StageDescriptor::new("b", "FDC Processor", 2),
        StageDescriptor::new("c", "Validation Check", 3),
        StageDescriptor::new("d", "Encoder Success Output", 4),
        StageDescriptor::new("e", "Encoder Error Output", 5),
    ];
    let edges = vec![
        EdgeDescriptor::new("e1", "a", "b"),
        EdgeDescriptor::new("e2", "b", "c"),
        EdgeDescriptor::new("e3", "c", "d").with_condition("Valid"),
        EdgeDescriptor::new("e4", "c", "e").with_condition("Invalid"),
    ];
    (nodes, edges)
}

#[allow(dead_code)]
pub fn sample_flow() -> FlowGraph {
    let (nodes, edges) = sample_stages();
    FlowGraph::new("sample", "NCC Sample Flow").with_stages(nodes, edges)
}

/// A deployed-but-stopped flow with three versions, version 2 active.
#[allow(dead_code)]
pub fn versioned_flow_service() -> InMemoryFlowService {
    let mut flow = sample_flow();
    flow.is_deployed = true;
    let versions = (1..=3)
        .map(|version| FlowVersion {
            id: format!("sample-v{}", version),
            version,
            is_active: version == 2,
            created_by: "admin".to_string(),
            created_at: "2024-01-15T10:30:00Z".to_string(),
            description: None,
        })
        .collect();
    let service = InMemoryFlowService::new();
    service.insert_flow(flow, versions).unwrap();
    service
}

/// A subnode with a deployed v1 and a draft v2.
#[allow(dead_code)]
pub fn sample_subnode() -> Subnode {
    let version = |n: u32, deployed: bool, timeout: &str| SubnodeVersion {
        version: n,
        is_deployed: deployed,
        parameter_values: [
            ("host".to_string(), "sftp.local".to_string()),
            ("timeout".to_string(), timeout.to_string()),
        ]
        .into_iter()
        .collect(),
        created_by: "admin".to_string(),
        created_at: "2024-01-15T10:30:00Z".to_string(),
        version_comment: None,
    };
    Subnode {
        id: "sn-1".to_string(),
        name: "SFTP Collector".to_string(),
        description: None,
        versions: vec![version(1, true, "30"), version(2, false, "60")],
    }
}

#[allow(dead_code)]
pub fn subnode_service() -> InMemorySubnodeService {
    let service = InMemorySubnodeService::new();
    service.insert_subnode(sample_subnode()).unwrap();
    service
}

/// The flow endpoint's JSON shape, including a numeric version and a stage with
/// no name.
#[allow(dead_code)]
pub const FLOW_JSON: &str = r#"{
    "id": "7",
    "name": "Convergent Billing Flow",
    "version": 3,
    "is_running": false,
    "is_deployed": true,
    "nodes": [
        { "id": "n1", "name": "SFTP Collector", "order": 1, "selected_subnode_id": "sn-a" },
        { "id": "n2", "name": "ASCII Decoder", "order": 2 },
        { "id": "n3", "order": 3 },
        { "id": "n4", "name": "Router", "order": 4, "type": "conditional" }
    ],
    "edges": [
        { "id": "e1", "from_node": "n1", "to_node": "n2" },
        { "id": "e2", "from_node": "n2", "to_node": "n3", "condition": "" },
        { "id": "e3", "from_node": "n3", "to_node": "n4" },
        { "id": "e4", "from_node": "n4", "to_node": "n1", "condition": "Valid" }
    ]
}"#;
