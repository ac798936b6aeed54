//! Seed data for the in-memory services and the demo CLI.

use crate::flow::{EdgeDescriptor, FlowGraph, FlowVersion, StageDescriptor};
use crate::subnode::{Subnode, SubnodeVersion};
use std::collections::BTreeMap;

struct FlowSeed {
    id: &'static str,
    name: &'static str,
    label: &'static str,
    created_at: &'static str,
    created_by: &'static str,
    description: &'static str,
    is_running: bool,
    is_deployed: bool,
    active_version: u32,
    version_count: u32,
}

const FLOWS: &[FlowSeed] = &[
    FlowSeed {
        id: "1",
        name: "NCC Payment Flow",
        label: "1.0.0",
        created_at: "2024-01-15T10:30:00Z",
        created_by: "admin",
        description: "NCC mediation flow for payment processing",
        is_running: true,
        is_deployed: true,
        active_version: 2,
        version_count: 2,
    },
    FlowSeed {
        id: "2",
        name: "Convergent Billing Flow",
        label: "2.1.0",
        created_at: "2024-01-10T14:20:00Z",
        created_by: "developer",
        description: "Convergent mediation flow for billing system",
        is_running: false,
        is_deployed: true,
        active_version: 3,
        version_count: 3,
    },
    FlowSeed {
        id: "3",
        name: "Charging Gateway Integration",
        label: "1.5.0",
        created_at: "2024-01-12T09:15:00Z",
        created_by: "admin",
        description: "Charging gateway mediation flow",
        is_running: true,
        is_deployed: false,
        active_version: 1,
        version_count: 2,
    },
    FlowSeed {
        id: "4",
        name: "NCC Data Sync Flow",
        label: "1.2.0",
        created_at: "2024-01-08T16:45:00Z",
        created_by: "developer",
        description: "NCC data synchronization flow",
        is_running: false,
        is_deployed: false,
        active_version: 1,
        version_count: 1,
    },
];

/// Stage names per seeded flow, in pipeline order.
fn stage_names(flow_id: &str) -> &'static [&'static str] {
    match flow_id {
        "1" => &[
            "SFTP Collector",
            "FDC Processor",
            "ASN1 Decoder",
            "Validation BLN",
            "Enrichment",
            "Encoder",
            "Raw Backup",
        ],
        "2" => &[
            "SFTP Collector",
            "ASCII Decoder",
            "Validation BLN",
            "Diameter Interface",
            "Raw Backup",
        ],
        "3" => &[
            "SFTP Collector",
            "ASN1 Decoder",
            "Enrichment",
            "Encoder",
            "Diameter Interface",
        ],
        _ => &["SFTP Collector", "FDC Processor", "Raw Backup"],
    }
}

/// Builds a flow's stages. A validation stage forks: `Valid` continues down the
/// pipeline, `Invalid` jumps to the last stage (the raw backup).
fn build_stages(flow_id: &str) -> (Vec<StageDescriptor>, Vec<EdgeDescriptor>) {
    let names = stage_names(flow_id);
    let nodes: Vec<StageDescriptor> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let id = format!("{}-n{}", flow_id, i + 1);
            let subnode = format!("sn-{}", id);
            StageDescriptor::new(id, *name, i as i64 + 1).with_subnode(subnode)
        })
        .collect();

    let mut edges = Vec::new();
    let last = nodes.len().saturating_sub(1);
    let fork = names.iter().position(|n| n.starts_with("Validation"));
    for i in 0..last {
        let from = &nodes[i].id;
        match fork {
            Some(f) if f == i => {
                edges.push(
                    EdgeDescriptor::new(format!("{}-valid", from), from, &nodes[i + 1].id)
                        .with_condition("Valid"),
                );
                edges.push(
                    EdgeDescriptor::new(format!("{}-invalid", from), from, &nodes[last].id)
                        .with_condition("Invalid"),
                );
            }
            // The stage before the backup does not feed it once a fork exists.
            Some(_) if i + 1 == last => {}
            _ => edges.push(EdgeDescriptor::new(
                format!("e{}-{}", from, nodes[i + 1].id),
                from,
                &nodes[i + 1].id,
            )),
        }
    }
    (nodes, edges)
}

fn build_versions(seed: &FlowSeed) -> Vec<FlowVersion> {
    (1..=seed.version_count)
        .map(|version| FlowVersion {
            id: format!("{}-v{}", seed.id, version),
            version,
            is_active: version == seed.active_version,
            created_by: seed.created_by.to_string(),
            created_at: seed.created_at.to_string(),
            description: Some(format!("Revision {} of {}", version, seed.name)),
        })
        .collect()
}

/// The four demo mediation flows with their version histories.
pub fn flows() -> Vec<(FlowGraph, Vec<FlowVersion>)> {
    FLOWS
        .iter()
        .map(|seed| {
            let (nodes, edges) = build_stages(seed.id);
            let mut graph = FlowGraph::new(seed.id, seed.name).with_stages(nodes, edges);
            graph.version = Some(seed.label.to_string());
            graph.description = Some(seed.description.to_string());
            graph.is_running = seed.is_running;
            graph.is_deployed = seed.is_deployed;
            graph.created_at = Some(seed.created_at.to_string());
            graph.created_by = Some(seed.created_by.to_string());
            (graph, build_versions(seed))
        })
        .collect()
}

fn parameters_for(stage_name: &str) -> BTreeMap<String, String> {
    let pairs: &[(&str, &str)] = match stage_name {
        "SFTP Collector" => &[
            ("host", "sftp.mediation.local"),
            ("port", "22"),
            ("remote_dir", "/cdr/incoming"),
            ("poll_interval_secs", "60"),
        ],
        "FDC Processor" => &[("batch_size", "500"), ("duplicate_window_hours", "24")],
        "ASN1 Decoder" | "ASCII Decoder" => &[("schema", "3gpp-32.298"), ("strict", "true")],
        "Validation BLN" => &[("rule_set", "default"), ("reject_on_missing_msisdn", "true")],
        "Enrichment" => &[("lookup_table", "subscriber_profile"), ("cache_ttl_secs", "300")],
        "Encoder" => &[("format", "csv"), ("delimiter", ",")],
        "Diameter Interface" => &[("peer", "ocs.core.local"), ("application_id", "4")],
        _ => &[("target_dir", "/cdr/backup"), ("compress", "gzip")],
    };
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// One subnode per seeded stage. Every subnode has a deployed v1 and an
/// undeployed v2 draft, except in the draft-only flow `4`.
pub fn subnodes() -> Vec<Subnode> {
    FLOWS
        .iter()
        .flat_map(|seed| {
            let (nodes, _) = build_stages(seed.id);
            nodes.into_iter().filter_map(move |stage| {
                let subnode_id = stage.selected_subnode_id?;
                let name = stage.name.unwrap_or_default();
                let parameters = parameters_for(&name);
                let mut versions = vec![SubnodeVersion {
                    version: 1,
                    is_deployed: seed.is_deployed,
                    parameter_values: parameters.clone(),
                    created_by: seed.created_by.to_string(),
                    created_at: seed.created_at.to_string(),
                    version_comment: Some("Initial configuration".to_string()),
                }];
                if seed.is_deployed {
                    let mut draft = parameters;
                    draft.insert("revision".to_string(), "2".to_string());
                    versions.push(SubnodeVersion {
                        version: 2,
                        is_deployed: false,
                        parameter_values: draft,
                        created_by: "developer".to_string(),
                        created_at: seed.created_at.to_string(),
                        version_comment: Some("Tuning draft".to_string()),
                    });
                }
                Some(Subnode {
                    id: subnode_id,
                    description: Some(format!("{} configuration", name)),
                    name,
                    versions,
                })
            })
        })
        .collect()
}
