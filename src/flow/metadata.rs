use super::FlowGraph;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status shown for a flow. Running wins over deployed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    Running,
    Deployed,
    Draft,
}

impl FlowStatus {
    pub fn from_flags(is_running: bool, is_deployed: bool) -> Self {
        if is_running {
            FlowStatus::Running
        } else if is_deployed {
            FlowStatus::Deployed
        } else {
            FlowStatus::Draft
        }
    }

    /// Start is offered only for a deployed flow that is not running.
    pub fn can_start(self) -> bool {
        self == FlowStatus::Deployed
    }

    pub fn can_stop(self) -> bool {
        self == FlowStatus::Running
    }
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FlowStatus::Running => "running",
            FlowStatus::Deployed => "deployed",
            FlowStatus::Draft => "draft",
        };
        f.write_str(s)
    }
}

/// Mediation family a flow belongs to, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediationType {
    Charging,
    Convergent,
    Ncc,
    Generic,
}

const MEDIATION_RULES: &[(&[&str], MediationType)] = &[
    (&["charging", "billing"], MediationType::Charging),
    (&["convergent", "converge"], MediationType::Convergent),
    (&["ncc", "call control"], MediationType::Ncc),
];

impl MediationType {
    /// First-match-wins over the rule table; "Convergent Billing Flow" is `Charging`.
    pub fn classify(flow_name: &str) -> Self {
        let name = flow_name.to_lowercase();
        MEDIATION_RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|kw| name.contains(kw)))
            .map_or(MediationType::Generic, |(_, kind)| *kind)
    }

    pub fn title(self) -> &'static str {
        match self {
            MediationType::Charging => "Charging Mediation",
            MediationType::Convergent => "Convergent Mediation",
            MediationType::Ncc => "Ncc Mediation",
            MediationType::Generic => "Generic Mediation",
        }
    }
}

impl fmt::Display for MediationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MediationType::Charging => "charging",
            MediationType::Convergent => "convergent",
            MediationType::Ncc => "ncc",
            MediationType::Generic => "generic",
        };
        f.write_str(s)
    }
}

/// A row of the flow list: metadata without the stage graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowSummary {
    pub id: String,
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
    pub created_by: Option<String>,
    pub status: FlowStatus,
    pub mediation_type: MediationType,
    pub stage_count: usize,
}

impl FlowGraph {
    pub fn status(&self) -> FlowStatus {
        FlowStatus::from_flags(self.is_running, self.is_deployed)
    }

    pub fn mediation_type(&self) -> MediationType {
        MediationType::classify(&self.name)
    }

    pub fn summary(&self) -> FlowSummary {
        FlowSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            created_at: self.created_at.clone(),
            created_by: self.created_by.clone(),
            status: self.status(),
            mediation_type: self.mediation_type(),
            stage_count: self.nodes.len(),
        }
    }
}
