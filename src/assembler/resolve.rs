use crate::contract::VisualContract;

/// Outcome of attaching an edge to its source node's outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum HandleResolution {
    /// The condition named a declared output.
    Matched(&'static str),
    /// No usable condition; the role's only output was used.
    Default(&'static str),
    Unattachable,
}

impl HandleResolution {
    pub(super) fn handle_id(self) -> Option<&'static str> {
        match self {
            HandleResolution::Matched(id) | HandleResolution::Default(id) => Some(id),
            HandleResolution::Unattachable => None,
        }
    }
}

pub(super) fn resolve_source_handle(
    contract: &VisualContract,
    condition: Option<&str>,
) -> HandleResolution {
    if let Some(handle) = condition.and_then(|c| contract.source_handle(c)) {
        return HandleResolution::Matched(handle.id);
    }
    match contract.sole_source_handle() {
        Some(handle) => HandleResolution::Default(handle.id),
        None => HandleResolution::Unattachable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::contract_for;
    use crate::role::RoleTag;

    #[test]
    fn test_condition_matches_case_insensitively() {
        let contract = contract_for(RoleTag::Conditional);
        assert_eq!(
            resolve_source_handle(contract, Some("INVALID")),
            HandleResolution::Matched("invalid")
        );
    }

    #[test]
    fn test_unknown_condition_falls_back_to_single_output() {
        let contract = contract_for(RoleTag::Encoder);
        assert_eq!(
            resolve_source_handle(contract, Some("Success")),
            HandleResolution::Default("output")
        );
    }

    #[test]
    fn test_branching_without_match_is_unattachable() {
        let contract = contract_for(RoleTag::ValidationBln);
        assert_eq!(resolve_source_handle(contract, None), HandleResolution::Unattachable);
        assert_eq!(
            resolve_source_handle(contract, Some("Unknown")),
            HandleResolution::Unattachable
        );
    }

    #[test]
    fn test_terminal_role_is_unattachable() {
        let contract = contract_for(RoleTag::RawBackup);
        assert_eq!(resolve_source_handle(contract, None), HandleResolution::Unattachable);
    }
}
