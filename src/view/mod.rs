//! View state for the flow and subnode detail pages.
//!
//! Views own no transport. They issue requests through the service traits and
//! accept results tagged with a [`LoadTicket`], so a response that arrives after
//! the view was reloaded or disposed is dropped instead of overwriting newer state.

use crate::error::ServiceError;
use serde::Serialize;
use std::fmt;

mod flow_detail;
mod subnode_detail;

pub use flow_detail::FlowDetailView;
pub use subnode_detail::{SubnodeAction, SubnodeDetailView};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Loaded,
    Failed { message: String },
    NotFound,
}

impl LoadState {
    pub(crate) fn from_error(error: &ServiceError) -> Self {
        match error {
            ServiceError::FlowNotFound(_) | ServiceError::SubnodeNotFound(_) => LoadState::NotFound,
            other => LoadState::Failed {
                message: other.to_string(),
            },
        }
    }
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Loading => f.write_str("loading"),
            LoadState::Loaded => f.write_str("loaded"),
            LoadState::Failed { message } => write!(f, "failed: {}", message),
            LoadState::NotFound => f.write_str("not found"),
        }
    }
}

/// Identifies the load a fetch result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Issues load tickets and tracks whether the view was disposed.
#[derive(Debug, Default)]
pub(crate) struct Generation {
    current: u64,
    disposed: bool,
}

impl Generation {
    pub(crate) fn next(&mut self) -> LoadTicket {
        self.current += 1;
        LoadTicket(self.current)
    }

    pub(crate) fn accepts(&self, ticket: LoadTicket) -> bool {
        !self.disposed && ticket.0 == self.current
    }

    pub(crate) fn dispose(&mut self) {
        self.disposed = true;
    }

    pub(crate) fn is_disposed(&self) -> bool {
        self.disposed
    }
}
