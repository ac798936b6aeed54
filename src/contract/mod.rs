//! Visual contracts: per-role color and connection-handle layout.
//!
//! The registry is a total function over [`RoleTag`]; every tag has exactly one
//! contract, fixed at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

mod registry;

pub use registry::contract_for;

/// Which edge of the node box a handle sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        };
        f.write_str(s)
    }
}

/// A named connection point. `offset_percent` is measured along `side`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandleSpec {
    pub id: &'static str,
    pub side: Side,
    pub offset_percent: u8,
}

impl HandleSpec {
    pub const fn new(id: &'static str, side: Side, offset_percent: u8) -> Self {
        Self {
            id,
            side,
            offset_percent,
        }
    }
}

/// Target handle at the left-center; used by every role that accepts input.
pub const INPUT_LEFT: HandleSpec = HandleSpec::new("input", Side::Left, 50);
/// Source handle at the right-center; the default single output.
pub const OUTPUT_RIGHT: HandleSpec = HandleSpec::new("output", Side::Right, 50);
pub const VALID_RIGHT: HandleSpec = HandleSpec::new("valid", Side::Right, 30);
pub const INVALID_RIGHT: HandleSpec = HandleSpec::new("invalid", Side::Right, 70);

/// Rendering color plus the ordered target and source handles of a role.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct VisualContract {
    pub color: &'static str,
    pub target_handles: &'static [HandleSpec],
    pub source_handles: &'static [HandleSpec],
}

impl VisualContract {
    /// Looks up a declared source handle, ignoring ASCII case.
    pub fn source_handle(&self, id: &str) -> Option<&'static HandleSpec> {
        self.source_handles
            .iter()
            .find(|h| h.id.eq_ignore_ascii_case(id))
    }

    /// Looks up a declared target handle, ignoring ASCII case.
    pub fn target_handle(&self, id: &str) -> Option<&'static HandleSpec> {
        self.target_handles
            .iter()
            .find(|h| h.id.eq_ignore_ascii_case(id))
    }

    /// The only source handle, when exactly one is declared.
    pub fn sole_source_handle(&self) -> Option<&'static HandleSpec> {
        match self.source_handles {
            [only] => Some(only),
            _ => None,
        }
    }

    /// The only target handle, when exactly one is declared.
    pub fn sole_target_handle(&self) -> Option<&'static HandleSpec> {
        match self.target_handles {
            [only] => Some(only),
            _ => None,
        }
    }

    /// True when the role exposes more than one named output.
    pub fn is_branching(&self) -> bool {
        self.source_handles.len() > 1
    }

    pub fn is_terminal(&self) -> bool {
        self.source_handles.is_empty()
    }

    pub fn is_origin(&self) -> bool {
        self.target_handles.is_empty()
    }
}
