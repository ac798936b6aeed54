use thiserror::Error;

/// Errors raised by the flow and subnode data services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Flow '{0}' not found")]
    FlowNotFound(String),

    #[error("Subnode '{0}' not found")]
    SubnodeNotFound(String),

    #[error("Version {version} does not exist for '{owner_id}'")]
    VersionNotFound { owner_id: String, version: u32 },

    #[error("Operation rejected for '{id}': {message}")]
    InvalidState { id: String, message: String },

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the interactive canvas when a gesture cannot start or continue.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("Node '{0}' is not on the canvas")]
    UnknownNode(String),

    #[error("Node '{node_id}' declares no {kind} handle '{handle_id}'")]
    UnknownHandle {
        node_id: String,
        handle_id: String,
        kind: &'static str,
    },

    #[error("Canvas is busy ({0}); finish or cancel the current gesture first")]
    Busy(&'static str),

    #[error("No {0} gesture in progress")]
    NoGesture(&'static str),
}

/// Errors that can occur while loading a `MedflowConfig`.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config JSON: {0}")]
    Parse(String),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Errors that can occur when converting an external format into a `FlowGraph`.
#[derive(Error, Debug, Clone)]
pub enum FlowConversionError {
    #[error("Failed to parse flow JSON: {0}")]
    JsonParseError(String),

    #[error("Invalid flow data: {0}")]
    ValidationError(String),
}

/// Returned when a string does not name a known role tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown role tag '{0}'")]
pub struct ParseRoleTagError(pub String);
