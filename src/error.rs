use thiserror::Error;

/// Errors that can occur while preparing an execution plan.
///
/// Planning deliberately recovers from user-authored graph oddities
/// (dangling edges, duplicate ids, cycles, empty start sets) instead of
/// surfacing them; only conditions that make a plan meaningless end up here.
#[derive(Error, Debug, Clone)]
pub enum PlanError {
    #[error("Canvas contains no nodes, nothing to plan")]
    EmptyCanvas,
}

/// Errors that can occur when converting a custom editor format into a
/// canonical `CanvasData`.
#[derive(Error, Debug, Clone)]
pub enum CanvasConversionError {
    #[error("Canvas node has an empty id")]
    EmptyNodeId,

    #[error("Node '{node_id}' has an unrecognized type: '{type_name}'")]
    UnknownNodeType { node_id: String, type_name: String },

    #[error("Node '{node_id}' carries malformed metadata: {message}")]
    InvalidMetadata { node_id: String, message: String },

    #[error("Workflow variable '{name}' is invalid: {message}")]
    InvalidVariable { name: String, message: String },
}

/// Failure inside the mention-processing collaborator.
///
/// Always recoverable at the planning level: the affected node keeps its
/// raw query text rather than failing the whole plan.
#[derive(Error, Debug, Clone)]
pub enum MentionError {
    #[error("Malformed mention syntax: {0}")]
    Syntax(String),

    #[error("Mention processing failed: {0}")]
    Processor(String),
}

/// Errors that can occur when saving or loading a plan artifact.
#[derive(Error, Debug, Clone)]
pub enum ArtifactError {
    #[error("Artifact serialization failed: {0}")]
    Encode(String),

    #[error("Artifact deserialization failed: {0}")]
    Decode(String),

    #[error("Could not access artifact file '{path}': {message}")]
    Io { path: String, message: String },
}
