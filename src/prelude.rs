//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! junbi crate. Import this module to get access to the core functionality
//! without having to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use junbi::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let canvas_json = std::fs::read_to_string("path/to/canvas.json")?;
//! let raw: RawCanvasData = serde_json::from_str(&canvas_json)?;
//! let canvas = raw.into_canvas()?;
//!
//! let plan = Planner::builder(canvas, vec![]).build().prepare()?;
//! println!("{} records", plan.node_executions.len());
//! # Ok(())
//! # }
//! ```

// Planning
pub use crate::plan::{
    CanvasMirror, ConnectToFilter, ExecutionPlan, HandleType, MirroredCanvas, NodeStatus,
    PersistedNodeExecution, PlanArtifact, Planner, PlannerBuilder, ResultHistoryEntry, RunMode,
    VariableBinder, WorkflowNode, order, sort_node_executions_by_execution_order,
    update_context_items_from_variables,
};

// Canvas model and conversion
pub use crate::canvas::{
    CanvasData, CanvasEdge, CanvasNode, CanvasNodeData, ContextItem, IntoCanvas, NodeMetadata,
    NodeType, RawCanvasData, RawWorkflowVariable, ResourceValue, SkillResponseMetadata,
    VariableType, VariableValue, WorkflowVariable,
};

// Graph primitives
pub use crate::graph::{GraphIndex, reachable_from, thread_history};

// Collaborator seams
pub use crate::idgen::{IdGenerator, UuidGenerator};
pub use crate::mention::{
    DefaultMentionProcessor, MentionContext, MentionProcessor, ProcessedQuery, ToolsetDefinition,
    ToolsetLookup,
};

// Error types
pub use crate::error::{ArtifactError, CanvasConversionError, MentionError, PlanError};

// Map types commonly used with this crate
pub use ahash::{AHashMap, AHashSet};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
