use serde::{Deserialize, Serialize};

use crate::canvas::NodeType;

/// Execution status assigned during planning.
///
/// `Init` marks a node the dispatcher must run; `Finish` marks a node
/// considered already complete. A node is `Init` exactly when it is inside
/// the resolved start subtree and its type can produce new output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Init,
    Finish,
}

impl NodeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeStatus::Init => "init",
            NodeStatus::Finish => "finish",
        }
    }
}

/// Side of a connection a filter binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleType {
    Source,
}

/// A required upstream output: the dispatcher holds a node until a
/// finished node matching each of its filters exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectToFilter {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub entity_id: String,
    pub handle_type: HandleType,
}

/// A prior response pulled into a node's context via a with-history item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultHistoryEntry {
    pub result_id: String,
    pub title: String,
}

/// One node-execution record of a prepared plan.
///
/// Created fresh on every planning pass; prior records are never mutated
/// in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowNode {
    pub node_id: String,
    pub node_type: NodeType,
    pub entity_id: String,
    pub title: String,
    pub status: NodeStatus,
    pub connect_to: Vec<ConnectToFilter>,
    /// Deduplicated; order is irrelevant to consumers.
    pub parent_node_ids: Vec<String>,
    pub child_node_ids: Vec<String>,
    /// Prompt-bearing nodes only.
    #[serde(default)]
    pub original_query: Option<String>,
    #[serde(default)]
    pub processed_query: Option<String>,
    #[serde(default)]
    pub result_history: Vec<ResultHistoryEntry>,
}

/// The prepared plan: records in dispatch order plus the resolved start
/// set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlan {
    pub node_executions: Vec<WorkflowNode>,
    pub start_nodes: Vec<String>,
}
