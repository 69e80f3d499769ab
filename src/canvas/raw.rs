//! Canvas structures as emitted by the editor, prior to conversion into
//! the canonical model. Field names follow the editor's camelCase wire
//! format; metadata is kept loose here because its shape depends on the
//! node type and is only decoded during conversion.

use serde::Deserialize;

/// Complete canvas payload: node list plus edge list.
#[derive(Debug, Deserialize, Clone)]
pub struct RawCanvasData {
    pub nodes: Vec<RawCanvasNode>,
    #[serde(default)]
    pub edges: Vec<RawCanvasEdge>,
}

/// A canvas node with its id, wire type name, and data payload.
#[derive(Debug, Deserialize, Clone)]
pub struct RawCanvasNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub data: RawNodeData,
}

/// Content payload of a raw node.
#[derive(Debug, Deserialize, Clone)]
pub struct RawNodeData {
    #[serde(alias = "entityId")]
    pub entity_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "contentPreview")]
    pub content_preview: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

/// A directed edge between two node ids.
#[derive(Debug, Deserialize, Clone)]
pub struct RawCanvasEdge {
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

/// Metadata payload of a skill-response node.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RawSkillMetadata {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, alias = "llmInputQuery")]
    pub llm_input_query: Option<String>,
    #[serde(default, alias = "contextItems")]
    pub context_items: Vec<RawContextItem>,
    #[serde(default, alias = "referencedVariables")]
    pub referenced_variables: Vec<String>,
}

/// A context item attached to a skill-response node.
#[derive(Debug, Deserialize, Clone)]
pub struct RawContextItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(alias = "entityId")]
    pub entity_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "withHistory")]
    pub with_history: bool,
}

/// A workflow variable as serialized by the editor.
#[derive(Debug, Deserialize, Clone)]
pub struct RawWorkflowVariable {
    pub name: String,
    #[serde(alias = "variableType")]
    pub variable_type: String,
    #[serde(default)]
    pub value: Vec<RawVariableValue>,
}

/// One typed value entry of a workflow variable.
#[derive(Debug, Deserialize, Clone)]
pub struct RawVariableValue {
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub resource: Option<RawResourceValue>,
}

/// Resource payload of a resource-typed value entry.
#[derive(Debug, Deserialize, Clone)]
pub struct RawResourceValue {
    #[serde(alias = "entityId")]
    pub entity_id: String,
    pub name: String,
    #[serde(default, alias = "fileType")]
    pub file_type: Option<String>,
}
