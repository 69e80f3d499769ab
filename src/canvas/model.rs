use serde::{Deserialize, Serialize};

/// The complete, canonical definition of a canvas graph, ready for planning.
/// This is the target structure for any custom editor-format conversion.
#[derive(Debug, Clone, Default)]
pub struct CanvasData {
    pub nodes: Vec<CanvasNode>,
    pub edges: Vec<CanvasEdge>,
}

/// A single node in the authored graph.
#[derive(Debug, Clone)]
pub struct CanvasNode {
    /// Graph-position identity, unique within a canvas.
    pub id: String,
    pub node_type: NodeType,
    pub data: CanvasNodeData,
}

impl CanvasNode {
    /// The skill-response metadata of this node, if it carries one.
    pub fn skill_metadata(&self) -> Option<&SkillResponseMetadata> {
        match &self.data.metadata {
            NodeMetadata::SkillResponse(meta) => Some(meta),
            NodeMetadata::Empty => None,
        }
    }
}

/// Content-level payload of a node, distinct from its graph position.
#[derive(Debug, Clone, Default)]
pub struct CanvasNodeData {
    /// Stable identity of the underlying content. Distinct from the node's
    /// graph-position `id`; unique per `(type, entity_id)` pair.
    pub entity_id: String,
    pub title: String,
    /// Cached preview of the node's content. Cleared when the canvas is
    /// mirrored for a fresh run.
    pub content_preview: Option<String>,
    pub metadata: NodeMetadata,
}

/// A directed arc `source -> target` between two node ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasEdge {
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

/// The kind of a canvas node.
///
/// Determines which metadata variant the node carries and whether a
/// planning pass may schedule it to produce new output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Start,
    SkillResponse,
    Document,
    CodeArtifact,
    Image,
    Video,
    Audio,
    Memo,
    Resource,
    Website,
}

impl NodeType {
    /// Whether a planning pass may re-execute this node to produce new
    /// output. Everything else is considered already complete.
    pub fn is_rerunnable(self) -> bool {
        matches!(
            self,
            NodeType::SkillResponse
                | NodeType::Document
                | NodeType::CodeArtifact
                | NodeType::Image
                | NodeType::Video
                | NodeType::Audio
        )
    }

    /// The wire name of this type, as the canvas editor spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Start => "start",
            NodeType::SkillResponse => "skillResponse",
            NodeType::Document => "document",
            NodeType::CodeArtifact => "codeArtifact",
            NodeType::Image => "image",
            NodeType::Video => "video",
            NodeType::Audio => "audio",
            NodeType::Memo => "memo",
            NodeType::Resource => "resource",
            NodeType::Website => "website",
        }
    }

    /// Parses a wire name back into a type.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(NodeType::Start),
            "skillResponse" => Some(NodeType::SkillResponse),
            "document" => Some(NodeType::Document),
            "codeArtifact" => Some(NodeType::CodeArtifact),
            "image" => Some(NodeType::Image),
            "video" => Some(NodeType::Video),
            "audio" => Some(NodeType::Audio),
            "memo" => Some(NodeType::Memo),
            "resource" => Some(NodeType::Resource),
            "website" => Some(NodeType::Website),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant-shaped node payload, keyed by the node's type.
///
/// Only skill-response nodes carry structured metadata the planner
/// interprets; every other type is payload-free at this layer.
#[derive(Debug, Clone, Default)]
pub enum NodeMetadata {
    #[default]
    Empty,
    SkillResponse(SkillResponseMetadata),
}

/// Metadata of a prompt-bearing (skill-response) node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillResponseMetadata {
    /// The prompt as authored (or as last rewritten by mention processing).
    pub query: String,
    /// The prompt as it should be handed to the model, with variable
    /// values substituted in.
    pub llm_input_query: Option<String>,
    pub context_items: Vec<ContextItem>,
    /// Names of the workflow variables the query references.
    pub referenced_variables: Vec<String>,
}

/// A piece of upstream context attached to a skill-response node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextItem {
    pub item_type: NodeType,
    pub entity_id: String,
    pub title: String,
    /// When set, the referenced response's conversation ancestry is pulled
    /// into the node's result history during planning.
    pub with_history: bool,
}
