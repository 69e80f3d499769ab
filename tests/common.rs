//! Common test utilities for building canvases, variables, and planners.
use junbi::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Creates a payload-free node of the given type.
#[allow(dead_code)]
pub fn node(id: &str, node_type: NodeType) -> CanvasNode {
    CanvasNode {
        id: id.to_string(),
        node_type,
        data: CanvasNodeData {
            entity_id: format!("{id}-entity"),
            title: format!("Node {id}"),
            content_preview: None,
            metadata: NodeMetadata::Empty,
        },
    }
}

/// Creates a skill-response node carrying the given query.
#[allow(dead_code)]
pub fn skill_node(id: &str, query: &str) -> CanvasNode {
    let mut skill = node(id, NodeType::SkillResponse);
    skill.data.metadata = NodeMetadata::SkillResponse(SkillResponseMetadata {
        query: query.to_string(),
        ..Default::default()
    });
    skill
}

#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> CanvasEdge {
    CanvasEdge {
        id: None,
        source: source.to_string(),
        target: target.to_string(),
    }
}

/// Canvas used across planner tests:
///
/// `start -> A -> B`, `A -> C` (A is a skill response, B a document, C a
/// code artifact).
#[allow(dead_code)]
pub fn fan_out_canvas() -> CanvasData {
    CanvasData {
        nodes: vec![
            node("start", NodeType::Start),
            skill_node("A", "Summarize {{topic}}"),
            node("B", NodeType::Document),
            node("C", NodeType::CodeArtifact),
        ],
        edges: vec![edge("start", "A"), edge("A", "B"), edge("A", "C")],
    }
}

/// A simple list of variables for testing: one text, one resource.
#[allow(dead_code)]
pub fn simple_variables() -> Vec<WorkflowVariable> {
    vec![
        WorkflowVariable {
            name: "topic".to_string(),
            variable_type: VariableType::String,
            value: vec![VariableValue::Text("rust graphs".to_string())],
        },
        WorkflowVariable {
            name: "spec_doc".to_string(),
            variable_type: VariableType::Resource,
            value: vec![VariableValue::Resource(ResourceValue {
                entity_id: "res-1".to_string(),
                name: "spec.pdf".to_string(),
                file_type: Some("pdf".to_string()),
            })],
        },
    ]
}

/// Deterministic id source: `gen-000`, `gen-001`, ...
#[allow(dead_code)]
pub struct SequentialIds(AtomicUsize);

#[allow(dead_code)]
impl SequentialIds {
    pub fn new() -> Self {
        Self(AtomicUsize::new(0))
    }
}

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        format!("gen-{:03}", self.0.fetch_add(1, Ordering::Relaxed))
    }
}

/// Mention processor that always fails, for recoverability tests.
#[allow(dead_code)]
pub struct FailingMentions;

impl MentionProcessor for FailingMentions {
    fn process(
        &self,
        _query: &str,
        _ctx: &MentionContext<'_>,
    ) -> std::result::Result<ProcessedQuery, MentionError> {
        Err(MentionError::Syntax("unterminated mention".to_string()))
    }
}
