use super::model::{
    CanvasData, CanvasEdge, CanvasNode, CanvasNodeData, ContextItem, NodeMetadata, NodeType,
    SkillResponseMetadata,
};
use super::raw::{RawCanvasData, RawSkillMetadata, RawWorkflowVariable};
use super::variable::{ResourceValue, VariableType, VariableValue, WorkflowVariable};
use crate::error::CanvasConversionError;

/// A trait for custom canvas formats that can be converted into a Junbi
/// [`CanvasData`].
///
/// This is the primary extension point for making Junbi format-agnostic.
/// Implement it on your own editor/export structs to provide a translation
/// layer the planner can consume. The bundled [`RawCanvasData`] implements
/// it for the standard editor JSON.
pub trait IntoCanvas {
    /// Consumes the object and converts it into a canonical canvas.
    fn into_canvas(self) -> Result<CanvasData, CanvasConversionError>;
}

impl IntoCanvas for RawCanvasData {
    fn into_canvas(self) -> Result<CanvasData, CanvasConversionError> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for raw_node in self.nodes {
            if raw_node.id.is_empty() {
                return Err(CanvasConversionError::EmptyNodeId);
            }
            let node_type = NodeType::from_name(&raw_node.node_type).ok_or_else(|| {
                CanvasConversionError::UnknownNodeType {
                    node_id: raw_node.id.clone(),
                    type_name: raw_node.node_type.clone(),
                }
            })?;

            let metadata = match (node_type, raw_node.data.metadata) {
                (NodeType::SkillResponse, Some(value)) => {
                    let raw_meta: RawSkillMetadata =
                        serde_json::from_value(value).map_err(|e| {
                            CanvasConversionError::InvalidMetadata {
                                node_id: raw_node.id.clone(),
                                message: e.to_string(),
                            }
                        })?;
                    NodeMetadata::SkillResponse(convert_skill_metadata(raw_meta))
                }
                (NodeType::SkillResponse, None) => {
                    NodeMetadata::SkillResponse(SkillResponseMetadata::default())
                }
                _ => NodeMetadata::Empty,
            };

            nodes.push(CanvasNode {
                id: raw_node.id,
                node_type,
                data: CanvasNodeData {
                    entity_id: raw_node.data.entity_id,
                    title: raw_node.data.title,
                    content_preview: raw_node.data.content_preview,
                    metadata,
                },
            });
        }

        let edges = self
            .edges
            .into_iter()
            .map(|edge| CanvasEdge {
                id: edge.id,
                source: edge.source,
                target: edge.target,
            })
            .collect();

        Ok(CanvasData { nodes, edges })
    }
}

fn convert_skill_metadata(raw: RawSkillMetadata) -> SkillResponseMetadata {
    // Context items with a type this core does not know are editor noise
    // and are dropped, same as dangling edges.
    let context_items = raw
        .context_items
        .into_iter()
        .filter_map(|item| {
            let item_type = NodeType::from_name(&item.item_type)?;
            Some(ContextItem {
                item_type,
                entity_id: item.entity_id,
                title: item.title,
                with_history: item.with_history,
            })
        })
        .collect();

    SkillResponseMetadata {
        query: raw.query.unwrap_or_default(),
        llm_input_query: raw.llm_input_query,
        context_items,
        referenced_variables: raw.referenced_variables,
    }
}

impl TryFrom<RawWorkflowVariable> for WorkflowVariable {
    type Error = CanvasConversionError;

    fn try_from(raw: RawWorkflowVariable) -> Result<Self, Self::Error> {
        let variable_type = match raw.variable_type.as_str() {
            "string" => VariableType::String,
            "resource" => VariableType::Resource,
            "option" => VariableType::Option,
            other => {
                return Err(CanvasConversionError::InvalidVariable {
                    name: raw.name,
                    message: format!("unknown variable type '{other}'"),
                });
            }
        };

        let mut value = Vec::with_capacity(raw.value.len());
        for entry in raw.value {
            match entry.value_type.as_str() {
                "text" => value.push(VariableValue::Text(entry.text.unwrap_or_default())),
                "resource" => {
                    let resource = entry.resource.ok_or_else(|| {
                        CanvasConversionError::InvalidVariable {
                            name: raw.name.clone(),
                            message: "resource entry without resource payload".to_string(),
                        }
                    })?;
                    value.push(VariableValue::Resource(ResourceValue {
                        entity_id: resource.entity_id,
                        name: resource.name,
                        file_type: resource.file_type,
                    }));
                }
                other => {
                    return Err(CanvasConversionError::InvalidVariable {
                        name: raw.name,
                        message: format!("unknown value entry type '{other}'"),
                    });
                }
            }
        }

        Ok(WorkflowVariable {
            name: raw.name,
            variable_type,
            value,
        })
    }
}
