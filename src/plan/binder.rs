use tracing::debug;

use crate::canvas::{
    ContextItem, NodeType, SkillResponseMetadata, VariableType, VariableValue, WorkflowVariable,
};
use crate::error::MentionError;
use crate::mention::{MentionContext, MentionProcessor, ProcessedQuery, ToolsetLookup};

/// Orchestrates mention processing for skill-response nodes.
///
/// The substitution grammar lives behind [`MentionProcessor`]; the binder
/// only merges the collaborator's output back into node metadata and keeps
/// resource context-item titles in sync with the variable set.
pub struct VariableBinder<'a> {
    processor: &'a dyn MentionProcessor,
    toolset_lookup: Option<&'a dyn ToolsetLookup>,
}

impl<'a> VariableBinder<'a> {
    pub fn new(
        processor: &'a dyn MentionProcessor,
        toolset_lookup: Option<&'a dyn ToolsetLookup>,
    ) -> Self {
        Self {
            processor,
            toolset_lookup,
        }
    }

    /// Runs the collaborator over a raw query.
    pub fn bind_query(
        &self,
        raw_query: &str,
        variables: &[WorkflowVariable],
    ) -> Result<ProcessedQuery, MentionError> {
        let ctx = MentionContext {
            variables,
            replace_vars: true,
            toolset_lookup: self.toolset_lookup,
        };
        self.processor.process(raw_query, &ctx)
    }

    /// Rebinds a node's metadata against the current variable set.
    ///
    /// A collaborator failure keeps the original metadata untouched: one
    /// node with an unresolved query must not sink the whole plan.
    pub fn bind(
        &self,
        meta: &SkillResponseMetadata,
        variables: &[WorkflowVariable],
    ) -> SkillResponseMetadata {
        let processed = match self.bind_query(&meta.query, variables) {
            Ok(processed) => processed,
            Err(err) => {
                debug!(error = %err, "mention processing failed, keeping raw query");
                return meta.clone();
            }
        };

        SkillResponseMetadata {
            query: processed.updated_query,
            llm_input_query: Some(processed.llm_input_query),
            context_items: update_context_items_from_variables(&meta.context_items, variables),
            referenced_variables: processed.referenced_variables,
        }
    }
}

/// Refreshes display titles of resource context items from resource-typed
/// variables.
///
/// Update-only: a variable whose entries match no existing context item is
/// left as a metadata-only reference, never inserted. Inserting here would
/// silently grow a node's context on every planning pass; adding items is
/// the caller's call to make.
pub fn update_context_items_from_variables(
    items: &[ContextItem],
    variables: &[WorkflowVariable],
) -> Vec<ContextItem> {
    let mut updated = items.to_vec();
    for variable in variables
        .iter()
        .filter(|v| v.variable_type == VariableType::Resource)
    {
        for entry in &variable.value {
            let VariableValue::Resource(resource) = entry else {
                continue;
            };
            for item in updated.iter_mut() {
                if item.item_type == NodeType::Resource && item.entity_id == resource.entity_id {
                    item.title = resource.name.clone();
                }
            }
        }
    }
    updated
}
