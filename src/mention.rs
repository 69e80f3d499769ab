//! The `{{name}}` mention-processing seam.
//!
//! The substitution grammar is a collaborator of the planning core, not
//! part of it: the planner only depends on the [`ProcessedQuery`] shape.
//! A plain scan-and-substitute implementation ships as the default and can
//! be swapped for a richer one through the planner builder.

use crate::canvas::{VariableType, WorkflowVariable};
use crate::error::MentionError;

/// Resolved output of a mention-processing pass over a prompt.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedQuery {
    /// Query text with mentions rewritten for display and storage.
    pub updated_query: String,
    /// Query text as it should be handed to the model.
    pub llm_input_query: String,
    /// Names of every variable the query referenced, in reference order.
    pub referenced_variables: Vec<String>,
    /// Resource-typed variables the query referenced; the execution step
    /// uses these to fetch the backing files.
    pub resource_vars: Vec<WorkflowVariable>,
}

/// Everything a processor may consult while rewriting a query.
pub struct MentionContext<'a> {
    pub variables: &'a [WorkflowVariable],
    /// When false, variable mentions are recorded but left verbatim.
    pub replace_vars: bool,
    pub toolset_lookup: Option<&'a dyn ToolsetLookup>,
}

/// Display-name source for `{{toolset:<id>}}` mentions. Never required for
/// ordering correctness.
pub trait ToolsetLookup {
    fn lookup_by_id(&self, id: &str) -> Option<ToolsetDefinition>;
}

/// A tool integration as far as mention rendering is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolsetDefinition {
    pub id: String,
    pub name: String,
}

/// The mention-processing collaborator contract.
pub trait MentionProcessor {
    fn process(
        &self,
        query: &str,
        ctx: &MentionContext<'_>,
    ) -> Result<ProcessedQuery, MentionError>;
}

/// Plain scan-and-substitute processor.
///
/// `{{name}}` resolves against the variable set (text variables render
/// their joined text entries, resource variables their resource names);
/// `{{toolset:<id>}}` resolves to a display name through the lookup.
/// Unknown names and unterminated mentions stay verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultMentionProcessor;

impl MentionProcessor for DefaultMentionProcessor {
    fn process(
        &self,
        query: &str,
        ctx: &MentionContext<'_>,
    ) -> Result<ProcessedQuery, MentionError> {
        let mut updated = String::with_capacity(query.len());
        let mut referenced: Vec<String> = Vec::new();
        let mut resource_vars: Vec<WorkflowVariable> = Vec::new();
        let mut rest = query;

        while let Some(open) = rest.find("{{") {
            updated.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let Some(close) = after.find("}}") else {
                updated.push_str(&rest[open..]);
                rest = "";
                break;
            };

            let name = after[..close].trim();
            let raw_mention = &rest[open..open + close + 4];

            if let Some(tool_id) = name.strip_prefix("toolset:") {
                match ctx
                    .toolset_lookup
                    .and_then(|lookup| lookup.lookup_by_id(tool_id.trim()))
                {
                    Some(definition) => updated.push_str(&definition.name),
                    None => updated.push_str(raw_mention),
                }
            } else if let Some(variable) = ctx.variables.iter().find(|v| v.name == name) {
                if !referenced.contains(&variable.name) {
                    referenced.push(variable.name.clone());
                }
                if variable.variable_type == VariableType::Resource
                    && !resource_vars.iter().any(|v| v.name == variable.name)
                {
                    resource_vars.push(variable.clone());
                }
                if ctx.replace_vars {
                    updated.push_str(&variable.text_value());
                } else {
                    updated.push_str(raw_mention);
                }
            } else {
                updated.push_str(raw_mention);
            }

            rest = &rest[open + close + 4..];
        }
        updated.push_str(rest);

        Ok(ProcessedQuery {
            llm_input_query: updated.clone(),
            updated_query: updated,
            referenced_variables: referenced,
            resource_vars,
        })
    }
}
