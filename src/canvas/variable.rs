/// A workflow variable referenced from node prompts via `{{name}}` mentions.
///
/// Variables are authored in the canvas editor and are read-only to the
/// planning core.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowVariable {
    /// Unique key the mention grammar refers to.
    pub name: String,
    pub variable_type: VariableType,
    /// Ordered list of typed value entries.
    pub value: Vec<VariableValue>,
}

impl WorkflowVariable {
    /// Renders the variable's value entries as display text, joined with
    /// `", "`. Resource entries render as their resource name.
    pub fn text_value(&self) -> String {
        let parts: Vec<&str> = self
            .value
            .iter()
            .map(|entry| match entry {
                VariableValue::Text(text) => text.as_str(),
                VariableValue::Resource(resource) => resource.name.as_str(),
            })
            .collect();
        parts.join(", ")
    }

    /// Iterates the resource payloads among this variable's value entries.
    pub fn resource_values(&self) -> impl Iterator<Item = &ResourceValue> {
        self.value.iter().filter_map(|entry| match entry {
            VariableValue::Resource(resource) => Some(resource),
            VariableValue::Text(_) => None,
        })
    }
}

/// The declared kind of a workflow variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    String,
    Resource,
    Option,
}

/// One value entry of a variable.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableValue {
    Text(String),
    Resource(ResourceValue),
}

/// A file-backed value: the execution step fetches it by entity id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceValue {
    pub entity_id: String,
    pub name: String,
    pub file_type: Option<String>,
}
