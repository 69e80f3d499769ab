use ahash::AHashSet;
use itertools::Itertools;
use tracing::debug;

use crate::canvas::{CanvasData, CanvasNode, NodeMetadata, NodeType, WorkflowVariable};
use crate::error::PlanError;
use crate::graph::{GraphIndex, reachable_from, thread_history};
use crate::idgen::{IdGenerator, UuidGenerator};
use crate::mention::{DefaultMentionProcessor, MentionProcessor, ToolsetLookup};

use super::binder::VariableBinder;
use super::mirror::CanvasMirror;
use super::record::{
    ConnectToFilter, ExecutionPlan, HandleType, NodeStatus, ResultHistoryEntry, WorkflowNode,
};
use super::sort;

/// Whether a planning pass reuses canvas identities or forks new ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Fresh run (e.g., a scheduled run): the canvas is mirrored into new
    /// identities first, so the run can never mutate a previous run's
    /// artifacts.
    Create,
    /// Resume run (e.g., retrying a failed node): existing node and entity
    /// identities are reused.
    #[default]
    Update,
}

/// Prepares execution plans from a canvas and its workflow variables.
///
/// A planner is a pure, synchronous transformation: the same inputs always
/// produce the same plan, and nothing is shared between invocations.
pub struct Planner {
    canvas: CanvasData,
    variables: Vec<WorkflowVariable>,
    mode: RunMode,
    start_nodes: Vec<String>,
    mention_processor: Box<dyn MentionProcessor>,
    toolset_lookup: Option<Box<dyn ToolsetLookup>>,
    id_generator: Box<dyn IdGenerator>,
}

/// Configures a [`Planner`].
pub struct PlannerBuilder {
    canvas: CanvasData,
    variables: Vec<WorkflowVariable>,
    mode: RunMode,
    start_nodes: Vec<String>,
    mention_processor: Box<dyn MentionProcessor>,
    toolset_lookup: Option<Box<dyn ToolsetLookup>>,
    id_generator: Box<dyn IdGenerator>,
}

impl PlannerBuilder {
    pub fn new(canvas: CanvasData, variables: Vec<WorkflowVariable>) -> Self {
        Self {
            canvas,
            variables,
            mode: RunMode::default(),
            start_nodes: Vec::new(),
            mention_processor: Box::new(DefaultMentionProcessor),
            toolset_lookup: None,
            id_generator: Box::new(UuidGenerator),
        }
    }

    pub fn mode(mut self, mode: RunMode) -> Self {
        self.mode = mode;
        self
    }

    /// Node ids to (re)start from. Ignored in create mode: a fresh run
    /// always starts from the graph's natural roots.
    pub fn start_nodes<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        self.start_nodes = ids.into_iter().collect();
        self
    }

    pub fn mention_processor(mut self, processor: Box<dyn MentionProcessor>) -> Self {
        self.mention_processor = processor;
        self
    }

    pub fn toolset_lookup(mut self, lookup: Box<dyn ToolsetLookup>) -> Self {
        self.toolset_lookup = Some(lookup);
        self
    }

    pub fn id_generator(mut self, id_generator: Box<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    pub fn build(self) -> Planner {
        Planner {
            canvas: self.canvas,
            variables: self.variables,
            mode: self.mode,
            start_nodes: self.start_nodes,
            mention_processor: self.mention_processor,
            toolset_lookup: self.toolset_lookup,
            id_generator: self.id_generator,
        }
    }
}

impl Planner {
    pub fn builder(canvas: CanvasData, variables: Vec<WorkflowVariable>) -> PlannerBuilder {
        PlannerBuilder::new(canvas, variables)
    }

    /// Prepares one execution record per canvas node, dependency-ordered.
    ///
    /// An empty resolved start set yields an empty plan (a no-op signal,
    /// not an error); a completely absent node list is the one condition
    /// reported as a failure.
    pub fn prepare(&self) -> Result<ExecutionPlan, PlanError> {
        if self.canvas.nodes.is_empty() {
            return Err(PlanError::EmptyCanvas);
        }

        let binder = VariableBinder::new(
            self.mention_processor.as_ref(),
            self.toolset_lookup.as_deref(),
        );

        let canvas = match self.mode {
            RunMode::Create => {
                let mirror = CanvasMirror::new(self.id_generator.as_ref());
                let mirrored = mirror.mirror(&self.canvas, |node| {
                    Self::refresh_node(node, &binder, &self.variables)
                });
                debug!(
                    nodes = mirrored.canvas.nodes.len(),
                    edges = mirrored.canvas.edges.len(),
                    "mirrored canvas for fresh run"
                );
                mirrored.canvas
            }
            RunMode::Update => CanvasData {
                nodes: self
                    .canvas
                    .nodes
                    .iter()
                    .map(|node| Self::rebind_node(node.clone(), &binder, &self.variables))
                    .collect(),
                edges: self.canvas.edges.clone(),
            },
        };

        let index = GraphIndex::build(&canvas.nodes, &canvas.edges);

        let start_nodes: Vec<String> = match self.mode {
            // Caller-supplied ids name pre-mirror identities; discarding
            // them avoids planning against ids the mirror just retired.
            RunMode::Create => index.root_ids(),
            RunMode::Update => {
                if self.start_nodes.is_empty() {
                    index.root_ids()
                } else {
                    self.start_nodes
                        .iter()
                        .filter(|id| index.node_map.contains_key(*id))
                        .cloned()
                        .collect()
                }
            }
        };
        if start_nodes.is_empty() {
            debug!("resolved start set is empty, returning empty plan");
            return Ok(ExecutionPlan::default());
        }

        let subtree = reachable_from(&start_nodes, &index.child_map);
        debug!(
            start = start_nodes.len(),
            subtree = subtree.len(),
            "resolved start subtree"
        );

        let records: Vec<WorkflowNode> = canvas
            .nodes
            .iter()
            .map(|node| build_record(node, &index, &subtree))
            .collect();

        let node_executions = sort::order(records);
        debug!(records = node_executions.len(), "prepared execution plan");

        Ok(ExecutionPlan {
            node_executions,
            start_nodes,
        })
    }

    /// Create-mode node transform: cached previews are stale the moment the
    /// graph forks, and queries are rebound from the original text.
    fn refresh_node(
        mut node: CanvasNode,
        binder: &VariableBinder<'_>,
        variables: &[WorkflowVariable],
    ) -> CanvasNode {
        node.data.content_preview = None;
        Self::rebind_node(node, binder, variables)
    }

    fn rebind_node(
        mut node: CanvasNode,
        binder: &VariableBinder<'_>,
        variables: &[WorkflowVariable],
    ) -> CanvasNode {
        let rebound = node.skill_metadata().map(|meta| binder.bind(meta, variables));
        if let Some(meta) = rebound {
            node.data.metadata = NodeMetadata::SkillResponse(meta);
        }
        node
    }
}

fn build_record(
    node: &CanvasNode,
    index: &GraphIndex,
    subtree: &AHashSet<String>,
) -> WorkflowNode {
    let parent_node_ids: Vec<String> = index
        .parents_of(&node.id)
        .iter()
        .unique()
        .cloned()
        .collect();
    let child_node_ids: Vec<String> = index
        .children_of(&node.id)
        .iter()
        .unique()
        .cloned()
        .collect();

    let status = if subtree.contains(&node.id) && node.node_type.is_rerunnable() {
        NodeStatus::Init
    } else {
        NodeStatus::Finish
    };

    // Parents missing from the node map leave no filter behind; the node is
    // simply rootless on that side.
    let connect_to: Vec<ConnectToFilter> = parent_node_ids
        .iter()
        .filter_map(|parent_id| index.node(parent_id))
        .filter(|parent| !parent.data.entity_id.is_empty())
        .map(|parent| ConnectToFilter {
            node_type: parent.node_type,
            entity_id: parent.data.entity_id.clone(),
            handle_type: HandleType::Source,
        })
        .collect();

    let (original_query, processed_query, result_history) = match node.skill_metadata() {
        Some(meta) => {
            let original = meta.query.clone();
            let processed = meta
                .llm_input_query
                .clone()
                .unwrap_or_else(|| meta.query.clone());
            let history = resolve_result_history(meta, index);
            (Some(original), Some(processed), history)
        }
        None => (None, None, Vec::new()),
    };

    WorkflowNode {
        node_id: node.id.clone(),
        node_type: node.node_type,
        entity_id: node.data.entity_id.clone(),
        title: node.data.title.clone(),
        status,
        connect_to,
        parent_node_ids,
        child_node_ids,
        original_query,
        processed_query,
        result_history,
    }
}

/// Resolves prior results referenced by with-history context items: each
/// item anchors a conversation-ancestry walk at the response node it names.
fn resolve_result_history(
    meta: &crate::canvas::SkillResponseMetadata,
    index: &GraphIndex,
) -> Vec<ResultHistoryEntry> {
    let mut seen: AHashSet<String> = AHashSet::new();
    let mut history = Vec::new();

    for item in meta.context_items.iter().filter(|item| item.with_history) {
        let anchor = index
            .node_map
            .values()
            .filter(|node| {
                node.node_type == NodeType::SkillResponse
                    && node.data.entity_id == item.entity_id
            })
            .min_by(|a, b| a.id.cmp(&b.id));
        let Some(anchor) = anchor else {
            continue;
        };

        for ancestor in thread_history(&anchor.id, &index.node_map, &index.parent_map) {
            if seen.insert(ancestor.data.entity_id.clone()) {
                history.push(ResultHistoryEntry {
                    result_id: ancestor.data.entity_id.clone(),
                    title: ancestor.data.title.clone(),
                });
            }
        }
    }
    history
}
