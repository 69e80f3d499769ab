use ahash::AHashMap;

use crate::canvas::{CanvasEdge, CanvasNode};

/// Adjacency view of a canvas graph, built once per planning pass.
///
/// Duplicate node ids resolve last-write-wins and edges whose endpoints are
/// not in the node set are skipped: the canvas editor can transiently emit
/// both while the user is mid-edit, and neither should fail a plan.
#[derive(Debug, Default)]
pub struct GraphIndex {
    /// id -> node.
    pub node_map: AHashMap<String, CanvasNode>,
    /// id -> ids of nodes with an edge into this node. Every node id has an
    /// entry, empty for roots.
    pub parent_map: AHashMap<String, Vec<String>>,
    /// id -> ids of nodes this node has an edge into. Every node id has an
    /// entry, empty for leaves.
    pub child_map: AHashMap<String, Vec<String>>,
}

impl GraphIndex {
    pub fn build(nodes: &[CanvasNode], edges: &[CanvasEdge]) -> Self {
        let mut node_map: AHashMap<String, CanvasNode> = AHashMap::with_capacity(nodes.len());
        let mut parent_map: AHashMap<String, Vec<String>> = AHashMap::with_capacity(nodes.len());
        let mut child_map: AHashMap<String, Vec<String>> = AHashMap::with_capacity(nodes.len());

        for node in nodes {
            node_map.insert(node.id.clone(), node.clone());
            parent_map.entry(node.id.clone()).or_default();
            child_map.entry(node.id.clone()).or_default();
        }

        for edge in edges {
            if !node_map.contains_key(&edge.source) || !node_map.contains_key(&edge.target) {
                continue;
            }
            if let Some(children) = child_map.get_mut(&edge.source) {
                children.push(edge.target.clone());
            }
            if let Some(parents) = parent_map.get_mut(&edge.target) {
                parents.push(edge.source.clone());
            }
        }

        Self {
            node_map,
            parent_map,
            child_map,
        }
    }

    pub fn node(&self, id: &str) -> Option<&CanvasNode> {
        self.node_map.get(id)
    }

    /// Parent ids of `id`, in edge input order. Neighbor order carries no
    /// guarantee beyond that; ordering decisions belong to the sorter.
    pub fn parents_of(&self, id: &str) -> &[String] {
        self.parent_map.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn children_of(&self, id: &str) -> &[String] {
        self.child_map.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of the graph's natural roots, sorted lexicographically.
    ///
    /// A node counts as a root when it has no parents, or when every parent
    /// is the node itself: a self-looping root would otherwise never be
    /// scheduled.
    pub fn root_ids(&self) -> Vec<String> {
        let mut roots: Vec<String> = self
            .node_map
            .keys()
            .filter(|id| self.parents_of(id).iter().all(|parent| parent == *id))
            .cloned()
            .collect();
        roots.sort();
        roots
    }
}
