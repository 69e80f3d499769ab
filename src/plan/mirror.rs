use ahash::AHashMap;

use crate::canvas::{CanvasData, CanvasEdge, CanvasNode, NodeMetadata};
use crate::idgen::IdGenerator;

/// Clones a canvas under wholly new identities for a fresh run.
///
/// Resume runs reuse existing identities (rerunning a failed node must not
/// fork a new entity); fresh runs must never alias a previous run's
/// artifacts, so every node gets a new id and entity id, and every edge is
/// remapped through the new node ids.
pub struct CanvasMirror<'a> {
    id_gen: &'a dyn IdGenerator,
}

/// A mirrored canvas plus the old-id -> new-id table, for callers that
/// still hold pre-mirror node ids.
#[derive(Debug)]
pub struct MirroredCanvas {
    pub canvas: CanvasData,
    pub id_map: AHashMap<String, String>,
}

impl<'a> CanvasMirror<'a> {
    pub fn new(id_gen: &'a dyn IdGenerator) -> Self {
        Self { id_gen }
    }

    /// Produces the mirrored canvas. `processor` runs on each node after
    /// re-identification, before the node is placed in the clone; the input
    /// canvas is left untouched.
    ///
    /// Context items referencing entities of mirrored nodes are remapped to
    /// the new entity ids; items referencing external entities (uploaded
    /// resources and the like) keep theirs. Edges whose endpoints did not
    /// survive remapping are dropped, matching the indexer's policy on
    /// dangling edges.
    pub fn mirror<F>(&self, canvas: &CanvasData, mut processor: F) -> MirroredCanvas
    where
        F: FnMut(CanvasNode) -> CanvasNode,
    {
        let mut id_map: AHashMap<String, String> = AHashMap::with_capacity(canvas.nodes.len());
        let mut entity_map: AHashMap<String, String> =
            AHashMap::with_capacity(canvas.nodes.len());
        for node in &canvas.nodes {
            id_map.insert(node.id.clone(), self.id_gen.generate());
            entity_map.insert(node.data.entity_id.clone(), self.id_gen.generate());
        }

        let mut nodes = Vec::with_capacity(canvas.nodes.len());
        for node in &canvas.nodes {
            let mut cloned = node.clone();
            if let Some(new_id) = id_map.get(&node.id) {
                cloned.id = new_id.clone();
            }
            if let Some(new_entity) = entity_map.get(&node.data.entity_id) {
                cloned.data.entity_id = new_entity.clone();
            }
            if let NodeMetadata::SkillResponse(meta) = &mut cloned.data.metadata {
                for item in &mut meta.context_items {
                    if let Some(new_entity) = entity_map.get(&item.entity_id) {
                        item.entity_id = new_entity.clone();
                    }
                }
            }
            nodes.push(processor(cloned));
        }

        let edges = canvas
            .edges
            .iter()
            .filter_map(|edge| {
                let source = id_map.get(&edge.source)?.clone();
                let target = id_map.get(&edge.target)?.clone();
                Some(CanvasEdge {
                    id: Some(self.id_gen.generate()),
                    source,
                    target,
                })
            })
            .collect();

        MirroredCanvas {
            canvas: CanvasData { nodes, edges },
            id_map,
        }
    }
}
