use ahash::{AHashMap, AHashSet};

use crate::canvas::{CanvasNode, NodeType};

/// Walks a response node's conversation ancestry: the chain of
/// skill-response parents above `anchor_id`, plus the anchor itself,
/// ordered oldest first.
///
/// At each step the walk follows the nearest skill-response parent,
/// choosing the lexicographically smallest id when a node has several so
/// reruns resolve the same thread. A repeat visit ends the walk, so
/// looping threads terminate.
pub fn thread_history<'a>(
    anchor_id: &'a str,
    node_map: &'a AHashMap<String, CanvasNode>,
    parent_map: &'a AHashMap<String, Vec<String>>,
) -> Vec<&'a CanvasNode> {
    let mut seen: AHashSet<&str> = AHashSet::new();
    let mut chain: Vec<&CanvasNode> = Vec::new();
    let mut current = anchor_id;

    while seen.insert(current) {
        let Some(node) = node_map.get(current) else {
            break;
        };
        chain.push(node);

        let mut parents: Vec<&str> = parent_map
            .get(current)
            .map(|parents| {
                parents
                    .iter()
                    .map(String::as_str)
                    .filter(|parent| {
                        node_map
                            .get(*parent)
                            .is_some_and(|n| n.node_type == NodeType::SkillResponse)
                    })
                    .collect()
            })
            .unwrap_or_default();
        parents.sort_unstable();

        match parents.first().copied() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    chain.reverse();
    chain
}
