use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// Computes the set of node ids reachable from `start_ids` via child edges,
/// including the start ids themselves.
///
/// Breadth-first. The visited set doubles as the cycle guard: a back-edge
/// fails the visited check and is never re-enqueued, so traversal
/// terminates in O(V+E) on any graph.
pub fn reachable_from(
    start_ids: &[String],
    child_map: &AHashMap<String, Vec<String>>,
) -> AHashSet<String> {
    let mut visited: AHashSet<String> = AHashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();

    for id in start_ids {
        if visited.insert(id.clone()) {
            queue.push_back(id);
        }
    }

    while let Some(id) = queue.pop_front() {
        if let Some(children) = child_map.get(id) {
            for child in children {
                if visited.insert(child.clone()) {
                    queue.push_back(child);
                }
            }
        }
    }

    visited
}
