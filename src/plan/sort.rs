use ahash::{AHashMap, AHashSet};

use super::record::WorkflowNode;

/// Orders execution records so every record appears after all of its
/// parents.
///
/// Depth-first emit with the visited mark set *before* recursing into
/// parents: if a record's parent chain loops back to it, the second visit
/// short-circuits instead of recursing forever, which breaks cycles at the
/// point of re-visitation while every non-cyclic edge stays respected.
///
/// Ties are broken by lexicographic node id, both across the roots loop and
/// among a record's parents, so the output order is a pure function of the
/// input content, independent of input array order. Records without
/// dependency constraints keep that same lexicographic relative order.
pub fn order(records: Vec<WorkflowNode>) -> Vec<WorkflowNode> {
    let ids: Vec<String> = records.iter().map(|r| r.node_id.clone()).collect();
    let parents_of: AHashMap<String, Vec<String>> = records
        .iter()
        .map(|r| (r.node_id.clone(), r.parent_node_ids.clone()))
        .collect();

    let ordered = order_ids(&ids, &parents_of);

    let mut by_id: AHashMap<String, WorkflowNode> = records
        .into_iter()
        .map(|r| (r.node_id.clone(), r))
        .collect();
    ordered
        .iter()
        .filter_map(|id| by_id.remove(id))
        .collect()
}

/// Shared ordering core over plain id lists, used by [`order`] and by the
/// persisted-row variant. Parent ids naming nodes outside `ids` are treated
/// as absent (the referencing node is effectively rootless on that side).
pub(crate) fn order_ids<'a>(
    ids: &'a [String],
    parents_of: &'a AHashMap<String, Vec<String>>,
) -> Vec<String> {
    let known: AHashSet<&str> = ids.iter().map(String::as_str).collect();

    let mut roots: Vec<&String> = ids.iter().collect();
    roots.sort();

    let mut visited: AHashSet<&'a str> = AHashSet::with_capacity(ids.len());
    let mut out: Vec<String> = Vec::with_capacity(ids.len());

    fn visit<'a>(
        id: &'a str,
        parents_of: &'a AHashMap<String, Vec<String>>,
        known: &AHashSet<&str>,
        visited: &mut AHashSet<&'a str>,
        out: &mut Vec<String>,
    ) {
        if !known.contains(id) {
            return;
        }
        // Marking before the parent recursion is the cycle guard.
        if !visited.insert(id) {
            return;
        }

        let mut parents: Vec<&'a str> = parents_of
            .get(id)
            .map(|parents| parents.iter().map(String::as_str).collect())
            .unwrap_or_default();
        parents.sort_unstable();
        parents.dedup();

        for parent in parents {
            visit(parent, parents_of, known, visited, out);
        }
        out.push(id.to_string());
    }

    for id in roots {
        visit(id, parents_of, &known, &mut visited, &mut out);
    }
    out
}
