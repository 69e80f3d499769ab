//! The storage layer's view of execution records.
//!
//! Persisted rows carry their adjacency lists JSON-encoded inside string
//! columns. That encoding is decoded to native lists at this boundary only;
//! rows travel through re-ordering otherwise untouched so they can be
//! written back bit-for-bit.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use super::sort::order_ids;

/// A node-execution row as persisted by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedNodeExecution {
    pub node_id: String,
    /// JSON-encoded string array, e.g. `["a","b"]`. May be null.
    #[serde(default)]
    pub parent_node_ids: Option<String>,
    #[serde(default)]
    pub child_node_ids: Option<String>,
    /// Columns this core does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Decodes a JSON-encoded id-list column. Null, absent, and malformed
/// values all read as empty; the storage layer has historically produced
/// each of them.
fn decode_id_list(raw: Option<&str>) -> Vec<String> {
    raw.and_then(|s| serde_json::from_str::<Vec<String>>(s).ok())
        .unwrap_or_default()
}

/// Restores dependency order over already-persisted rows, with the same
/// cycle tolerance and lexicographic tie-break as [`super::sort::order`].
pub fn sort_node_executions_by_execution_order(
    rows: Vec<PersistedNodeExecution>,
) -> Vec<PersistedNodeExecution> {
    let ids: Vec<String> = rows.iter().map(|r| r.node_id.clone()).collect();
    let parents_of: AHashMap<String, Vec<String>> = rows
        .iter()
        .map(|r| {
            (
                r.node_id.clone(),
                decode_id_list(r.parent_node_ids.as_deref()),
            )
        })
        .collect();

    let ordered = order_ids(&ids, &parents_of);

    let mut by_id: AHashMap<String, PersistedNodeExecution> = rows
        .into_iter()
        .map(|r| (r.node_id.clone(), r))
        .collect();
    ordered
        .iter()
        .filter_map(|id| by_id.remove(id))
        .collect()
}
