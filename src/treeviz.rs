//! Rendering of provenance trees.
//!
//! One line per node, children indented under their parent:
//!
//! ```text
//! Pattern "ac"
//! └─ Concat "ac"
//!   ├─ Group #1 "a"
//!   │ └─ Disjunction "a"
//!   │   └─ Literal "a"
//!   └─ Literal "c"
//! ```

use serde::Serialize;

use crate::output::Provenance;

/// Owned, serializable copy of a provenance tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvenanceSnapshot {
    /// Kind of the originating node, e.g. "Group".
    pub node_type: String,
    /// Kind plus identifying detail, e.g. "Group #1".
    pub label: String,
    pub value: String,
    pub children: Vec<ProvenanceSnapshot>,
}

pub fn snapshot_from_provenance(provenance: &Provenance<'_>) -> ProvenanceSnapshot {
    ProvenanceSnapshot {
        node_type: provenance.origin.kind_name().to_string(),
        label: provenance.origin.label(),
        value: provenance.value.clone(),
        children: provenance
            .children
            .iter()
            .map(|child| snapshot_from_provenance(child))
            .collect(),
    }
}

fn format_snapshot(
    snapshot: &ProvenanceSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{}{} {} {:?}\n",
        prefix, connector, snapshot.label, snapshot.value
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, &child_prefix, i, child_count));
    }
    output
}

pub fn to_treeviz_str(provenance: &Provenance<'_>) -> String {
    let snapshot = snapshot_from_provenance(provenance);
    let mut output = format!("{} {:?}\n", snapshot.label, snapshot.value);
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count));
    }
    output
}
