//! the read-only visitor API surfaced to a UI (§6.3): forward iteration over
//! a timeline, siblings, children, the dominant-kind rollup for a sibling
//! list, and the type-filter / diff-kind-filter views (§4.5) that a renderer
//! uses to hide whole categories of entries without rebuilding the tree.

use crate::diff::{DiffId, DiffKind, DiffTree};
use crate::node::NodeKind;
use crate::timeline::{Timeline, TimelineVersion};

pub fn iter_timeline(timeline: &Timeline) -> impl Iterator<Item = &TimelineVersion> {
    timeline.iter()
}

/// every sibling reachable from `head` via `next`, in order.
pub fn iter_siblings(tree: &DiffTree, head: Option<DiffId>) -> Vec<DiffId> {
    let mut out = Vec::new();
    let mut cursor = head;
    while let Some(id) = cursor {
        out.push(id);
        cursor = tree.get(id).next;
    }
    out
}

/// the child list head of one diff node, or `None` if it has no children.
pub fn iter_child(tree: &DiffTree, node: DiffId) -> Option<DiffId> {
    tree.get(node).child
}

pub use crate::diff::roll_up_kind;

/// a shallow view over a sibling list containing only nodes whose kind is in
/// `allowed` (§4.5). children are not filtered — the caller descends into an
/// unfiltered `child` exactly as it would for the unfiltered list.
pub fn filter_by_kind(tree: &DiffTree, head: Option<DiffId>, allowed: &[DiffKind]) -> Vec<DiffId> {
    iter_siblings(tree, head).into_iter().filter(|&id| allowed.contains(&tree.kind_of(id))).collect()
}

/// a shallow view containing only nodes whose `node_b` (preferring `node_b`,
/// falling back to `node_a` for `Removed` entries with no right side) has the
/// given value kind. used by a renderer to e.g. show only object/array
/// entries in a structure outline.
pub fn filter_by_node_kind(tree: &DiffTree, head: Option<DiffId>, kind: NodeKind) -> Vec<DiffId> {
    iter_siblings(tree, head)
        .into_iter()
        .filter(|&id| {
            let node = tree.get(id);
            let value = node.node_b.as_deref().or(node.node_a.as_deref());
            value.map(|v| v.kind() == kind).unwrap_or(false)
        })
        .collect()
}
