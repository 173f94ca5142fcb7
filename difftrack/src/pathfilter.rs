//! projection of a timeline onto a sub-tree at a fixed key path (§4.4).
//!
//! a filtered entry never copies a `DiffNode` — it pairs a clone of the
//! version's `Rc<DiffTree>` with the `DiffId` the path resolved to inside
//! that same arena. that is what the source's "shallow diff node" (borrowed
//! `child`/`next`/`key`) amounts to once trees are arenas: the filtered view
//! is nothing but a different entry point into an existing arena.

use crate::diff::{DiffId, DiffKind, DiffTree};
use crate::node::Key;
use crate::timeline::Timeline;
use std::rc::Rc;

pub struct FilteredVersion {
    /// position within the filtered sequence, independent of the source
    /// timeline's own version numbering (§4.4 "order preservation").
    pub filtered_index: u64,
    /// the `version` of the underlying timeline entry this came from.
    pub original_version: u64,
    pub tree: Rc<DiffTree>,
    pub node: DiffId,
}

pub struct FilteredTimeline {
    versions: Vec<FilteredVersion>,
}

impl FilteredTimeline {
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilteredVersion> {
        self.versions.iter()
    }
}

/// descend `tree` from `head` (a sibling-list head) along `path`, one key per
/// level. returns the id of the diff node matching the last path component,
/// or `None` if any prefix key is missing at its level.
fn resolve_path(tree: &DiffTree, head: Option<DiffId>, path: &[Key]) -> Option<DiffId> {
    let (first, rest) = path.split_first()?;
    let mut cursor = head;
    while let Some(id) = cursor {
        let node = tree.get(id);
        if node.key.as_deref() == Some(first.as_ref()) {
            return if rest.is_empty() { Some(id) } else { resolve_path(tree, node.child, rest) };
        }
        cursor = node.next;
    }
    None
}

/// true if `cursor`'s sibling list, or anything under it, is non-stale — the
/// same predicate the roll-up invariant uses for parents (§3.2, §4.2.5),
/// applied here to decide inclusion rather than to assign a kind.
fn any_changed_from(tree: &DiffTree, mut cursor: Option<DiffId>) -> bool {
    while let Some(id) = cursor {
        let node = tree.get(id);
        if node.kind != DiffKind::Stale {
            return true;
        }
        if any_changed_from(tree, node.child) {
            return true;
        }
        cursor = node.next;
    }
    false
}

/// project `timeline` onto `path` (§4.4). `path` must be non-empty.
pub fn filter_path(timeline: &Timeline, path: &[Key]) -> FilteredTimeline {
    assert!(!path.is_empty(), "filter_path requires a non-empty key path");

    let mut versions = Vec::new();
    let mut filtered_index = 0u64;

    for version in timeline.iter() {
        let root_child = version.tree.get(version.tree.root()).child;
        let Some(matched) = resolve_path(&version.tree, root_child, path) else { continue };
        let node = version.tree.get(matched);
        let updated = node.kind != DiffKind::Stale || any_changed_from(&version.tree, node.child);
        if !updated {
            continue;
        }
        versions.push(FilteredVersion {
            filtered_index,
            original_version: version.version,
            tree: Rc::clone(&version.tree),
            node: matched,
        });
        filtered_index += 1;
    }

    FilteredTimeline { versions }
}
