//! a doubly-linked chain of versioned diff trees (§3.3, §4.3).
//!
//! the source links `TimelineVersion`s with raw `prev`/`next` pointers and
//! distinguishes "owned" timelines (built fresh from snapshots) from
//! "borrowed" ones (the path filter's projection, §4.4) by a flag on each
//! node. here a `Timeline` just owns a `Vec<TimelineVersion>` in order —
//! `prev`/`next` are implicit in vector position, and a filtered timeline
//! (`pathfilter::FilteredTimeline`) is its own small struct that borrows an
//! `Rc<DiffTree>` per entry rather than re-using this type with a borrowed
//! flag.

use crate::diff::DiffTree;
use crate::error::Result;
use crate::node::Node;
use std::rc::Rc;

pub struct TimelineVersion {
    pub version: u64,
    pub tree: Rc<DiffTree>,
}

pub struct Timeline {
    versions: Vec<TimelineVersion>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimelineVersion> {
        self.versions.iter()
    }

    pub fn get(&self, version: u64) -> Option<&TimelineVersion> {
        self.versions.iter().find(|v| v.version == version)
    }

    /// build a timeline from an ordered sequence of already-parsed snapshots
    /// (§4.3). version 0 compares against an absent predecessor, i.e. an
    /// all-`Added` tree; version `i>0` compares snapshot `i-1` against `i`.
    ///
    /// snapshot parsing itself is the caller's job (via the parser adaptor,
    /// §4.3 "parse each file") so a parse failure surfaces with the file's
    /// own path attached, before this function ever runs.
    pub fn build_from_snapshots(snapshots: &[Rc<Node>]) -> Result<Timeline> {
        let mut versions = Vec::with_capacity(snapshots.len());
        let mut prev: Option<&Rc<Node>> = None;
        for (i, snapshot) in snapshots.iter().enumerate() {
            let tree = DiffTree::compare(prev, Some(snapshot));
            versions.push(TimelineVersion { version: i as u64, tree: Rc::new(tree) });
            prev = Some(snapshot);
        }
        Ok(Timeline { versions })
    }

    /// splice `right` onto the end of `self`, renumbering `right`'s versions
    /// to continue `self`'s sequence (§4.3 `attach`).
    pub fn attach(&mut self, right: Timeline) {
        let offset = self.versions.last().map_or(0, |v| v.version + 1);
        for (i, mut version) in right.versions.into_iter().enumerate() {
            version.version = offset + i as u64;
            self.versions.push(version);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffKind;
    use std::rc::Rc;

    fn obj(entries: Vec<(&str, Node)>) -> Rc<Node> {
        Rc::new(Node::Object(entries.into_iter().map(|(k, v)| (Rc::from(k), v)).collect()))
    }

    #[test]
    fn version_zero_is_added_against_empty() {
        let snapshots = vec![obj(vec![("x", Node::Number(1.0))])];
        let timeline = Timeline::build_from_snapshots(&snapshots).unwrap();
        assert_eq!(timeline.len(), 1);
        let v0 = timeline.get(0).unwrap();
        assert_eq!(v0.tree.kind_of(v0.tree.root()), DiffKind::Added);
    }

    #[test]
    fn versions_increase_strictly() {
        let snapshots = vec![
            obj(vec![("x", Node::Number(1.0))]),
            obj(vec![("x", Node::Number(2.0))]),
            obj(vec![("x", Node::Number(2.0))]),
        ];
        let timeline = Timeline::build_from_snapshots(&snapshots).unwrap();
        let versions: Vec<u64> = timeline.iter().map(|v| v.version).collect();
        assert_eq!(versions, vec![0, 1, 2]);
        assert_eq!(timeline.get(1).unwrap().tree.kind_of(timeline.get(1).unwrap().tree.root()), DiffKind::Changed);
        assert_eq!(timeline.get(2).unwrap().tree.kind_of(timeline.get(2).unwrap().tree.root()), DiffKind::Stale);
    }

    #[test]
    fn attach_renumbers_the_right_side() {
        let left = Timeline::build_from_snapshots(&[obj(vec![("x", Node::Number(1.0))])]).unwrap();
        let right = Timeline::build_from_snapshots(&[
            obj(vec![("x", Node::Number(1.0))]),
            obj(vec![("x", Node::Number(2.0))]),
        ])
        .unwrap();
        let mut combined = left;
        combined.attach(right);
        let versions: Vec<u64> = combined.iter().map(|v| v.version).collect();
        assert_eq!(versions, vec![0, 1, 2]);
    }
}
