//! the recursive diff algorithm (§4.2) that reduces two [`Node`]s to a
//! [`DiffTree`].
//!
//! the original source links `DiffNode`s with raw `child`/`next` pointers and
//! a mix of owned and borrowed list sentinels, disambiguated by a runtime
//! flag (§9 "cyclic / back-pointered diff trees"). we take the design notes'
//! suggestion instead: a `DiffTree` is an arena (`Vec<DiffNode>`) indexed by
//! small integer ids, `child`/`next` are `Option<DiffId>`, and there is no
//! sentinel head — `object_diff`/`array_diff` just return the id of their
//! first sibling (or `None` for an empty list) and chain the rest via
//! `next`. a filtered view (§4.4, §4.5) borrows a `Rc<DiffTree>` and an id
//! into its arena instead of copying nodes, so "shallow" is just "holds a
//! clone of the Rc and doesn't walk `next`/`child` before use".

use crate::node::{Key, Node};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Stale,
    Added,
    Removed,
    Changed,
}

pub type DiffId = usize;

#[derive(Debug, Clone)]
pub struct DiffNode {
    pub kind: DiffKind,
    pub key: Option<Key>,
    pub node_a: Option<Rc<Node>>,
    pub node_b: Option<Rc<Node>>,
    pub child: Option<DiffId>,
    pub next: Option<DiffId>,
}

impl DiffNode {
    fn leaf(kind: DiffKind, key: Option<Key>, a: Option<Rc<Node>>, b: Option<Rc<Node>>) -> Self {
        Self { kind, key, node_a: a, node_b: b, child: None, next: None }
    }
}

/// a whole-document comparison: the arena of every `DiffNode` produced while
/// comparing two snapshots, plus the id of the root (§3.2 "the DiffNode
/// rooted at the synthetic head").
#[derive(Debug)]
pub struct DiffTree {
    arena: Vec<DiffNode>,
    root: DiffId,
}

impl DiffTree {
    pub fn root(&self) -> DiffId {
        self.root
    }

    pub fn get(&self, id: DiffId) -> &DiffNode {
        &self.arena[id]
    }

    pub fn kind_of(&self, id: DiffId) -> DiffKind {
        self.arena[id].kind
    }

    /// compare two whole documents and produce a [`DiffTree`] (§4.2.1). either
    /// side may be absent, matching the "empty vs first snapshot" case used
    /// for version 0 of a timeline (§4.3).
    pub fn compare(a: Option<&Rc<Node>>, b: Option<&Rc<Node>>) -> DiffTree {
        let mut arena = Vec::new();
        let root = push_comparison(&mut arena, None, a.cloned(), b.cloned());
        DiffTree { arena, root }
    }
}

/// builds a single `DiffNode` comparing `a` and `b` at one level, recursing
/// into `object_diff`/`array_diff` or the one-sided markers as needed, and
/// pushes it (and everything under it) into `arena`. returns its id.
fn push_comparison(
    arena: &mut Vec<DiffNode>,
    key: Option<Key>,
    a: Option<Rc<Node>>,
    b: Option<Rc<Node>>,
) -> DiffId {
    match (a, b) {
        (Some(a), Some(b)) => push_matched(arena, key, a, b),
        (Some(a), None) => push_one_sided(arena, key, DiffKind::Removed, Side::A(a)),
        (None, Some(b)) => push_one_sided(arena, key, DiffKind::Added, Side::B(b)),
        (None, None) => unreachable!("a DiffNode always has at least one side present"),
    }
}

/// the node-layer pass (§4.2.4): both sides are present.
fn push_matched(arena: &mut Vec<DiffNode>, key: Option<Key>, a: Rc<Node>, b: Rc<Node>) -> DiffId {
    if a.kind() != b.kind() {
        let id = arena.len();
        arena.push(DiffNode::leaf(DiffKind::Changed, key, Some(a), Some(b)));
        return id;
    }

    match (&*a, &*b) {
        (Node::Object(entries_a), Node::Object(entries_b)) => {
            let id = arena.len();
            arena.push(DiffNode::leaf(DiffKind::Stale, key, Some(Rc::clone(&a)), Some(Rc::clone(&b))));
            let child = object_diff(arena, entries_a, entries_b);
            arena[id].kind = roll_up(arena, child);
            arena[id].child = child;
            id
        }
        (Node::Array(items_a), Node::Array(items_b)) => {
            let id = arena.len();
            arena.push(DiffNode::leaf(DiffKind::Stale, key, Some(Rc::clone(&a)), Some(Rc::clone(&b))));
            let child = array_diff(arena, items_a, items_b);
            arena[id].kind = roll_up(arena, child);
            arena[id].child = child;
            id
        }
        _ => {
            let kind = if Node::equal(&a, &b) { DiffKind::Stale } else { DiffKind::Changed };
            let id = arena.len();
            arena.push(DiffNode::leaf(kind, key, Some(a), Some(b)));
            id
        }
    }
}

enum Side {
    A(Rc<Node>),
    B(Rc<Node>),
}

/// one-sided recursion: the whole subtree of a removed-only or added-only
/// value is visible in the diff tree, with every interior entry individually
/// marked `kind` (§4.2.1, §4.2.4).
fn push_one_sided(arena: &mut Vec<DiffNode>, key: Option<Key>, kind: DiffKind, side: Side) -> DiffId {
    let (node, is_a) = match &side {
        Side::A(n) => (Rc::clone(n), true),
        Side::B(n) => (Rc::clone(n), false),
    };

    let id = arena.len();
    arena.push(DiffNode::leaf(
        kind,
        key,
        if is_a { Some(Rc::clone(&node)) } else { None },
        if is_a { None } else { Some(Rc::clone(&node)) },
    ));

    let child = match &*node {
        Node::Object(entries) => {
            let mut head = None;
            let mut tail: Option<DiffId> = None;
            for (k, v) in entries {
                let child_side = if is_a { Side::A(Rc::new(v.clone())) } else { Side::B(Rc::new(v.clone())) };
                let child_id = push_one_sided(arena, Some(Rc::clone(k)), kind, child_side);
                link(arena, &mut head, &mut tail, child_id);
            }
            head
        }
        Node::Array(items) => {
            let mut head = None;
            let mut tail: Option<DiffId> = None;
            for (i, v) in items.iter().enumerate() {
                let child_side = if is_a { Side::A(Rc::new(v.clone())) } else { Side::B(Rc::new(v.clone())) };
                let child_id = push_one_sided(arena, Some(index_key(i)), kind, child_side);
                link(arena, &mut head, &mut tail, child_id);
            }
            head
        }
        _ => None,
    };
    arena[id].child = child;
    id
}

fn link(arena: &mut Vec<DiffNode>, head: &mut Option<DiffId>, tail: &mut Option<DiffId>, id: DiffId) {
    if head.is_none() {
        *head = Some(id);
    }
    if let Some(t) = *tail {
        arena[t].next = Some(id);
    }
    *tail = Some(id);
}

fn index_key(i: usize) -> Key {
    Rc::from(i.to_string().as_str())
}

/// object diff (§4.2.2): unordered keyed comparison via a forward pass (every
/// key of `a`, matched against `b` by linear scan) followed by a reverse
/// pass that contributes only the keys unique to `b`. the "found in a but
/// missed by the forward pass" branch the original source has in its reverse
/// pass is unreachable under a correct forward pass (§9 open question); we
/// assert it instead of silently emitting a duplicate entry.
pub fn object_diff(
    arena: &mut Vec<DiffNode>,
    a: &[(Key, Node)],
    b: &[(Key, Node)],
) -> Option<DiffId> {
    let mut head = None;
    let mut tail: Option<DiffId> = None;
    let mut seen_keys: Vec<Key> = Vec::with_capacity(a.len());

    for (ka, va) in a {
        match b.iter().find(|(kb, _)| kb == ka) {
            Some((kb, vb)) => {
                let id = push_comparison(arena, Some(Rc::clone(kb)), Some(Rc::new(va.clone())), Some(Rc::new(vb.clone())));
                link(arena, &mut head, &mut tail, id);
            }
            None => {
                let id = push_comparison(arena, Some(Rc::clone(ka)), Some(Rc::new(va.clone())), None);
                link(arena, &mut head, &mut tail, id);
            }
        }
        seen_keys.push(Rc::clone(ka));
    }

    for (kb, vb) in b {
        if seen_keys.iter().any(|k| k == kb) {
            continue;
        }
        assert!(
            !a.iter().any(|(ka, _)| ka == kb),
            "key `{}` present in both sides should have been emitted by the forward pass",
            kb
        );
        let id = push_comparison(arena, Some(Rc::clone(kb)), None, Some(Rc::new(vb.clone())));
        link(arena, &mut head, &mut tail, id);
    }

    head
}

/// array diff (§4.2.3): positional, index-aligned. not a minimum-edit-distance
/// or LCS computation — that would be a behavior change and is out of scope
/// (§9 "array diff semantics").
pub fn array_diff(arena: &mut Vec<DiffNode>, a: &[Node], b: &[Node]) -> Option<DiffId> {
    let mut head = None;
    let mut tail: Option<DiffId> = None;
    let max_len = a.len().max(b.len());

    for i in 0..max_len {
        let key = Some(index_key(i));
        let id = match (a.get(i), b.get(i)) {
            (Some(va), Some(vb)) =>
                push_comparison(arena, key, Some(Rc::new(va.clone())), Some(Rc::new(vb.clone()))),
            (Some(va), None) => push_comparison(arena, key, Some(Rc::new(va.clone())), None),
            (None, Some(vb)) => push_comparison(arena, key, None, Some(Rc::new(vb.clone()))),
            (None, None) => unreachable!(),
        };
        link(arena, &mut head, &mut tail, id);
    }

    head
}

/// roll-up (§4.2.5): a parent is `Changed` iff any node in its child chain,
/// or recursively in that node's own child chain, is non-`Stale`.
pub fn roll_up(arena: &[DiffNode], child: Option<DiffId>) -> DiffKind {
    if any_changed(arena, child) {
        DiffKind::Changed
    } else {
        DiffKind::Stale
    }
}

fn any_changed(arena: &[DiffNode], mut cursor: Option<DiffId>) -> bool {
    while let Some(id) = cursor {
        let node = &arena[id];
        if node.kind != DiffKind::Stale {
            return true;
        }
        if any_changed(arena, node.child) {
            return true;
        }
        cursor = node.next;
    }
    false
}

/// a sibling list's dominant kind for UI summaries (§6.3): the most-frequent
/// non-stale kind, `Stale` if every sibling is stale, ties broken by
/// enum declaration order `Stale, Added, Removed, Changed`.
pub fn roll_up_kind(arena: &DiffTree, head: Option<DiffId>) -> DiffKind {
    let mut counts = [0usize; 4];
    let mut cursor = head;
    while let Some(id) = cursor {
        counts[kind_index(arena.kind_of(id))] += 1;
        cursor = arena.get(id).next;
    }
    if counts[kind_index(DiffKind::Stale)] == counts.iter().sum::<usize>() {
        return DiffKind::Stale;
    }
    let mut best = DiffKind::Stale;
    let mut best_count = 0;
    for kind in [DiffKind::Stale, DiffKind::Added, DiffKind::Removed, DiffKind::Changed] {
        let count = if kind == DiffKind::Stale { 0 } else { counts[kind_index(kind)] };
        if count > best_count {
            best_count = count;
            best = kind;
        }
    }
    best
}

fn kind_index(kind: DiffKind) -> usize {
    match kind {
        DiffKind::Stale => 0,
        DiffKind::Added => 1,
        DiffKind::Removed => 2,
        DiffKind::Changed => 3,
    }
}

#[cfg(test)]
mod tests;
