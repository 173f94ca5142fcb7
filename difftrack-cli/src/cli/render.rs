use difftrack::node::string_from_number;
use difftrack::{DiffId, DiffKind, DiffTree, Node};
use owo_colors::OwoColorize;
use std::fmt::Write as _;

fn value_string(node: &Node) -> String {
    match node {
        Node::Null => "null".to_string(),
        Node::Bool(b) => b.to_string(),
        Node::Number(n) => string_from_number(*n),
        Node::String(s) => s.clone(),
        Node::Object(_) => "<object>".to_string(),
        Node::Array(_) => "<array>".to_string(),
    }
}

fn write_kind(out: &mut String, kind: DiffKind) {
    match kind {
        DiffKind::Stale => write!(out, "{}", "stale".dimmed()).unwrap(),
        DiffKind::Added => write!(out, "{}", "added".green()).unwrap(),
        DiffKind::Removed => write!(out, "{}", "removed".red()).unwrap(),
        DiffKind::Changed => write!(out, "{}", "changed".yellow()).unwrap(),
    }
}

/// render a diff tree rooted at `node` as an indented outline, in the spirit
/// of the teacher's `Display` impl for workspace status: one line per entry,
/// color carrying the `DiffKind`.
pub fn render_diff_tree(tree: &DiffTree, node: DiffId, depth: usize, out: &mut String) {
    let entry = tree.get(node);
    let indent = "  ".repeat(depth);
    let key = entry.key.as_deref().unwrap_or("<root>");

    write!(out, "{indent}{key}: ").unwrap();
    write_kind(out, entry.kind);

    match (&entry.node_a, &entry.node_b) {
        (Some(a), Some(b)) if entry.kind == DiffKind::Changed && entry.child.is_none() =>
            writeln!(out, " ({} -> {})", value_string(a), value_string(b)).unwrap(),
        (Some(a), None) => writeln!(out, " ({})", value_string(a)).unwrap(),
        (None, Some(b)) => writeln!(out, " ({})", value_string(b)).unwrap(),
        _ => writeln!(out).unwrap(),
    }

    let mut cursor = entry.child;
    while let Some(child) = cursor {
        render_diff_tree(tree, child, depth + 1, out);
        cursor = tree.get(child).next;
    }
}
