//! Text renderings of a hierarchy: the relation report and the flat trace.

use itertools::Itertools;

use crate::domain::arena::TreeArena;

/// One line of five counts per node, ordered by label.
///
/// Lines are `direct_management,direct_subordination,indirect_management,
/// indirect_subordination,subordination`, joined by newlines without a
/// trailing one.
pub fn report(tree: &TreeArena) -> String {
    tree.iter()
        .map(|(_, node)| &node.data)
        .sorted_by(|a, b| a.label.cmp(&b.label))
        .map(|data| data.relation.to_string())
        .join("\n")
}

/// Pre-order trace, one line per node: its label, its children's labels and
/// its parent's label, separated by single spaces.
pub fn trace(tree: &TreeArena) -> String {
    let mut out = String::new();
    for (_, node) in tree.iter() {
        let mut parts = vec![node.data.label.as_str()];
        parts.extend(node.children.iter().filter_map(|&c| tree.label(c)));
        if let Some(parent) = node.parent.and_then(|p| tree.label(p)) {
            parts.push(parent);
        }
        out.push_str(&parts.join(" "));
        out.push('\n');
    }
    out
}
