//! termtree rendering of a hierarchy
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::TreeArena;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeArena {
    /// Each node reads `label [dm,ds,im,is,sub]`.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn node_line(arena: &TreeArena, idx: Index) -> String {
            match arena.get_node(idx) {
                Some(node) => format!("{} [{}]", node.data.label, node.data.relation),
                None => String::new(),
            }
        }

        fn build_tree(arena: &TreeArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in &node.children {
                    let mut child_tree = Tree::new(node_line(arena, child_idx));
                    build_tree(arena, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        if let Some(root_idx) = self.root() {
            let mut tree = Tree::new(node_line(self, root_idx));
            build_tree(self, root_idx, &mut tree);
            tree
        } else {
            Tree::new("Empty tree".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RelationCalculator, TreeBuilder};

    #[test]
    fn given_tree_when_rendered_then_lines_carry_counts() {
        let mut tree = TreeBuilder::from_pairs([("1", "2"), ("1", "3")]).unwrap();
        RelationCalculator::apply(&mut tree).unwrap();

        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "1 [2,0,0,0,0]");
        assert!(lines[1].ends_with("2 [0,1,0,0,1]"));
        assert!(lines[2].ends_with("3 [0,1,0,0,1]"));
    }

    #[test]
    fn given_empty_tree_when_rendered_then_placeholder() {
        assert!(TreeArena::new().to_tree_string().to_string().starts_with("Empty tree"));
    }
}
