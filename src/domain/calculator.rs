//! Relation counting over a fully built hierarchy.

use std::collections::HashMap;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::relation::Relation;

/// Derives the five relation counts of every node from its position.
pub struct RelationCalculator;

impl RelationCalculator {
    /// Computes the counts for the whole tree without touching it.
    pub fn compute(tree: &TreeArena) -> DomainResult<HashMap<Index, Relation>> {
        let root = tree.root().ok_or(DomainError::EmptyTree)?;
        Ok(Self::compute_from(tree, root))
    }

    /// Computes the counts of the subtree below `start`, treating `start` as
    /// a root: it gets no subordination of any kind.
    ///
    /// Every (ancestor, descendant) pair two or more levels apart adds one to
    /// the ancestor's indirect management and one to the descendant's indirect
    /// subordination.
    #[instrument(level = "debug", skip(tree))]
    pub fn compute_from(tree: &TreeArena, start: Index) -> HashMap<Index, Relation> {
        let mut counts: HashMap<Index, Relation> = HashMap::new();
        // nodes from `start` down to the current node's parent
        let mut path: Vec<Index> = Vec::new();
        let mut stack = vec![(start, 0usize)];

        while let Some((idx, depth)) = stack.pop() {
            let Some(node) = tree.get_node(idx) else {
                continue;
            };
            path.truncate(depth);
            counts.entry(idx).or_default();

            if let Some(&parent) = path.last() {
                let siblings = tree
                    .get_node(parent)
                    .map_or(0, |p| p.children.len().saturating_sub(1));
                counts.entry(parent).or_default().direct_management += 1;
                let own = counts.entry(idx).or_default();
                own.direct_subordination = 1;
                own.subordination = siblings as u64;
            }

            if depth >= 2 {
                for &ancestor in &path[..depth - 1] {
                    counts.entry(ancestor).or_default().indirect_management += 1;
                }
                counts.entry(idx).or_default().indirect_subordination += (depth - 1) as u64;
            }

            path.push(idx);
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        counts
    }

    /// Writes freshly computed counts into every node of the tree.
    ///
    /// Counts are recomputed from zero, so applying twice gives the same result.
    #[instrument(level = "debug", skip(tree))]
    pub fn apply(tree: &mut TreeArena) -> DomainResult<()> {
        let counts = Self::compute(tree)?;
        debug!("computed relations for {} nodes", counts.len());
        for (idx, relation) in counts {
            if let Some(node) = tree.get_node_mut(idx) {
                node.data.relation = relation;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeBuilder;

    fn relation_of(tree: &TreeArena, label: &str) -> Relation {
        *tree.relation(tree.find(label).unwrap()).unwrap()
    }

    #[test]
    fn given_chain_when_applied_then_indirect_counts_skip_one_level() {
        let mut tree = TreeBuilder::from_pairs([("a", "b"), ("b", "c"), ("c", "d")]).unwrap();
        RelationCalculator::apply(&mut tree).unwrap();

        assert_eq!(relation_of(&tree, "a").to_string(), "1,0,2,0,0");
        assert_eq!(relation_of(&tree, "b").to_string(), "1,1,1,0,0");
        assert_eq!(relation_of(&tree, "c").to_string(), "1,1,0,1,0");
        assert_eq!(relation_of(&tree, "d").to_string(), "0,1,0,2,0");
    }

    #[test]
    fn given_subtree_start_when_computing_then_start_acts_as_root() {
        let tree = TreeBuilder::from_pairs([("a", "b"), ("b", "c"), ("c", "d"), ("b", "e")]).unwrap();
        let b = tree.find("b").unwrap();

        let counts = RelationCalculator::compute_from(&tree, b);

        assert_eq!(counts.len(), 4);
        assert_eq!(counts[&b].to_string(), "2,0,1,0,0");
        assert_eq!(counts[&tree.find("d").unwrap()].to_string(), "0,1,0,1,0");
        assert_eq!(counts[&tree.find("e").unwrap()].to_string(), "0,1,0,0,1");
    }

    #[test]
    fn given_applied_twice_when_reading_then_counts_unchanged() {
        let mut tree = TreeBuilder::from_pairs([("1", "2"), ("2", "3")]).unwrap();
        RelationCalculator::apply(&mut tree).unwrap();
        let first = relation_of(&tree, "1");
        RelationCalculator::apply(&mut tree).unwrap();
        assert_eq!(relation_of(&tree, "1"), first);
    }

    #[test]
    fn given_empty_tree_when_computing_then_error() {
        let tree = TreeArena::new();
        assert_eq!(
            RelationCalculator::compute(&tree).unwrap_err(),
            DomainError::EmptyTree
        );
    }
}
