//! Arena-backed hierarchy storage.
//!
//! Parent and child links are `Index` handles into a generational arena, so the
//! parent back-reference never owns anything and removed subtrees leave no
//! dangling handles behind.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::relation::Relation;

/// Data payload for tree nodes: the label and its relation counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Unique identifier of the node within its tree
    pub label: String,
    /// Relation counts, zero until computed
    pub relation: Relation,
}

impl NodeData {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            relation: Relation::default(),
        }
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Label and relation counts of this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in insertion order
    pub children: Vec<Index>,
}

/// Arena-based tree holding one complete hierarchy.
#[derive(Debug)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Inserts a node below `parent`, or as the new root when `parent` is None.
    ///
    /// No label checks happen here; [`crate::domain::TreeBuilder`] enforces them.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    /// Replaces the child `old` of `parent` by a fresh node, keeping its position.
    ///
    /// The whole subtree below `old` is dropped from the arena.
    #[instrument(level = "trace", skip(self))]
    pub fn replace_child(&mut self, parent: Index, old: Index, data: NodeData) -> Index {
        self.remove_subtree(old);
        let node_idx = self.arena.insert(TreeNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(parent) = self.arena.get_mut(parent) {
            if let Some(slot) = parent.children.iter_mut().find(|c| **c == old) {
                *slot = node_idx;
            } else {
                parent.children.push(node_idx);
            }
        }
        node_idx
    }

    fn remove_subtree(&mut self, start: Index) {
        let doomed: Vec<Index> = self.iter_postorder_from(start).map(|(idx, _)| idx).collect();
        for idx in doomed {
            self.arena.remove(idx);
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Label of the node at `idx`.
    pub fn label(&self, idx: Index) -> Option<&str> {
        self.get_node(idx).map(|n| n.data.label.as_str())
    }

    /// Relation counts of the node at `idx`.
    pub fn relation(&self, idx: Index) -> Option<&Relation> {
        self.get_node(idx).map(|n| &n.data.relation)
    }

    /// Finds the node carrying `label` by depth-first search from the root.
    ///
    /// Visits a node, then its children in insertion order. Read-only: a miss
    /// leaves the tree untouched.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, label: &str) -> DomainResult<Index> {
        self.iter()
            .find(|(_, node)| node.data.label == label)
            .map(|(idx, _)| idx)
            .ok_or_else(|| DomainError::NodeNotFound(label.to_string()))
    }

    /// Direct child of `parent` with the given label.
    pub fn child_by_label(&self, parent: Index, label: &str) -> Option<Index> {
        self.get_node(parent)?
            .children
            .iter()
            .copied()
            .find(|&c| self.label(c) == Some(label))
    }

    /// Ancestors of `idx`, nearest first.
    pub fn ancestors(&self, idx: Index) -> Vec<Index> {
        let mut result = Vec::new();
        let mut current = self.get_node(idx).and_then(|n| n.parent);
        while let Some(p) = current {
            result.push(p);
            current = self.get_node(p).and_then(|n| n.parent);
        }
        result
    }

    /// All nodes below `idx` in pre-order, `idx` itself excluded.
    pub fn descendants(&self, idx: Index) -> Vec<Index> {
        self.iter_from(idx).skip(1).map(|(i, _)| i).collect()
    }

    /// Pre-order traversal from the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self, self.root)
    }

    /// Pre-order traversal of the subtree rooted at `start`.
    pub fn iter_from(&self, start: Index) -> TreeIterator<'_> {
        TreeIterator::new(self, Some(start))
    }

    /// Post-order traversal from the root.
    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, self.root)
    }

    /// Post-order traversal of the subtree rooted at `start`.
    pub fn iter_postorder_from(&self, start: Index) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self, Some(start))
    }

    /// Number of levels, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        while let Some((idx, level)) = stack.pop() {
            max_depth = max_depth.max(level);
            if let Some(node) = self.get_node(idx) {
                stack.extend(node.children.iter().map(|&c| (c, level + 1)));
            }
        }
        max_depth
    }

    /// Labels of all nodes without children, in pre-order.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_labels(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| node.data.label.clone())
            .collect()
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a TreeArena, start: Option<Index>) -> Self {
        Self {
            arena,
            stack: start.into_iter().map(|idx| (idx, false)).collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
