//! Tree builder turning ordered (parent, child) pairs into a hierarchy.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::error::{DomainError, DomainResult};

/// Constructs a hierarchy incrementally from (parent, child) pairs.
///
/// The first parent label seen becomes the root. Every later pair must name a
/// parent that already exists somewhere in the tree.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    tree: TreeArena,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            tree: TreeArena::new(),
        }
    }

    /// Builds a complete tree from an ordered sequence of pairs.
    ///
    /// Fails on the first pair whose parent cannot be found; nothing is returned
    /// for a partially built tree.
    pub fn from_pairs<I, P, C>(pairs: I) -> DomainResult<TreeArena>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: AsRef<str>,
    {
        let mut builder = Self::new();
        for (parent, child) in pairs {
            builder.insert_pair(parent.as_ref(), child.as_ref())?;
        }
        if builder.tree.is_empty() {
            return Err(DomainError::EmptyTree);
        }
        Ok(builder.finish())
    }

    /// Appends `child` below the node labelled `parent`, returning the new node.
    ///
    /// An empty builder takes `parent` as its root label first. On error the
    /// tree is left exactly as it was.
    #[instrument(level = "debug", skip(self))]
    pub fn insert_pair(&mut self, parent: &str, child: &str) -> DomainResult<Index> {
        if self.tree.root().is_none() {
            let root = self.start_root(parent);
            let result = self.attach(root, child);
            if result.is_err() {
                self.tree = TreeArena::new();
            }
            return result;
        }
        let parent_idx = self.tree.find(parent)?;
        self.attach(parent_idx, child)
    }

    /// Sets the root label. Any previous content is discarded.
    pub fn start_root(&mut self, label: &str) -> Index {
        self.tree = TreeArena::new();
        self.tree.insert_node(NodeData::new(label), None)
    }

    /// Attaches a new child labelled `label` directly below `parent_idx`.
    ///
    /// A sibling with the same label is overwritten in place. A label that
    /// already exists on the path to the root is a cycle; anywhere else it is
    /// a duplicate.
    #[instrument(level = "trace", skip(self))]
    pub fn attach(&mut self, parent_idx: Index, label: &str) -> DomainResult<Index> {
        let parent_label = self
            .tree
            .label(parent_idx)
            .ok_or_else(|| DomainError::NodeNotFound(format!("{parent_idx:?}")))?;

        let on_path = parent_label == label
            || self
                .tree
                .ancestors(parent_idx)
                .into_iter()
                .any(|a| self.tree.label(a) == Some(label));
        if on_path {
            return Err(DomainError::CycleDetected(label.to_string()));
        }

        if let Some(existing) = self.tree.child_by_label(parent_idx, label) {
            debug!("overwriting existing child {label}");
            return Ok(self
                .tree
                .replace_child(parent_idx, existing, NodeData::new(label)));
        }

        if self.tree.find(label).is_ok() {
            return Err(DomainError::DuplicateLabel {
                label: label.to_string(),
            });
        }

        Ok(self.tree.insert_node(NodeData::new(label), Some(parent_idx)))
    }

    /// Looks up a node by label in the tree built so far.
    pub fn find(&self, label: &str) -> DomainResult<Index> {
        self.tree.find(label)
    }

    pub fn root(&self) -> Option<Index> {
        self.tree.root()
    }

    pub fn tree(&self) -> &TreeArena {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut TreeArena {
        &mut self.tree
    }

    pub fn finish(self) -> TreeArena {
        self.tree
    }
}
