//! Nested-map document format of a hierarchy.
//!
//! ```json
//! { "1": { "relation": { "direct_management": 1, ... },
//!          "childer": { "2": { "relation": { ... }, "childer": {} } } } }
//! ```
//!
//! The document has exactly one top-level key, the root label. Children keep
//! their insertion order.

use generational_arena::Index;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::builder::TreeBuilder;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::relation::Relation;

pub const RELATION_KEY: &str = "relation";
pub const CHILDREN_KEY: &str = "childer";

/// Serializes the tree, relation counts included, into the nested-map form.
#[instrument(level = "debug", skip(tree))]
pub fn to_document(tree: &TreeArena) -> DomainResult<Value> {
    let root = tree.root().ok_or(DomainError::EmptyTree)?;
    let label = tree
        .label(root)
        .ok_or_else(|| DomainError::NodeNotFound(format!("{root:?}")))?;

    let mut doc = Map::new();
    doc.insert(label.to_string(), node_value(tree, root)?);
    Ok(Value::Object(doc))
}

fn node_value(tree: &TreeArena, idx: Index) -> DomainResult<Value> {
    let node = tree
        .get_node(idx)
        .ok_or_else(|| DomainError::NodeNotFound(format!("{idx:?}")))?;

    let mut children = Map::new();
    for &child in &node.children {
        if let Some(label) = tree.label(child) {
            children.insert(label.to_string(), node_value(tree, child)?);
        }
    }

    let relation = serde_json::to_value(node.data.relation)
        .map_err(|e| DomainError::MalformedInput(e.to_string()))?;

    let mut body = Map::new();
    body.insert(RELATION_KEY.to_string(), relation);
    body.insert(CHILDREN_KEY.to_string(), Value::Object(children));
    Ok(Value::Object(body))
}

/// Rebuilds a tree from the nested-map form, parent links and stored counts
/// included.
#[instrument(level = "debug", skip(doc))]
pub fn from_document(doc: &Value) -> DomainResult<TreeArena> {
    let top = doc
        .as_object()
        .ok_or_else(|| DomainError::MalformedInput("document must be an object".into()))?;
    if top.len() != 1 {
        return Err(DomainError::MalformedInput(format!(
            "document must have exactly one root key, found {}",
            top.len()
        )));
    }

    let mut builder = TreeBuilder::new();
    for (label, body) in top {
        let root = builder.start_root(label);
        load_node(&mut builder, root, label, body)?;
    }
    Ok(builder.finish())
}

fn load_node(builder: &mut TreeBuilder, idx: Index, label: &str, body: &Value) -> DomainResult<()> {
    let body = body
        .as_object()
        .ok_or_else(|| DomainError::MalformedInput(format!("node '{label}' must be an object")))?;

    let relation = body.get(RELATION_KEY).ok_or_else(|| missing_key(label, RELATION_KEY))?;
    let relation = Relation::deserialize(relation).map_err(|e| {
        DomainError::MalformedInput(format!("node '{label}': invalid {RELATION_KEY}: {e}"))
    })?;
    if let Some(node) = builder.tree_mut().get_node_mut(idx) {
        node.data.relation = relation;
    }

    let children = body
        .get(CHILDREN_KEY)
        .ok_or_else(|| missing_key(label, CHILDREN_KEY))?
        .as_object()
        .ok_or_else(|| {
            DomainError::MalformedInput(format!("node '{label}': {CHILDREN_KEY} must be an object"))
        })?;

    for (child_label, child_body) in children {
        let child_idx = builder.attach(idx, child_label)?;
        load_node(builder, child_idx, child_label, child_body)?;
    }
    Ok(())
}

fn missing_key(label: &str, key: &str) -> DomainError {
    DomainError::MalformedInput(format!("node '{label}': missing key '{key}'"))
}
