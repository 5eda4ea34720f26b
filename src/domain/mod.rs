//! Domain layer: hierarchy storage, construction and relation counting
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod calculator;
pub mod document;
pub mod error;
pub mod relation;
pub mod report;

pub use arena::{NodeData, TreeArena, TreeNode};
pub use builder::TreeBuilder;
pub use calculator::RelationCalculator;
pub use document::{from_document, to_document};
pub use error::{DomainError, DomainResult};
pub use relation::Relation;
pub use report::{report, trace};
