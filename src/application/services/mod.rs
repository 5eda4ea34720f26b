//! Application services

pub mod hierarchy;
pub mod matrix;

pub use hierarchy::{read_input, HierarchyService, Pair};
