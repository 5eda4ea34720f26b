//! orgtree: rebuild an organizational hierarchy from (parent, child) pairs and
//! count, for every node, its direct and indirect management and subordination
//! relations.
//!
//! Layers:
//! - [`domain`]: arena tree, builder, relation calculator, report and document formats
//! - [`application`]: services that read input and orchestrate the domain
//! - [`cli`]: clap front-end
//!
//! ```
//! use orgtree::application::services::HierarchyService;
//!
//! let report = HierarchyService::default().report("1,2\n2,3").unwrap();
//! assert_eq!(report, "1,0,1,0,0\n1,1,0,0,0\n0,1,0,1,0");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;
