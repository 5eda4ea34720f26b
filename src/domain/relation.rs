//! Relation counts attached to every node of a hierarchy.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five relation counts of a node relative to its position in the tree.
///
/// Field names double as the keys of the persisted nested-map format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// Number of immediate children
    pub direct_management: u64,
    /// 1 for every node that has a parent, 0 for the root
    pub direct_subordination: u64,
    /// Descendants two or more levels below
    pub indirect_management: u64,
    /// Ancestors two or more levels above
    pub indirect_subordination: u64,
    /// Number of siblings
    pub subordination: u64,
}

impl Relation {
    /// Counts in report order.
    pub fn as_array(&self) -> [u64; 5] {
        [
            self.direct_management,
            self.direct_subordination,
            self.indirect_management,
            self.indirect_subordination,
            self.subordination,
        ]
    }
}

/// Renders the counts as `dm,ds,im,is,sub`.
impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [dm, ds, im, is, sub] = self.as_array();
        write!(f, "{dm},{ds},{im},{is},{sub}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_relation_when_displayed_then_all_zero() {
        assert_eq!(Relation::default().to_string(), "0,0,0,0,0");
    }

    #[test]
    fn given_relation_when_displayed_then_uses_report_order() {
        let relation = Relation {
            direct_management: 1,
            direct_subordination: 2,
            indirect_management: 3,
            indirect_subordination: 4,
            subordination: 5,
        };
        assert_eq!(relation.to_string(), "1,2,3,4,5");
    }
}
