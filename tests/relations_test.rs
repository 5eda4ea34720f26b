//! Tests for RelationCalculator and the relation report

use rstest::rstest;

use orgtree::application::services::HierarchyService;
use orgtree::domain::{report, Relation, RelationCalculator, TreeArena, TreeBuilder};
use orgtree::util::testing;

fn computed(input: &str) -> TreeArena {
    testing::init_test_setup();
    HierarchyService::default().build(input).unwrap()
}

fn relation(tree: &TreeArena, label: &str) -> Relation {
    *tree.relation(tree.find(label).unwrap()).unwrap()
}

#[test]
fn given_sample_hierarchy_when_reporting_then_counts_per_label() {
    let tree = computed("1,2\n2,3\n2,4\n3,5\n3,6");

    assert_eq!(
        report(&tree),
        "1,0,4,0,0\n2,1,2,0,0\n2,1,0,1,1\n0,1,0,1,1\n0,1,0,2,1\n0,1,0,2,1"
    );
}

#[test]
fn given_report_when_printed_then_no_trailing_newline() {
    let out = HierarchyService::default().report("a,b\n").unwrap();
    assert_eq!(out, "1,0,0,0,0\n0,1,0,0,0");
}

#[test]
fn given_wide_tree_when_computed_then_siblings_counted() {
    let tree = computed("r,a\nr,b\nr,c\nr,d");

    assert_eq!(relation(&tree, "r").direct_management, 4);
    for leaf in ["a", "b", "c", "d"] {
        assert_eq!(relation(&tree, leaf).subordination, 3);
        assert_eq!(relation(&tree, leaf).indirect_subordination, 0);
    }
}

#[test]
fn given_deep_chain_when_computed_then_indirect_counts_grow_with_distance() {
    let input: String = (0..50).map(|i| format!("n{:02},n{:02}\n", i, i + 1)).collect();
    let tree = computed(&input);

    assert_eq!(relation(&tree, "n00").indirect_management, 49);
    assert_eq!(relation(&tree, "n50").indirect_subordination, 49);
    assert_eq!(relation(&tree, "n25").indirect_management, 24);
    assert_eq!(relation(&tree, "n25").indirect_subordination, 24);
}

#[test]
fn given_partially_built_tree_when_more_nodes_added_then_recompute_reflects_them() {
    let mut builder = TreeBuilder::new();
    builder.insert_pair("1", "2").unwrap();
    RelationCalculator::apply(builder.tree_mut()).unwrap();
    assert_eq!(builder.tree().relation(builder.root().unwrap()).unwrap().indirect_management, 0);

    builder.insert_pair("2", "3").unwrap();
    RelationCalculator::apply(builder.tree_mut()).unwrap();

    assert_eq!(builder.tree().relation(builder.root().unwrap()).unwrap().indirect_management, 1);
}

#[rstest]
#[case::single_edge("1,2")]
#[case::sample("1,2\n2,3\n2,4\n3,5\n3,6")]
#[case::star("r,a\nr,b\nr,c")]
#[case::chain("a,b\nb,c\nc,d\nd,e")]
#[case::mixed("x,y\nx,z\ny,u\ny,v\nz,w\nw,q\nq,p\nq,o")]
fn given_any_tree_when_computed_then_relation_invariants_hold(#[case] input: &str) {
    let tree = computed(input);
    let nodes = tree.len() as u64;
    let root = tree.root().unwrap();

    let total_dm: u64 = tree.iter().map(|(_, n)| n.data.relation.direct_management).sum();
    let total_ds: u64 = tree.iter().map(|(_, n)| n.data.relation.direct_subordination).sum();
    assert_eq!(total_dm, nodes - 1);
    assert_eq!(total_ds, nodes - 1);

    let total_im: u64 = tree.iter().map(|(_, n)| n.data.relation.indirect_management).sum();
    let total_is: u64 = tree.iter().map(|(_, n)| n.data.relation.indirect_subordination).sum();
    assert_eq!(total_im, total_is);

    let root_rel = tree.relation(root).unwrap();
    assert_eq!(root_rel.direct_subordination, 0);
    assert_eq!(root_rel.indirect_subordination, 0);
    assert_eq!(root_rel.subordination, 0);

    for (idx, node) in tree.iter() {
        let rel = node.data.relation;
        if node.children.is_empty() {
            assert_eq!(rel.direct_management, 0);
            assert_eq!(rel.indirect_management, 0);
        }
        let below = tree.descendants(idx).len() as u64;
        assert_eq!(rel.indirect_management, below - rel.direct_management);
        let above = tree.ancestors(idx).len() as u64;
        assert_eq!(rel.indirect_subordination, above.saturating_sub(1));
        match node.parent {
            Some(p) => assert_eq!(
                rel.subordination,
                tree.relation(p).unwrap().direct_management - 1
            ),
            None => assert_eq!(rel.subordination, 0),
        }
    }
}
