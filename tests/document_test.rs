//! Tests for the nested-map document format

use std::fs;

use serde_json::{json, Value};
use tempfile::TempDir;

use orgtree::application::services::HierarchyService;
use orgtree::application::ApplicationError;
use orgtree::domain::{from_document, report, to_document, trace, DomainError};

const SAMPLE: &str = "1,2\n2,3\n2,4\n3,5\n3,6";

#[test]
fn given_computed_tree_when_saved_and_loaded_then_identical() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tree.json");
    let service = HierarchyService::default();
    let tree = service.build(SAMPLE).unwrap();

    // Act
    service.save_document(&tree, &path).unwrap();
    let loaded = service.load_document(&path).unwrap();

    // Assert
    assert_eq!(report(&loaded), report(&tree));
    assert_eq!(trace(&loaded), trace(&tree));
    assert_eq!(loaded.len(), tree.len());
}

#[test]
fn given_saved_document_when_read_raw_then_has_relation_and_childer_keys() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tree.json");
    let service = HierarchyService::default();
    service
        .save_document(&service.build("a,b").unwrap(), &path)
        .unwrap();

    let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(
        raw,
        json!({
            "a": {
                "relation": {
                    "direct_management": 1,
                    "direct_subordination": 0,
                    "indirect_management": 0,
                    "indirect_subordination": 0,
                    "subordination": 0
                },
                "childer": {
                    "b": {
                        "relation": {
                            "direct_management": 0,
                            "direct_subordination": 1,
                            "indirect_management": 0,
                            "indirect_subordination": 0,
                            "subordination": 0
                        },
                        "childer": {}
                    }
                }
            }
        })
    );
}

#[test]
fn given_document_when_round_tripped_through_value_then_equal() {
    let tree = HierarchyService::default().build(SAMPLE).unwrap();
    let doc = to_document(&tree).unwrap();

    let again = to_document(&from_document(&doc).unwrap()).unwrap();

    assert_eq!(again, doc);
}

#[test]
fn given_missing_childer_when_loading_then_malformed_names_node() {
    let doc = json!({
        "a": {
            "relation": {
                "direct_management": 0, "direct_subordination": 0,
                "indirect_management": 0, "indirect_subordination": 0, "subordination": 0
            }
        }
    });

    let err = from_document(&doc).unwrap_err();

    assert_eq!(
        err,
        DomainError::MalformedInput("node 'a': missing key 'childer'".to_string())
    );
}

#[test]
fn given_bad_relation_field_when_loading_then_malformed() {
    let doc = json!({"a": {"relation": {"direct_management": "many"}, "childer": {}}});
    assert!(matches!(
        from_document(&doc),
        Err(DomainError::MalformedInput(msg)) if msg.starts_with("node 'a': invalid relation")
    ));
}

#[test]
fn given_invalid_json_file_when_loading_then_malformed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = HierarchyService::default().load_document(&path).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::MalformedInput(_))
    ));
}

#[test]
fn given_missing_file_when_loading_then_operation_failed() {
    let temp = TempDir::new().unwrap();
    let err = HierarchyService::default()
        .load_document(&temp.path().join("absent.json"))
        .unwrap_err();
    assert!(matches!(err, ApplicationError::OperationFailed { .. }));
}
