//! Tests for ParamNode construction, queries and serialization

use rstest::rstest;
use serde_json::json;

use paramtree::tree_traits::TreeNodeConvert;
use paramtree::{parse, DomainError, ParamNode};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn given_param_node_then_is_send_and_sync() {
    assert_send_sync::<ParamNode>();
}

#[rstest]
#[case("")]
#[case(" ")]
#[case("has space")]
#[case("dash-name")]
#[case("paren(")]
fn given_invalid_name_when_constructing_then_errors(#[case] name: &str) {
    // Act
    let result = ParamNode::new(name);

    // Assert
    assert!(matches!(result, Err(DomainError::InvalidName(n)) if n == name));
}

#[test]
fn given_root_constructor_when_building_then_empty_name_is_allowed() {
    let root = ParamNode::root_with(vec![ParamNode::new("kind").unwrap()]).unwrap();

    assert!(root.is_root());
    assert_eq!(root.name(), "");
    assert_eq!(root.to_string(), "root");
    assert_eq!(root.children()[0].to_string(), "kind");
}

#[test]
fn given_root_as_child_when_constructing_then_errors() {
    // Arrange
    let inner = ParamNode::with_children("a", vec![ParamNode::root()]);

    // Act
    let outer = ParamNode::root_with(vec![ParamNode::root()]);

    // Assert
    assert_eq!(inner, Err(DomainError::InvalidName(String::new())));
    assert_eq!(outer, Err(DomainError::InvalidName(String::new())));
}

#[test]
fn given_constructed_tree_when_reparsing_canonical_form_then_tree_is_identical() {
    // Arrange
    let a = ParamNode::with_children("a", vec![ParamNode::new("b").unwrap()]).unwrap();
    let root = ParamNode::root_with(vec![a, ParamNode::new("c").unwrap()]).unwrap();

    // Act
    let reparsed = parse(root.canonical_form().as_str()).unwrap();

    // Assert
    assert_eq!(reparsed, root);
    assert_eq!(reparsed.children()[0].child_names(), vec!["b"]);
}

#[test]
fn given_expression_when_using_from_str_then_matches_parse() {
    let from_str: ParamNode = "kind,items(title)".parse().unwrap();

    assert_eq!(from_str, parse("kind,items(title)").unwrap());
}

#[test]
fn given_tree_when_serializing_to_json_then_omits_empty_children() {
    // Arrange
    let root = parse("kind,items(title)").unwrap();

    // Act
    let value = serde_json::to_value(&root).unwrap();

    // Assert
    assert_eq!(
        value,
        json!({
            "name": "",
            "children": [
                { "name": "kind" },
                { "name": "items", "children": [ { "name": "title" } ] }
            ]
        })
    );
}

#[test]
fn given_json_when_deserializing_then_rebuilds_tree() {
    let root = parse("kind,items(title,characteristics(length))").unwrap();
    let text = serde_json::to_string(&root).unwrap();

    let back: ParamNode = serde_json::from_str(&text).unwrap();

    assert_eq!(back, root);
}

#[rstest]
#[case(json!({ "name": "bad name" }))]
#[case(json!({ "name": "", "children": [ { "name": "" } ] }))]
#[case(json!({ "name": "ok", "children": [ { "name": "a.b" } ] }))]
fn given_invalid_names_in_json_when_deserializing_then_errors(#[case] value: serde_json::Value) {
    let result: Result<ParamNode, _> = serde_json::from_value(value);

    assert!(result.is_err());
}

#[test]
fn given_tree_when_walking_then_exposes_paths() {
    let root = parse("kind,items(title,characteristics(length))").unwrap();

    assert_eq!(
        root.leaf_paths(),
        vec!["kind", "items.title", "items.characteristics.length"]
    );
    assert!(root.contains_path("items.characteristics.length"));
    assert!(!root.contains_path("items.kind"));
    assert_eq!(
        root.descend(&["items", "characteristics"])
            .map(|n| n.child_names()),
        Some(vec!["length"])
    );
    assert_eq!(root.iter().count(), 6);
    assert_eq!((&root).into_iter().filter(|n| n.is_leaf()).count(), 3);
}

#[test]
fn given_tree_when_rendering_then_uses_termtree_layout() {
    let root = parse("items(title)").unwrap();

    let rendered = root.to_tree_string().to_string();

    assert_eq!(rendered, "root\n└── items\n    └── title\n");
}
