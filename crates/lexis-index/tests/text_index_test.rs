//! Integration tests for the text index
//!
//! These tests index small but complete models through the public API and
//! check where each piece of text is reported.

use std::sync::Arc;

use lexis_core::{
    model::Model,
    node::Node,
    prelude,
    shape::{ShapeBuilder, ShapeType},
    shape_id::ShapeId,
};
use lexis_index::{TextIndex, TextIndexCache, TextInstance, TextLocation};

const NAMESPACE: &str = "example.weather";

fn id(name: &str) -> ShapeId {
    ShapeId::new(NAMESPACE, name)
}

fn trait_marker() -> (ShapeId, Node) {
    (prelude::id(prelude::TRAIT), Node::empty_object())
}

/// Trait definitions covering records, lists, maps and documents.
fn trait_definitions() -> Vec<ShapeBuilder> {
    let string = prelude::id(prelude::STRING);
    let (marker, marker_value) = trait_marker();
    vec![
        ShapeBuilder::new(ShapeType::Structure, id("settings"))
            .member("x", id("Inner"))
            .member("items", id("Names"))
            .member("freeform", id("Labels"))
            .member("extra", prelude::id(prelude::DOCUMENT))
            .with_trait(marker, marker_value),
        ShapeBuilder::new(ShapeType::Structure, id("Inner")).member("y", string),
        ShapeBuilder::new(ShapeType::List, id("Names")).member("member", string),
        ShapeBuilder::new(ShapeType::Map, id("Labels"))
            .member("key", string)
            .member("value", string),
    ]
}

fn model_with(shapes: Vec<ShapeBuilder>) -> Model {
    Model::builder()
        .with_prelude()
        .shapes(trait_definitions())
        .shapes(shapes)
        .build()
        .expect("valid model")
}

fn settings_instances(index: &TextIndex) -> Vec<(String, Vec<String>)> {
    index
        .iter()
        .filter(|instance| instance.trait_id() == Some(id("settings")))
        .map(|instance| (instance.text().to_string(), instance.property_path().to_vec()))
        .collect()
}

fn path(segments: &[&str]) -> Vec<String> {
    segments.iter().map(|segment| segment.to_string()).collect()
}

#[test]
fn test_every_shape_name_appears_once() {
    let model = model_with(vec![
        ShapeBuilder::new(ShapeType::Structure, id("City"))
            .member("name", prelude::id(prelude::STRING))
            .member("coordinates", id("Coordinates")),
        ShapeBuilder::new(ShapeType::Structure, id("Coordinates"))
            .member("latitude", prelude::id(prelude::FLOAT))
            .member("longitude", prelude::id(prelude::FLOAT)),
    ]);

    let index = TextIndex::of(&model).unwrap();
    let shape_instances: Vec<&TextInstance> = index.at(TextLocation::Shape).collect();

    let indexed = model
        .shapes()
        .filter(|shape| !prelude::is_builtin(&shape.id()))
        .count();
    assert_eq!(shape_instances.len(), indexed);

    for shape in model.shapes().filter(|shape| !prelude::is_builtin(&shape.id())) {
        let matching = shape_instances
            .iter()
            .filter(|instance| instance.shape() == Some(shape.id()))
            .count();
        assert_eq!(matching, 1, "{} should be reported exactly once", shape.id());
    }

    let latitude = shape_instances
        .iter()
        .find(|instance| instance.shape() == Some(id("Coordinates").with_member("latitude")))
        .expect("member instance");
    assert_eq!(latitude.text(), "latitude");
}

#[test]
fn test_namespaces_are_deduplicated() {
    let model = Model::builder()
        .shapes([
            ShapeBuilder::new(ShapeType::String, ShapeId::new("a.b", "First")),
            ShapeBuilder::new(ShapeType::String, ShapeId::new("a.b", "Second")),
            ShapeBuilder::new(ShapeType::String, ShapeId::new("c.d", "Third")),
        ])
        .build()
        .unwrap();

    let index = TextIndex::of(&model).unwrap();
    let namespaces: Vec<&str> = index.at(TextLocation::Namespace).map(TextInstance::text).collect();

    assert_eq!(namespaces, ["a.b", "c.d"]);
    let trailing: Vec<TextLocation> = index.iter().skip(3).map(TextInstance::location).collect();
    assert_eq!(trailing, [TextLocation::Namespace, TextLocation::Namespace]);
}

#[test]
fn test_nested_object_path() {
    let model = model_with(vec![ShapeBuilder::new(ShapeType::String, id("Report")).with_trait(
        id("settings"),
        Node::object([("x", Node::object([("y", Node::from("hello"))]))]),
    )]);

    let index = TextIndex::of(&model).unwrap();

    assert_eq!(
        settings_instances(&index),
        [("hello".to_string(), path(&["x", ".y"]))]
    );
}

#[test]
fn test_array_element_paths() {
    let model = model_with(vec![ShapeBuilder::new(ShapeType::String, id("Report")).with_trait(
        id("settings"),
        Node::object([("items", Node::array(["a", "b"]))]),
    )]);

    let index = TextIndex::of(&model).unwrap();

    assert_eq!(
        settings_instances(&index),
        [
            ("a".to_string(), path(&["items", "[0]"])),
            ("b".to_string(), path(&["items", "[1]"])),
        ]
    );
}

#[test]
fn test_unmodeled_keys_are_text() {
    let model = model_with(vec![ShapeBuilder::new(ShapeType::String, id("Report")).with_trait(
        id("settings"),
        Node::object([
            ("freeform", Node::object([("k1", Node::from("v1"))])),
            ("extra", Node::object([("k2", Node::from("v2"))])),
        ]),
    )]);

    let index = TextIndex::of(&model).unwrap();

    assert_eq!(
        settings_instances(&index),
        [
            ("k1".to_string(), path(&["freeform", ".k1"])),
            ("v1".to_string(), path(&["freeform", ".k1"])),
            ("k2".to_string(), path(&["extra", ".k2"])),
            ("v2".to_string(), path(&["extra", ".k2"])),
        ]
    );
}

#[test]
fn test_references_trait_is_skipped() {
    let model = model_with(vec![
        ShapeBuilder::new(ShapeType::Resource, id("CityResource")),
        ShapeBuilder::new(ShapeType::Structure, id("Forecast"))
            .member("cityId", prelude::id(prelude::STRING))
            .with_trait(
                prelude::references_trait(),
                Node::array([Node::object([
                    ("resource", Node::from("example.weather#CityResource")),
                    ("rel", Node::from("city")),
                ])]),
            ),
    ]);

    let index = TextIndex::of(&model).unwrap();

    assert_eq!(index.at(TextLocation::AppliedTrait).count(), 0);
    assert!(index.iter().all(|instance| instance.text() != "city"));
}

#[test]
fn test_index_is_memoized() {
    let model = Arc::new(model_with(vec![
        ShapeBuilder::new(ShapeType::String, id("Report"))
            .with_trait(prelude::id(prelude::DOCUMENTATION), Node::from("Daily report.")),
    ]));
    let cache = TextIndexCache::new();

    let first = cache.get_or_build(&model).unwrap();
    let second = cache.get_or_build(&model).unwrap();

    assert_eq!(first.instances(), second.instances());
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.builds(), 1);
}

#[test]
fn test_equal_models_index_equally() {
    let build = || {
        Arc::new(model_with(vec![ShapeBuilder::new(ShapeType::String, id("Report"))
            .with_trait(
                id("settings"),
                Node::object([("items", Node::array(["a", "b"]))]),
            )
            .with_trait(
                prelude::id(prelude::TAGS),
                Node::array(["daily", "public"]),
            )]))
    };
    let left = build();
    let right = build();
    let cache = TextIndexCache::new();

    let left_index = cache.get_or_build(&left).unwrap();
    let right_index = cache.get_or_build(&right).unwrap();

    assert_ne!(left.id(), right.id());
    assert!(!Arc::ptr_eq(&left_index, &right_index));
    assert_eq!(left_index.instances(), right_index.instances());
    assert_eq!(cache.builds(), 2);
}
