//! The built-in prelude: shared simple shapes and trait definitions.
//!
//! Prelude shapes live in the [`NAMESPACE`] namespace and are available to
//! every model built with
//! [`ModelBuilder::with_prelude`](crate::model::ModelBuilder::with_prelude).
//! Indexing skips them by default.

use crate::{
    node::Node,
    shape::{ShapeBuilder, ShapeType},
    shape_id::ShapeId,
};

/// Namespace of every prelude shape.
pub const NAMESPACE: &str = "smithy.api";

pub const STRING: &str = "String";
pub const BOOLEAN: &str = "Boolean";
pub const INTEGER: &str = "Integer";
pub const LONG: &str = "Long";
pub const FLOAT: &str = "Float";
pub const DOUBLE: &str = "Double";
pub const BLOB: &str = "Blob";
pub const TIMESTAMP: &str = "Timestamp";
pub const DOCUMENT: &str = "Document";

/// Marker applied to every trait definition.
pub const TRAIT: &str = "trait";
pub const DOCUMENTATION: &str = "documentation";
pub const TAGS: &str = "tags";
pub const DEPRECATED: &str = "deprecated";
/// Cross-references from a shape to resources; its payload names shapes
/// that are already indexed on their own.
pub const REFERENCES: &str = "references";

const REFERENCE: &str = "Reference";
const NON_EMPTY_STRING_LIST: &str = "NonEmptyStringList";
const NON_EMPTY_STRING_MAP: &str = "NonEmptyStringMap";

/// Returns the id of the prelude shape `name`.
///
/// # Examples
///
/// ```
/// use lexis_core::prelude;
///
/// assert_eq!(prelude::id(prelude::STRING).to_string(), "smithy.api#String");
/// ```
pub fn id(name: &str) -> ShapeId {
    ShapeId::new(NAMESPACE, name)
}

/// Id of the cross-reference trait.
pub fn references_trait() -> ShapeId {
    id(REFERENCES)
}

/// Returns `true` if `shape` belongs to the prelude, members included.
pub fn is_builtin(shape: &ShapeId) -> bool {
    shape.namespace() == NAMESPACE
}

/// Declarations of all prelude shapes, in graph order.
pub(crate) fn shapes() -> Vec<ShapeBuilder> {
    let simple = [
        (STRING, ShapeType::String),
        (BOOLEAN, ShapeType::Boolean),
        (INTEGER, ShapeType::Integer),
        (LONG, ShapeType::Long),
        (FLOAT, ShapeType::Float),
        (DOUBLE, ShapeType::Double),
        (BLOB, ShapeType::Blob),
        (TIMESTAMP, ShapeType::Timestamp),
        (DOCUMENT, ShapeType::Document),
    ];

    let mut shapes: Vec<ShapeBuilder> = simple
        .into_iter()
        .map(|(name, shape_type)| ShapeBuilder::new(shape_type, id(name)))
        .collect();

    let string = id(STRING);
    shapes.extend([
        ShapeBuilder::new(ShapeType::List, id(NON_EMPTY_STRING_LIST)).member("member", string),
        ShapeBuilder::new(ShapeType::Map, id(NON_EMPTY_STRING_MAP))
            .member("key", string)
            .member("value", string),
        trait_definition(ShapeType::Structure, TRAIT),
        trait_definition(ShapeType::String, DOCUMENTATION),
        trait_definition(ShapeType::List, TAGS).member("member", string),
        trait_definition(ShapeType::Structure, DEPRECATED)
            .member("message", string)
            .member("since", string),
        trait_definition(ShapeType::List, REFERENCES).member("member", id(REFERENCE)),
        ShapeBuilder::new(ShapeType::Structure, id(REFERENCE))
            .member("resource", string)
            .member("ids", id(NON_EMPTY_STRING_MAP))
            .member("service", string)
            .member("rel", string),
    ]);

    shapes
}

fn trait_definition(shape_type: ShapeType, name: &str) -> ShapeBuilder {
    ShapeBuilder::new(shape_type, id(name)).with_trait(id(TRAIT), Node::empty_object())
}
