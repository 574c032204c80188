//! Schema resolution for nested trait values.
//!
//! While a trait payload is walked, the engine keeps the shape that models
//! the current position (the *schema*). Descending into an object member or
//! array element resolves the schema of the child through the member edges
//! of the current schema. Any gap - no schema, no such member, a dangling
//! target - resolves to `None`, meaning the child is unmodeled data.

use lexis_core::{
    model::Model,
    shape::{Shape, ShapeKind},
};

/// Resolves the shape that models the child at `key` of a value modeled by
/// `schema`.
///
/// - Records (structures, unions) look up the member named `key`; a missing
///   key resolves to `None`.
/// - Lists and sets ignore `key` and resolve through their element member.
/// - Maps ignore `key` and resolve through their value member.
/// - Every other kind resolves to `None`.
pub fn resolve<'m>(model: &'m Model, schema: Option<&'m Shape>, key: Option<&str>) -> Option<&'m Shape> {
    let member = match schema?.kind() {
        ShapeKind::Record(members) => members.get(key?)?,
        ShapeKind::List(member) | ShapeKind::Set(member) => member,
        ShapeKind::Map { value, .. } => value,
        ShapeKind::Member { .. } | ShapeKind::Scalar | ShapeKind::Other => return None,
    };

    let target = model.shape(member)?.target()?;
    model.shape(&target)
}

/// Returns `true` when the keys of an object modeled by `schema` are data
/// rather than member names, i.e. when `schema` is a map.
pub fn keys_are_data(schema: Option<&Shape>) -> bool {
    matches!(schema.map(Shape::kind), Some(ShapeKind::Map { .. }))
}
