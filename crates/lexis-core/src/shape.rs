//! Shapes: the typed nodes of the model graph.
//!
//! Every [`Shape`] carries two views of its type:
//!
//! - [`ShapeType`] - the declared type, used when describing a shape to people
//!   ("structure", "list", ...).
//! - [`ShapeKind`] - the structural category with the member edges that
//!   nested values are resolved through (record, list, set, map, member,
//!   scalar, other).
//!
//! Shapes are normally produced by [`ModelBuilder`](crate::model::ModelBuilder)
//! from a [`ShapeBuilder`].

use std::fmt;

use indexmap::IndexMap;

use crate::{node::Node, shape_id::ShapeId};

/// Applied traits of a shape: trait shape id to trait payload.
pub type TraitMap = IndexMap<ShapeId, Node>;

/// Declared type of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Structure,
    Union,
    List,
    Set,
    Map,
    Member,
    String,
    Boolean,
    Byte,
    Short,
    Integer,
    Long,
    Float,
    Double,
    BigInteger,
    BigDecimal,
    Blob,
    Timestamp,
    Document,
    Service,
    Operation,
    Resource,
}

impl ShapeType {
    /// Returns the lowercase name of the type, e.g. `"bigInteger"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Structure => "structure",
            ShapeType::Union => "union",
            ShapeType::List => "list",
            ShapeType::Set => "set",
            ShapeType::Map => "map",
            ShapeType::Member => "member",
            ShapeType::String => "string",
            ShapeType::Boolean => "boolean",
            ShapeType::Byte => "byte",
            ShapeType::Short => "short",
            ShapeType::Integer => "integer",
            ShapeType::Long => "long",
            ShapeType::Float => "float",
            ShapeType::Double => "double",
            ShapeType::BigInteger => "bigInteger",
            ShapeType::BigDecimal => "bigDecimal",
            ShapeType::Blob => "blob",
            ShapeType::Timestamp => "timestamp",
            ShapeType::Document => "document",
            ShapeType::Service => "service",
            ShapeType::Operation => "operation",
            ShapeType::Resource => "resource",
        }
    }

    /// Returns `true` for types whose values carry no nested members.
    pub fn is_simple(&self) -> bool {
        matches!(
            self,
            ShapeType::String
                | ShapeType::Boolean
                | ShapeType::Byte
                | ShapeType::Short
                | ShapeType::Integer
                | ShapeType::Long
                | ShapeType::Float
                | ShapeType::Double
                | ShapeType::BigInteger
                | ShapeType::BigDecimal
                | ShapeType::Blob
                | ShapeType::Timestamp
                | ShapeType::Document
        )
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural category of a shape together with its member edges.
///
/// Member edges point at member shapes (ids with a member part); a member
/// shape in turn points at its target through [`ShapeKind::Member`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    /// Named fields: structures and unions. Member name to member shape id.
    Record(IndexMap<String, ShapeId>),
    /// Ordered collection with a single element member.
    List(ShapeId),
    /// Unordered collection with a single element member.
    Set(ShapeId),
    /// Key/value collection.
    Map { key: ShapeId, value: ShapeId },
    /// A slot in a container that targets another shape.
    Member { target: ShapeId },
    /// Strings, numbers, blobs, timestamps and documents.
    Scalar,
    /// Services, operations and resources.
    Other,
}

/// A named, typed node of the model graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    shape_type: ShapeType,
    kind: ShapeKind,
    traits: TraitMap,
}

impl Shape {
    pub(crate) fn new(
        id: ShapeId,
        shape_type: ShapeType,
        kind: ShapeKind,
        traits: TraitMap,
    ) -> Self {
        Self {
            id,
            shape_type,
            kind,
            traits,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// Applied traits in declaration order.
    pub fn traits(&self) -> &TraitMap {
        &self.traits
    }

    /// Returns the payload of the applied trait `trait_id`, if present.
    pub fn trait_value(&self, trait_id: &ShapeId) -> Option<&Node> {
        self.traits.get(trait_id)
    }

    pub fn is_member(&self) -> bool {
        matches!(self.kind, ShapeKind::Member { .. })
    }

    /// Returns the target of a member shape.
    pub fn target(&self) -> Option<ShapeId> {
        match self.kind {
            ShapeKind::Member { target } => Some(target),
            _ => None,
        }
    }

    /// Human-readable name of the shape: the member name for member shapes,
    /// the shape name otherwise.
    pub fn local_name(&self) -> String {
        self.id
            .member()
            .unwrap_or_else(|| self.id.name())
            .to_owned_string()
    }
}

/// A member declared on a [`ShapeBuilder`].
#[derive(Debug, Clone)]
pub(crate) struct MemberDefinition {
    pub(crate) name: String,
    pub(crate) target: ShapeId,
    pub(crate) traits: TraitMap,
}

/// Builder for a shape and its members.
///
/// Member shapes are materialized by
/// [`ModelBuilder::shape`](crate::model::ModelBuilder::shape), which also
/// validates that the declared members fit the shape type.
///
/// # Examples
///
/// ```
/// use lexis_core::{
///     node::Node,
///     shape::{ShapeBuilder, ShapeType},
///     shape_id::ShapeId,
/// };
///
/// let string = ShapeId::new("smithy.api", "String");
/// let city = ShapeBuilder::new(ShapeType::Structure, ShapeId::new("example.weather", "City"))
///     .member("name", string)
///     .with_trait(ShapeId::new("smithy.api", "documentation"), Node::from("A city."));
/// ```
#[derive(Debug, Clone)]
pub struct ShapeBuilder {
    pub(crate) id: ShapeId,
    pub(crate) shape_type: ShapeType,
    pub(crate) members: Vec<MemberDefinition>,
    pub(crate) traits: TraitMap,
}

impl ShapeBuilder {
    /// Starts a shape of type `shape_type` named `id`.
    pub fn new(shape_type: ShapeType, id: ShapeId) -> Self {
        Self {
            id,
            shape_type,
            members: Vec::new(),
            traits: TraitMap::new(),
        }
    }

    /// Declares a member named `name` targeting `target`.
    pub fn member(self, name: &str, target: ShapeId) -> Self {
        self.member_with_traits(name, target, std::iter::empty())
    }

    /// Declares a member named `name` targeting `target` with traits applied
    /// to the member itself.
    pub fn member_with_traits<I>(mut self, name: &str, target: ShapeId, traits: I) -> Self
    where
        I: IntoIterator<Item = (ShapeId, Node)>,
    {
        self.members.push(MemberDefinition {
            name: name.to_string(),
            target,
            traits: traits.into_iter().collect(),
        });
        self
    }

    /// Applies the trait `trait_id` with payload `value`.
    ///
    /// Applying the same trait twice keeps the last payload.
    pub fn with_trait(mut self, trait_id: ShapeId, value: Node) -> Self {
        self.traits.insert(trait_id, value);
        self
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_type_names() {
        assert_eq!(ShapeType::Structure.to_string(), "structure");
        assert_eq!(ShapeType::BigDecimal.to_string(), "bigDecimal");
        assert!(ShapeType::Document.is_simple());
        assert!(!ShapeType::List.is_simple());
        assert!(!ShapeType::Service.is_simple());
    }

    #[test]
    fn test_local_name_prefers_member_name() {
        let parent = ShapeId::new("ns", "Parent");
        let member = Shape::new(
            parent.with_member("child"),
            ShapeType::Member,
            ShapeKind::Member {
                target: ShapeId::new("smithy.api", "String"),
            },
            TraitMap::new(),
        );
        let top = Shape::new(
            parent,
            ShapeType::Structure,
            ShapeKind::Record(IndexMap::new()),
            TraitMap::new(),
        );

        assert_eq!(member.local_name(), "child");
        assert_eq!(top.local_name(), "Parent");
        assert!(member.is_member());
        assert_eq!(member.target(), Some(ShapeId::new("smithy.api", "String")));
        assert!(top.target().is_none());
    }

    #[test]
    fn test_builder_keeps_last_trait_value() {
        let doc = ShapeId::new("smithy.api", "documentation");
        let builder = ShapeBuilder::new(ShapeType::String, ShapeId::new("ns", "Name"))
            .with_trait(doc, Node::from("first"))
            .with_trait(doc, Node::from("second"));

        assert_eq!(builder.traits.len(), 1);
        assert_eq!(builder.traits[&doc].as_str(), Some("second"));
    }
}
