//! The model: an immutable shape graph plus model-level metadata.
//!
//! Models are assembled with [`ModelBuilder`], which materializes member
//! shapes and validates that declared members fit each shape type. Every
//! built [`Model`] receives a process-unique [`ModelId`]; two models built
//! from the same shapes are equal in content but distinct in identity.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use indexmap::{IndexMap, map::Entry};
use log::debug;
use thiserror::Error;

use crate::{
    node::Node,
    prelude,
    shape::{Shape, ShapeBuilder, ShapeKind, ShapeType},
    shape_id::ShapeId,
};

static NEXT_MODEL_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a built [`Model`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u64);

impl ModelId {
    fn next() -> Self {
        Self(NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model-{}", self.0)
    }
}

/// Errors detected while assembling a model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("shape `{0}` is defined more than once")]
    DuplicateShape(ShapeId),

    #[error("shape `{0}` is declared with a member id; members are created from their container")]
    MemberId(ShapeId),

    #[error("member shapes cannot be declared directly (`{0}`)")]
    MemberShapeType(ShapeId),

    #[error("member `{member}` is declared more than once on `{shape}`")]
    DuplicateMember { shape: ShapeId, member: String },

    #[error("{shape_type} shape `{shape}` cannot declare members")]
    UnexpectedMembers { shape: ShapeId, shape_type: ShapeType },

    #[error("{shape_type} shape `{shape}` must declare exactly the members {expected:?}, found {found:?}")]
    InvalidMembers {
        shape: ShapeId,
        shape_type: ShapeType,
        expected: &'static [&'static str],
        found: Vec<String>,
    },
}

/// An immutable graph of shapes.
///
/// `Model` is intentionally not `Clone`: its [`ModelId`] is an identity, and
/// caches keyed by it rely on one id meaning one model instance.
#[derive(Debug)]
pub struct Model {
    id: ModelId,
    shapes: IndexMap<ShapeId, Shape>,
    metadata: IndexMap<String, Node>,
}

impl Model {
    /// Starts an empty [`ModelBuilder`].
    pub fn builder() -> ModelBuilder {
        ModelBuilder::default()
    }

    pub fn id(&self) -> ModelId {
        self.id
    }

    /// Iterates over every shape, member shapes included, in graph order.
    ///
    /// Graph order is insertion order: prelude shapes first when included,
    /// then each declared shape immediately followed by its members.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.values()
    }

    pub fn shape(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    pub fn contains_shape(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Model-level metadata in declaration order.
    pub fn metadata(&self) -> &IndexMap<String, Node> {
        &self.metadata
    }

    pub fn metadata_value(&self, key: &str) -> Option<&Node> {
        self.metadata.get(key)
    }
}

/// Builder for [`Model`].
///
/// # Examples
///
/// ```
/// use lexis_core::{
///     model::Model,
///     prelude,
///     shape::{ShapeBuilder, ShapeType},
///     shape_id::ShapeId,
/// };
///
/// let city = ShapeId::new("example.weather", "City");
/// let model = Model::builder()
///     .with_prelude()
///     .shape(ShapeBuilder::new(ShapeType::Structure, city).member("name", prelude::id(prelude::STRING)))
///     .build()
///     .expect("valid model");
///
/// assert!(model.shape(&city.with_member("name")).is_some());
/// ```
#[derive(Debug, Default)]
pub struct ModelBuilder {
    include_prelude: bool,
    shapes: Vec<ShapeBuilder>,
    metadata: IndexMap<String, Node>,
}

impl ModelBuilder {
    /// Adds the built-in prelude shapes ahead of every declared shape.
    pub fn with_prelude(mut self) -> Self {
        self.include_prelude = true;
        self
    }

    /// Declares a shape.
    pub fn shape(mut self, shape: ShapeBuilder) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Declares several shapes at once.
    pub fn shapes<I>(mut self, shapes: I) -> Self
    where
        I: IntoIterator<Item = ShapeBuilder>,
    {
        self.shapes.extend(shapes);
        self
    }

    /// Sets the metadata entry `key`, replacing any previous value.
    pub fn metadata(mut self, key: impl Into<String>, value: Node) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Validates the declared shapes and assembles the model.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] for duplicate shape ids, directly declared
    /// member shapes, and member declarations that do not fit the shape type.
    pub fn build(self) -> Result<Model, ModelError> {
        let declared: Vec<ShapeBuilder> = if self.include_prelude {
            prelude::shapes().into_iter().chain(self.shapes).collect()
        } else {
            self.shapes
        };

        let mut shapes = IndexMap::new();
        for builder in declared {
            for shape in materialize(builder)? {
                match shapes.entry(shape.id()) {
                    Entry::Occupied(entry) => {
                        return Err(ModelError::DuplicateShape(*entry.key()));
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(shape);
                    }
                }
            }
        }

        let model = Model {
            id: ModelId::next(),
            shapes,
            metadata: self.metadata,
        };
        debug!(model:% = model.id, shapes = model.len(); "Model built");

        Ok(model)
    }
}

/// Turns one shape declaration into its container shape followed by its
/// member shapes.
fn materialize(builder: ShapeBuilder) -> Result<Vec<Shape>, ModelError> {
    let ShapeBuilder {
        id,
        shape_type,
        members,
        traits,
    } = builder;

    if id.is_member() {
        return Err(ModelError::MemberId(id));
    }

    let mut names: Vec<String> = Vec::with_capacity(members.len());
    for member in &members {
        if names.contains(&member.name) {
            return Err(ModelError::DuplicateMember {
                shape: id,
                member: member.name.clone(),
            });
        }
        names.push(member.name.clone());
    }

    let kind = match shape_type {
        ShapeType::Structure | ShapeType::Union => ShapeKind::Record(
            names
                .iter()
                .map(|name| (name.clone(), id.with_member(name)))
                .collect(),
        ),
        ShapeType::List | ShapeType::Set => {
            expect_members(id, shape_type, &names, &["member"])?;
            let member = id.with_member("member");
            if shape_type == ShapeType::List {
                ShapeKind::List(member)
            } else {
                ShapeKind::Set(member)
            }
        }
        ShapeType::Map => {
            expect_members(id, shape_type, &names, &["key", "value"])?;
            ShapeKind::Map {
                key: id.with_member("key"),
                value: id.with_member("value"),
            }
        }
        ShapeType::Member => return Err(ModelError::MemberShapeType(id)),
        ShapeType::Service | ShapeType::Operation | ShapeType::Resource => {
            expect_members(id, shape_type, &names, &[])?;
            ShapeKind::Other
        }
        simple => {
            expect_members(id, simple, &names, &[])?;
            ShapeKind::Scalar
        }
    };

    let mut shapes = Vec::with_capacity(members.len() + 1);
    shapes.push(Shape::new(id, shape_type, kind, traits));
    shapes.extend(members.into_iter().map(|member| {
        Shape::new(
            id.with_member(&member.name),
            ShapeType::Member,
            ShapeKind::Member {
                target: member.target,
            },
            member.traits,
        )
    }));

    Ok(shapes)
}

fn expect_members(
    shape: ShapeId,
    shape_type: ShapeType,
    found: &[String],
    expected: &'static [&'static str],
) -> Result<(), ModelError> {
    if expected.is_empty() {
        if found.is_empty() {
            return Ok(());
        }
        return Err(ModelError::UnexpectedMembers { shape, shape_type });
    }

    let matches = found.len() == expected.len()
        && expected.iter().all(|name| found.iter().any(|f| f == name));
    if matches {
        Ok(())
    } else {
        Err(ModelError::InvalidMembers {
            shape,
            shape_type,
            expected,
            found: found.to_vec(),
        })
    }
}
