//! The traversal engine.
//!
//! Walks every indexed shape of a model and, for each applied trait, walks
//! the trait payload in lock-step with the trait's own definition shape. The
//! payload tells the engine *what* text exists; the definition tells it
//! whether an object key is a declared member name (schema, not indexed) or
//! free-form data (indexed as text of its own).
//!
//! Output order:
//! 1. For each shape in graph order: the shape's name, then the text of each
//!    applied trait in declaration order, payloads depth-first in declared
//!    key order and array index order.
//! 2. One instance per distinct namespace, in first-visited order.

use indexmap::IndexSet;
use log::{debug, info, trace};

use lexis_core::{
    identifier::Id,
    model::Model,
    node::Node,
    prelude,
    shape::Shape,
    shape_id::ShapeId,
};

use crate::{
    config::IndexConfig,
    error::Result,
    instance::{TextInstance, TextLocation},
    path::PropertyPath,
    resolver,
};

/// Runs one full indexing pass over `model`.
pub(crate) fn collect(model: &Model, config: &IndexConfig) -> Result<Vec<TextInstance>> {
    info!(
        model:% = model.id(),
        shapes = model.len(),
        include_builtins = config.include_builtins();
        "Indexing model text"
    );

    let mut traversal = Traversal::new(model);
    for shape in model
        .shapes()
        .filter(|shape| config.include_builtins() || !prelude::is_builtin(&shape.id()))
    {
        traversal.visit_shape(shape)?;
    }
    let instances = traversal.finish()?;

    info!(model:% = model.id(), instances = instances.len(); "Model text indexed");
    Ok(instances)
}

/// The trait application a payload value belongs to.
#[derive(Debug, Clone, Copy)]
struct AppliedTrait {
    shape: ShapeId,
    trait_id: ShapeId,
}

struct Traversal<'m> {
    model: &'m Model,
    references_trait: ShapeId,
    instances: Vec<TextInstance>,
    namespaces: IndexSet<Id>,
}

impl<'m> Traversal<'m> {
    fn new(model: &'m Model) -> Self {
        Self {
            model,
            references_trait: prelude::references_trait(),
            instances: Vec::new(),
            namespaces: IndexSet::new(),
        }
    }

    fn visit_shape(&mut self, shape: &'m Shape) -> Result<()> {
        let id = shape.id();
        self.namespaces.insert(id.namespace());

        let instance = TextInstance::builder(TextLocation::Shape)
            .shape(id)
            .text(shape.local_name())
            .build()?;
        self.emit(instance);

        for (trait_id, value) in shape.traits() {
            // References name other shapes, which are indexed on their own.
            if *trait_id == self.references_trait {
                trace!(shape:% = id; "Skipping references trait");
                continue;
            }

            let schema = self.model.shape(trait_id);
            if schema.is_none() {
                debug!(
                    shape:% = id,
                    trait_id:% = trait_id;
                    "Trait definition not found, indexing payload as free-form"
                );
            }

            let applied = AppliedTrait {
                shape: id,
                trait_id: *trait_id,
            };
            self.visit_node(value, applied, &mut PropertyPath::new(), schema)?;
        }

        Ok(())
    }

    /// Visits `node`, the value at `path` of the `applied` trait payload,
    /// modeled by `schema` when known.
    fn visit_node(
        &mut self,
        node: &Node,
        applied: AppliedTrait,
        path: &mut PropertyPath,
        schema: Option<&'m Shape>,
    ) -> Result<()> {
        match node {
            Node::String(text) => self.emit_trait_text(applied, path, text),
            Node::Object(members) => {
                let keys_are_data = resolver::keys_are_data(schema);
                for (key, value) in members {
                    let child = resolver::resolve(self.model, schema, Some(key));
                    let mut scope = path.enter_key(key);
                    if child.is_none() || keys_are_data {
                        self.emit_trait_text(applied, &scope, key)?;
                    }
                    self.visit_node(value, applied, &mut scope, child)?;
                }
                Ok(())
            }
            Node::Array(elements) => {
                let child = resolver::resolve(self.model, schema, None);
                for (index, element) in elements.iter().enumerate() {
                    let mut scope = path.enter_index(index);
                    self.visit_node(element, applied, &mut scope, child)?;
                }
                Ok(())
            }
            Node::Null | Node::Boolean(_) | Node::Number(_) => Ok(()),
        }
    }

    fn emit_trait_text(
        &mut self,
        applied: AppliedTrait,
        path: &PropertyPath,
        text: &str,
    ) -> Result<()> {
        let instance = TextInstance::builder(TextLocation::AppliedTrait)
            .shape(applied.shape)
            .trait_id(applied.trait_id)
            .property_path(path.segments().to_vec())
            .text(text)
            .build()?;
        self.emit(instance);
        Ok(())
    }

    fn emit(&mut self, instance: TextInstance) {
        trace!(
            location:% = instance.location(),
            text = instance.text(),
            path = instance.formatted_path();
            "Text instance"
        );
        self.instances.push(instance);
    }

    /// Appends the namespace instances and returns everything collected.
    fn finish(mut self) -> Result<Vec<TextInstance>> {
        let namespaces = std::mem::take(&mut self.namespaces);
        for namespace in namespaces {
            let instance = TextInstance::builder(TextLocation::Namespace)
                .text(namespace.to_owned_string())
                .build()?;
            self.emit(instance);
        }
        Ok(self.instances)
    }
}
