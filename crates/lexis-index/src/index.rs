//! The text index of one model.

use std::slice;

use lexis_core::model::Model;

use crate::{
    config::IndexConfig,
    error::Result,
    instance::{TextInstance, TextLocation},
    traversal,
};

/// Every text instance of a model, in traversal order.
///
/// Shape and trait instances come first, grouped per shape in graph order;
/// namespace instances follow, in the order their namespaces were first
/// visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextIndex {
    instances: Vec<TextInstance>,
}

impl TextIndex {
    /// Indexes `model` with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Propagates any [`IndexError`](crate::IndexError) raised while
    /// assembling instances.
    pub fn build(model: &Model, config: &IndexConfig) -> Result<Self> {
        let instances = traversal::collect(model, config)?;
        Ok(Self { instances })
    }

    /// Indexes `model` with the configuration carried by its metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexis_core::{model::Model, shape::{ShapeBuilder, ShapeType}, shape_id::ShapeId};
    /// use lexis_index::{TextIndex, TextLocation};
    ///
    /// let model = Model::builder()
    ///     .with_prelude()
    ///     .shape(ShapeBuilder::new(ShapeType::Service, ShapeId::new("example.weather", "Weather")))
    ///     .build()
    ///     .unwrap();
    ///
    /// let index = TextIndex::of(&model).unwrap();
    /// let texts: Vec<_> = index.iter().map(|instance| instance.text()).collect();
    /// assert_eq!(texts, ["Weather", "example.weather"]);
    /// assert_eq!(index.at(TextLocation::Namespace).count(), 1);
    /// ```
    pub fn of(model: &Model) -> Result<Self> {
        let config = IndexConfig::from_model(model)?;
        Self::build(model, &config)
    }

    pub fn instances(&self) -> &[TextInstance] {
        &self.instances
    }

    pub fn iter(&self) -> slice::Iter<'_, TextInstance> {
        self.instances.iter()
    }

    /// Instances found at `location`, in index order.
    pub fn at(&self, location: TextLocation) -> impl Iterator<Item = &TextInstance> {
        self.instances
            .iter()
            .filter(move |instance| instance.location() == location)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<'a> IntoIterator for &'a TextIndex {
    type Item = &'a TextInstance;
    type IntoIter = slice::Iter<'a, TextInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
