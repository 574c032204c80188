//! Text instances: single occurrences of human-readable text in a model.
//!
//! A [`TextInstance`] records where a piece of text was found. The
//! [`TextLocation`] is the discriminant that decides which other fields are
//! required:
//!
//! | location       | shape    | trait    | property path          |
//! |----------------|----------|----------|------------------------|
//! | `Shape`        | required | absent   | absent                 |
//! | `AppliedTrait` | required | required | required (may be empty)|
//! | `Namespace`    | absent   | absent   | absent                 |
//!
//! Instances are only created through [`TextInstanceBuilder`], whose
//! [`build`](TextInstanceBuilder::build) step enforces the table above.

use std::fmt;

use lexis_core::shape_id::ShapeId;

use crate::error::{IndexError, InstanceField, Result};

/// Where a piece of text was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextLocation {
    /// The name of a shape, or the member name of a member shape.
    Shape,
    /// A string value or a free-form key inside an applied trait's payload.
    AppliedTrait,
    /// A namespace that at least one indexed shape is declared in.
    Namespace,
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextLocation::Shape => write!(f, "shape"),
            TextLocation::AppliedTrait => write!(f, "applied trait"),
            TextLocation::Namespace => write!(f, "namespace"),
        }
    }
}

/// One occurrence of text in a model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInstance {
    location: TextLocation,
    text: String,
    shape: Option<ShapeId>,
    trait_id: Option<ShapeId>,
    property_path: Vec<String>,
}

impl TextInstance {
    /// Starts a builder for an instance found at `location`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexis_core::shape_id::ShapeId;
    /// use lexis_index::{TextInstance, TextLocation};
    ///
    /// let shape = ShapeId::new("example.weather", "City");
    /// let instance = TextInstance::builder(TextLocation::Shape)
    ///     .shape(shape)
    ///     .text("City")
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(instance.text(), "City");
    /// assert_eq!(instance.shape(), Some(shape));
    /// ```
    pub fn builder(location: TextLocation) -> TextInstanceBuilder {
        TextInstanceBuilder::new(location)
    }

    pub fn location(&self) -> TextLocation {
        self.location
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The shape the text belongs to; `None` only for namespaces.
    pub fn shape(&self) -> Option<ShapeId> {
        self.shape
    }

    /// The applied trait whose payload holds the text; set only for
    /// [`TextLocation::AppliedTrait`].
    pub fn trait_id(&self) -> Option<ShapeId> {
        self.trait_id
    }

    /// Segments locating the text inside the trait payload, e.g.
    /// `["items", "[0]", ".name"]`. Empty unless the location is
    /// [`TextLocation::AppliedTrait`].
    pub fn property_path(&self) -> &[String] {
        &self.property_path
    }

    /// The property path rendered as one string, e.g. `items[0].name`.
    pub fn formatted_path(&self) -> String {
        self.property_path.concat()
    }
}

/// Builder for [`TextInstance`].
#[derive(Debug, Clone)]
pub struct TextInstanceBuilder {
    location: TextLocation,
    text: Option<String>,
    shape: Option<ShapeId>,
    trait_id: Option<ShapeId>,
    property_path: Option<Vec<String>>,
}

impl TextInstanceBuilder {
    fn new(location: TextLocation) -> Self {
        Self {
            location,
            text: None,
            shape: None,
            trait_id: None,
            property_path: None,
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn shape(mut self, shape: ShapeId) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn trait_id(mut self, trait_id: ShapeId) -> Self {
        self.trait_id = Some(trait_id);
        self
    }

    pub fn property_path(mut self, path: impl Into<Vec<String>>) -> Self {
        self.property_path = Some(path.into());
        self
    }

    /// Checks the location invariants and produces the instance.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::MissingField`] when a field the location
    /// requires was not set, and [`IndexError::IllegalField`] when a field
    /// the location forbids was set.
    pub fn build(self) -> Result<TextInstance> {
        let location = self.location;
        let missing = |field| IndexError::MissingField { field, location };
        let illegal = |field| IndexError::IllegalField { field, location };

        let text = self.text.ok_or_else(|| missing(InstanceField::Text))?;

        match location {
            TextLocation::Namespace if self.shape.is_some() => {
                return Err(illegal(InstanceField::Shape));
            }
            TextLocation::Shape | TextLocation::AppliedTrait if self.shape.is_none() => {
                return Err(missing(InstanceField::Shape));
            }
            _ => {}
        }

        let property_path = if location == TextLocation::AppliedTrait {
            if self.trait_id.is_none() {
                return Err(missing(InstanceField::Trait));
            }
            self.property_path
                .ok_or_else(|| missing(InstanceField::PropertyPath))?
        } else {
            if self.trait_id.is_some() {
                return Err(illegal(InstanceField::Trait));
            }
            if self.property_path.is_some() {
                return Err(illegal(InstanceField::PropertyPath));
            }
            Vec::new()
        };

        Ok(TextInstance {
            location,
            text,
            shape: self.shape,
            trait_id: self.trait_id,
            property_path,
        })
    }
}
