//! Absolute shape identifiers.
//!
//! A [`ShapeId`] names a shape by namespace and name, and optionally a member
//! of that shape. The textual form is `namespace#Name` for top-level shapes
//! and `namespace#Name$member` for members.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::identifier::Id;

/// Errors produced when parsing a [`ShapeId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeIdError {
    #[error("shape id `{0}` is missing the `#` namespace separator")]
    MissingNamespaceSeparator(String),

    #[error("shape id `{0}` has an empty namespace")]
    EmptyNamespace(String),

    #[error("shape id `{0}` has an empty name")]
    EmptyName(String),

    #[error("shape id `{0}` has an empty member name")]
    EmptyMember(String),
}

/// Absolute identifier of a shape or member shape.
///
/// # Examples
///
/// ```
/// use lexis_core::shape_id::ShapeId;
///
/// let id: ShapeId = "example.weather#Forecast$summary".parse().unwrap();
/// assert_eq!(id.namespace(), "example.weather");
/// assert_eq!(id.name(), "Forecast");
/// assert_eq!(id.member().unwrap(), "summary");
/// assert_eq!(id.to_string(), "example.weather#Forecast$summary");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId {
    namespace: Id,
    name: Id,
    member: Option<Id>,
}

impl ShapeId {
    /// Creates a top-level shape id from its namespace and name.
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: Id::new(namespace),
            name: Id::new(name),
            member: None,
        }
    }

    /// Returns the id of the member `member` of this shape.
    ///
    /// Any existing member part is replaced.
    pub fn with_member(&self, member: &str) -> Self {
        Self {
            member: Some(Id::new(member)),
            ..*self
        }
    }

    /// Returns the id of the containing shape, dropping any member part.
    pub fn container(&self) -> Self {
        Self {
            member: None,
            ..*self
        }
    }

    pub fn namespace(&self) -> Id {
        self.namespace
    }

    pub fn name(&self) -> Id {
        self.name
    }

    pub fn member(&self) -> Option<Id> {
        self.member
    }

    pub fn is_member(&self) -> bool {
        self.member.is_some()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)?;
        if let Some(member) = self.member {
            write!(f, "${member}")?;
        }
        Ok(())
    }
}

impl FromStr for ShapeId {
    type Err = ShapeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, rest) = s
            .split_once('#')
            .ok_or_else(|| ShapeIdError::MissingNamespaceSeparator(s.to_string()))?;
        if namespace.is_empty() {
            return Err(ShapeIdError::EmptyNamespace(s.to_string()));
        }

        let (name, member) = match rest.split_once('$') {
            Some((name, member)) => (name, Some(member)),
            None => (rest, None),
        };
        if name.is_empty() {
            return Err(ShapeIdError::EmptyName(s.to_string()));
        }

        let id = Self::new(namespace, name);
        match member {
            Some("") => Err(ShapeIdError::EmptyMember(s.to_string())),
            Some(member) => Ok(id.with_member(member)),
            None => Ok(id),
        }
    }
}

impl TryFrom<&str> for ShapeId {
    type Error = ShapeIdError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
