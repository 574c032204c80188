//! Error types for text indexing.
//!
//! Indexing a validated model does not fail on unusual payloads: unmodeled
//! keys and unexpected node kinds are ordinary data. The errors here signal
//! either a text instance assembled in violation of its location invariants
//! (an engine bug) or model-level configuration of the wrong type.

use std::fmt;

use thiserror::Error;

use lexis_core::node::NodeKind;

use crate::instance::TextLocation;

/// A field of a [`TextInstance`](crate::TextInstance).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceField {
    Text,
    Shape,
    Trait,
    PropertyPath,
}

impl fmt::Display for InstanceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstanceField::Text => "text",
            InstanceField::Shape => "shape",
            InstanceField::Trait => "trait",
            InstanceField::PropertyPath => "property path",
        };
        f.write_str(name)
    }
}

/// Errors produced while building a text index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("{field} must be specified for location {location}")]
    MissingField {
        field: InstanceField,
        location: TextLocation,
    },

    #[error("{field} must not be specified for location {location}")]
    IllegalField {
        field: InstanceField,
        location: TextLocation,
    },

    #[error("metadata `{key}` must be a boolean, found {found}")]
    InvalidMetadata { key: String, found: NodeKind },
}

/// A type alias for `Result<T, IndexError>`.
pub type Result<T> = std::result::Result<T, IndexError>;
