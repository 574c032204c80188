//! Indexing configuration.
//!
//! [`IndexConfig`] implements [`serde::Deserialize`] so it can be embedded in
//! external configuration files. A model can also carry the setting itself
//! through the [`INCLUDE_BUILTINS_METADATA_KEY`] metadata entry.

use serde::Deserialize;

use lexis_core::model::Model;

use crate::error::{IndexError, Result};

/// Metadata key holding a boolean that opts prelude shapes into indexing.
pub const INCLUDE_BUILTINS_METADATA_KEY: &str = "validatePrelude";

/// Controls which shapes the text index visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct IndexConfig {
    /// Index prelude shapes as well as the model's own shapes.
    #[serde(default)]
    include_builtins: bool,
}

impl IndexConfig {
    pub fn new(include_builtins: bool) -> Self {
        Self { include_builtins }
    }

    pub fn include_builtins(&self) -> bool {
        self.include_builtins
    }

    /// Reads the configuration from the model's metadata.
    ///
    /// A missing entry leaves built-ins excluded.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidMetadata`] if the entry is present but
    /// not a boolean.
    pub fn from_model(model: &Model) -> Result<Self> {
        let Some(node) = model.metadata_value(INCLUDE_BUILTINS_METADATA_KEY) else {
            return Ok(Self::default());
        };

        node.as_bool()
            .map(Self::new)
            .ok_or_else(|| IndexError::InvalidMetadata {
                key: INCLUDE_BUILTINS_METADATA_KEY.to_string(),
                found: node.kind(),
            })
    }
}
