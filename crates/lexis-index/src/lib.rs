//! Lexis Text Index
//!
//! This crate finds every piece of human-readable text in a Lexis model and
//! records where it was found, so text-oriented lint rules can inspect one
//! flat sequence instead of walking the model themselves. It includes:
//!
//! - **Instances**: located text occurrences ([`TextInstance`], [`TextLocation`])
//! - **Paths**: scoped positions inside trait payloads ([`PropertyPath`])
//! - **Schema resolution**: the shapes that model nested payload values ([`resolver`])
//! - **Indexing**: the traversal result for one model ([`TextIndex`])
//! - **Caching**: compute-once indexes shared across rules ([`TextIndexCache`])
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lexis_core::{
//!     model::Model,
//!     node::Node,
//!     prelude,
//!     shape::{ShapeBuilder, ShapeType},
//!     shape_id::ShapeId,
//! };
//! use lexis_index::{TextIndexCache, TextLocation};
//!
//! let city = ShapeId::new("example.weather", "City");
//! let model = Arc::new(
//!     Model::builder()
//!         .with_prelude()
//!         .shape(
//!             ShapeBuilder::new(ShapeType::Structure, city)
//!                 .member("name", prelude::id(prelude::STRING))
//!                 .with_trait(prelude::id(prelude::DOCUMENTATION), Node::from("A city.")),
//!         )
//!         .build()
//!         .unwrap(),
//! );
//!
//! let cache = TextIndexCache::new();
//! let mut found = Vec::new();
//! cache
//!     .for_each(&model, |instance| found.push((instance.location(), instance.text().to_string())))
//!     .unwrap();
//!
//! assert_eq!(
//!     found,
//!     [
//!         (TextLocation::Shape, "City".to_string()),
//!         (TextLocation::AppliedTrait, "A city.".to_string()),
//!         (TextLocation::Shape, "name".to_string()),
//!         (TextLocation::Namespace, "example.weather".to_string()),
//!     ]
//! );
//! ```

mod cache;
mod config;
mod error;
mod index;
mod instance;
mod path;
pub mod resolver;
mod traversal;

pub use cache::TextIndexCache;
pub use config::{INCLUDE_BUILTINS_METADATA_KEY, IndexConfig};
pub use error::{IndexError, InstanceField, Result};
pub use index::TextIndex;
pub use instance::{TextInstance, TextInstanceBuilder, TextLocation};
pub use path::{PathScope, PropertyPath};
