//! Lexis Core Types and Definitions
//!
//! This crate provides the model types that the Lexis text index walks. It
//! includes:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`]) and
//!   absolute shape ids ([`shape_id::ShapeId`])
//! - **Nodes**: Document value trees carried by applied traits ([`node::Node`])
//! - **Shapes**: Typed graph nodes with member edges ([`shape`] module)
//! - **Model**: The immutable shape graph and its builder ([`model`] module)
//! - **Prelude**: Built-in shapes and trait definitions ([`prelude`] module)

pub mod identifier;
pub mod model;
pub mod node;
pub mod prelude;
pub mod shape;
pub mod shape_id;
