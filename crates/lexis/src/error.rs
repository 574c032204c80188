//! Error types for Lexis operations.
//!
//! This module provides the main error type [`LexisError`] which wraps
//! the error conditions that can occur while configuring and running lints.

use std::io;

use thiserror::Error;

use lexis_index::IndexError;

/// The main error type for Lexis operations.
#[derive(Debug, Error)]
pub enum LexisError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Configuration error: {0}")]
    Config(String),
}
