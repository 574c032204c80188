//! Configuration types for Lexis linting.
//!
//! All types implement [`serde::Deserialize`] and are usually loaded from a
//! TOML file with [`LintConfig::load`].
//!
//! # Overview
//!
//! - [`LintConfig`] - Top-level configuration combining indexing and rule settings.
//! - [`NoninclusiveTermsConfig`] - Extends or replaces the non-inclusive term table.
//!
//! # Example
//!
//! ```
//! # use lexis::config::LintConfig;
//! let config = LintConfig::from_toml_str(
//!     r#"
//!     [index]
//!     include_builtins = true
//!
//!     [noninclusive_terms.append_terms]
//!     grandfathered = ["legacy"]
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.index().map(|index| index.include_builtins()), Some(true));
//! assert!(config.noninclusive_terms().append_terms().contains_key("grandfathered"));
//! ```

use std::{fs, path::Path};

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use lexis_index::IndexConfig;

use crate::LexisError;

/// A table from term to suggested replacements.
pub type TermTable = IndexMap<String, Vec<String>>;

/// Top-level lint configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LintConfig {
    /// Indexing settings. When absent, each model's metadata decides.
    #[serde(default)]
    index: Option<IndexConfig>,

    /// Settings of the non-inclusive terms rule.
    #[serde(default)]
    noninclusive_terms: NoninclusiveTermsConfig,
}

impl LintConfig {
    pub fn new(index: Option<IndexConfig>, noninclusive_terms: NoninclusiveTermsConfig) -> Self {
        Self {
            index,
            noninclusive_terms,
        }
    }

    /// Returns the explicit indexing configuration, if set.
    pub fn index(&self) -> Option<&IndexConfig> {
        self.index.as_ref()
    }

    pub fn noninclusive_terms(&self) -> &NoninclusiveTermsConfig {
        &self.noninclusive_terms
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`LexisError::Config`] if the text is not valid TOML or does
    /// not match the configuration layout.
    pub fn from_toml_str(content: &str) -> Result<Self, LexisError> {
        toml::from_str(content)
            .map_err(|err| LexisError::Config(format!("Failed to parse TOML configuration: {err}")))
    }

    /// Loads a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File doesn't exist
    /// - File cannot be read
    /// - TOML parsing fails
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexisError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading lint configuration");

        if !path.exists() {
            return Err(LexisError::Config(format!(
                "Missing configuration file: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(
            index_explicit = config.index.is_some(),
            append_terms = config.noninclusive_terms.append_terms.len(),
            override_terms = config.noninclusive_terms.override_terms.len();
            "Lint configuration loaded"
        );

        Ok(config)
    }
}

/// Term table settings of the non-inclusive terms rule.
///
/// A non-empty `override_terms` replaces the built-in table; `append_terms`
/// is then merged over whichever table is in effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NoninclusiveTermsConfig {
    #[serde(default)]
    append_terms: TermTable,

    #[serde(default)]
    override_terms: TermTable,
}

impl NoninclusiveTermsConfig {
    pub fn new(append_terms: TermTable, override_terms: TermTable) -> Self {
        Self {
            append_terms,
            override_terms,
        }
    }

    /// Terms added to the table in effect, replacing entries with the same
    /// term.
    pub fn append_terms(&self) -> &TermTable {
        &self.append_terms
    }

    /// Terms replacing the built-in table when non-empty.
    pub fn override_terms(&self) -> &TermTable {
        &self.override_terms
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = LintConfig::default();

        assert!(config.index().is_none());
        assert!(config.noninclusive_terms().append_terms().is_empty());
        assert!(config.noninclusive_terms().override_terms().is_empty());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = LintConfig::from_toml_str("").unwrap();

        assert!(config.index().is_none());
        assert_eq!(config.noninclusive_terms(), &NoninclusiveTermsConfig::default());
    }

    #[test]
    fn test_term_tables_keep_order() {
        let config = LintConfig::from_toml_str(
            r#"
            [noninclusive_terms.override_terms]
            zulu = ["z"]
            alpha = []
            mike = ["m1", "m2"]
            "#,
        )
        .unwrap();

        let terms: Vec<&str> = config
            .noninclusive_terms()
            .override_terms()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(terms, ["zulu", "alpha", "mike"]);
        assert_eq!(
            config.noninclusive_terms().override_terms()["mike"],
            ["m1", "m2"]
        );
    }

    #[test]
    fn test_index_section_without_flag() {
        let config = LintConfig::from_toml_str("[index]\n").unwrap();
        assert_eq!(config.index(), Some(&IndexConfig::default()));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let err = LintConfig::from_toml_str("[index]\ninclude_builtins = \"yes\"").unwrap_err();
        assert!(matches!(err, LexisError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[noninclusive_terms.append_terms]").unwrap();
        writeln!(file, "grandfathered = [\"legacy\"]").unwrap();

        let config = LintConfig::load(file.path()).unwrap();
        assert_eq!(
            config.noninclusive_terms().append_terms()["grandfathered"],
            ["legacy"]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = LintConfig::load(dir.path().join("lexis.toml")).unwrap_err();

        match err {
            LexisError::Config(message) => assert!(message.starts_with("Missing configuration file")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
