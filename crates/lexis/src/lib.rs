//! Lexis - full-text lint rules for API shape models.
//!
//! Lexis indexes every piece of human-readable text in a model (shape names,
//! member names, trait values, namespaces) once, and runs text rules such as
//! the non-inclusive terms check over that shared index.

pub mod config;
pub mod diagnostic;
pub mod rules;

mod error;

pub use lexis_core::{identifier, model, node, prelude, shape, shape_id};
pub use lexis_index as index;

pub use error::LexisError;

use std::sync::Arc;

use log::{debug, info};

use lexis_core::model::Model;
use lexis_index::TextIndexCache;

use config::LintConfig;
use diagnostic::Diagnostic;
use rules::{NoninclusiveTermsRule, TextRule};

/// Runs text rules over models.
///
/// The linter owns the text index cache, so linting the same model again
/// reuses its index.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use lexis::{
///     Linter,
///     config::LintConfig,
///     model::Model,
///     shape::{ShapeBuilder, ShapeType},
///     shape_id::ShapeId,
/// };
///
/// let model = Arc::new(
///     Model::builder()
///         .with_prelude()
///         .shape(ShapeBuilder::new(ShapeType::Service, ShapeId::new("example.weather", "MasterService")))
///         .build()
///         .expect("valid model"),
/// );
///
/// let linter = Linter::new(LintConfig::default());
/// let diagnostics = linter.lint(&model).expect("indexable model");
///
/// assert_eq!(diagnostics.len(), 1);
/// assert_eq!(
///     diagnostics[0].message(),
///     "Service shape uses a non-inclusive word `master`."
/// );
/// ```
pub struct Linter {
    cache: TextIndexCache,
    rules: Vec<Box<dyn TextRule>>,
}

impl Linter {
    /// Create a linter with the built-in rules configured by `config`.
    pub fn new(config: LintConfig) -> Self {
        let noninclusive_terms = NoninclusiveTermsRule::new(config.noninclusive_terms());
        Self::without_rules(&config).with_rule(noninclusive_terms)
    }

    /// Create a linter with no rules; add them with [`with_rule`](Self::with_rule).
    pub fn without_rules(config: &LintConfig) -> Self {
        let cache = match config.index() {
            Some(index) => TextIndexCache::with_config(*index),
            None => TextIndexCache::new(),
        };
        Self {
            cache,
            rules: Vec::new(),
        }
    }

    /// Add a rule, run after the rules already added.
    pub fn with_rule(mut self, rule: impl TextRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Ids of the configured rules, in run order.
    pub fn rule_ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.id())
    }

    /// The text index cache shared by every lint run.
    pub fn cache(&self) -> &TextIndexCache {
        &self.cache
    }

    /// Lint `model`, returning diagnostics in index order.
    ///
    /// For each text instance every rule runs in turn, and each diagnostic
    /// is tagged with the id of the rule that raised it.
    ///
    /// # Errors
    ///
    /// Returns [`LexisError::Index`] if the model cannot be indexed.
    pub fn lint(&self, model: &Arc<Model>) -> Result<Vec<Diagnostic>, LexisError> {
        info!(model:% = model.id(), rules = self.rules.len(); "Linting model text");

        let mut diagnostics = Vec::new();
        self.cache.for_each(model, |instance| {
            for rule in &self.rules {
                rule.check(model, instance, &mut |diagnostic: Diagnostic| {
                    debug!(rule = rule.id(), message = diagnostic.message(); "Rule raised diagnostic");
                    diagnostics.push(diagnostic.with_rule(rule.id()));
                });
            }
        })?;

        info!(model:% = model.id(), diagnostics = diagnostics.len(); "Model text linted");
        Ok(diagnostics)
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use lexis_core::{
        node::Node,
        shape::{ShapeBuilder, ShapeType},
        shape_id::ShapeId,
    };
    use lexis_index::{IndexConfig, TextInstance, TextLocation};

    use super::*;
    use crate::config::NoninclusiveTermsConfig;

    struct ShoutingRule;

    impl TextRule for ShoutingRule {
        fn id(&self) -> &str {
            "Shouting"
        }

        fn check(&self, _model: &Model, instance: &TextInstance, emit: &mut dyn FnMut(Diagnostic)) {
            let text = instance.text();
            if text.len() > 1 && text.chars().all(|c| !c.is_lowercase()) {
                emit(Diagnostic::error(format!("`{text}` is all caps")));
            }
        }
    }

    fn model() -> Arc<Model> {
        Arc::new(
            Model::builder()
                .with_prelude()
                .shapes([
                    ShapeBuilder::new(ShapeType::Structure, ShapeId::new("example.lint", "MasterRecord"))
                        .member("ID", prelude::id(prelude::STRING)),
                    ShapeBuilder::new(ShapeType::String, ShapeId::new("example.lint", "Note"))
                        .with_trait(
                            prelude::id(prelude::DOCUMENTATION),
                            Node::from("Kept on the whitelist."),
                        ),
                ])
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_default_linter_rules() {
        let linter = Linter::default();
        let ids: Vec<&str> = linter.rule_ids().collect();
        assert_eq!(ids, ["NoninclusiveTerms"]);
    }

    #[test]
    fn test_lint_reports_in_index_order() {
        let linter = Linter::default();
        let diagnostics = linter.lint(&model()).unwrap();

        let messages: Vec<&str> = diagnostics.iter().map(Diagnostic::message).collect();
        assert_eq!(
            messages,
            [
                "Structure shape uses a non-inclusive word `master`.",
                "'documentation' trait has a value that contains a non-inclusive word `whitelist`.",
            ]
        );
        assert!(diagnostics.iter().all(|d| d.rule() == Some("NoninclusiveTerms")));
    }

    #[test]
    fn test_custom_rules_run_after_built_ins() {
        let linter = Linter::default().with_rule(ShoutingRule);
        let diagnostics = linter.lint(&model()).unwrap();

        let rules: Vec<Option<&str>> = diagnostics.iter().map(Diagnostic::rule).collect();
        assert_eq!(
            rules,
            [
                Some("NoninclusiveTerms"),
                Some("Shouting"),
                Some("NoninclusiveTerms"),
            ]
        );
        assert!(diagnostics[1].severity().is_error());
    }

    #[test]
    fn test_repeated_lint_reuses_index() {
        let linter = Linter::default();
        let model = model();

        let first = linter.lint(&model).unwrap();
        let second = linter.lint(&model).unwrap();

        assert_eq!(first, second);
        assert_eq!(linter.cache().builds(), 1);
    }

    #[test]
    fn test_index_config_takes_precedence() {
        let config = LintConfig::new(Some(IndexConfig::new(true)), NoninclusiveTermsConfig::default());
        let linter = Linter::without_rules(&config);
        let model = model();

        let index = linter.cache().get_or_build(&model).unwrap();
        assert!(index.at(TextLocation::Namespace).any(|i| i.text() == prelude::NAMESPACE));
    }

    #[test]
    fn test_invalid_metadata_is_an_error() {
        let model = Arc::new(
            Model::builder()
                .metadata(lexis_index::INCLUDE_BUILTINS_METADATA_KEY, Node::from("always"))
                .build()
                .unwrap(),
        );

        let err = Linter::default().lint(&model).unwrap_err();
        assert!(matches!(err, LexisError::Index(_)));
    }
}
