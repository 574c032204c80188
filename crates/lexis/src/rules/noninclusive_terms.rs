//! Flags text containing non-inclusive terms.

use lexis_core::{model::Model, prelude, shape::Shape, shape_id::ShapeId};
use lexis_index::{TextInstance, TextLocation};
use log::trace;

use super::TextRule;
use crate::{
    config::{NoninclusiveTermsConfig, TermTable},
    diagnostic::{Diagnostic, DiagnosticLocation},
};

const RULE_ID: &str = "NoninclusiveTerms";

const BUILT_IN_TERMS: [(&str, &[&str]); 4] = [
    ("master", &["primary", "parent", "main"]),
    ("slave", &["secondary", "replica", "clone", "child"]),
    ("blacklist", &["denylist"]),
    ("whitelist", &["allowlist"]),
];

/// Warns once per text instance and contained term.
///
/// Matching is case-insensitive substring containment, so `MasterRecord`
/// and `is_whitelisted` both match.
#[derive(Debug, Clone)]
pub struct NoninclusiveTermsRule {
    terms: Vec<Term>,
}

#[derive(Debug, Clone)]
struct Term {
    term: String,
    lowercase: String,
    suggestions: Vec<String>,
}

impl NoninclusiveTermsRule {
    /// Builds the term table from `config`.
    pub fn new(config: &NoninclusiveTermsConfig) -> Self {
        let mut table: TermTable = if config.override_terms().is_empty() {
            built_in_terms()
        } else {
            config.override_terms().clone()
        };
        for (term, suggestions) in config.append_terms() {
            table.insert(term.clone(), suggestions.clone());
        }

        let terms = table
            .into_iter()
            .map(|(term, suggestions)| Term {
                lowercase: term.to_lowercase(),
                term,
                suggestions,
            })
            .collect();
        Self { terms }
    }

    /// The terms this rule looks for, in table order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|term| term.term.as_str())
    }

    fn message(model: &Model, instance: &TextInstance, term: &str) -> String {
        match (instance.location(), instance.shape(), instance.trait_id()) {
            (TextLocation::AppliedTrait, _, Some(trait_id)) => {
                let trait_name = idiomatic_trait_name(trait_id);
                if instance.property_path().is_empty() {
                    format!("'{trait_name}' trait has a value that contains a non-inclusive word `{term}`.")
                } else {
                    format!(
                        "'{trait_name}' trait value at path {{{}}} contains a non-inclusive word `{term}`.",
                        instance.formatted_path()
                    )
                }
            }
            (TextLocation::Shape, Some(shape), _) => {
                let shape_type = model
                    .shape(&shape)
                    .map(Shape::shape_type)
                    .map(|shape_type| capitalize(shape_type.as_str()))
                    .unwrap_or_else(|| "Unknown".to_string());
                format!("{shape_type} shape uses a non-inclusive word `{term}`.")
            }
            _ => format!(
                "{} namespace uses a non-inclusive word `{term}`.",
                instance.text()
            ),
        }
    }
}

impl Default for NoninclusiveTermsRule {
    fn default() -> Self {
        Self::new(&NoninclusiveTermsConfig::default())
    }
}

impl TextRule for NoninclusiveTermsRule {
    fn id(&self) -> &str {
        RULE_ID
    }

    fn check(&self, model: &Model, instance: &TextInstance, emit: &mut dyn FnMut(Diagnostic)) {
        let text = instance.text().to_lowercase();
        for term in self.terms.iter().filter(|term| text.contains(&term.lowercase)) {
            trace!(term = term.term.as_str(), text = instance.text(); "Non-inclusive term found");

            let mut diagnostic = Diagnostic::warning(Self::message(model, instance, &term.term))
                .with_location(DiagnosticLocation::of(instance));
            if !term.suggestions.is_empty() {
                diagnostic = diagnostic.with_help(format!(
                    "Consider using one of the following words instead: {}",
                    ticked_list(&term.suggestions)
                ));
            }
            emit(diagnostic);
        }
    }
}

fn built_in_terms() -> TermTable {
    BUILT_IN_TERMS
        .iter()
        .map(|(term, suggestions)| {
            let suggestions: Vec<String> = suggestions.iter().map(|s| s.to_string()).collect();
            (term.to_string(), suggestions)
        })
        .collect()
}

/// Prelude traits are named bare; every other trait by its full id.
fn idiomatic_trait_name(trait_id: ShapeId) -> String {
    if prelude::is_builtin(&trait_id) {
        trait_id.name().to_owned_string()
    } else {
        trait_id.to_string()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn ticked_list(words: &[String]) -> String {
    words
        .iter()
        .map(|word| format!("`{word}`"))
        .collect::<Vec<_>>()
        .join(", ")
}
