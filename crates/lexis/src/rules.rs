//! Text lint rules.
//!
//! A [`TextRule`] inspects one [`TextInstance`] at a time. Rules never walk
//! the model themselves; the [`Linter`](crate::Linter) feeds them every
//! instance of the shared text index.

mod noninclusive_terms;

pub use noninclusive_terms::NoninclusiveTermsRule;

use lexis_core::model::Model;
use lexis_index::TextInstance;

use crate::diagnostic::Diagnostic;

/// A lint rule over located text.
pub trait TextRule: Send + Sync {
    /// Stable identifier reported with every diagnostic of this rule.
    fn id(&self) -> &str;

    /// Checks `instance`, emitting zero or more diagnostics.
    ///
    /// `model` is the model the instance was found in, for rules that need
    /// more context than the instance carries.
    fn check(&self, model: &Model, instance: &TextInstance, emit: &mut dyn FnMut(Diagnostic));
}
