//! Lint diagnostics.
//!
//! A [`Diagnostic`] reports one problem found in a model's text: its
//! severity, the rule that raised it, a message, where the text lives in the
//! model, and optional help text.

mod severity;

pub use severity::Severity;

use std::fmt;

use lexis_core::shape_id::ShapeId;
use lexis_index::{TextInstance, TextLocation};

/// Where in a model a diagnostic points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticLocation {
    /// A shape's own name.
    Shape(ShapeId),

    /// A value inside a trait applied to `shape`. `path` is the rendered
    /// property path and is empty for a trait whose whole value is the text.
    Trait {
        shape: ShapeId,
        trait_id: ShapeId,
        path: String,
    },

    /// A namespace.
    Namespace(String),
}

impl DiagnosticLocation {
    /// The location a text instance was found at.
    pub fn of(instance: &TextInstance) -> Self {
        match (instance.location(), instance.shape(), instance.trait_id()) {
            (TextLocation::AppliedTrait, Some(shape), Some(trait_id)) => Self::Trait {
                shape,
                trait_id,
                path: instance.formatted_path(),
            },
            (TextLocation::Shape, Some(shape), _) => Self::Shape(shape),
            _ => Self::Namespace(instance.text().to_string()),
        }
    }

    /// The shape the location belongs to; `None` for namespaces.
    pub fn shape(&self) -> Option<ShapeId> {
        match self {
            Self::Shape(shape) | Self::Trait { shape, .. } => Some(*shape),
            Self::Namespace(_) => None,
        }
    }
}

impl fmt::Display for DiagnosticLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shape(shape) => write!(f, "{shape}"),
            Self::Trait {
                shape,
                trait_id,
                path,
            } if path.is_empty() => write!(f, "{shape} @{trait_id}"),
            Self::Trait {
                shape,
                trait_id,
                path,
            } => write!(f, "{shape} @{trait_id} {{{path}}}"),
            Self::Namespace(namespace) => write!(f, "namespace {namespace}"),
        }
    }
}

/// A lint finding.
///
/// # Example
///
/// ```text
/// warning[NoninclusiveTerms]: Structure shape uses a non-inclusive word `master`.
///   --> example.weather#MasterRecord
///    = help: Consider using one of the following words instead: `primary`, `parent`, `main`
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    rule: Option<String>,
    message: String,
    location: Option<DiagnosticLocation>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use lexis::diagnostic::{Diagnostic, DiagnosticLocation};
    /// # use lexis::shape_id::ShapeId;
    /// let shape = ShapeId::new("example.weather", "MasterRecord");
    /// let diag = Diagnostic::warning("Structure shape uses a non-inclusive word `master`.")
    ///     .with_rule("NoninclusiveTerms")
    ///     .with_location(DiagnosticLocation::Shape(shape))
    ///     .with_help("Consider using one of the following words instead: `primary`");
    ///
    /// assert!(diag.severity().is_warning());
    /// assert_eq!(diag.rule(), Some("NoninclusiveTerms"));
    /// ```
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the id of the rule that raised this diagnostic, if any.
    pub fn rule(&self) -> Option<&str> {
        self.rule.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<&DiagnosticLocation> {
        self.location.as_ref()
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the id of the raising rule.
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn with_location(mut self, location: DiagnosticLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            rule: None,
            message: message.into(),
            location: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "warning[Rule]: message" or "warning: message"
        write!(f, "{}", self.severity)?;
        if let Some(rule) = &self.rule {
            write!(f, "[{rule}]")?;
        }
        write!(f, ": {}", self.message)
    }
}
