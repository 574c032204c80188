//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type, a copyable handle into a process-wide
//! string interner. Shape names, namespaces and member names are all stored as
//! [`Id`]s so shape identifiers stay `Copy` and cheap to hash.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner. A poisoned
/// lock is recovered because the interner is append-only and cannot be left in
/// a partially written state that matters to readers.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Interned identifier.
///
/// # Examples
///
/// ```
/// use lexis_core::identifier::Id;
///
/// let name = Id::new("Widget");
/// let same = Id::new("Widget");
///
/// assert_eq!(name, same);
/// assert_eq!(name, "Widget");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Returns an owned copy of the interned string.
    pub fn to_owned_string(&self) -> String {
        self.resolved(str::to_owned)
    }

    /// Runs `f` against a copy of the interned string.
    ///
    /// The interner lock is released before `f` runs, so `f` may create or
    /// format other identifiers.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        f(&self.to_owned_string())
    }

    /// Returns `true` if the interned string is empty.
    pub fn is_empty(&self) -> bool {
        self.resolved(str::is_empty)
    }

    /// Runs `f` under the interner lock; `f` must not touch the interner.
    fn resolved<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        let interner = interner();
        // Symbols are only produced by this interner, so resolution cannot miss.
        f(interner.resolve(self.0).unwrap_or_default())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_owned_string();
        f.write_str(&value)
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// This is a convenience implementation that calls `Id::new`.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "string"`
    fn eq(&self, other: &str) -> bool {
        self.resolved(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
