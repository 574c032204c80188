//! Property paths inside trait payloads.
//!
//! [`PropertyPath`] is a stack of rendered segments. Segments can only be
//! pushed through [`PropertyPath::enter_key`] and
//! [`PropertyPath::enter_index`], which return a [`PathScope`] guard that
//! pops the segment when dropped. Every push is therefore matched by exactly
//! one pop, on every exit path of the code holding the guard.

use std::{
    fmt,
    ops::{Deref, DerefMut},
};

/// Rendered path from the root of a trait payload to the current value.
///
/// Object keys render as `key` at the root and `.key` below it; array
/// elements render as `[index]`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Descends into the object member `key` for the lifetime of the scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use lexis_index::PropertyPath;
    ///
    /// let mut path = PropertyPath::new();
    /// {
    ///     let mut items = path.enter_key("items");
    ///     let first = items.enter_index(0);
    ///     assert_eq!(first.to_string(), "items[0]");
    /// }
    /// assert!(path.is_empty());
    /// ```
    pub fn enter_key(&mut self, key: &str) -> PathScope<'_> {
        let segment = if self.segments.is_empty() {
            key.to_string()
        } else {
            format!(".{key}")
        };
        self.push(segment)
    }

    /// Descends into the array element at `index` for the lifetime of the
    /// scope.
    pub fn enter_index(&mut self, index: usize) -> PathScope<'_> {
        self.push(format!("[{index}]"))
    }

    fn push(&mut self, segment: String) -> PathScope<'_> {
        self.segments.push(segment);
        PathScope { path: self }
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Guard holding one pushed segment of a [`PropertyPath`].
///
/// Dereferences to the path so nested scopes can be opened from it.
#[derive(Debug)]
pub struct PathScope<'a> {
    path: &'a mut PropertyPath,
}

impl Deref for PathScope<'_> {
    type Target = PropertyPath;

    fn deref(&self) -> &Self::Target {
        self.path
    }
}

impl DerefMut for PathScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.path
    }
}

impl Drop for PathScope<'_> {
    fn drop(&mut self) {
        self.path.segments.pop();
    }
}
