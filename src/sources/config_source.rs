//! Configuration source trait.

use crate::core::FieldDescriptor;
use crate::error::Result;

/// A raw value destined for one field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Index of the field, as in [`FieldDescriptor::index`]
    pub index: usize,
    /// The value before coercion
    pub raw: String,
}

impl Assignment {
    /// Create an assignment for the field at `index`.
    pub fn new(index: usize, raw: impl Into<String>) -> Self {
        Self {
            index,
            raw: raw.into(),
        }
    }
}

/// Trait for configuration sources.
///
/// Implement this trait to feed values from somewhere other than files,
/// switches and the environment. A source only finds raw strings; coercion
/// into the field's kind is done by the loader so every source behaves the
/// same way.
pub trait ConfigSource: Send + Sync {
    /// Find values for the given settable fields.
    ///
    /// A field with no value in this source is simply left out of the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or is malformed.
    fn load(&self, fields: &[FieldDescriptor]) -> Result<Vec<Assignment>>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;

    /// Get the priority of this source (higher = takes precedence).
    ///
    /// Default priorities:
    /// - Environment variables: 300
    /// - Command-line switches: 200
    /// - Configuration file: 100
    fn priority(&self) -> i32 {
        100
    }
}
