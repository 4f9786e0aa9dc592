//! Loader that applies multiple sources to a record.

use super::record::{FieldDescriptor, Record};
use crate::error::{ConfigError, Result};
use crate::sources::{Assignment, ConfigSource};
use tracing::{debug, trace};

/// Applies configuration sources to a record.
///
/// Sources are loaded in priority order (lowest first). Every source is
/// loaded before the first field is touched, so a source that fails to load
/// leaves the record exactly as it was. Assignments are then applied in the
/// same order, letting higher priority sources override lower ones.
pub struct ConfigLoader {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source.
    pub fn add_source(&mut self, source: Box<dyn ConfigSource>) {
        self.sources.push(source);
    }

    /// Descriptors of the record's settable fields.
    pub fn describe<R: Record + ?Sized>(record: &mut R) -> Vec<FieldDescriptor> {
        record
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_settable())
            .map(|(index, field)| field.descriptor(index))
            .collect()
    }

    /// Load every source and apply the results to `record`.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a source while loading, or the first
    /// coercion error while applying values.
    pub fn load<R: Record + ?Sized>(&self, record: &mut R) -> Result<()> {
        let descriptors = Self::describe(record);

        let mut sorted_sources: Vec<_> = self.sources.iter().collect();
        sorted_sources.sort_by_key(|s| s.priority());

        let mut pending = Vec::with_capacity(sorted_sources.len());
        for source in sorted_sources {
            let assignments = source.load(&descriptors)?;
            debug!(
                source = %source.name(),
                values = assignments.len(),
                "loaded configuration source"
            );
            pending.push((source.name(), assignments));
        }

        let mut fields = record.fields();
        let total = fields.len();
        for (source, assignments) in pending {
            for Assignment { index, raw } in assignments {
                let field = fields.get_mut(index).ok_or_else(|| {
                    ConfigError::Other(format!(
                        "source '{source}' assigned field #{index}, record has {total} fields"
                    ))
                })?;
                trace!(source = %source, field = field.name(), "assigning field");
                field.set(&raw)?;
            }
        }

        Ok(())
    }

    /// Get the list of source names in priority order.
    pub fn source_names(&self) -> Vec<String> {
        let mut sorted_sources: Vec<_> = self.sources.iter().collect();
        sorted_sources.sort_by_key(|s| s.priority());
        sorted_sources.iter().map(|s| s.name()).collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
