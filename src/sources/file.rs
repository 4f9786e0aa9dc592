//! File-based configuration source.

use super::{Assignment, ConfigSource, ini};
use crate::core::FieldDescriptor;
use crate::error::{ConfigError, Result};
use std::path::PathBuf;
use tracing::debug;

/// Formats a configuration file can be in, detected from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.ini`, `.txt` or `.cfg`
    Ini,
    /// `.yaml`; recognized but not implemented
    Yaml,
}

/// File-based configuration source.
///
/// Each settable field is looked up by its section (the global section
/// unless its annotation names one) and its external name. Missing keys are
/// not an error.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgp::sources::FileSource;
///
/// let source = FileSource::new("config/service.ini");
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    priority: i32,
}

impl FileSource {
    /// Create a new file source with format detection by extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            priority: 100,
        }
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Detect the file format from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FileFormat`] for missing or unknown extensions.
    pub fn format(&self) -> Result<FileFormat> {
        match self.path.extension().and_then(|ext| ext.to_str()) {
            Some("ini" | "txt" | "cfg") => Ok(FileFormat::Ini),
            Some("yaml") => Ok(FileFormat::Yaml),
            _ => Err(ConfigError::FileFormat(self.path.display().to_string())),
        }
    }
}

impl ConfigSource for FileSource {
    fn load(&self, fields: &[FieldDescriptor]) -> Result<Vec<Assignment>> {
        let sections = match self.format()? {
            FileFormat::Ini => ini::parse_file(&self.path)?,
            FileFormat::Yaml => return Err(ConfigError::NotImplemented("YAML")),
        };
        debug!(path = %self.path.display(), sections = sections.len(), "parsed configuration file");

        Ok(fields
            .iter()
            .filter_map(|field| {
                sections
                    .get(&field.section)
                    .and_then(|keys| keys.get(&field.name))
                    .map(|raw| Assignment::new(field.index, raw.as_str()))
            })
            .collect())
    }

    fn name(&self) -> String {
        format!("file:{}", self.path.display())
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
