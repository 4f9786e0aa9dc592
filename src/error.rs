//! Error types for cfgp.

use std::num::ParseIntError;

/// Result type alias for cfgp operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while populating a record.
///
/// Every error is fatal for the parse that produced it: the first one
/// encountered is returned and no further sources or fields are applied.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file extension is not one of the recognized set.
    #[error("unrecognized file format for '{0}', only (ini|txt|cfg) supported")]
    FileFormat(String),

    /// The file format is recognized but has no parser yet.
    #[error("{0} not yet implemented")]
    NotImplemented(&'static str),

    /// A field of an unsupported kind was asked to take a value.
    #[error("unknown flag type for field '{field}' ({kind})")]
    UnknownFlagType {
        /// Declared field name
        field: String,
        /// Rust type of the field
        kind: &'static str,
    },

    /// An int field received a value that is not a base-10 integer in range.
    #[error("invalid int value {value:?} for '{field}': {source}")]
    InvalidInt {
        /// Declared field name
        field: String,
        /// The raw value
        value: String,
        /// Underlying parse failure
        source: ParseIntError,
    },

    /// A bool field received a value outside the accepted token set.
    #[error("invalid bool value {value:?} for '{field}'")]
    InvalidBool {
        /// Declared field name
        field: String,
        /// The raw value
        value: String,
    },

    /// A configuration file line is neither a section header nor a key=value pair.
    #[error("line {line}: expected a [section] header or key=value pair, found {content:?}")]
    Syntax {
        /// 1-based line number
        line: usize,
        /// The offending line, trimmed
        content: String,
    },

    /// Two settable fields resolve to the same command-line switch.
    #[error("switch '{0}' is declared more than once")]
    DuplicateSwitch(String),

    /// The command-line layer rejected the arguments or was asked for help.
    #[error(transparent)]
    CommandLine(#[from] clap::Error),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error for other cases.
    #[error("Configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    /// Returns `true` for errors caused by malformed values rather than by
    /// the shape of the record or the sources.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInt { .. } | Self::InvalidBool { .. } | Self::Syntax { .. }
        )
    }
}
