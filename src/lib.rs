//! # cfgp
//!
//! Populate a plain struct from a configuration file, command-line switches
//! and environment variables, declared once.
//!
//! ## Overview
//!
//! Declare a record with [`record!`], then call [`parse`]. Values are taken
//! from these sources, later ones overriding earlier ones:
//!
//! 1. an INI file (`.ini`, `.txt` or `.cfg`), if a path is given
//! 2. command-line switches, one per field, generated automatically
//! 3. environment variables named after the uppercased field name
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! cfgp::record! {
//!     #[derive(Debug, Default)]
//!     struct AppConfig {
//!         pub port: u16 => "port,the listening port,server",
//!         pub host: String,
//!         pub debug: bool,
//!     }
//! }
//!
//! # fn main() -> cfgp::Result<()> {
//! let mut config = AppConfig::default();
//! cfgp::parse("config/app.ini", &mut config)?;
//! println!("Listening on {}:{}", config.host, config.port);
//! # Ok(())
//! # }
//! ```
//!
//! With `config/app.ini` containing
//!
//! ```ini
//! host = 0.0.0.0
//!
//! [server]
//! port = 8080
//! ```
//!
//! running `app -port=9090 -debug` yields port 9090, host `0.0.0.0` and
//! debug `true`, unless `PORT`, `HOST` or `DEBUG` are set in the environment.
//!
//! ## Annotations
//!
//! A field annotation has exactly three comma-separated parts:
//! `<name>,<help message>,<section in file>`. The name replaces the
//! lowercased field name everywhere, the help message is shown by `-h`, and
//! the section is where the key is looked up in the file. Annotations with
//! any other number of parts are ignored.
//!
//! ## Supported field types
//!
//! Integers of any width, `String` and `bool`. Fields of other types are
//! accepted in a record but fail with [`ConfigError::UnknownFlagType`] when
//! a source provides a value for them.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

pub use crate::core::{ConfigParser, Record};
pub use crate::error::{ConfigError, Result};

use std::path::Path;

/// Populate `record` from a file, the process arguments and the process
/// environment.
///
/// `path` selects the file parser by extension; an empty path disables
/// file parsing. Command-line usage errors and `-h` are handled the way a
/// command-line tool expects: the message is printed and the process exits.
/// Every other error is returned.
///
/// The record must be passed by mutable reference:
///
/// ```compile_fail
/// cfgp::record! {
///     #[derive(Default)]
///     struct Conf { pub port: i64 }
/// }
///
/// let conf = Conf::default();
/// cfgp::parse("", conf).unwrap();
/// ```
///
/// # Errors
///
/// - [`ConfigError::FileFormat`] for an unrecognized file extension
/// - [`ConfigError::NotImplemented`] for YAML files
/// - [`ConfigError::IoError`] or [`ConfigError::Syntax`] for unreadable files
/// - coercion errors for malformed values in any source
pub fn parse<R: Record + ?Sized>(path: impl AsRef<Path>, record: &mut R) -> Result<()> {
    let parser = ConfigParser::builder()
        .with_file(path.as_ref())
        .with_process_args()
        .with_process_env()
        .build();

    match parser.parse(record) {
        Err(ConfigError::CommandLine(err)) => err.exit(),
        other => other,
    }
}

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{ConfigParser, ConfigParserBuilder, FieldDescriptor, Record};
    pub use crate::error::{ConfigError, Result};
    pub use crate::sources::ConfigSource;
}
