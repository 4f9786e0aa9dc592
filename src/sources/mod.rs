//! Configuration source implementations.

mod args;
mod config_source;
mod env;
mod file;
pub mod ini;

pub use args::ArgsSource;
pub use config_source::{Assignment, ConfigSource};
pub use env::EnvSource;
pub use file::{FileFormat, FileSource};
