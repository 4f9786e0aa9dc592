//! Builder for constructing ConfigParser instances.

use super::loader::ConfigLoader;
use super::record::{FieldDescriptor, Record};
use crate::error::Result;
use crate::sources::{ArgsSource, ConfigSource, EnvSource, FileSource};
use std::path::PathBuf;

/// Populates records from a fixed set of sources.
///
/// # Examples
///
/// ```rust,no_run
/// use cfgp::prelude::*;
///
/// cfgp::record! {
///     #[derive(Debug, Default)]
///     struct AppConfig {
///         pub port: u16 => "port,the listening port,server",
///         pub debug: bool,
///     }
/// }
///
/// # fn example() -> Result<()> {
/// let parser = ConfigParser::builder()
///     .with_file("config/app.ini")
///     .with_process_args()
///     .with_process_env()
///     .build();
///
/// let mut config = AppConfig::default();
/// parser.parse(&mut config)?;
/// println!("Port: {}", config.port);
/// # Ok(())
/// # }
/// ```
pub struct ConfigParser {
    loader: ConfigLoader,
    args: Option<ArgsSource>,
}

impl ConfigParser {
    /// Create a new builder for constructing a parser.
    pub fn builder() -> ConfigParserBuilder {
        ConfigParserBuilder::new()
    }

    /// Populate `record` from every configured source.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any source or by coercing any value.
    /// A source that fails to load leaves the record untouched.
    pub fn parse<R: Record + ?Sized>(&self, record: &mut R) -> Result<()> {
        self.loader.load(record)
    }

    /// Descriptors of the record's settable fields.
    pub fn describe<R: Record + ?Sized>(&self, record: &mut R) -> Vec<FieldDescriptor> {
        ConfigLoader::describe(record)
    }

    /// Render the command-line usage banner for `record`.
    ///
    /// Returns `None` when the parser has no command-line source.
    ///
    /// # Errors
    ///
    /// Returns an error if two fields resolve to the same switch.
    pub fn usage<R: Record + ?Sized>(&self, record: &mut R) -> Result<Option<String>> {
        self.args
            .as_ref()
            .map(|args| args.usage(&ConfigLoader::describe(record)))
            .transpose()
    }

    /// Get the list of source names in priority order.
    pub fn source_names(&self) -> Vec<String> {
        self.loader.source_names()
    }
}

/// Builder for constructing a [`ConfigParser`].
///
/// Precedence is decided by source priority, not by call order: a file
/// (100) is overridden by command-line switches (200), which are overridden
/// by environment variables (300).
pub struct ConfigParserBuilder {
    file_path: Option<PathBuf>,
    args: Option<ArgsSource>,
    env: Option<EnvSource>,
    env_prefix: Option<String>,
    custom_sources: Vec<Box<dyn ConfigSource>>,
}

impl ConfigParserBuilder {
    /// Create a new builder with no sources.
    pub fn new() -> Self {
        Self {
            file_path: None,
            args: None,
            env: None,
            env_prefix: None,
            custom_sources: Vec::new(),
        }
    }

    /// Read the configuration file at `path`.
    ///
    /// Supported formats: INI (`.ini`, `.txt`, `.cfg`). An empty path
    /// disables file parsing.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        self.file_path = (!path.as_os_str().is_empty()).then_some(path);
        self
    }

    /// Parse switches from an argument vector, program name first.
    pub fn with_args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.args = Some(ArgsSource::new(args));
        self
    }

    /// Parse switches from the arguments of the current process.
    pub fn with_process_args(mut self) -> Self {
        self.args = Some(ArgsSource::from_process());
        self
    }

    /// Read environment variables from the given map.
    pub fn with_env_vars<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(EnvSource::from_vars(vars));
        self
    }

    /// Read environment variables from the current process.
    pub fn with_process_env(mut self) -> Self {
        self.env = Some(EnvSource::from_process());
        self
    }

    /// Only consider environment variables named `{prefix}_{NAME}`.
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Add a custom configuration source.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cfgp::prelude::*;
    /// use cfgp::sources::FileSource;
    ///
    /// // Let a site-wide file win over command-line switches
    /// let parser = ConfigParser::builder()
    ///     .with_source(FileSource::new("/etc/service.ini").with_priority(250))
    ///     .build();
    /// ```
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.custom_sources.push(Box::new(source));
        self
    }

    /// Build the parser.
    pub fn build(self) -> ConfigParser {
        let mut loader = ConfigLoader::new();

        if let Some(path) = self.file_path {
            loader.add_source(Box::new(FileSource::new(path)));
        }

        if let Some(args) = &self.args {
            loader.add_source(Box::new(args.clone()));
        }

        for source in self.custom_sources {
            loader.add_source(source);
        }

        if let Some(env) = self.env {
            let env = match self.env_prefix {
                Some(prefix) => env.with_prefix(prefix),
                None => env,
            };
            loader.add_source(Box::new(env));
        }

        ConfigParser {
            loader,
            args: self.args,
        }
    }
}

impl Default for ConfigParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct TestConfig {
            pub port: u16 => "port,the port,server",
            pub host: String,
        }
    }

    #[test]
    fn test_empty_path_disables_file() {
        let builder = ConfigParserBuilder::new().with_file("");
        assert!(builder.file_path.is_none());
        assert!(builder.build().source_names().is_empty());
    }

    #[test]
    fn test_source_order() {
        let parser = ConfigParser::builder()
            .with_env_vars([("PORT", "1")])
            .with_env_prefix("APP")
            .with_args(["prog"])
            .with_file("service.ini")
            .build();

        assert_eq!(
            parser.source_names(),
            vec!["file:service.ini", "args:prog", "env:APP_*"]
        );
    }

    #[test]
    fn test_env_wins_over_args() {
        let parser = ConfigParser::builder()
            .with_args(["prog", "-port=1", "-host=args"])
            .with_env_vars([("PORT", "2")])
            .build();

        let mut config = TestConfig::default();
        parser.parse(&mut config).unwrap();
        assert_eq!(config.port, 2);
        assert_eq!(config.host, "args");
    }

    #[test]
    fn test_usage_requires_args_source() {
        let mut config = TestConfig::default();
        let parser = ConfigParser::builder().build();
        assert!(parser.usage(&mut config).unwrap().is_none());

        let parser = ConfigParser::builder().with_args(["prog"]).build();
        let usage = parser.usage(&mut config).unwrap().unwrap();
        assert!(usage.contains("the port, an int value"));
        assert!(usage.contains("set a string value"));
    }

    #[test]
    fn test_describe() {
        let mut config = TestConfig::default();
        let parser = ConfigParser::builder().build();
        let described = parser.describe(&mut config);
        assert_eq!(described.len(), 2);
        assert_eq!(described[0].section, "server");
        assert_eq!(described[1].name, "host");
    }
}
