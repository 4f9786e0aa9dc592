//! Environment variable configuration source.

use super::{Assignment, ConfigSource};
use crate::core::FieldDescriptor;
use crate::error::Result;
use std::collections::HashMap;
use std::env;
use tracing::warn;

/// Environment variable configuration source.
///
/// A field is read from the variable named after its uppercased external
/// name, optionally behind a prefix (`APP_PORT` for prefix `APP`).
///
/// # Examples
///
/// ```rust
/// use cfgp::sources::EnvSource;
///
/// // PORT=8080 -> port = 8080
/// let source = EnvSource::from_process();
///
/// // Injected variables, e.g. for tests
/// let source = EnvSource::from_vars([("PORT", "8080")]).with_prefix("APP");
/// ```
#[derive(Debug, Clone)]
pub struct EnvSource {
    vars: Option<HashMap<String, String>>,
    prefix: Option<String>,
    priority: i32,
}

impl EnvSource {
    /// Read variables from the process environment at load time.
    pub fn from_process() -> Self {
        Self {
            vars: None,
            prefix: None,
            priority: 300, // Env vars have highest priority by default
        }
    }

    /// Read variables from the given map instead of the process environment.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Some(
                vars.into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            ..Self::from_process()
        }
    }

    /// Only consider variables named `{prefix}_{NAME}`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// The variable name consulted for a field.
    pub fn key_for(&self, field: &FieldDescriptor) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}_{}", field.env_key()),
            None => field.env_key(),
        }
    }

    fn lookup(&self, key: &str) -> Option<String> {
        match &self.vars {
            Some(vars) => vars.get(key).cloned(),
            None => match env::var(key) {
                Ok(value) => Some(value),
                Err(env::VarError::NotPresent) => None,
                Err(env::VarError::NotUnicode(_)) => {
                    warn!(key, "ignoring environment variable with non-unicode value");
                    None
                }
            },
        }
    }
}

impl ConfigSource for EnvSource {
    fn load(&self, fields: &[FieldDescriptor]) -> Result<Vec<Assignment>> {
        Ok(fields
            .iter()
            .filter_map(|field| {
                self.lookup(&self.key_for(field))
                    .map(|raw| Assignment::new(field.index, raw))
            })
            .collect())
    }

    fn name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("env:{prefix}_*"),
            None => "env".to_string(),
        }
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Kind, Tag};

    fn descriptors() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new(0, "Port", Kind::Int, None),
            FieldDescriptor::new(
                1,
                "host",
                Kind::Str,
                Tag::parse("bind_host,address to bind,server"),
            ),
            FieldDescriptor::new(2, "debug", Kind::Bool, None),
        ]
    }

    #[test]
    fn test_env_source_creation() {
        let source = EnvSource::from_process();
        assert!(source.prefix.is_none());
        assert_eq!(source.priority(), 300);
    }

    #[test]
    fn test_with_priority() {
        let source = EnvSource::from_process().with_priority(400);
        assert_eq!(source.priority(), 400);
    }

    #[test]
    fn test_name() {
        assert_eq!(EnvSource::from_process().name(), "env");
        assert_eq!(EnvSource::from_process().with_prefix("APP").name(), "env:APP_*");
    }

    #[test]
    fn test_uppercased_external_name() {
        let source = EnvSource::from_vars([("PORT", "8080"), ("BIND_HOST", "0.0.0.0")]);
        let assignments = source.load(&descriptors()).unwrap();
        assert_eq!(
            assignments,
            vec![Assignment::new(0, "8080"), Assignment::new(1, "0.0.0.0")]
        );
    }

    #[test]
    fn test_prefix() {
        let source =
            EnvSource::from_vars([("PORT", "1"), ("APP_PORT", "2"), ("APP_DEBUG", "true")])
                .with_prefix("APP");
        let fields = descriptors();
        assert_eq!(source.key_for(&fields[0]), "APP_PORT");
        assert_eq!(
            source.load(&fields).unwrap(),
            vec![Assignment::new(0, "2"), Assignment::new(2, "true")]
        );
    }

    #[test]
    fn test_load_empty() {
        let source = EnvSource::from_vars(Vec::<(String, String)>::new());
        assert!(source.load(&descriptors()).unwrap().is_empty());
    }

    #[test]
    fn test_process_lookup_of_unset_variable() {
        let source = EnvSource::from_process().with_prefix("CFGP_TEST_SURELY_UNSET_9F3A");
        assert!(source.load(&descriptors()).unwrap().is_empty());
    }
}
