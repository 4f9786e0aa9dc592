//! Command-line switch source.

use super::{Assignment, ConfigSource};
use crate::core::{FieldDescriptor, Kind};
use crate::error::{ConfigError, Result};
use clap::{Arg, ArgAction, Command};
use std::collections::{HashMap, HashSet};
use std::env;
use std::path::Path;
use tracing::trace;

const HELP: &str = "help";
const TRAILING: &str = "trailing arguments";

/// Command-line switch source.
///
/// Registers one long switch per settable field, named after the lowercased
/// external name, and parses an argument vector with `clap`. Both `--port 80`
/// and the single-dash `-port=80` spellings are accepted. Bool switches may
/// be given without a value (`-debug`) to mean `true`, or with an explicit
/// one (`-debug=false`). A repeated switch keeps its last value.
///
/// Parsing stops at the first argument that is not a switch, or after `--`.
/// Whatever follows belongs to the program and is ignored here, so
/// `service -port=80 input.txt` is accepted.
///
/// Switch values are returned raw; coercion happens when they are applied,
/// through the same path as file and environment values.
///
/// # Examples
///
/// ```rust
/// use cfgp::sources::ArgsSource;
///
/// let source = ArgsSource::new(["service", "-port=8080", "-debug"]);
/// ```
#[derive(Debug, Clone)]
pub struct ArgsSource {
    bin_name: String,
    args: Vec<String>,
    priority: i32,
}

impl ArgsSource {
    /// Create a source from a full argument vector, program name first.
    pub fn new<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        let bin_name = args
            .next()
            .and_then(|arg0| {
                Path::new(&arg0)
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());
        Self {
            bin_name,
            args: args.collect(),
            priority: 200,
        }
    }

    /// Create a source from the arguments of the current process.
    pub fn from_process() -> Self {
        Self::new(env::args_os().map(|arg| arg.to_string_lossy().into_owned()))
    }

    /// Set the priority for this source.
    ///
    /// Higher priority sources override lower priority ones.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Build the `clap` command holding one switch per field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateSwitch`] if two fields share a switch
    /// name.
    ///
    /// A field named `help` takes over `--help`, and the automatic help flag
    /// is dropped.
    pub fn command(&self, fields: &[FieldDescriptor]) -> Result<Command> {
        let mut seen = HashSet::from([TRAILING.to_string()]);
        let mut command = Command::new(self.bin_name.clone())
            .args_override_self(true)
            .arg(
                Arg::new(TRAILING)
                    .value_name("ARGS")
                    .num_args(0..)
                    .trailing_var_arg(true)
                    .allow_hyphen_values(true)
                    .action(ArgAction::Append)
                    .hide(true),
            );

        for field in fields {
            let name = field.switch_name();
            if !seen.insert(name.clone()) {
                return Err(ConfigError::DuplicateSwitch(name));
            }
            if name == HELP {
                command = command.disable_help_flag(true);
            }
            trace!(switch = %name, kind = %field.kind, "registering switch");

            let arg = Arg::new(name.clone())
                .long(name)
                .help(field.help.clone())
                .action(ArgAction::Set);
            let arg = match field.kind {
                Kind::Bool => arg
                    .value_name("BOOL")
                    .num_args(0..=1)
                    .require_equals(true)
                    .default_missing_value("true"),
                Kind::Int => arg.value_name("INT").allow_hyphen_values(true),
                Kind::Str => arg.value_name("STRING").allow_hyphen_values(true),
                Kind::Unsupported(_) => arg.value_name("VALUE").allow_hyphen_values(true),
            };
            command = command.arg(arg);
        }

        Ok(command)
    }

    /// Render the usage banner listing every switch with its help text.
    ///
    /// # Errors
    ///
    /// Same as [`ArgsSource::command`].
    pub fn usage(&self, fields: &[FieldDescriptor]) -> Result<String> {
        Ok(self.command(fields)?.render_help().to_string())
    }

    /// Rewrite single-dash switches to the double-dash form `clap` expects.
    ///
    /// Only tokens naming a registered switch are rewritten. A token that is
    /// the value of a preceding non-bool switch is passed through untouched.
    /// Switches end at `--` or at the first other non-switch token; the rest
    /// is handed to `clap` behind a `--` so it lands in the hidden trailing
    /// argument. Also returns the position of the last occurrence of each
    /// switch.
    fn normalize(&self, kinds: &HashMap<String, Kind>) -> (Vec<String>, HashMap<String, usize>) {
        let mut normalized = Vec::with_capacity(self.args.len() + 2);
        let mut positions = HashMap::new();
        normalized.push(self.bin_name.clone());

        let mut expects_value = false;
        let mut trailing: &[String] = &[];
        for (i, arg) in self.args.iter().enumerate() {
            if expects_value {
                expects_value = false;
                normalized.push(arg.clone());
                continue;
            }
            if arg == "--" {
                trailing = &self.args[i + 1..];
                break;
            }

            let switch = arg
                .strip_prefix("--")
                .or_else(|| arg.strip_prefix('-'))
                .filter(|rest| !rest.is_empty());
            let Some(switch) = switch else {
                trailing = &self.args[i..];
                break;
            };
            let (name, has_value) = match switch.split_once('=') {
                Some((name, _)) => (name, true),
                None => (switch, false),
            };

            match kinds.get(name) {
                Some(kind) => {
                    expects_value = !has_value && *kind != Kind::Bool;
                    positions.insert(name.to_string(), normalized.len());
                    normalized.push(format!("--{switch}"));
                }
                None if name == HELP => normalized.push(format!("--{switch}")),
                None => normalized.push(arg.clone()),
            }
        }

        if !trailing.is_empty() {
            trace!(count = trailing.len(), "switch parsing stopped");
            normalized.push("--".to_string());
            normalized.extend(trailing.iter().cloned());
        }

        (normalized, positions)
    }
}

impl ConfigSource for ArgsSource {
    fn load(&self, fields: &[FieldDescriptor]) -> Result<Vec<Assignment>> {
        let command = self.command(fields)?;
        let kinds: HashMap<String, Kind> = fields
            .iter()
            .map(|field| (field.switch_name(), field.kind))
            .collect();
        let (argv, positions) = self.normalize(&kinds);
        let matches = command.try_get_matches_from(argv)?;

        // No switch has a default value, so a match always comes from the command line
        let mut found: Vec<(usize, Assignment)> = fields
            .iter()
            .filter_map(|field| {
                let id = field.switch_name();
                let raw = matches.get_one::<String>(&id)?;
                let position = positions.get(&id).copied().unwrap_or(usize::MAX);
                Some((position, Assignment::new(field.index, raw.as_str())))
            })
            .collect();

        // Apply in command-line order so the first bad value is the one reported
        found.sort_by_key(|(position, _)| *position);
        Ok(found.into_iter().map(|(_, assignment)| assignment).collect())
    }

    fn name(&self) -> String {
        format!("args:{}", self.bin_name)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}
