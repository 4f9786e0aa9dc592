//! Full integration tests exercising every source together.

use cfgp::core::{AsSlot, Field, Kind};
use cfgp::prelude::{ConfigParser, ConfigSource, FieldDescriptor, Record};
use cfgp::sources::{Assignment, FileSource};
use proptest::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A record written without the macro.
#[derive(Debug, Default, PartialEq)]
struct ManualConfig {
    listen: u16,
    verbose: bool,
    label: String,
    peers: Vec<String>,
}

impl Record for ManualConfig {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::new("Listen", self.listen.as_slot()).with_annotation("port,listen port,net"),
            Field::new("Verbose", self.verbose.as_slot()),
            Field::new("Label", self.label.as_slot()).with_annotation("label,only two"),
            Field::new("Peers", self.peers.as_slot()).settable(false),
        ]
    }
}

/// Pins one field to a fixed value, for precedence tests.
struct FixedSource {
    field: &'static str,
    value: &'static str,
    priority: i32,
}

impl ConfigSource for FixedSource {
    fn load(&self, fields: &[FieldDescriptor]) -> cfgp::Result<Vec<Assignment>> {
        Ok(fields
            .iter()
            .filter(|d| d.name == self.field)
            .map(|d| Assignment::new(d.index, self.value))
            .collect())
    }

    fn name(&self) -> String {
        format!("fixed:{}", self.field)
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[test]
fn test_all_sources_together() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("node.cfg");
    fs::write(
        &config_path,
        r#"
# node settings
verbose = false
label = from-file

[net]
port = 7000
"#,
    )
    .unwrap();

    let mut config = ManualConfig::default();
    ConfigParser::builder()
        .with_file(&config_path)
        .with_args(["node", "-verbose"])
        .with_env_vars([("LABEL", "from-env")])
        .build()
        .parse(&mut config)
        .unwrap();

    assert_eq!(
        config,
        ManualConfig {
            listen: 7000,
            verbose: true,
            label: "from-env".to_string(),
            peers: Vec::new(),
        }
    );
}

#[test]
fn test_descriptors_of_manual_record() {
    let mut config = ManualConfig::default();
    let parser = ConfigParser::builder().build();
    let described = parser.describe(&mut config);

    assert_eq!(described.len(), 3);
    assert_eq!(described[0].name, "port");
    assert_eq!(described[0].section, "net");
    assert_eq!(described[0].help, "listen port, an int value");
    assert_eq!(described[1].name, "verbose");
    assert_eq!(described[1].kind, Kind::Bool);
    // A two-part annotation is ignored entirely
    assert_eq!(described[2].name, "label");
    assert_eq!(described[2].help, "set a string value");
}

#[test]
fn test_custom_source_priority() {
    let mut config = ManualConfig::default();
    ConfigParser::builder()
        .with_args(["node", "-label=args"])
        .with_source(FixedSource {
            field: "label",
            value: "pinned",
            priority: 250,
        })
        .build()
        .parse(&mut config)
        .unwrap();
    assert_eq!(config.label, "pinned");
}

#[test]
fn test_custom_file_priority_over_args() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("site.ini");
    fs::write(&config_path, "[net]\nport = 1\n").unwrap();

    let mut config = ManualConfig::default();
    ConfigParser::builder()
        .with_args(["node", "-port=2"])
        .with_source(FileSource::new(&config_path).with_priority(250))
        .build()
        .parse(&mut config)
        .unwrap();
    assert_eq!(config.listen, 1);
}

#[test]
fn test_usage_banner() {
    let mut config = ManualConfig::default();
    let usage = ConfigParser::builder()
        .with_args(["/usr/local/bin/node"])
        .build()
        .usage(&mut config)
        .unwrap()
        .unwrap();

    assert!(usage.contains("node"));
    assert!(usage.contains("--port"));
    assert!(usage.contains("listen port, an int value"));
    assert!(usage.contains("--verbose"));
    assert!(!usage.contains("--peers"));
}

proptest! {
    #[test]
    fn prop_switch_value_reaches_field(port in any::<u16>()) {
        let mut config = ManualConfig::default();
        ConfigParser::builder()
            .with_args(["node".to_string(), format!("-port={port}")])
            .build()
            .parse(&mut config)
            .unwrap();
        prop_assert_eq!(config.listen, port);
    }

    #[test]
    fn prop_string_values_are_verbatim(label in "[a-zA-Z0-9 ./:=_-]{0,32}") {
        let mut config = ManualConfig::default();
        ConfigParser::builder()
            .with_env_vars([("LABEL".to_string(), label.clone())])
            .build()
            .parse(&mut config)
            .unwrap();
        prop_assert_eq!(config.label, label);
    }

    #[test]
    fn prop_ini_values_are_trimmed(value in "[a-z0-9]{1,16}", pad in " {0,4}") {
        let text = format!("[net]\n{pad}port{pad}={pad}1{pad}\nlabel ={pad}{value}{pad}\n");
        let sections = cfgp::sources::ini::parse_str(&text).unwrap();
        prop_assert_eq!(&sections["net"]["port"], "1");
        prop_assert_eq!(&sections["net"]["label"], &value);
    }
}
