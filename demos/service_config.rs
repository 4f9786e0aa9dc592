//! A small service populating its settings from a file, switches and the environment.
//!
//! Try:
//!
//! ```text
//! cargo run --example service_config
//! cargo run --example service_config -- -port=9090 -debug
//! PORT=7070 cargo run --example service_config -- -h
//! RUST_LOG=cfgp=trace cargo run --example service_config
//! cargo run --example service_config -- -port=eighty; echo $?
//! ```

use std::fs;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

cfgp::record! {
    /// Service settings
    #[derive(Debug, Default)]
    struct ServiceConfig {
        pub port: u16 => "port,HTTP listening port,server",
        pub host: String => "host,address to bind,server",
        pub max_connections: u32 => "max_connections,connection limit,server",
        pub database_url: String => "url,database connection string,database",
        pub debug: bool => "debug,enable debug endpoints,",
        pub name: String,
        started_at: u64,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            // EX_DATAERR for malformed values, a plain failure otherwise
            return if err.is_data_error() {
                ExitCode::from(65)
            } else {
                ExitCode::FAILURE
            };
        }
    };

    println!("=== Service Configuration ===\n");
    println!("Service:   {}", config.name);
    println!("Address:   {}:{}", config.host, config.port);
    println!("Max Conns: {}", config.max_connections);
    println!("Database:  {}", config.database_url);
    println!("Debug:     {}", config.debug);
    println!("Started:   {}", config.started_at);

    ExitCode::SUCCESS
}

fn load() -> cfgp::Result<ServiceConfig> {
    let config_path = std::env::temp_dir().join("cfgp_service_config.ini");
    fs::write(
        &config_path,
        r#"
; service defaults
name = billing

[server]
port = 8080
host = 127.0.0.1
max_connections = 100

[database]
url = postgres://localhost/billing
"#,
    )?;

    let mut config = ServiceConfig::default();
    cfgp::parse(&config_path, &mut config)?;
    Ok(config)
}
