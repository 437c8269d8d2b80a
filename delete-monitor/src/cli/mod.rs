//! CLI module for delete-monitor
//!
//! Provides command-line interface for the relay server.

pub mod serve;

use clap::{Parser, Subcommand};

/// Delete monitor - relays file-deletion logs to a webhook and serves deletion history
#[derive(Parser, Debug)]
#[command(name = "delete-monitor")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    DELETE_MONITOR_HOST                  Bind address (default: 0.0.0.0)
    DELETE_MONITOR_PORT                  Listen port (default: 8000)
    DELETE_MONITOR_LOG_LEVEL             Log level (default: info, legacy: RUST_LOG)
    DELETE_MONITOR_LOG_FORMAT            text | json (default: text)
    DELETE_MONITOR_DB_NAME               Database name (default: file_monitor, legacy: DB_NAME)
    DELETE_MONITOR_DB_USER               Database user (default: postgres, legacy: DB_USER)
    DELETE_MONITOR_DB_PASSWORD           Database password (legacy: DB_PASSWORD)
    DELETE_MONITOR_DB_HOST               Database host (default: localhost, legacy: DB_HOST)
    DELETE_MONITOR_DB_PORT               Database port (default: 5432, legacy: DB_PORT)
    DELETE_MONITOR_DB_ACQUIRE_TIMEOUT_SECS  Pool checkout timeout (default: 5)
    DELETE_MONITOR_FETCH_TIMEOUT_SECS    Site fetch timeout (default: 10)
    DELETE_MONITOR_DISPATCH_TIMEOUT_SECS Webhook POST timeout (default: 5)
    DELETE_MONITOR_RELAY_QUEUE_CAPACITY  Pending relay jobs (default: 100)
    DELETE_MONITOR_MAX_CONCURRENT_RELAYS Relays running at once (default: 8)
    DELETE_MONITOR_RELAY_DRAIN_TIMEOUT_SECS  Shutdown drain timeout (default: 30)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the relay server
    Serve(serve::ServeArgs),
}
