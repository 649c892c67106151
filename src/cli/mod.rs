// CLI Layer
// ユーザー入力の受付とコマンドルーティング

pub mod command_context;
pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// svcdb - Service Database Provisioner
///
/// Drops and recreates the databases of named services from DDL scripts,
/// for use by integration tests and development environments.
#[derive(Parser, Debug)]
#[command(name = crate::core::naming::BINARY_NAME)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Service database provisioning CLI tool")]
#[command(long_about = "svcdb - Service Database Provisioner

Reads a services file that maps each service to the environment variables
holding its database URL, user and password, then drops and recreates the
service databases from DDL scripts named <action>-<service>-db.ddl.

Supported databases: PostgreSQL, MySQL, SQLite")]
#[command(propagate_version = true)]
#[command(after_help = "GETTING STARTED:
  1. Describe your services:        Edit services.yaml
  2. Check the services file:       svcdb validate
  3. Recreate a service database:   svcdb clean --service orders
  4. Recreate every database:       svcdb clean

For detailed help on each command, use: svcdb <command> --help")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the services file (overrides the configuration file)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub services: Option<PathBuf>,

    /// Directory holding the DDL scripts (overrides the configuration file)
    #[arg(long, global = true, value_name = "DIR")]
    pub ddl_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate the services file
    ///
    /// Checks the services file against its schema and verifies that every
    /// field is present, non-blank and a valid environment variable name.
    ///
    /// EXAMPLES:
    ///   svcdb validate
    ///   svcdb validate --services ./config/services.yaml
    Validate,

    /// List the configured services
    ///
    /// Shows each service with the environment variables it reads and whether
    /// they are currently set. Values are never printed.
    ///
    /// EXAMPLES:
    ///   svcdb list
    List,

    /// Check whether a row exists in a service database
    ///
    /// Runs `SELECT <column> FROM <table> WHERE <column> = <value>` and prints
    /// `true` or `false`. Values that parse as integers are compared as integers.
    ///
    /// EXAMPLES:
    ///   svcdb exists --service orders --table orders --column id --value 42
    Exists {
        /// Service name
        #[arg(long, value_name = "NAME")]
        service: String,

        /// Table to query
        #[arg(long, value_name = "TABLE")]
        table: String,

        /// Column to compare
        #[arg(long, value_name = "COLUMN")]
        column: String,

        /// Value to look for
        #[arg(long, value_name = "VALUE")]
        value: String,
    },

    /// Drop and recreate service databases
    ///
    /// Runs drop-<service>-db.ddl (failures are reported as warnings) and then
    /// create-<service>-db.ddl (the first failure aborts). Without --service,
    /// every service is cleaned in declaration order.
    ///
    /// EXAMPLES:
    ///   # Clean one service
    ///   svcdb clean --service orders
    ///
    ///   # Clean every service
    ///   svcdb clean
    Clean {
        /// Service name (all services when omitted)
        #[arg(long, value_name = "NAME")]
        service: Option<String>,
    },
}
