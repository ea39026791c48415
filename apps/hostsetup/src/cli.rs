//! Command line interface definition

use clap::{Args, Parser, Subcommand};
use hostsetup_types::{ColorChoice, DatabaseKind, DatabaseOptions, SetupOptions};
use std::path::PathBuf;

/// hostsetup - bootstrap a management server host
#[derive(Parser)]
#[command(name = "hostsetup")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bootstrap a management server host into a configured state")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Answer every prompt with its default
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// Write debug logs to the log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print the operation result as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Configure the host: user, JDK, database and views
    Setup(SetupArgs),

    /// Drop and recreate the server database
    Reset,

    /// Install a JCE policy bundle into the configured JDK
    SetupPolicy {
        /// Path to the policy bundle (.zip)
        bundle: PathBuf,
    },
}

fn parse_database(name: &str) -> Result<DatabaseKind, String> {
    DatabaseKind::from_name(name).map_err(|e| e.to_string())
}

/// Options of the `setup` command
#[derive(Args, Debug, Default)]
pub struct SetupArgs {
    /// Use the JDK at this location instead of installing one
    #[arg(short = 'j', long, value_name = "PATH")]
    pub java_home: Option<PathBuf>,

    /// Only register this JDBC driver file
    #[arg(long, value_name = "FILE", requires = "jdbc_db")]
    pub jdbc_driver: Option<PathBuf>,

    /// Database the JDBC driver belongs to
    #[arg(long, value_name = "NAME", requires = "jdbc_driver")]
    pub jdbc_db: Option<String>,

    /// Database type (embedded, postgres, oracle, mysql, mssql, sqlanywhere)
    #[arg(long, value_parser = parse_database)]
    pub database: Option<DatabaseKind>,

    #[arg(long = "databasehost", value_name = "HOST")]
    pub database_host: Option<String>,

    #[arg(long = "databaseport", value_name = "PORT")]
    pub database_port: Option<u16>,

    #[arg(long = "databasename", value_name = "NAME")]
    pub database_name: Option<String>,

    /// Schema of a PostgreSQL database
    #[arg(long = "postgresschema", value_name = "SCHEMA")]
    pub database_schema: Option<String>,

    #[arg(long = "databaseusername", value_name = "USER")]
    pub database_username: Option<String>,

    #[arg(long = "databasepassword", value_name = "PASSWORD")]
    pub database_password: Option<String>,

    /// DDL script that creates the schema
    #[arg(long, value_name = "FILE")]
    pub init_script: Option<PathBuf>,

    /// DDL script that drops the schema
    #[arg(long, value_name = "FILE")]
    pub cleanup_script: Option<PathBuf>,
}

impl SetupArgs {
    /// Options for one setup run
    #[must_use]
    pub fn into_options(self, silent: bool) -> SetupOptions {
        SetupOptions {
            java_home: self.java_home,
            jdbc_driver: self.jdbc_driver,
            jdbc_db: self.jdbc_db,
            silent,
            must_set_database_options: true,
            database_index: None,
            database: DatabaseOptions {
                kind: self.database,
                host: self.database_host,
                port: self.database_port,
                name: self.database_name,
                schema: self.database_schema,
                username: self.database_username,
                password: self.database_password,
                init_script: self.init_script,
                cleanup_script: self.cleanup_script,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_flags_map_to_options() {
        let cli = Cli::try_parse_from([
            "hostsetup",
            "--silent",
            "setup",
            "--database",
            "mysql",
            "--databasehost",
            "db.example.com",
            "--databaseport",
            "3306",
        ])
        .unwrap();
        assert!(cli.global.silent);

        let Commands::Setup(args) = cli.command else {
            panic!("expected setup");
        };
        let options = args.into_options(true);
        assert!(options.silent);
        assert!(options.must_set_database_options);
        assert_eq!(options.database.kind, Some(DatabaseKind::Mysql));
        assert_eq!(options.database.host.as_deref(), Some("db.example.com"));
        assert_eq!(options.database.port, Some(3306));
    }

    #[test]
    fn test_jdbc_driver_needs_database_name() {
        let result = Cli::try_parse_from(["hostsetup", "setup", "--jdbc-driver", "/tmp/d.jar"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from([
            "hostsetup",
            "setup",
            "--jdbc-driver",
            "/tmp/d.jar",
            "--jdbc-db",
            "oracle",
        ])
        .unwrap();
        let Commands::Setup(args) = cli.command else {
            panic!("expected setup");
        };
        assert!(args.into_options(false).jdbc_options_present());
    }

    #[test]
    fn test_unknown_database_rejected() {
        assert!(Cli::try_parse_from(["hostsetup", "setup", "--database", "db2"]).is_err());
    }

    #[test]
    fn test_setup_policy_takes_bundle() {
        let cli = Cli::try_parse_from(["hostsetup", "setup-policy", "/tmp/jce.zip"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::SetupPolicy { bundle } if bundle == PathBuf::from("/tmp/jce.zip")
        ));
    }
}
