//! Supported database kinds

use hostsetup_errors::DatabaseError;
use serde::{Deserialize, Serialize};

/// Database management systems the server can be configured against.
///
/// The order of [`DatabaseKind::ALL`] is the order of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseKind {
    /// PostgreSQL instance managed on this host
    EmbeddedPostgres,
    Oracle,
    Mysql,
    /// PostgreSQL instance managed elsewhere
    Postgres,
    Mssql,
    SqlAnywhere,
}

impl DatabaseKind {
    pub const ALL: [DatabaseKind; 6] = [
        Self::EmbeddedPostgres,
        Self::Oracle,
        Self::Mysql,
        Self::Postgres,
        Self::Mssql,
        Self::SqlAnywhere,
    ];

    /// Names accepted by `--jdbc-db` and `--database`
    pub const JDBC_NAMES: [&'static str; 5] = ["postgres", "oracle", "mysql", "mssql", "sqlanywhere"];

    /// Parse a database name as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::UnsupportedKind` for unknown names.
    pub fn from_name(name: &str) -> Result<Self, DatabaseError> {
        match name.to_ascii_lowercase().as_str() {
            "embedded" => Ok(Self::EmbeddedPostgres),
            "postgres" => Ok(Self::Postgres),
            "oracle" => Ok(Self::Oracle),
            "mysql" => Ok(Self::Mysql),
            "mssql" => Ok(Self::Mssql),
            "sqlanywhere" => Ok(Self::SqlAnywhere),
            _ => Err(DatabaseError::UnsupportedKind {
                name: name.to_string(),
            }),
        }
    }

    /// Name used for the JDBC driver symlink and `server.jdbc.database`
    #[must_use]
    pub fn jdbc_name(self) -> &'static str {
        match self {
            Self::EmbeddedPostgres | Self::Postgres => "postgres",
            Self::Oracle => "oracle",
            Self::Mysql => "mysql",
            Self::Mssql => "mssql",
            Self::SqlAnywhere => "sqlanywhere",
        }
    }

    /// Menu label
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::EmbeddedPostgres => "PostgreSQL / Embedded",
            Self::Oracle => "Oracle",
            Self::Mysql => "MySQL",
            Self::Postgres => "PostgreSQL",
            Self::Mssql => "Microsoft SQL Server (Tech Preview)",
            Self::SqlAnywhere => "SQL Anywhere",
        }
    }

    #[must_use]
    pub fn is_embedded(self) -> bool {
        matches!(self, Self::EmbeddedPostgres)
    }

    #[must_use]
    pub fn default_port(self) -> u16 {
        match self {
            Self::EmbeddedPostgres | Self::Postgres => 5432,
            Self::Oracle => 1521,
            Self::Mysql => 3306,
            Self::Mssql => 1433,
            Self::SqlAnywhere => 2638,
        }
    }

    #[must_use]
    pub fn driver_class(self) -> &'static str {
        match self {
            Self::EmbeddedPostgres | Self::Postgres => "org.postgresql.Driver",
            Self::Oracle => "oracle.jdbc.driver.OracleDriver",
            Self::Mysql => "com.mysql.jdbc.Driver",
            Self::Mssql => "com.microsoft.sqlserver.jdbc.SQLServerDriver",
            Self::SqlAnywhere => "sap.jdbc4.sqlanywhere.IDriver",
        }
    }
}

impl std::fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_round_trips_jdbc_names() {
        for name in DatabaseKind::JDBC_NAMES {
            let kind = DatabaseKind::from_name(name).unwrap();
            assert_eq!(kind.jdbc_name(), name);
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        assert!(matches!(
            DatabaseKind::from_name("db2"),
            Err(DatabaseError::UnsupportedKind { .. })
        ));
    }
}
