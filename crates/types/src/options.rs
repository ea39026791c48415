//! Per-run setup options

use crate::DatabaseKind;
use std::path::PathBuf;

/// Database connection fields supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct DatabaseOptions {
    pub kind: Option<DatabaseKind>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
    pub schema: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub init_script: Option<PathBuf>,
    pub cleanup_script: Option<PathBuf>,
}

/// Choices for one `setup` or `reset` invocation.
///
/// Built once from the command line. Only the database selector writes to
/// it afterwards, filling `database_index` and `must_set_database_options`.
#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Explicit JDK location (`--java-home`)
    pub java_home: Option<PathBuf>,
    /// JDBC driver file to register (`--jdbc-driver`)
    pub jdbc_driver: Option<PathBuf>,
    /// Database name the driver belongs to (`--jdbc-db`)
    pub jdbc_db: Option<String>,
    /// Unattended mode, every prompt takes its default answer
    pub silent: bool,
    /// Offer the advanced database configuration menu
    pub must_set_database_options: bool,
    /// Index into [`DatabaseKind::ALL`] chosen by the database selector
    pub database_index: Option<usize>,
    pub database: DatabaseOptions,
}

impl SetupOptions {
    /// Both halves of the driver-only registration were supplied.
    #[must_use]
    pub fn jdbc_options_present(&self) -> bool {
        self.jdbc_driver.is_some() && self.jdbc_db.is_some()
    }

    /// The database kind selected so far, if any.
    #[must_use]
    pub fn selected_database(&self) -> Option<DatabaseKind> {
        self.database_index
            .and_then(|index| DatabaseKind::ALL.get(index).copied())
    }
}
