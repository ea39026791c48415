//! Connection settings and their property representation

use hostsetup_config::{keys, Properties};
use hostsetup_errors::{ConfigError, DatabaseError, Error};
use hostsetup_types::{DatabaseKind, DatabaseOptions};
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_NAME: &str = "ambari";
pub const DEFAULT_SCHEMA: &str = "ambari";
pub const DEFAULT_USER: &str = "ambari";
pub const DEFAULT_PASSWORD: &str = "bigdata";

/// File next to the properties file holding the database password
pub const PASSWORD_FILE: &str = "password.dat";

const PERSISTENCE_LOCAL: &str = "local";
const PERSISTENCE_REMOTE: &str = "remote";

/// Everything needed to reach and initialize one database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub kind: DatabaseKind,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Only meaningful for PostgreSQL
    pub schema: String,
    pub username: String,
    pub password: String,
    pub init_script: PathBuf,
    pub cleanup_script: PathBuf,
}

fn script_stem(kind: DatabaseKind) -> &'static str {
    match kind {
        DatabaseKind::EmbeddedPostgres => "Postgres-EMBEDDED",
        DatabaseKind::Postgres => "Postgres",
        DatabaseKind::Oracle => "Oracle",
        DatabaseKind::Mysql => "MySQL",
        DatabaseKind::Mssql => "SQLServer",
        DatabaseKind::SqlAnywhere => "SQLAnywhere",
    }
}

impl ConnectionSettings {
    /// Defaults for `kind` with DDL scripts taken from `resources`.
    #[must_use]
    pub fn defaults(kind: DatabaseKind, resources: &Path) -> Self {
        let stem = script_stem(kind);
        Self {
            kind,
            host: DEFAULT_HOST.to_string(),
            port: kind.default_port(),
            name: DEFAULT_NAME.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
            username: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            init_script: resources.join(format!("Ambari-DDL-{stem}-CREATE.sql")),
            cleanup_script: resources.join(format!("Ambari-DDL-{stem}-DROP.sql")),
        }
    }

    /// Overlay the fields given on the command line.
    pub fn apply_options(&mut self, options: &DatabaseOptions) {
        // The embedded instance always lives on this host
        if !self.kind.is_embedded() {
            if let Some(host) = &options.host {
                self.host.clone_from(host);
            }
            if let Some(port) = options.port {
                self.port = port;
            }
        }
        if let Some(name) = &options.name {
            self.name.clone_from(name);
        }
        if let Some(schema) = &options.schema {
            self.schema.clone_from(schema);
        }
        if let Some(username) = &options.username {
            self.username.clone_from(username);
        }
        if let Some(password) = &options.password {
            self.password.clone_from(password);
        }
        if let Some(script) = &options.init_script {
            self.init_script.clone_from(script);
        }
        if let Some(script) = &options.cleanup_script {
            self.cleanup_script.clone_from(script);
        }
    }

    #[must_use]
    pub fn jdbc_url(&self) -> String {
        let Self {
            host, port, name, ..
        } = self;
        match self.kind {
            DatabaseKind::EmbeddedPostgres | DatabaseKind::Postgres => {
                format!("jdbc:postgresql://{host}:{port}/{name}")
            }
            DatabaseKind::Oracle => format!("jdbc:oracle:thin:@{host}:{port}/{name}"),
            DatabaseKind::Mysql => format!("jdbc:mysql://{host}:{port}/{name}"),
            DatabaseKind::Mssql => format!("jdbc:sqlserver://{host}:{port};databaseName={name}"),
            DatabaseKind::SqlAnywhere => format!("jdbc:sqlanywhere:host={host}:{port};dbn={name}"),
        }
    }

    /// Password file used for `props`.
    #[must_use]
    pub fn password_file(props: &Properties) -> PathBuf {
        props
            .path()
            .parent()
            .map_or_else(|| PathBuf::from(PASSWORD_FILE), |dir| dir.join(PASSWORD_FILE))
    }

    /// Record these settings under the `server.jdbc.*` keys.
    pub fn write_properties(&self, props: &mut Properties, password_file: &Path) {
        let persistence = if self.kind.is_embedded() {
            PERSISTENCE_LOCAL
        } else {
            PERSISTENCE_REMOTE
        };
        let url = self.jdbc_url();
        let password_ref = password_file.display().to_string();

        props.set(keys::PERSISTENCE_TYPE, persistence);
        props.set(keys::JDBC_DATABASE, self.kind.jdbc_name());
        props.set(keys::JDBC_DATABASE_NAME, self.name.clone());
        props.set(keys::JDBC_HOSTNAME, self.host.clone());
        props.set(keys::JDBC_PORT, self.port.to_string());
        if matches!(
            self.kind,
            DatabaseKind::EmbeddedPostgres | DatabaseKind::Postgres
        ) {
            props.set(keys::JDBC_SCHEMA, self.schema.clone());
        } else {
            props.remove(keys::JDBC_SCHEMA);
        }
        props.set(keys::JDBC_URL, url.clone());
        props.set(keys::JDBC_RCA_URL, url);
        props.set(keys::JDBC_DRIVER, self.kind.driver_class());
        props.set(keys::JDBC_RCA_DRIVER, self.kind.driver_class());
        props.set(keys::JDBC_USER_NAME, self.username.clone());
        props.set(keys::JDBC_RCA_USER_NAME, self.username.clone());
        props.set(keys::JDBC_USER_PASSWD, password_ref.clone());
        props.set(keys::JDBC_RCA_USER_PASSWD, password_ref);
    }

    /// Rebuild the settings a previous setup recorded.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` when the JDBC URLs are absent, `MissingKey`
    /// or `InvalidValue` for incomplete records, and an I/O error if the
    /// password file cannot be read.
    pub async fn from_properties(props: &Properties) -> Result<Self, Error> {
        if !(props.contains_key(keys::JDBC_URL) && props.contains_key(keys::JDBC_RCA_URL)) {
            return Err(DatabaseError::NotConfigured.into());
        }

        let name = props.require(keys::JDBC_DATABASE)?;
        let kind = if props.get(keys::PERSISTENCE_TYPE) == Some(PERSISTENCE_LOCAL) {
            DatabaseKind::EmbeddedPostgres
        } else {
            DatabaseKind::from_name(name)?
        };
        let resources = props.require_path(keys::RESOURCES_DIR)?;

        let mut settings = Self::defaults(kind, &resources);
        if let Some(host) = props.get(keys::JDBC_HOSTNAME) {
            settings.host = host.to_string();
        }
        if let Some(port) = props.get(keys::JDBC_PORT) {
            settings.port = port.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                key: keys::JDBC_PORT.to_string(),
                value: port.to_string(),
            })?;
        }
        if let Some(db_name) = props.get(keys::JDBC_DATABASE_NAME) {
            settings.name = db_name.to_string();
        }
        if let Some(schema) = props.get(keys::JDBC_SCHEMA) {
            settings.schema = schema.to_string();
        }
        settings.username = props.require(keys::JDBC_USER_NAME)?.to_string();

        let password_file = props.require_path(keys::JDBC_USER_PASSWD)?;
        settings.password = load_password(&password_file).await?;
        Ok(settings)
    }
}

/// Write the password file, readable by its owner only.
///
/// # Errors
///
/// Returns an I/O error naming `path` if the file cannot be written.
pub async fn store_password(path: &Path, password: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::io_with_path(&e, parent))?;
    }
    tokio::fs::write(path, password)
        .await
        .map_err(|e| Error::io_with_path(&e, path))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(|e| Error::io_with_path(&e, path))?;
    }
    Ok(())
}

/// Read a password file written by [`store_password`].
///
/// # Errors
///
/// Returns an I/O error naming `path` if the file cannot be read.
pub async fn load_password(path: &Path) -> Result<String, Error> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io_with_path(&e, path))?;
    Ok(contents.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jdbc_urls() {
        let resources = Path::new("/var/lib/hostsetup/resources");
        let mut oracle = ConnectionSettings::defaults(DatabaseKind::Oracle, resources);
        oracle.host = "db.example.com".to_string();
        assert_eq!(
            oracle.jdbc_url(),
            "jdbc:oracle:thin:@db.example.com:1521/ambari"
        );

        let mssql = ConnectionSettings::defaults(DatabaseKind::Mssql, resources);
        assert_eq!(
            mssql.jdbc_url(),
            "jdbc:sqlserver://localhost:1433;databaseName=ambari"
        );
        assert_eq!(
            mssql.init_script,
            resources.join("Ambari-DDL-SQLServer-CREATE.sql")
        );
    }

    #[test]
    fn test_embedded_ignores_remote_host() {
        let mut settings =
            ConnectionSettings::defaults(DatabaseKind::EmbeddedPostgres, Path::new("/r"));
        settings.apply_options(&DatabaseOptions {
            host: Some("elsewhere".to_string()),
            port: Some(6000),
            name: Some("custom".to_string()),
            ..DatabaseOptions::default()
        });
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 5432);
        assert_eq!(settings.name, "custom");
    }
}
