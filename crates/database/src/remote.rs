//! Databases managed elsewhere
//!
//! The schema of a remote database is created by its administrator, so
//! setup only reports which DDL to run. Reset runs the drop and create
//! scripts through the vendor's command line client when it is installed.

use crate::settings::ConnectionSettings;
use crate::DatabaseStrategy;
use async_trait::async_trait;
use hostsetup_errors::{DatabaseError, Error};
use hostsetup_events::{EventEmitter, EventSender};
use hostsetup_platform::{PlatformCommand, ProcessOperations};
use hostsetup_types::DatabaseKind;
use std::path::Path;
use std::sync::Arc;

/// Command line client for `kind`
#[must_use]
pub fn client_program(kind: DatabaseKind) -> &'static str {
    match kind {
        DatabaseKind::EmbeddedPostgres | DatabaseKind::Postgres => "psql",
        DatabaseKind::Oracle => "sqlplus",
        DatabaseKind::Mysql => "mysql",
        DatabaseKind::Mssql => "sqlcmd",
        DatabaseKind::SqlAnywhere => "dbisql",
    }
}

/// Client invocation that runs `script` against the database in `settings`.
#[must_use]
pub fn script_command(settings: &ConnectionSettings, script: &Path) -> PlatformCommand {
    let ConnectionSettings {
        kind,
        host,
        port,
        name,
        username,
        password,
        ..
    } = settings;
    let script = script.display().to_string();
    let mut cmd = PlatformCommand::new(client_program(*kind));

    match kind {
        DatabaseKind::EmbeddedPostgres | DatabaseKind::Postgres => {
            let port = port.to_string();
            cmd.args(["-h", host.as_str(), "-p", port.as_str()])
                .args(["-U", username.as_str(), "-d", name.as_str()])
                .args(["-f", script.as_str()])
                .env("PGPASSWORD", password.clone());
        }
        DatabaseKind::Oracle => {
            cmd.arg(format!("{username}/{password}@//{host}:{port}/{name}"))
                .arg(format!("@{script}"));
        }
        DatabaseKind::Mysql => {
            cmd.arg(format!("--host={host}"))
                .arg(format!("--port={port}"))
                .arg(format!("--user={username}"))
                .arg(format!("--database={name}"))
                .arg("-e")
                .arg(format!("source {script}"))
                .env("MYSQL_PWD", password.clone());
        }
        DatabaseKind::Mssql => {
            cmd.args(["-S".to_string(), format!("{host},{port}")])
                .args(["-U", username.as_str(), "-P", password.as_str()])
                .args(["-d", name.as_str(), "-i", script.as_str()]);
        }
        DatabaseKind::SqlAnywhere => {
            cmd.arg("-c")
                .arg(format!(
                    "uid={username};pwd={password};host={host}:{port};dbn={name}"
                ))
                .args(["-nogui", script.as_str()]);
        }
    }
    cmd
}

pub struct RemoteDatabase {
    settings: ConnectionSettings,
    ops: Arc<dyn ProcessOperations>,
    tx: Option<EventSender>,
}

impl RemoteDatabase {
    pub fn new(
        settings: ConnectionSettings,
        ops: Arc<dyn ProcessOperations>,
        tx: Option<EventSender>,
    ) -> Self {
        Self { settings, ops, tx }
    }
}

impl EventEmitter for RemoteDatabase {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

#[async_trait]
impl DatabaseStrategy for RemoteDatabase {
    fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    async fn setup(&self) -> Result<(), Error> {
        self.emit_warning(format!(
            "Before starting the server, you must run the following DDL against the database to create the schema: {}",
            self.settings.init_script.display()
        ));
        Ok(())
    }

    async fn reset(&self) -> Result<(), Error> {
        let client = client_program(self.settings.kind);
        let cleanup = &self.settings.cleanup_script;
        let init = &self.settings.init_script;

        if self.ops.which(client).is_none() {
            return Err(DatabaseError::ResetFailed {
                message: format!(
                    "{client} not found; run {} and then {} against {} manually",
                    cleanup.display(),
                    init.display(),
                    self.settings.jdbc_url()
                ),
            }
            .into());
        }

        for script in [cleanup, init] {
            self.emit_info(format!("Running {}", script.display()));
            let output = self
                .ops
                .execute_command(script_command(&self.settings, script))
                .await?;
            if !output.success() {
                return Err(DatabaseError::ResetFailed {
                    message: format!(
                        "{client} exited with code {} running {}: {}",
                        output.exit_code,
                        script.display(),
                        output.stderr.trim()
                    ),
                }
                .into());
            }
        }
        Ok(())
    }
}
