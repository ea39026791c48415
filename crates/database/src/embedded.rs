//! PostgreSQL instance on this host

use crate::settings::ConnectionSettings;
use crate::DatabaseStrategy;
use async_trait::async_trait;
use hostsetup_errors::{DatabaseError, Error};
use hostsetup_events::{EventEmitter, EventSender};
use hostsetup_platform::{CommandOutput, PlatformCommand, ProcessOperations};
use std::path::Path;
use std::sync::Arc;

/// OS account owning the local PostgreSQL cluster
const POSTGRES_USER: &str = "postgres";

/// Drives `psql` as the `postgres` account.
pub struct EmbeddedPostgres {
    settings: ConnectionSettings,
    ops: Arc<dyn ProcessOperations>,
    tx: Option<EventSender>,
}

impl EmbeddedPostgres {
    pub fn new(
        settings: ConnectionSettings,
        ops: Arc<dyn ProcessOperations>,
        tx: Option<EventSender>,
    ) -> Self {
        Self { settings, ops, tx }
    }

    async fn psql(&self, psql_args: &str) -> Result<CommandOutput, Error> {
        let mut cmd = PlatformCommand::new("su");
        cmd.args([POSTGRES_USER, "-c"]).arg(format!("psql {psql_args}"));
        self.ops.execute_command(cmd).await
    }

    async fn database_exists(&self) -> Result<bool, Error> {
        let query = format!(
            "-tAc \"SELECT 1 FROM pg_database WHERE datname='{}'\"",
            self.settings.name
        );
        let output = self.psql(&query).await?;
        if !output.success() {
            return Err(DatabaseError::SetupFailed {
                message: format!(
                    "unable to query the local PostgreSQL instance: {}",
                    output.stderr.trim()
                ),
            }
            .into());
        }
        Ok(output.stdout.trim() == "1")
    }

    async fn run_script(&self, script: &Path) -> Result<CommandOutput, Error> {
        if !script.is_file() {
            return Err(DatabaseError::SetupFailed {
                message: format!("script {} does not exist", script.display()),
            }
            .into());
        }
        let ConnectionSettings {
            name,
            username,
            password,
            ..
        } = &self.settings;
        let args = format!(
            "-f {} -v username='\"{username}\"' -v password=\"'{password}'\" -v dbname=\"{name}\"",
            script.display()
        );
        self.psql(&args).await
    }
}

impl EventEmitter for EmbeddedPostgres {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

#[async_trait]
impl DatabaseStrategy for EmbeddedPostgres {
    fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    async fn setup(&self) -> Result<(), Error> {
        if self.database_exists().await? {
            self.emit_info(format!(
                "Database {} already exists, skipping schema creation",
                self.settings.name
            ));
            return Ok(());
        }

        self.emit_info("Configuring local database...");
        let output = self.run_script(&self.settings.init_script).await?;
        if !output.success() {
            return Err(DatabaseError::SetupFailed {
                message: output.combined().trim().to_string(),
            }
            .into());
        }
        self.emit_info("Local database configured");
        Ok(())
    }

    async fn reset(&self) -> Result<(), Error> {
        self.emit_info("Resetting the local database...");
        for script in [&self.settings.cleanup_script, &self.settings.init_script] {
            let output = self.run_script(script).await?;
            if !output.success() {
                return Err(DatabaseError::ResetFailed {
                    message: format!(
                        "{} exited with code {}: {}",
                        script.display(),
                        output.exit_code,
                        output.stderr.trim()
                    ),
                }
                .into());
            }
        }
        Ok(())
    }
}
