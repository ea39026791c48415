#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Database configuration for hostsetup
//!
//! Picks the database the server persists to, records the connection in
//! the properties file and binds a [`DatabaseStrategy`] that initializes or
//! resets it. The engines themselves are never installed or started here.

pub mod driver;
pub mod embedded;
pub mod remote;
pub mod settings;

pub use driver::{cache_jdbc_driver, check_jdbc_drivers, driver_symlink};
pub use embedded::EmbeddedPostgres;
pub use remote::RemoteDatabase;
pub use settings::{load_password, store_password, ConnectionSettings};

use async_trait::async_trait;
use hostsetup_config::{keys, Properties};
use hostsetup_errors::{ConfigError, Error, SetupError};
use hostsetup_events::{EventEmitter, EventSender};
use hostsetup_platform::ProcessOperations;
use hostsetup_prompt::{Prompter, Validation};
use hostsetup_types::{DatabaseKind, OsFamily, SetupOptions};
use regex::Regex;
use std::fmt::Write as _;
use std::sync::Arc;

const IDENTIFIER_PATTERN: &str = r"^[a-zA-Z_][a-zA-Z0-9_\-]*$";
const PASSWORD_PATTERN: &str = r"^[a-zA-Z0-9_\-]*$";

/// A database bound to its connection settings.
#[async_trait]
pub trait DatabaseStrategy: Send + Sync {
    fn settings(&self) -> &ConnectionSettings;

    fn kind(&self) -> DatabaseKind {
        self.settings().kind
    }

    /// Create the schema. Safe to call against an initialized database.
    async fn setup(&self) -> Result<(), Error>;

    /// Drop and recreate managed data. Callers confirm first.
    async fn reset(&self) -> Result<(), Error>;
}

/// Collaborators shared by the database steps
pub struct DatabaseContext<'a> {
    pub family: OsFamily,
    pub ops: Arc<dyn ProcessOperations>,
    pub prompter: &'a dyn Prompter,
    pub tx: Option<EventSender>,
}

impl EventEmitter for DatabaseContext<'_> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

fn pattern(re: &str) -> Result<Regex, Error> {
    Regex::new(re).map_err(|e| Error::internal(format!("invalid pattern {re}: {e}")))
}

fn check_value(key: &str, value: &str, re: &Regex) -> Result<(), Error> {
    if re.is_match(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }
        .into())
    }
}

/// Menu listing [`DatabaseKind::ALL`] in order
#[must_use]
pub fn database_menu() -> String {
    let mut out = String::from("Choose one of the following options:\n");
    for (i, kind) in DatabaseKind::ALL.iter().enumerate() {
        let _ = writeln!(out, "[{}] - {kind}", i + 1);
    }
    out.push_str(&"=".repeat(78));
    out.push_str("\nEnter choice (1)");
    out
}

impl DatabaseContext<'_> {
    /// Ask whether the advanced configuration is wanted and pick the kind.
    ///
    /// Fills `options.must_set_database_options` and
    /// `options.database_index`.
    ///
    /// # Errors
    ///
    /// Propagates prompt failures.
    pub async fn prompt_database(&self, options: &mut SetupOptions) -> Result<DatabaseKind, Error> {
        if options.database.kind.is_none() && options.must_set_database_options {
            options.must_set_database_options = self
                .prompter
                .confirm("Enter advanced database configuration", false)
                .await?;
        }
        self.emit_info("Configuring database...");
        self.select_database(options).await
    }

    /// Flag-driven choice when a kind was given, otherwise the menu when
    /// advanced options were requested, otherwise embedded PostgreSQL.
    ///
    /// # Errors
    ///
    /// Propagates prompt failures.
    pub async fn select_database(&self, options: &mut SetupOptions) -> Result<DatabaseKind, Error> {
        let index = if let Some(kind) = options.database.kind {
            options.must_set_database_options = true;
            DatabaseKind::ALL.iter().position(|k| *k == kind).unwrap_or(0)
        } else if options.must_set_database_options {
            let alternatives = (1..=DatabaseKind::ALL.len())
                .map(|n| n.to_string())
                .collect::<Vec<_>>()
                .join("|");
            let validation = Validation::new(
                pattern(&format!("^(?:{alternatives})$"))?,
                "Invalid number.",
            );
            let answer = self
                .prompter
                .ask(&database_menu(), "1", Some(&validation))
                .await?;
            answer
                .trim()
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .filter(|i| *i < DatabaseKind::ALL.len())
                .unwrap_or(0)
        } else {
            0
        };

        options.database_index = Some(index);
        Ok(DatabaseKind::ALL[index])
    }

    /// Record the connection for the selected database and bind its strategy.
    ///
    /// The properties are updated in memory and the password file is
    /// written; persisting the properties is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` for names or passwords with unsupported
    /// characters, `Cancelled` when remote configuration is declined, and
    /// `MissingKey` if `resources.dir` is not set.
    pub async fn configure(
        &self,
        options: &SetupOptions,
        props: &mut Properties,
    ) -> Result<Box<dyn DatabaseStrategy>, Error> {
        let kind = options
            .selected_database()
            .unwrap_or(DatabaseKind::EmbeddedPostgres);
        let resources = props.require_path(keys::RESOURCES_DIR)?;

        let mut settings = ConnectionSettings::defaults(kind, &resources);
        settings.apply_options(&options.database);

        if options.must_set_database_options && !self.prompter.is_silent() {
            self.prompt_settings(&mut settings).await?;
        }

        let identifier = pattern(IDENTIFIER_PATTERN)?;
        check_value(keys::JDBC_DATABASE_NAME, &settings.name, &identifier)?;
        check_value(keys::JDBC_SCHEMA, &settings.schema, &identifier)?;
        check_value(keys::JDBC_USER_NAME, &settings.username, &identifier)?;
        check_value(
            keys::JDBC_USER_PASSWD,
            &settings.password,
            &pattern(PASSWORD_PATTERN)?,
        )?;

        if !kind.is_embedded()
            && !self
                .prompter
                .confirm(
                    "Proceed with configuring remote database connection properties",
                    true,
                )
                .await?
        {
            return Err(SetupError::Cancelled {
                operation: "remote database configuration".to_string(),
            }
            .into());
        }

        let password_file = ConnectionSettings::password_file(props);
        store_password(&password_file, &settings.password).await?;
        settings.write_properties(props, &password_file);

        Ok(self.bind(settings))
    }

    /// Bind the strategy recorded by an earlier setup.
    ///
    /// # Errors
    ///
    /// Returns `NotConfigured` when no JDBC URLs are recorded.
    pub async fn from_properties(
        &self,
        props: &Properties,
    ) -> Result<Box<dyn DatabaseStrategy>, Error> {
        let settings = ConnectionSettings::from_properties(props).await?;
        Ok(self.bind(settings))
    }

    #[must_use]
    pub fn bind(&self, settings: ConnectionSettings) -> Box<dyn DatabaseStrategy> {
        if settings.kind.is_embedded() {
            Box::new(EmbeddedPostgres::new(
                settings,
                Arc::clone(&self.ops),
                self.tx.clone(),
            ))
        } else {
            Box::new(RemoteDatabase::new(
                settings,
                Arc::clone(&self.ops),
                self.tx.clone(),
            ))
        }
    }

    async fn prompt_settings(&self, settings: &mut ConnectionSettings) -> Result<(), Error> {
        let identifier = Validation::new(
            pattern(IDENTIFIER_PATTERN)?,
            "Invalid characters. Use only alphanumeric or _ or - characters.",
        );

        if !settings.kind.is_embedded() {
            settings.host = self.prompter.ask("Hostname", &settings.host, None).await?;
            let port_rule = Validation::new(pattern(r"^\d{1,5}$")?, "Invalid port.");
            let port = self
                .prompter
                .ask("Port", &settings.port.to_string(), Some(&port_rule))
                .await?;
            if let Ok(port) = port.trim().parse::<u16>() {
                settings.port = port;
            }
        }

        let name_question = if settings.kind == DatabaseKind::Oracle {
            "Service Name"
        } else {
            "Database name"
        };
        settings.name = self
            .prompter
            .ask(name_question, &settings.name, Some(&identifier))
            .await?;

        if matches!(
            settings.kind,
            DatabaseKind::EmbeddedPostgres | DatabaseKind::Postgres
        ) {
            settings.schema = self
                .prompter
                .ask("Postgres schema", &settings.schema, Some(&identifier))
                .await?;
        }

        settings.username = self
            .prompter
            .ask("Username", &settings.username, Some(&identifier))
            .await?;

        let password_rule = pattern(PASSWORD_PATTERN)?;
        loop {
            let password = self
                .prompter
                .password("Enter Database Password", &settings.password)
                .await?;
            if password_rule.is_match(&password) {
                settings.password = password;
                return Ok(());
            }
            self.emit_warning(
                "Invalid characters in password. Use only alphanumeric or _ or - characters",
            );
        }
    }
}
