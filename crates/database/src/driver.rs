//! JDBC driver registration
//!
//! Drivers live in the resources directory and are referenced through a
//! `<db>-jdbc-driver.jar` symlink that the server puts on its classpath.
//! The Windows distribution bundles its drivers, so both operations are
//! no-ops there.

use hostsetup_config::{keys, Properties};
use hostsetup_errors::{DatabaseError, Error};
use hostsetup_types::{DatabaseKind, OsFamily};
use std::path::{Path, PathBuf};

/// Symlink the server expects for `jdbc_name`.
#[must_use]
pub fn driver_symlink(resources: &Path, jdbc_name: &str) -> PathBuf {
    resources.join(format!("{jdbc_name}-jdbc-driver.jar"))
}

/// Copy `driver` into the resources directory and point the symlink for
/// `db` at it. Returns the symlink, or `None` where nothing is cached.
///
/// # Errors
///
/// Returns `DriverNotFound` if `driver` is not a file, `UnsupportedKind` for
/// a database name outside the JDBC list, `DriverCopyFailed` when the copy
/// fails, and `MissingKey` if `resources.dir` is not set.
pub async fn cache_jdbc_driver(
    family: OsFamily,
    props: &Properties,
    driver: &Path,
    db: &str,
) -> Result<Option<PathBuf>, Error> {
    if !driver.is_file() {
        return Err(DatabaseError::DriverNotFound {
            path: driver.display().to_string(),
        }
        .into());
    }
    if !DatabaseKind::JDBC_NAMES.contains(&db) {
        return Err(DatabaseError::UnsupportedKind {
            name: db.to_string(),
        }
        .into());
    }
    if family == OsFamily::Windows {
        return Ok(None);
    }

    let resources = props.require_path(keys::RESOURCES_DIR)?;
    let symlink = driver_symlink(&resources, db);
    let Some(file_name) = driver.file_name() else {
        return Err(DatabaseError::DriverNotFound {
            path: driver.display().to_string(),
        }
        .into());
    };
    let cached = resources.join(file_name);

    if tokio::fs::symlink_metadata(&symlink).await.is_ok() {
        tokio::fs::remove_file(&symlink)
            .await
            .map_err(|e| Error::io_with_path(&e, &symlink))?;
    }

    if !cached.is_file() {
        tokio::fs::copy(driver, &cached)
            .await
            .map_err(|e| DatabaseError::DriverCopyFailed {
                from: driver.display().to_string(),
                to: resources.display().to_string(),
                message: e.to_string(),
            })?;
    }

    link(&cached, &symlink).await?;
    Ok(Some(symlink))
}

#[cfg(unix)]
async fn link(target: &Path, symlink: &Path) -> Result<(), Error> {
    tokio::fs::symlink(target, symlink)
        .await
        .map_err(|e| Error::io_with_path(&e, symlink))
}

#[cfg(not(unix))]
async fn link(_target: &Path, symlink: &Path) -> Result<(), Error> {
    Err(Error::internal(format!(
        "symlinks are not supported here: {}",
        symlink.display()
    )))
}

/// Verify the driver for the configured database has been registered.
///
/// Embedded and remote PostgreSQL use the driver shipped with the server.
///
/// # Errors
///
/// Returns `DriverNotFound` naming the expected symlink when it is missing.
pub fn check_jdbc_drivers(
    family: OsFamily,
    kind: DatabaseKind,
    props: &Properties,
) -> Result<(), Error> {
    if family == OsFamily::Windows
        || matches!(
            kind,
            DatabaseKind::EmbeddedPostgres | DatabaseKind::Postgres
        )
    {
        return Ok(());
    }

    let resources = props.require_path(keys::RESOURCES_DIR)?;
    let symlink = driver_symlink(&resources, kind.jdbc_name());
    if std::fs::symlink_metadata(&symlink).is_err() {
        return Err(DatabaseError::DriverNotFound {
            path: symlink.display().to_string(),
        }
        .into());
    }
    Ok(())
}
