//! JDK installers per platform

use async_trait::async_trait;
use hostsetup_errors::{Error, RuntimeError};
use hostsetup_platform::{CommandOutput, PlatformCommand, ProcessOperations};
use hostsetup_types::{OsFamily, RuntimeRelease};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Windows installer exit code meaning the JDK is already present
const MSI_ALREADY_INSTALLED: i32 = 1603;

/// Installs a downloaded JDK archive.
#[async_trait]
pub trait RuntimeInstaller: Send + Sync {
    /// Install `archive` for `release` and return the resulting java home.
    async fn install(&self, archive: &Path, release: &RuntimeRelease) -> Result<PathBuf, Error>;
}

/// Bind the installer for `family`.
#[must_use]
pub fn installer_for(
    family: OsFamily,
    ops: Arc<dyn ProcessOperations>,
    log_dir: PathBuf,
) -> Box<dyn RuntimeInstaller> {
    match family {
        OsFamily::Posix => Box::new(PosixInstaller::new(ops)),
        OsFamily::Windows => Box::new(WindowsInstaller::new(ops, log_dir)),
    }
}

fn archive_name(archive: &Path) -> String {
    archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn check_exit(output: &CommandOutput) -> Result<(), Error> {
    if output.success() {
        Ok(())
    } else {
        Err(RuntimeError::InstallerFailed {
            exit_code: output.exit_code,
        }
        .into())
    }
}

/// Java home named by the first capture group of `pattern` in `output`.
///
/// # Errors
///
/// Returns `InvalidPattern` if the release pattern does not compile and
/// `VersionNotFound` if nothing in the output matches it.
pub fn java_home_from_output(
    release: &RuntimeRelease,
    output: &str,
) -> Result<PathBuf, Error> {
    let re = Regex::new(&release.version_pattern).map_err(|e| RuntimeError::InvalidPattern {
        pattern: release.version_pattern.clone(),
        message: e.to_string(),
    })?;
    let version = re
        .captures(output)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| RuntimeError::VersionNotFound {
            pattern: release.version_pattern.clone(),
        })?;
    Ok(release.install_dir.join(version.as_str()))
}

/// Self-extracting `.bin` and tarball installs
pub struct PosixInstaller {
    ops: Arc<dyn ProcessOperations>,
}

impl PosixInstaller {
    pub fn new(ops: Arc<dyn ProcessOperations>) -> Self {
        Self { ops }
    }
}

#[async_trait]
impl RuntimeInstaller for PosixInstaller {
    async fn install(&self, archive: &Path, release: &RuntimeRelease) -> Result<PathBuf, Error> {
        let install_dir = &release.install_dir;
        tokio::fs::create_dir_all(install_dir)
            .await
            .map_err(|e| Error::io_with_path(&e, install_dir))?;

        let archive_arg = archive.display().to_string();
        let name = archive_name(archive);

        let output = if name.ends_with(".bin") {
            let mut chmod = PlatformCommand::new("chmod");
            chmod.args(["a+x", archive_arg.as_str()]);
            let chmod_cmd = chmod.clone();
            self.ops
                .execute_command(chmod)
                .await?
                .into_result(&chmod_cmd)?;

            let mut run = PlatformCommand::new(archive_arg.as_str());
            run.arg("-noregister").current_dir(install_dir);
            self.ops.execute_command(run).await?
        } else if name.ends_with(".gz") {
            // --no-same-owner keeps the archive's uid off the files when run as root
            let mut untar = PlatformCommand::new("tar");
            untar
                .args(["--no-same-owner", "-xvf", archive_arg.as_str()])
                .current_dir(install_dir);
            self.ops.execute_command(untar).await?
        } else {
            return Err(RuntimeError::UnknownArchiveType { archive: name }.into());
        };

        check_exit(&output)?;
        java_home_from_output(release, &output.combined())
    }
}

/// Silent `.exe` installs
pub struct WindowsInstaller {
    ops: Arc<dyn ProcessOperations>,
    log_dir: PathBuf,
}

impl WindowsInstaller {
    pub fn new(ops: Arc<dyn ProcessOperations>, log_dir: PathBuf) -> Self {
        Self { ops, log_dir }
    }
}

#[async_trait]
impl RuntimeInstaller for WindowsInstaller {
    async fn install(&self, archive: &Path, release: &RuntimeRelease) -> Result<PathBuf, Error> {
        let install_dir = &release.install_dir;
        let name = archive_name(archive);
        if !name.ends_with(".exe") {
            return Err(RuntimeError::UnknownArchiveType { archive: name }.into());
        }

        tokio::fs::create_dir_all(install_dir)
            .await
            .map_err(|e| Error::io_with_path(&e, install_dir))?;

        let install_dir_arg = format!("INSTALLDIR={}", install_dir.display());
        let log_file = self
            .log_dir
            .join(format!("{name}-install.log"))
            .display()
            .to_string();

        let mut cmd = PlatformCommand::new(archive.display().to_string());
        cmd.args([
            "/s",
            install_dir_arg.as_str(),
            "STATIC=1",
            "WEB_JAVA=0",
            "/L",
            log_file.as_str(),
        ]);
        let output = self.ops.execute_command(cmd).await?;

        if output.exit_code != MSI_ALREADY_INSTALLED {
            check_exit(&output)?;
        }
        Ok(install_dir.clone())
    }
}
