#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! JDK acquisition for hostsetup
//!
//! Decides which JDK the server runs on and gets it onto the host:
//! an operator supplied path, the previously recorded one, or a managed
//! release downloaded and installed from the catalogue. A failed managed
//! install is retried once after re-downloading the archive.

pub mod catalogue;
pub mod installer;
pub mod policy_bundle;

pub use catalogue::{default_releases, Choice};
pub use installer::{installer_for, PosixInstaller, RuntimeInstaller, WindowsInstaller};
pub use policy_bundle::unpack_policy_bundle;

use hostsetup_config::{keys, Properties};
use hostsetup_errors::{Error, RuntimeError};
use hostsetup_events::{AppEvent, DownloadEvent, EventEmitter, EventSender, RuntimeEvent};
use hostsetup_net::Downloader;
use hostsetup_platform::PlatformPolicy;
use hostsetup_prompt::Prompter;
use hostsetup_types::{OsFamily, RuntimeRelease};
use std::path::{Path, PathBuf};

const POLICY_WARNING: &str = "JCE Policy files are required for configuring Kerberos security. \
If you plan to use Kerberos, please make sure JCE Unlimited Strength Jurisdiction Policy Files \
are valid on all hosts.";

const LICENSE_QUESTION: &str = "To download the Oracle JDK and the Java Cryptography Extension \
(JCE) Policy Files you must accept the license terms found at \
http://www.oracle.com/technetwork/java/javase/terms/license/index.html and not accepting will \
cancel the setup and you must install the JDK and JCE files manually.\n\
Do you accept the Oracle Binary Code License Agreement";

/// Result of a successful acquisition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredRuntime {
    pub java_home: PathBuf,
    /// The JDK is not one this tool installed, so no policy bundle is unpacked
    pub custom: bool,
}

/// Everything runtime acquisition talks to
pub struct RuntimeAcquisition<'a> {
    pub family: OsFamily,
    /// Environment variable pointing at the JDK, usually `JAVA_HOME`
    pub home_var: &'a str,
    pub prompter: &'a dyn Prompter,
    pub downloader: &'a dyn Downloader,
    pub installer: &'a dyn RuntimeInstaller,
    pub policy: &'a dyn PlatformPolicy,
    pub tx: Option<EventSender>,
}

impl EventEmitter for RuntimeAcquisition<'_> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.tx.as_ref()
    }
}

impl RuntimeAcquisition<'_> {
    /// Settle on a JDK and record it in `props`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRuntimePath` for a JDK location without a java
    /// binary, `LicenseDeclined` when the license is refused, `DownloadFailed`
    /// when the archive cannot be fetched, `Install` when installation
    /// fails for good, and `MissingKey` when `resources.dir` is not set.
    pub async fn acquire(
        &self,
        props: &mut Properties,
        explicit: Option<&Path>,
    ) -> Result<AcquiredRuntime, Error> {
        if let Some(path) = explicit {
            return self.accept_custom(props, path).await;
        }

        if let Some(acquired) = self.reuse_recorded(props).await? {
            return Ok(acquired);
        }

        let releases = match props.releases()? {
            Some(releases) => releases,
            None => default_releases(self.family),
        };

        match self.choose(&releases).await? {
            Choice::Custom => {
                self.emit_warning("JDK must be installed on all hosts and JAVA_HOME must be valid on all hosts.");
                self.emit_warning(POLICY_WARNING);
                let path = self.prompter.ask("Path to JAVA_HOME", "", None).await?;
                self.accept_custom(props, Path::new(path.trim())).await
            }
            Choice::Release(index) => self.install_managed(props, &releases[index]).await,
        }
    }

    fn is_valid_home(&self, path: &Path) -> bool {
        path.join("bin").join(self.family.java_binary()).is_file()
    }

    async fn accept_custom(
        &self,
        props: &mut Properties,
        path: &Path,
    ) -> Result<AcquiredRuntime, Error> {
        if path.as_os_str().is_empty() || !self.is_valid_home(path) {
            return Err(RuntimeError::InvalidRuntimePath {
                path: path.display().to_string(),
            }
            .into());
        }

        self.emit_warning(format!(
            "JAVA_HOME {} must be valid on ALL hosts",
            path.display()
        ));
        self.emit_warning(POLICY_WARNING);

        props.set(keys::JAVA_HOME, path.display().to_string());
        props.remove(keys::JDK_NAME);
        props.remove(keys::JCE_NAME);
        props.persist().await?;

        self.policy.ensure_runtime_env_var(self.home_var, path).await?;
        self.emit(AppEvent::Runtime(RuntimeEvent::CustomAccepted {
            java_home: path.to_path_buf(),
        }));

        Ok(AcquiredRuntime {
            java_home: path.to_path_buf(),
            custom: true,
        })
    }

    /// Keep the JDK recorded by an earlier run where that is the answer.
    async fn reuse_recorded(
        &self,
        props: &mut Properties,
    ) -> Result<Option<AcquiredRuntime>, Error> {
        let recorded = props.get_path(keys::JAVA_HOME);

        if self.prompter.is_silent() {
            match recorded {
                Some(home) if self.is_valid_home(&home) => {}
                Some(home) => {
                    self.emit_warning(format!(
                        "Recorded java home {} is no longer valid, installing a managed JDK",
                        home.display()
                    ));
                    return Ok(None);
                }
                None => {
                    return match std::env::var(self.home_var) {
                        Ok(from_env) if !from_env.trim().is_empty() => self
                            .accept_custom(props, Path::new(from_env.trim()))
                            .await
                            .map(Some),
                        _ => Ok(None),
                    };
                }
            }
        } else {
            if recorded.is_none() {
                return Ok(None);
            }
            if self
                .prompter
                .confirm("Do you want to change Oracle JDK", false)
                .await?
            {
                return Ok(None);
            }
        }

        let Some(home) = props.get_path(keys::JAVA_HOME) else {
            return Ok(None);
        };
        self.policy.ensure_runtime_env_var(self.home_var, &home).await?;
        self.emit(AppEvent::Runtime(RuntimeEvent::Reused {
            java_home: home.clone(),
        }));

        // Nothing to unpack for a JDK that came without a recorded bundle
        let custom = !props.contains_key(keys::JCE_NAME);
        Ok(Some(AcquiredRuntime {
            java_home: home,
            custom,
        }))
    }

    async fn choose(&self, releases: &[RuntimeRelease]) -> Result<Choice, Error> {
        let validation = catalogue::choice_validation(releases.len())?;
        let question = catalogue::menu(releases, 1);

        loop {
            let answer = self.prompter.ask(&question, "1", Some(&validation)).await?;
            if let Some(choice) = catalogue::parse_choice(&answer, releases.len()) {
                return Ok(choice);
            }
            self.emit_warning("Invalid number.");
        }
    }

    async fn install_managed(
        &self,
        props: &mut Properties,
        release: &RuntimeRelease,
    ) -> Result<AcquiredRuntime, Error> {
        self.emit(AppEvent::Runtime(RuntimeEvent::ReleaseSelected {
            id: release.id.clone(),
            description: release.description.clone(),
        }));

        let resources = props.require_path(keys::RESOURCES_DIR)?;
        let archive = resources.join(&release.archive_file);

        if archive.exists() {
            self.emit(AppEvent::Download(DownloadEvent::Reused {
                dest: archive.clone(),
            }));
        } else {
            if !self.prompter.confirm(LICENSE_QUESTION, true).await? {
                return Err(RuntimeError::LicenseDeclined.into());
            }
            self.fetch_archive(release, &archive).await?;
        }

        let java_home = self.install_with_retry(release, &archive).await?;

        props.set(keys::JDK_NAME, release.archive_file.clone());
        props.set(keys::JAVA_HOME, java_home.display().to_string());

        self.fetch_policy_bundle(props, release, &resources).await;

        props.persist().await?;
        self.policy
            .ensure_runtime_env_var(self.home_var, &java_home)
            .await?;
        self.emit(AppEvent::Runtime(RuntimeEvent::Installed {
            java_home: java_home.clone(),
        }));

        Ok(AcquiredRuntime {
            java_home,
            custom: false,
        })
    }

    async fn fetch_archive(&self, release: &RuntimeRelease, archive: &Path) -> Result<(), Error> {
        self.emit_info(format!(
            "Downloading JDK from {} to {}",
            release.url,
            archive.display()
        ));
        self.downloader
            .download(&release.url, archive)
            .await
            .map_err(|e| RuntimeError::DownloadFailed {
                url: release.url.clone(),
                message: e.to_string(),
            })?;
        self.emit_info(format!(
            "Successfully downloaded JDK distribution to {}",
            archive.display()
        ));
        Ok(())
    }

    async fn install_with_retry(
        &self,
        release: &RuntimeRelease,
        archive: &Path,
    ) -> Result<PathBuf, Error> {
        self.emit(AppEvent::Runtime(RuntimeEvent::InstallStarted {
            archive: archive.to_path_buf(),
            install_dir: release.install_dir.clone(),
        }));

        let first = match self.installer.install(archive, release).await {
            Ok(home) => return Ok(home),
            Err(e) => e,
        };
        self.emit_warning(format!("Installation of JDK has failed: {first}"));

        if !archive.is_file() {
            return Err(RuntimeError::Install {
                archive: archive.display().to_string(),
                reason: "the file does not exist, please re-run setup".to_string(),
            }
            .into());
        }

        let question = format!(
            "JDK found at {}. Would you like to re-download the JDK",
            archive.display()
        );
        if !self.prompter.confirm(&question, true).await? {
            return Err(RuntimeError::Install {
                archive: archive.display().to_string(),
                reason: "please remove the JDK file and re-run setup".to_string(),
            }
            .into());
        }

        self.emit(AppEvent::Runtime(RuntimeEvent::InstallRetrying {
            archive: archive.to_path_buf(),
            reason: first.to_string(),
        }));
        self.fetch_archive(release, archive).await?;

        self.installer
            .install(archive, release)
            .await
            .map_err(|second| {
                RuntimeError::Install {
                    archive: archive.display().to_string(),
                    reason: format!("{second}; please remove the JDK file and re-run setup"),
                }
                .into()
            })
    }

    /// Download the policy bundle; failure only warns.
    async fn fetch_policy_bundle(
        &self,
        props: &mut Properties,
        release: &RuntimeRelease,
        resources: &Path,
    ) {
        let dest = resources.join(&release.policy_file);

        if dest.exists() {
            self.emit(AppEvent::Download(DownloadEvent::Reused { dest }));
            props.set(keys::JCE_NAME, release.policy_file.clone());
            return;
        }

        self.emit_info(format!(
            "Downloading JCE Policy archive from {} to {}",
            release.policy_url,
            dest.display()
        ));
        match self.downloader.download(&release.policy_url, &dest).await {
            Ok(_) => {
                props.set(keys::JCE_NAME, release.policy_file.clone());
            }
            Err(e) => {
                let failure = RuntimeError::PolicyDownloadFailed {
                    url: release.policy_url.clone(),
                    message: e.to_string(),
                };
                self.emit_warning_with_context(
                    "JCE Policy files are required for secure setup. Please ensure all hosts have the JCE unlimited strength policy files.",
                    failure.to_string(),
                );
            }
        }
    }
}
