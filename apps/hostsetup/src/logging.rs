//! Tracing setup and structured logging of events

use hostsetup_events::{AppEvent, DownloadEvent, GeneralEvent, RuntimeEvent, SetupEvent};
use std::path::Path;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Initialize tracing.
///
/// With `--debug` or `RUST_LOG` set, structured JSON logs go to a fresh file
/// under `log_dir`. Otherwise only warnings reach stderr, and in JSON mode
/// nothing does.
pub fn init_tracing(json_mode: bool, debug_flag: bool, log_dir: &Path) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_flag;

    if debug_enabled {
        if let Err(e) = std::fs::create_dir_all(log_dir) {
            eprintln!("Warning: Failed to create log directory: {e}");
        }

        let log_file = log_dir.join(format!(
            "hostsetup-{}.log",
            chrono::Utc::now().format("%Y%m%d-%H%M%S")
        ));

        match std::fs::File::create(&log_file) {
            Ok(file) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_writer(file)
                    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                        EnvFilter::new("info,hostsetup=debug,hostsetup_ops=debug")
                    }))
                    .init();

                if !json_mode {
                    eprintln!("Debug logging enabled: {}", log_file.display());
                }
                return;
            }
            Err(e) => eprintln!("Warning: Failed to create log file: {e}"),
        }
    }

    if json_mode {
        // Keep stdout and stderr clean for the JSON document
        tracing_subscriber::fmt()
            .with_writer(std::io::sink)
            .with_env_filter("off")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,hostsetup=warn")),
            )
            .init();
    }
}

/// One line summary of an event for the log record
pub fn describe(event: &AppEvent) -> String {
    match event {
        AppEvent::General(general) => match general {
            GeneralEvent::Info { message }
            | GeneralEvent::Warning { message, .. }
            | GeneralEvent::Error { message, .. }
            | GeneralEvent::DebugLog { message, .. } => message.clone(),
        },
        AppEvent::Setup(setup) => match setup {
            SetupEvent::StepStarted { step } => format!("{step} started"),
            SetupEvent::StepCompleted { step } => format!("{step} completed"),
            SetupEvent::StepSkipped { step, reason } => format!("{step} skipped: {reason}"),
            SetupEvent::StepFailed { step, failure } => {
                format!("{step} failed: {}", failure.message)
            }
        },
        AppEvent::Download(download) => match download {
            DownloadEvent::Started { url, .. } => format!("Download started: {url}"),
            DownloadEvent::Completed {
                url,
                bytes_downloaded,
                ..
            } => format!("Downloaded {url} ({bytes_downloaded} bytes)"),
            DownloadEvent::Failed { url, message } => format!("Download of {url} failed: {message}"),
            DownloadEvent::Reused { dest } => format!("Reusing {}", dest.display()),
        },
        AppEvent::Runtime(runtime) => match runtime {
            RuntimeEvent::CustomAccepted { java_home } => {
                format!("Using custom JDK at {}", java_home.display())
            }
            RuntimeEvent::Reused { java_home } => {
                format!("Reusing installed JDK at {}", java_home.display())
            }
            RuntimeEvent::ReleaseSelected { id, description } => {
                format!("Selected JDK release {id}: {description}")
            }
            RuntimeEvent::InstallStarted {
                archive,
                install_dir,
            } => format!(
                "Installing {} into {}",
                archive.display(),
                install_dir.display()
            ),
            RuntimeEvent::InstallRetrying { archive, reason } => {
                format!("Retrying install of {}: {reason}", archive.display())
            }
            RuntimeEvent::Installed { java_home } => {
                format!("JDK installed at {}", java_home.display())
            }
            RuntimeEvent::PolicyInstalled { security_dir } => {
                format!("JCE policy installed into {}", security_dir.display())
            }
        },
    }
}

/// Mirror an event into tracing at its own level, tagged with its domain
pub fn log_event(event: &AppEvent) {
    let message = describe(event);
    let target = event.log_target();

    match event.log_level() {
        Level::ERROR => tracing::error!(domain = target, "{message}"),
        Level::WARN => tracing::warn!(domain = target, "{message}"),
        Level::INFO => tracing::info!(domain = target, "{message}"),
        Level::DEBUG => tracing::debug!(domain = target, "{message}"),
        _ => tracing::trace!(domain = target, "{message}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostsetup_events::FailureContext;
    use std::path::PathBuf;

    #[test]
    fn test_describe_step_failure_uses_failure_message() {
        let event = AppEvent::Setup(SetupEvent::StepFailed {
            step: "Checking JDK".to_string(),
            failure: FailureContext {
                code: Some("runtime.install".to_string()),
                message: "archive is corrupt".to_string(),
                hint: None,
            },
        });
        assert_eq!(describe(&event), "Checking JDK failed: archive is corrupt");
    }

    #[test]
    fn test_describe_runtime_paths() {
        let event = AppEvent::Runtime(RuntimeEvent::Installed {
            java_home: PathBuf::from("/usr/jdk64/jdk1.8.0_112"),
        });
        assert_eq!(describe(&event), "JDK installed at /usr/jdk64/jdk1.8.0_112");
    }
}
