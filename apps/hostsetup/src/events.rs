//! Event handling and console feedback

use crate::logging;
use console::style;
use hostsetup_events::{AppEvent, DownloadEvent, GeneralEvent, RuntimeEvent, SetupEvent};

/// Renders events on stderr as they arrive and mirrors them into tracing
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
    /// Nothing goes to the console, the final JSON document is the output
    quiet: bool,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, debug_enabled: bool, quiet: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
            quiet,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&self, event: AppEvent) {
        logging::log_event(&event);

        if self.quiet {
            return;
        }
        if let Some(line) = self.render(&event) {
            eprintln!("{line}");
        }
    }

    /// Console line for an event, `None` when it stays out of the console
    pub fn render(&self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::General(general) => self.render_general(general),
            AppEvent::Setup(setup) => Some(self.render_setup(setup)),
            AppEvent::Download(download) => Some(self.render_download(download)),
            AppEvent::Runtime(runtime) => Some(Self::render_runtime(runtime)),
        }
    }

    fn render_general(&self, event: &GeneralEvent) -> Option<String> {
        match event {
            GeneralEvent::Info { message } => Some(message.clone()),
            GeneralEvent::Warning { message, context } => {
                let mut line = format!("{} {message}", self.paint_warning("WARNING:"));
                if let Some(context) = context {
                    line.push_str(&format!("\n  {context}"));
                }
                Some(line)
            }
            GeneralEvent::Error { message, details } => {
                let mut line = format!("{} {message}", self.paint_error("ERROR:"));
                if let Some(details) = details {
                    line.push_str(&format!("\n  {details}"));
                }
                Some(line)
            }
            GeneralEvent::DebugLog { message, context } => {
                if !self.debug_enabled {
                    return None;
                }
                let mut fields: Vec<_> = context
                    .iter()
                    .map(|(key, value)| format!("{key}={value}"))
                    .collect();
                fields.sort();
                let suffix = if fields.is_empty() {
                    String::new()
                } else {
                    format!(" ({})", fields.join(", "))
                };
                Some(format!("{} {message}{suffix}", self.paint_dim("DEBUG")))
            }
        }
    }

    fn render_setup(&self, event: &SetupEvent) -> String {
        match event {
            SetupEvent::StepStarted { step } => format!("{step}..."),
            SetupEvent::StepCompleted { step } => {
                format!("{} {step}", self.paint_ok("[OK]"))
            }
            SetupEvent::StepSkipped { step, reason } => {
                format!("{} {step}: {reason}", self.paint_dim("[SKIPPED]"))
            }
            SetupEvent::StepFailed { step, failure } => {
                let mut line = format!("{} {step}: {}", self.paint_error("[FAILED]"), failure.message);
                if let Some(hint) = &failure.hint {
                    line.push_str(&format!("\n  Hint: {hint}"));
                }
                line
            }
        }
    }

    fn render_download(&self, event: &DownloadEvent) -> String {
        match event {
            DownloadEvent::Started {
                url, total_bytes, ..
            } => match total_bytes {
                Some(total) => format!("Downloading {url} ({} MB)", total / (1024 * 1024)),
                None => format!("Downloading {url}"),
            },
            DownloadEvent::Completed { dest, .. } => {
                format!("Successfully downloaded to {}", dest.display())
            }
            DownloadEvent::Failed { url, message } => {
                format!("{} {url}: {message}", self.paint_error("Download failed"))
            }
            DownloadEvent::Reused { dest } => {
                format!("{} found in cache, skipping download", dest.display())
            }
        }
    }

    fn render_runtime(event: &RuntimeEvent) -> String {
        match event {
            RuntimeEvent::CustomAccepted { java_home } => {
                format!("Using custom JDK at {}", java_home.display())
            }
            RuntimeEvent::Reused { java_home } => {
                format!("JDK already installed at {}", java_home.display())
            }
            RuntimeEvent::ReleaseSelected { description, .. } => {
                format!("Selected {description}")
            }
            RuntimeEvent::InstallStarted {
                archive,
                install_dir,
            } => format!(
                "Installing JDK from {} to {}",
                archive.display(),
                install_dir.display()
            ),
            RuntimeEvent::InstallRetrying { archive, reason } => format!(
                "Installation failed ({reason}), downloading {} again",
                archive.display()
            ),
            RuntimeEvent::Installed { java_home } => {
                format!("Successfully installed JDK to {}", java_home.display())
            }
            RuntimeEvent::PolicyInstalled { security_dir } => {
                format!("JCE policy unpacked into {}", security_dir.display())
            }
        }
    }

    fn paint_ok(&self, text: &str) -> String {
        if self.colors_enabled {
            style(text).green().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_warning(&self, text: &str) -> String {
        if self.colors_enabled {
            style(text).yellow().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_error(&self, text: &str) -> String {
        if self.colors_enabled {
            style(text).red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_dim(&self, text: &str) -> String {
        if self.colors_enabled {
            style(text).dim().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostsetup_events::FailureContext;
    use std::collections::HashMap;

    #[test]
    fn test_debug_events_hidden_without_debug() {
        let handler = EventHandler::new(false, false, false);
        let event = AppEvent::General(GeneralEvent::debug("running sestatus"));
        assert!(handler.render(&event).is_none());

        let handler = EventHandler::new(false, true, false);
        let mut context = HashMap::new();
        context.insert("exit".to_string(), "0".to_string());
        let event = AppEvent::General(GeneralEvent::DebugLog {
            message: "running sestatus".to_string(),
            context,
        });
        assert_eq!(
            handler.render(&event).as_deref(),
            Some("DEBUG running sestatus (exit=0)")
        );
    }

    #[test]
    fn test_step_rendering_without_colors() {
        let handler = EventHandler::new(false, false, false);

        let done = AppEvent::Setup(SetupEvent::StepCompleted {
            step: "Checking firewall".to_string(),
        });
        assert_eq!(handler.render(&done).as_deref(), Some("[OK] Checking firewall"));

        let failed = AppEvent::Setup(SetupEvent::StepFailed {
            step: "Checking JDK".to_string(),
            failure: FailureContext {
                code: None,
                message: "no JDK found".to_string(),
                hint: Some("Pass --java-home".to_string()),
            },
        });
        assert_eq!(
            handler.render(&failed).as_deref(),
            Some("[FAILED] Checking JDK: no JDK found\n  Hint: Pass --java-home")
        );
    }

    #[test]
    fn test_warning_context_on_second_line() {
        let handler = EventHandler::new(false, false, false);
        let event = AppEvent::General(GeneralEvent::warning_with_context(
            "iptables is running",
            "Confirm the necessary ports are accessible",
        ));
        assert_eq!(
            handler.render(&event).as_deref(),
            Some("WARNING: iptables is running\n  Confirm the necessary ports are accessible")
        );
    }
}
