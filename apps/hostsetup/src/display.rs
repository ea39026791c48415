//! Output rendering of operation results

use console::style;
use hostsetup_ops::{OperationResult, SetupReport};
use std::io;

/// Output renderer for CLI results
pub struct OutputRenderer {
    json_output: bool,
    colors_enabled: bool,
}

impl OutputRenderer {
    pub fn new(json_output: bool, colors_enabled: bool) -> Self {
        Self {
            json_output,
            colors_enabled,
        }
    }

    /// Render operation result on stdout
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            let json = result.to_json().map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        for line in self.summary_lines(result) {
            println!("{line}");
        }
        Ok(())
    }

    fn summary_lines(&self, result: &OperationResult) -> Vec<String> {
        match result {
            OperationResult::Setup(report) => self.setup_lines(report),
            OperationResult::Reset(database) => vec![
                format!("Database reset: {database}"),
                self.success("Server 'reset' completed successfully."),
            ],
            OperationResult::PolicyInstalled(security_dir) => vec![
                format!("Policy installed into {}", security_dir.display()),
                self.success("Server 'setup-policy' completed successfully."),
            ],
        }
    }

    fn setup_lines(&self, report: &SetupReport) -> Vec<String> {
        let mut lines = Vec::new();

        if report.driver_only {
            if let Some(link) = &report.jdbc_driver {
                lines.push(format!("JDBC driver registered as {}", link.display()));
            }
            lines.push(self.success("JDBC driver was successfully initialized."));
            return lines;
        }

        if let Some(user) = &report.server_user {
            lines.push(format!("Server user: {user}"));
        }
        if let Some(java_home) = &report.java_home {
            let origin = if report.custom_runtime { " (custom)" } else { "" };
            lines.push(format!("JDK: {}{origin}", java_home.display()));
        }
        if let Some(os_type) = &report.os_type {
            lines.push(format!("OS type: {os_type}"));
        }
        if let Some(database) = &report.database {
            lines.push(format!("Database: {database}"));
        }

        let failed: Vec<_> = report
            .views
            .iter()
            .filter(|view| view.failed())
            .map(|view| view.archive.as_str())
            .collect();
        if !report.views.is_empty() {
            lines.push(format!(
                "Views: {} extracted, {} failed",
                report.views.len() - failed.len(),
                failed.len()
            ));
        }
        for archive in failed {
            lines.push(format!("  Error extracting {archive}"));
        }

        lines.push(self.success("Server 'setup' completed successfully."));
        lines
    }

    fn success(&self, message: &str) -> String {
        if self.colors_enabled {
            style(message).green().to_string()
        } else {
            message.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostsetup_ops::ViewOutcome;
    use std::path::PathBuf;

    #[test]
    fn test_setup_summary_lists_failed_views() {
        let renderer = OutputRenderer::new(false, false);
        let report = SetupReport {
            server_user: Some("svc".to_string()),
            java_home: Some(PathBuf::from("/opt/jdk")),
            custom_runtime: true,
            database: Some("PostgreSQL / Embedded".to_string()),
            views: vec![
                ViewOutcome {
                    archive: "files.jar".to_string(),
                    exit_code: 0,
                },
                ViewOutcome {
                    archive: "broken.jar".to_string(),
                    exit_code: 2,
                },
            ],
            ..SetupReport::default()
        };

        let lines = renderer.summary_lines(&OperationResult::Setup(report));
        assert!(lines.contains(&"JDK: /opt/jdk (custom)".to_string()));
        assert!(lines.contains(&"Views: 1 extracted, 1 failed".to_string()));
        assert!(lines.contains(&"  Error extracting broken.jar".to_string()));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("Server 'setup' completed successfully.")
        );
    }

    #[test]
    fn test_driver_only_summary() {
        let renderer = OutputRenderer::new(false, false);
        let report = SetupReport {
            driver_only: true,
            jdbc_driver: Some(PathBuf::from("/var/lib/server/resources/oracle-jdbc-driver.jar")),
            ..SetupReport::default()
        };
        let lines = renderer.summary_lines(&OperationResult::Setup(report));
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("oracle-jdbc-driver.jar"));
    }
}
