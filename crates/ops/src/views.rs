//! View archive extraction

use crate::{OpsCtx, ViewOutcome};
use hostsetup_config::{constants, keys, Properties};
use hostsetup_errors::{Error, SetupError};
use hostsetup_events::EventEmitter;
use hostsetup_platform::PlatformCommand;
use hostsetup_types::OsFamily;
use std::path::PathBuf;

/// Extractor exit status for an archive it could not unpack
pub const EXIT_EXTRACT_ERROR: i32 = 2;

const VIEW_REGISTRY: &str = "org.apache.ambari.server.view.ViewRegistry";

fn classpath(ctx: &OpsCtx) -> String {
    let separator = match ctx.family {
        OsFamily::Posix => ":",
        OsFamily::Windows => ";",
    };
    format!(
        "{}{separator}{}",
        ctx.config.conf_dir().display(),
        ctx.config.lib_dir().join("*").display()
    )
}

/// Unpack every archive in the views directory with the server's own
/// registry.
///
/// A broken archive is reported and does not stop the run.
///
/// # Errors
///
/// Returns `RuntimeMissing` when no valid `java.home` is recorded and an
/// I/O error when the views directory cannot be listed.
pub async fn extract_views(ctx: &OpsCtx, props: &Properties) -> Result<Vec<ViewOutcome>, Error> {
    let java = props
        .get_path(keys::JAVA_HOME)
        .map(|home| home.join("bin").join(ctx.family.java_binary()))
        .filter(|java| java.is_file())
        .ok_or(SetupError::RuntimeMissing)?;

    let views_dir = props
        .get_path(keys::VIEWS_DIR)
        .unwrap_or_else(|| PathBuf::from(constants::VIEWS_DIR));
    if !views_dir.is_dir() {
        ctx.emit_debug(format!("No views directory at {}", views_dir.display()));
        return Ok(Vec::new());
    }

    let mut archives = Vec::new();
    let mut entries = tokio::fs::read_dir(&views_dir)
        .await
        .map_err(|e| Error::io_with_path(&e, &views_dir))?;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| Error::io_with_path(&e, &views_dir))?
    {
        let path = entry.path();
        if path.is_file() {
            archives.push(path);
        }
    }
    archives.sort();

    let classpath = classpath(ctx);
    let mut outcomes = Vec::with_capacity(archives.len());
    for archive in archives {
        let name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut cmd = PlatformCommand::new(java.display().to_string());
        cmd.args(["-cp", classpath.as_str(), VIEW_REGISTRY, "extract"])
            .arg(archive.display().to_string());
        let output = ctx.ops.execute_command(cmd).await?;

        match output.exit_code {
            0 => ctx.emit_info(name.clone()),
            EXIT_EXTRACT_ERROR => ctx.emit_warning(format!("Error extracting {name}")),
            _ => {}
        }
        ctx.emit_debug(format!(
            "Return code from extraction of view archive {name}: {}",
            output.exit_code
        ));

        outcomes.push(ViewOutcome {
            archive: name,
            exit_code: output.exit_code,
        });
    }
    Ok(outcomes)
}
