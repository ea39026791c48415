//! Setup prerequisites and SELinux relaxation

use crate::OpsCtx;
use hostsetup_config::{keys, Properties};
use hostsetup_errors::{Error, PlatformError, SetupError};
use hostsetup_events::EventEmitter;
use hostsetup_platform::PlatformCommand;
use hostsetup_types::OsFamily;
use std::path::PathBuf;

/// File the master key is persisted to inside its location directory
pub const MASTER_KEY_FILE: &str = "master";

const SESTATUS: &str = "sestatus";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelinuxState {
    Disabled,
    Enforcing,
    Permissive,
}

/// Read the SELinux state out of `sestatus` output.
///
/// `None` when SELinux is enabled but its mode cannot be told.
fn parse_sestatus(out: &str) -> Option<SelinuxState> {
    let out = out.to_ascii_lowercase();
    // Status line comes first; a disabled system reports no mode
    let status = out
        .lines()
        .find(|line| line.contains("disabled") || line.contains("enabled"));
    if status.is_some_and(|line| line.contains("disabled")) {
        return Some(SelinuxState::Disabled);
    }

    // First mode mentioned is the current one
    out.lines().find_map(|line| {
        if line.contains("enforcing") {
            Some(SelinuxState::Enforcing)
        } else if line.contains("permissive") {
            Some(SelinuxState::Permissive)
        } else {
            None
        }
    })
}

/// Refuse a silent setup that would need the master key typed in.
///
/// # Errors
///
/// Returns `SilentSetupNotAllowed` for a silent run with password
/// encryption enabled and no persisted master key, and `InvalidValue` when
/// the encryption flag is not a boolean.
pub fn verify_setup_allowed(ctx: &OpsCtx, props: &Properties) -> Result<(), Error> {
    if !ctx.is_silent() {
        return Ok(());
    }
    if props.get_bool(keys::PASSWORD_ENCRYPTION_ENABLED, false)?
        && !master_key_path(ctx, props).is_file()
    {
        return Err(SetupError::SilentSetupNotAllowed.into());
    }
    Ok(())
}

/// Put SELinux into permissive mode for the rest of the setup.
///
/// A host without `sestatus` only gets a warning. Windows has nothing to
/// relax.
///
/// # Errors
///
/// Returns `SecurityEnhancement` when SELinux is enabled in an unknown mode
/// and `Cancelled` when the operator declines to continue.
pub async fn disable_security_enhancements(ctx: &OpsCtx) -> Result<(), Error> {
    if ctx.family == OsFamily::Windows {
        return Ok(());
    }

    let output = match ctx
        .ops
        .execute_command(PlatformCommand::new(SESTATUS))
        .await
    {
        Ok(output) => output,
        Err(Error::Platform(PlatformError::CommandNotFound { .. })) => {
            ctx.emit_warning(format!("Could not run {SESTATUS}: OK"));
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let state =
        parse_sestatus(&output.stdout).ok_or_else(|| SetupError::SecurityEnhancement {
            message: "Error determining SELinux mode. Exiting.".to_string(),
        })?;

    match state {
        SelinuxState::Disabled => {
            ctx.emit_info("SELinux status is 'disabled'");
            return Ok(());
        }
        SelinuxState::Enforcing => {
            ctx.emit_info("SELinux mode is 'enforcing', temporarily disabling SELinux");
            let mut cmd = PlatformCommand::new("setenforce");
            cmd.arg("0");
            match ctx.ops.execute_command(cmd).await {
                Ok(result) if !result.success() => ctx.emit_warning_with_context(
                    "setenforce 0 did not succeed",
                    result.combined(),
                ),
                Ok(_) => {}
                Err(Error::Platform(PlatformError::CommandNotFound { .. })) => {
                    ctx.emit_warning("Could not run setenforce: OK");
                }
                Err(e) => return Err(e),
            }
        }
        SelinuxState::Permissive => ctx.emit_info("SELinux mode is 'permissive'"),
    }

    ctx.emit_warning("SELinux is set to 'permissive' mode and temporarily disabled.");
    if !ctx.prompter.confirm("OK to continue", true).await? {
        return Err(SetupError::Cancelled {
            operation: "setup".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Location a persisted master key is looked up at
#[must_use]
pub fn master_key_path(ctx: &OpsCtx, props: &Properties) -> PathBuf {
    props
        .get_path(keys::MASTER_KEY_LOCATION)
        .unwrap_or_else(|| ctx.config.keys_dir())
        .join(MASTER_KEY_FILE)
}
