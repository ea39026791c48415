//! The `reset` operation

use crate::setup::ensure_root;
use crate::{load_properties, OpsCtx};
use hostsetup_database::DatabaseContext;
use hostsetup_errors::{Error, SetupError};
use hostsetup_events::EventEmitter;
use hostsetup_platform::privileges;
use std::sync::Arc;

const RESET_WARNING: &str = "**** WARNING **** You are about to reset and clear the server \
database. This will remove all cluster host and configuration information from the database. \
You will be required to re-configure the server and re-run the cluster wizard.";

/// Pid of a server that is still running, read from the pid file.
async fn running_server(ctx: &OpsCtx) -> Result<Option<u32>, Error> {
    let pid_file = ctx.config.pid_file();
    let contents = match tokio::fs::read_to_string(&pid_file).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io_with_path(&e, &pid_file)),
    };

    let Ok(pid) = contents.trim().parse::<u32>() else {
        ctx.emit_warning(format!(
            "Ignoring unreadable pid file {}",
            pid_file.display()
        ));
        return Ok(None);
    };

    if privileges::process_alive(ctx.family, ctx.ops.as_ref(), pid).await? {
        Ok(Some(pid))
    } else {
        Ok(None)
    }
}

/// Drop and recreate the configured database.
///
/// Returns the menu label of the database that was reset.
///
/// # Errors
///
/// Returns `NotPrivileged` for a non-root caller, `ServerRunning` while the
/// server is up, `NotConfigured` before any setup, and `Cancelled` when the
/// operator declines.
pub async fn reset(ctx: &OpsCtx) -> Result<String, Error> {
    ctx.step("Checking administrative privileges", ensure_root(ctx, "reset"))
        .await?;

    ctx.step("Checking server status", async {
        match running_server(ctx).await? {
            Some(pid) => Err(SetupError::ServerRunning {
                operation: "reset".to_string(),
                pid,
            }
            .into()),
            None => Ok(()),
        }
    })
    .await?;

    let props = ctx
        .step("Reading server properties", load_properties(ctx))
        .await?;
    let db = DatabaseContext {
        family: ctx.family,
        ops: Arc::clone(&ctx.ops),
        prompter: ctx.prompter.as_ref(),
        tx: Some(ctx.tx.clone()),
    };
    let strategy = ctx
        .step("Reading database configuration", db.from_properties(&props))
        .await?;

    ctx.emit_warning(RESET_WARNING);
    // Silent runs force the reset
    let silent = ctx.is_silent();
    if !ctx
        .prompter
        .confirm("Are you SURE you want to perform the reset", silent)
        .await?
    {
        return Err(SetupError::Cancelled {
            operation: "reset".to_string(),
        }
        .into());
    }

    ctx.step("Resetting database", strategy.reset()).await?;
    Ok(strategy.kind().to_string())
}
