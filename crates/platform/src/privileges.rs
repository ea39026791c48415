//! Administrative privilege and server process checks

use crate::process::{PlatformCommand, ProcessOperations};
use hostsetup_errors::Error;
use hostsetup_types::OsFamily;

/// Whether the current process runs with administrative rights.
///
/// POSIX asks `id -u` for uid 0; Windows uses `net session`, which only
/// succeeds for administrators.
///
/// # Errors
///
/// Returns an error if the check command cannot be executed.
pub async fn is_root(family: OsFamily, ops: &dyn ProcessOperations) -> Result<bool, Error> {
    let (program, arg) = match family {
        OsFamily::Posix => ("id", "-u"),
        OsFamily::Windows => ("net", "session"),
    };
    let mut cmd = PlatformCommand::new(program);
    cmd.arg(arg);

    let output = ops.execute_command(cmd).await?;
    Ok(match family {
        OsFamily::Posix => output.success() && output.stdout.trim() == "0",
        OsFamily::Windows => output.success(),
    })
}

/// Whether a process with `pid` is alive.
///
/// # Errors
///
/// Returns an error if the probe command cannot be executed.
pub async fn process_alive(
    family: OsFamily,
    ops: &dyn ProcessOperations,
    pid: u32,
) -> Result<bool, Error> {
    let pid_arg = pid.to_string();

    match family {
        OsFamily::Posix => {
            let mut cmd = PlatformCommand::new("kill");
            cmd.args(["-0", pid_arg.as_str()]);
            Ok(ops.execute_command(cmd).await?.success())
        }
        OsFamily::Windows => {
            let filter = format!("PID eq {pid}");
            let mut cmd = PlatformCommand::new("tasklist");
            cmd.args(["/FI", filter.as_str(), "/NH"]);
            let output = ops.execute_command(cmd).await?;
            Ok(output.success() && output.stdout.contains(&pid_arg))
        }
    }
}
