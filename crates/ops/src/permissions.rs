//! Ownership and mode of the server's directories

use crate::OpsCtx;
use hostsetup_config::{keys, Properties};
use hostsetup_events::EventEmitter;
use hostsetup_platform::PlatformCommand;
use hostsetup_types::OsFamily;
use std::path::{Path, PathBuf};

/// Mode of the directory holding the master key
const KEYS_DIR_MODE: &str = "700";

struct Adjustment {
    path: PathBuf,
    mode: Option<&'static str>,
}

fn adjustments(ctx: &OpsCtx, props: &Properties) -> Vec<Adjustment> {
    let owned = |path: PathBuf| Adjustment { path, mode: None };

    let mut list = vec![
        owned(ctx.config.conf_dir()),
        Adjustment {
            path: ctx.config.keys_dir(),
            mode: Some(KEYS_DIR_MODE),
        },
        owned(ctx.config.log_dir()),
    ];
    if let Some(run_dir) = ctx.config.pid_file().parent() {
        list.push(owned(run_dir.to_path_buf()));
    }
    if let Some(resources) = props.get_path(keys::RESOURCES_DIR) {
        list.push(owned(resources));
    }
    list
}

async fn run(ctx: &OpsCtx, program: &str, args: &[&str], path: &Path) -> bool {
    let mut cmd = PlatformCommand::new(program);
    cmd.args(args).arg(path.display().to_string());
    let line = cmd.display();

    match ctx.ops.execute_command(cmd).await {
        Ok(output) if output.success() => true,
        Ok(output) => {
            ctx.emit_warning_with_context(format!("{line} failed"), output.combined());
            false
        }
        Err(e) => {
            ctx.emit_warning_with_context(format!("{line} failed"), e.to_string());
            false
        }
    }
}

/// Hand the server's directories to `user`.
///
/// Paths that do not exist yet are skipped and failures only warn, so the
/// pass can run at any point of the setup. Returns the number of paths
/// that were fully adjusted. Windows keeps its ACLs untouched.
pub async fn adjust_directory_permissions(ctx: &OpsCtx, props: &Properties, user: &str) -> usize {
    if ctx.family == OsFamily::Windows {
        return 0;
    }

    ctx.emit_debug(format!("Adjusting directory permissions for {user}"));
    let mut adjusted = 0;
    for item in adjustments(ctx, props) {
        if !item.path.exists() {
            ctx.emit_debug(format!("Skipping missing {}", item.path.display()));
            continue;
        }

        let mut ok = run(ctx, "chown", &["-R", user], &item.path).await;
        if let Some(mode) = item.mode {
            ok &= run(ctx, "chmod", &[mode], &item.path).await;
        }
        if ok {
            adjusted += 1;
        }
    }
    adjusted
}
