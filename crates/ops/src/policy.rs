//! The `setup-policy` operation

use crate::setup::install_policy;
use crate::{load_properties, OpsCtx};
use hostsetup_config::keys;
use hostsetup_errors::{Error, RuntimeError};
use hostsetup_events::EventEmitter;
use std::path::{Path, PathBuf};

/// Install an operator supplied JCE policy bundle into the recorded JDK.
///
/// The bundle is copied into the resources directory unless it already
/// lives there, and its name is recorded as `jce.name`.
///
/// # Errors
///
/// Returns `PolicyBundle` when `bundle` does not exist or cannot be copied
/// or unpacked, and `MissingKey` when `java.home` or `resources.dir` is not
/// recorded.
pub async fn setup_policy(ctx: &OpsCtx, bundle: &Path) -> Result<PathBuf, Error> {
    let mut props = ctx
        .step("Reading server properties", load_properties(ctx))
        .await?;

    let bundle_error = |message: String| RuntimeError::PolicyBundle {
        path: bundle.display().to_string(),
        message,
    };

    let Some(file_name) = bundle.file_name().filter(|_| bundle.is_file()) else {
        return Err(bundle_error("Can not run 'setup-policy'. Invalid path".to_string()).into());
    };

    let resources = props.require_path(keys::RESOURCES_DIR)?;
    if bundle.parent() != Some(resources.as_path()) {
        let dest = resources.join(file_name);
        tokio::fs::copy(bundle, &dest).await.map_err(|e| {
            bundle_error(format!(
                "Fail while trying to copy to {}: {e}",
                resources.display()
            ))
        })?;
    }

    props.set(keys::JCE_NAME, file_name.to_string_lossy().into_owned());
    props.persist().await?;

    let security_dir = ctx
        .step("Installing JCE policy", install_policy(ctx, &props))
        .await?;
    ctx.emit_info("NOTE: Restart the server to apply changes");
    Ok(security_dir)
}
