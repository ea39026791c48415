//! JCE policy bundle installation

use hostsetup_config::{keys, Properties};
use hostsetup_errors::{Error, RuntimeError};
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use tokio::task;

/// Security directory below a java home
pub const SECURITY_DIR: &str = "jre/lib/security";

/// Unpack the recorded policy bundle into the recorded JDK.
///
/// Reads `java.home`, `resources.dir` and `jce.name`. The bundle's top-level
/// directory is flattened into the security directory and removed.
///
/// # Errors
///
/// Returns `PolicyBundle` if the security directory or the bundle does not
/// exist or the archive cannot be extracted, and `MissingKey` for absent
/// properties.
pub async fn unpack_policy_bundle(props: &Properties) -> Result<PathBuf, Error> {
    let java_home = props.require_path(keys::JAVA_HOME)?;
    let resources = props.require_path(keys::RESOURCES_DIR)?;
    let bundle_name = props.require(keys::JCE_NAME)?;

    let security_dir = java_home.join(SECURITY_DIR);
    let bundle = resources.join(bundle_name);

    if !security_dir.is_dir() || !bundle.is_file() {
        return Err(RuntimeError::PolicyBundle {
            path: bundle.display().to_string(),
            message: format!(
                "the path {} or {} is invalid",
                security_dir.display(),
                bundle.display()
            ),
        }
        .into());
    }

    let dest = security_dir.clone();
    let bundle_path = bundle.clone();
    task::spawn_blocking(move || extract_flattened(&bundle_path, &dest))
        .await
        .map_err(|e| Error::internal(format!("task join error: {e}")))?
        .map_err(|message| RuntimeError::PolicyBundle {
            path: bundle.display().to_string(),
            message,
        })?;

    Ok(security_dir)
}

fn extract_flattened(bundle: &Path, dest: &Path) -> Result<(), String> {
    let file = File::open(bundle).map_err(|e| format!("failed to open archive: {e}"))?;
    let mut archive =
        zip::ZipArchive::new(file).map_err(|e| format!("failed to read zip archive: {e}"))?;

    let mut top_dir: Option<PathBuf> = None;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| format!("failed to read zip entry: {e}"))?;

        let Some(relative) = entry.enclosed_name() else {
            continue;
        };
        let outpath = dest.join(&relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)
                .map_err(|e| format!("failed to create {}: {e}", outpath.display()))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
        }
        let mut outfile = File::create(&outpath)
            .map_err(|e| format!("failed to create {}: {e}", outpath.display()))?;
        std::io::copy(&mut entry, &mut outfile)
            .map_err(|e| format!("failed to extract {}: {e}", outpath.display()))?;

        // Directory holding the last file decides what gets flattened
        top_dir = relative
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf);
    }

    if let Some(nested) = top_dir {
        flatten(dest, &nested)?;
    }
    Ok(())
}

/// Move the files of `dest/nested` into `dest` and drop the nested tree.
fn flatten(dest: &Path, nested: &Path) -> Result<(), String> {
    let from = dest.join(nested);
    let entries =
        std::fs::read_dir(&from).map_err(|e| format!("failed to read {}: {e}", from.display()))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("failed to read {}: {e}", from.display()))?;
        let path = entry.path();
        if path.is_file() {
            let target = dest.join(entry.file_name());
            std::fs::copy(&path, &target)
                .map_err(|e| format!("failed to copy {}: {e}", path.display()))?;
        }
    }

    if let Some(Component::Normal(first)) = nested.components().next() {
        let root = dest.join(first);
        std::fs::remove_dir_all(&root)
            .map_err(|e| format!("failed to remove {}: {e}", root.display()))?;
    }
    Ok(())
}
