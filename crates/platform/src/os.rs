//! Host operating system detection

use crate::process::{PlatformCommand, ProcessOperations};
use hostsetup_errors::{Error, PlatformError};
use hostsetup_types::{OsFamily, OsInfo};
use regex::Regex;
use std::collections::HashMap;
use std::path::Path;

/// Standard location of the distribution description
pub const OS_RELEASE: &str = "/etc/os-release";

/// Distribution families the server recognises, with their member ids.
const FAMILIES: &[(&str, &[&str])] = &[
    (
        "redhat",
        &[
            "rhel", "redhat", "centos", "fedora", "ol", "oracle", "amzn", "rocky", "almalinux",
        ],
    ),
    ("suse", &["sles", "suse", "opensuse", "opensuse-leap"]),
    ("ubuntu", &["ubuntu"]),
    ("debian", &["debian"]),
];

/// Detect the running host.
///
/// # Errors
///
/// Returns an error if the OS description cannot be read or has no `ID`.
pub async fn detect(family: OsFamily, ops: &dyn ProcessOperations) -> Result<OsInfo, Error> {
    match family {
        OsFamily::Posix => detect_posix(Path::new(OS_RELEASE)).await,
        OsFamily::Windows => detect_windows(ops).await,
    }
}

/// Read an os-release file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or has no `ID`.
pub async fn detect_posix(os_release: &Path) -> Result<OsInfo, Error> {
    let contents = tokio::fs::read_to_string(os_release)
        .await
        .map_err(|e| Error::io_with_path(&e, os_release))?;
    parse_os_release(&contents).ok_or_else(|| {
        PlatformError::CapabilityUnavailable {
            capability: format!("OS identification from {}", os_release.display()),
        }
        .into()
    })
}

async fn detect_windows(ops: &dyn ProcessOperations) -> Result<OsInfo, Error> {
    let mut cmd = PlatformCommand::new("cmd");
    cmd.args(["/c", "ver"]);
    let output = ops.execute_command(cmd.clone()).await?.into_result(&cmd)?;

    let version = Regex::new(r"Version (\d+)\.")
        .ok()
        .and_then(|re| re.captures(&output.stdout))
        .and_then(|caps| caps.get(1))
        .map_or_else(|| "6".to_string(), |m| m.as_str().to_string());

    Ok(OsInfo {
        family: "winsrv".to_string(),
        os_type: "winsrv".to_string(),
        version,
    })
}

/// Parse os-release contents into family, type and major version.
#[must_use]
pub fn parse_os_release(contents: &str) -> Option<OsInfo> {
    let fields: HashMap<&str, String> = contents
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim(), value.trim().trim_matches('"').to_string()))
        .collect();

    let id = fields.get("ID")?.to_lowercase();
    let os_type = if id == "rhel" { "redhat".to_string() } else { id.clone() };

    let like = fields
        .get("ID_LIKE")
        .map(|l| l.to_lowercase())
        .unwrap_or_default();
    let family = family_of(&id)
        .or_else(|| like.split_whitespace().find_map(family_of))
        .map_or_else(|| os_type.clone(), str::to_string);

    let version = fields
        .get("VERSION_ID")
        .and_then(|v| v.split('.').next())
        .unwrap_or_default()
        .to_string();

    Some(OsInfo {
        family,
        os_type,
        version,
    })
}

fn family_of(id: &str) -> Option<&'static str> {
    FAMILIES
        .iter()
        .find(|(_, members)| members.contains(&id))
        .map(|(family, _)| *family)
}
