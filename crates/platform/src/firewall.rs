//! Host firewall detection

use crate::process::{CommandOutput, PlatformCommand, ProcessOperations};
use hostsetup_errors::{Error, PlatformError};
use hostsetup_types::OsFamily;

/// One way of asking the host whether a firewall is running.
struct FirewallProbe {
    name: &'static str,
    program: &'static str,
    args: &'static [&'static str],
    is_active: fn(&CommandOutput) -> bool,
}

const POSIX_PROBES: &[FirewallProbe] = &[
    FirewallProbe {
        name: "firewalld",
        program: "systemctl",
        args: &["is-active", "firewalld"],
        is_active: firewalld_active,
    },
    FirewallProbe {
        name: "ufw",
        program: "ufw",
        args: &["status"],
        is_active: ufw_active,
    },
    FirewallProbe {
        name: "SuSEfirewall2",
        program: "/sbin/SuSEfirewall2",
        args: &["status"],
        is_active: susefirewall_active,
    },
    FirewallProbe {
        name: "iptables",
        program: "service",
        args: &["iptables", "status"],
        is_active: iptables_active,
    },
];

const WINDOWS_PROBES: &[FirewallProbe] = &[FirewallProbe {
    name: "Windows Firewall",
    program: "netsh",
    args: &["advfirewall", "show", "allprofiles", "state"],
    is_active: netsh_active,
}];

fn firewalld_active(out: &CommandOutput) -> bool {
    out.success() && out.stdout.trim() == "active"
}

fn ufw_active(out: &CommandOutput) -> bool {
    out.success() && out.stdout.contains("Status: active")
}

fn susefirewall_active(out: &CommandOutput) -> bool {
    out.success() && !out.stdout.contains("not active")
}

fn iptables_active(out: &CommandOutput) -> bool {
    out.success() && out.stdout.contains("Chain")
}

fn netsh_active(out: &CommandOutput) -> bool {
    out.success()
        && out.stdout.lines().any(|line| {
            let line = line.trim();
            line.starts_with("State") && line.ends_with("ON")
        })
}

/// Name of the first firewall found running, if any.
///
/// Probes whose tool is not installed are skipped.
///
/// # Errors
///
/// Returns an error if a probe command cannot be executed for a reason
/// other than the tool being absent.
pub async fn active_firewall(
    family: OsFamily,
    ops: &dyn ProcessOperations,
) -> Result<Option<&'static str>, Error> {
    let probes = match family {
        OsFamily::Posix => POSIX_PROBES,
        OsFamily::Windows => WINDOWS_PROBES,
    };

    for probe in probes {
        let mut cmd = PlatformCommand::new(probe.program);
        cmd.args(probe.args);

        match ops.execute_command(cmd).await {
            Ok(output) if (probe.is_active)(&output) => return Ok(Some(probe.name)),
            Ok(_) | Err(Error::Platform(PlatformError::CommandNotFound { .. })) => {}
            Err(e) => return Err(e),
        }
    }
    Ok(None)
}
