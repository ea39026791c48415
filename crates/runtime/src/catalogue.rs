//! Managed JDK releases and the selection menu

use hostsetup_errors::Error;
use hostsetup_prompt::Validation;
use hostsetup_types::{OsFamily, RuntimeRelease};
use regex::Regex;
use std::fmt::Write as _;

/// Built-in releases used when the properties declare no `jdk.releases`.
#[must_use]
pub fn default_releases(family: OsFamily) -> Vec<RuntimeRelease> {
    match family {
        OsFamily::Posix => vec![RuntimeRelease::new(
            "jdk6.31",
            "Oracle JDK 1.6",
            "http://public-repo-1.hortonworks.com/ARTIFACTS/jdk-6u31-linux-x64.bin",
            "jdk-6u31-linux-x64.bin",
            "http://public-repo-1.hortonworks.com/ARTIFACTS/jce_policy-6.zip",
            "jce_policy-6.zip",
            "/usr/jdk64/jdk1.6.0_31",
            "Creating (jdk.*)/jre",
        )],
        OsFamily::Windows => vec![RuntimeRelease::new(
            "jdk7.67",
            "Oracle JDK 1.7.67",
            "http://public-repo-1.hortonworks.com/ARTIFACTS/jdk-7u67-windows-x64.exe",
            "jdk-7u67-windows-x64.exe",
            "http://public-repo-1.hortonworks.com/ARTIFACTS/UnlimitedJCEPolicyJDK7.zip",
            "UnlimitedJCEPolicyJDK7.zip",
            r"C:\jdk1.7.0_67",
            "Creating (jdk.*)/jre",
        )],
    }
}

/// What the operator picked from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index into the release list
    Release(usize),
    /// Operator supplied JDK location
    Custom,
}

/// Menu text: numbered releases, then the custom entry as `N+1`.
#[must_use]
pub fn menu(releases: &[RuntimeRelease], default_choice: usize) -> String {
    let mut out = String::new();
    for (i, release) in releases.iter().enumerate() {
        let _ = writeln!(out, "[{}] {}", i + 1, release.description);
    }
    let _ = writeln!(out, "[{}] - Custom JDK", releases.len() + 1);
    out.push_str(&"=".repeat(78));
    let _ = write!(out, "\nEnter choice ({default_choice})");
    out
}

/// Accepts exactly the integers `1..=count + 1`.
///
/// # Errors
///
/// Returns an internal error if the pattern fails to compile.
pub fn choice_validation(count: usize) -> Result<Validation, Error> {
    let alternatives = (1..=count + 1)
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("|");
    let pattern = Regex::new(&format!("^(?:{alternatives})$"))
        .map_err(|e| Error::internal(format!("menu pattern: {e}")))?;
    Ok(Validation::new(pattern, "Invalid number."))
}

/// Interpret a menu answer against `count` releases.
#[must_use]
pub fn parse_choice(answer: &str, count: usize) -> Option<Choice> {
    match answer.trim().parse::<usize>().ok()? {
        0 => None,
        n if n <= count => Some(Choice::Release(n - 1)),
        n if n == count + 1 => Some(Choice::Custom),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice_bounds() {
        assert_eq!(parse_choice("1", 2), Some(Choice::Release(0)));
        assert_eq!(parse_choice("2", 2), Some(Choice::Release(1)));
        assert_eq!(parse_choice("3", 2), Some(Choice::Custom));
        assert_eq!(parse_choice("0", 2), None);
        assert_eq!(parse_choice("4", 2), None);
        assert_eq!(parse_choice("x", 2), None);
    }

    #[test]
    fn test_choice_validation_rejects_out_of_range() {
        let rule = choice_validation(10).unwrap();
        assert!(rule.accepts("11"));
        assert!(rule.accepts("1"));
        assert!(!rule.accepts("12"));
        assert!(!rule.accepts("01"));
        assert!(!rule.accepts(""));
    }

    #[test]
    fn test_menu_lists_custom_last() {
        let text = menu(&default_releases(OsFamily::Posix), 1);
        assert!(text.starts_with("[1] Oracle JDK 1.6\n[2] - Custom JDK\n"));
        assert!(text.ends_with("Enter choice (1)"));
    }
}
