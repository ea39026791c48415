//! Server properties file
//!
//! A small subset of the java-properties format: `#` and `!` comments,
//! `=`, `:` or whitespace separators, backslash escapes and trailing
//! backslash line continuation. Key order survives a round trip; comments
//! and blank lines do not.

use crate::constants::keys;
use hostsetup_errors::{ConfigError, Error};
use hostsetup_types::RuntimeRelease;
use indexmap::IndexMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Ordered string map backed by one properties file.
///
/// Mutations only touch memory. [`Properties::persist`] writes the whole map
/// to a sibling temp file and renames it over the original, so readers never
/// see a half written file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    path: PathBuf,
    entries: IndexMap<String, String>,
}

impl Properties {
    /// Empty store that will be written to `path` on persist
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: IndexMap::new(),
        }
    }

    /// Read and parse the properties file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadFailed` if the file is missing or unreadable
    /// and `ConfigError::ParseError` if its contents are malformed.
    pub async fn load(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::parse(path, &contents)?)
    }

    /// Parse properties text that belongs to `path`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` with the 1-based line number of a
    /// malformed `\u` escape.
    pub fn parse(path: impl Into<PathBuf>, contents: &str) -> Result<Self, ConfigError> {
        let path = path.into();
        let mut entries = IndexMap::new();
        let mut lines = contents.lines().enumerate();

        while let Some((index, line)) = lines.next() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }

            let mut logical = trimmed.to_string();
            while ends_with_continuation(&logical) {
                logical.pop();
                match lines.next() {
                    Some((_, next)) => logical.push_str(next.trim_start()),
                    None => break,
                }
            }

            let (raw_key, raw_value) = split_entry(&logical);
            let key = unescape(raw_key).map_err(|message| ConfigError::ParseError {
                path: path.display().to_string(),
                line: index + 1,
                message,
            })?;
            let value = unescape(raw_value).map_err(|message| ConfigError::ParseError {
                path: path.display().to_string(),
                line: index + 1,
                message,
            })?;
            entries.insert(key, value);
        }

        Ok(Self { path, entries })
    }

    /// Backing file location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Value of a key that must be present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the key is absent.
    pub fn require(&self, key: &str) -> Result<&str, ConfigError> {
        self.get(key).ok_or_else(|| self.missing(key))
    }

    #[must_use]
    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).map(PathBuf::from)
    }

    /// Path value of a key that must be present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` if the key is absent.
    pub fn require_path(&self, key: &str) -> Result<PathBuf, ConfigError> {
        self.require(key).map(PathBuf::from)
    }

    /// Boolean value, `default` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for anything other than
    /// `true`/`false` (case-insensitive).
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.get(key) {
            None => Ok(default),
            Some(value) if value.trim().eq_ignore_ascii_case("true") => Ok(true),
            Some(value) if value.trim().eq_ignore_ascii_case("false") => Ok(false),
            Some(value) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a key; absent keys are ignored.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runtime release catalogue declared by `jdk.releases`.
    ///
    /// Returns `Ok(None)` when no catalogue is declared so callers can fall
    /// back to the built-in releases.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingKey` naming the first sub-key of a
    /// declared release that is not defined.
    pub fn releases(&self) -> Result<Option<Vec<RuntimeRelease>>, ConfigError> {
        let Some(declared) = self.get(keys::JDK_RELEASES) else {
            return Ok(None);
        };

        declared
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(|id| self.release(id))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn release(&self, id: &str) -> Result<RuntimeRelease, ConfigError> {
        use keys::release as sub;
        let field = |suffix: &str| self.require(&format!("{id}.{suffix}"));

        Ok(RuntimeRelease::new(
            id,
            field(sub::DESCRIPTION)?,
            field(sub::URL)?,
            field(sub::ARCHIVE_FILE)?,
            field(sub::POLICY_URL)?,
            field(sub::POLICY_FILE)?,
            field(sub::INSTALL_DIR)?,
            field(sub::VERSION_PATTERN)?,
        ))
    }

    /// Serialize to properties text, one `key=value` line per entry.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.entries {
            let _ = writeln!(out, "{}={}", escape(key, true), escape(value, false));
        }
        out
    }

    /// Atomically replace the backing file with the current contents.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::WriteError` if the temp file cannot be written
    /// or renamed into place.
    pub async fn persist(&self) -> Result<(), Error> {
        let tmp = temp_path(&self.path);
        let write_error = |e: std::io::Error| ConfigError::WriteError {
            path: self.path.display().to_string(),
            error: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(write_error)?;
            }
        }

        fs::write(&tmp, self.render()).await.map_err(write_error)?;

        // Keep the mode of the file being replaced
        if let Ok(metadata) = fs::metadata(&self.path).await {
            fs::set_permissions(&tmp, metadata.permissions())
                .await
                .map_err(write_error)?;
        }

        if let Err(e) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(write_error(e).into());
        }
        Ok(())
    }

    fn missing(&self, key: &str) -> ConfigError {
        ConfigError::MissingKey {
            key: key.to_string(),
            path: self.path.display().to_string(),
        }
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Split a logical line into raw key and raw value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    if let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches([' ', '\t', '\x0c']);
    }
    (key, rest)
}

fn unescape(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("malformed \\u escape: \\u{hex}"))?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

fn escape(raw: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, c) in raw.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_entry_separators() {
        assert_eq!(split_entry("a=b"), ("a", "b"));
        assert_eq!(split_entry("a : b"), ("a", "b"));
        assert_eq!(split_entry("a b"), ("a", "b"));
        assert_eq!(split_entry("a"), ("a", ""));
        assert_eq!(split_entry(r"a\=b=c"), (r"a\=b", "c"));
    }

    #[test]
    fn test_continuation_counts_backslashes() {
        assert!(ends_with_continuation(r"a=b\"));
        assert!(!ends_with_continuation(r"a=b\\"));
        assert!(ends_with_continuation(r"a=b\\\"));
    }

    #[test]
    fn test_escape_round_trip_for_awkward_key() {
        let key = "odd key=1:#!";
        let escaped = escape(key, true);
        let (raw_key, _) = split_entry(&escaped);
        assert_eq!(unescape(raw_key).unwrap(), key);
    }

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(
            temp_path(Path::new("/etc/hostsetup/server.properties")),
            PathBuf::from("/etc/hostsetup/server.properties.tmp")
        );
    }
}
