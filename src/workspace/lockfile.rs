//! Lock document parsing and dependency snapshots
//!
//! Understands the yarn lockfile layout (v1 and berry): unindented headers
//! listing one or more comma-separated aliases, followed by indented fields.
//!
//! ```text
//! "@kungfu-trader/kungfu-core@^2.4.0", "@kungfu-trader/kungfu-core@~2.4.1":
//!   version "2.4.5"
//!   resolved "https://registry.yarnpkg.com/..."
//! ```

use crate::core::config::PageConfig;
use crate::core::error::{PageError, PageResult};
use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

/// One lock entry: every alias resolving to the same package + version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEntry {
  pub aliases: Vec<String>,
  pub version: Option<String>,
}

/// Pinned versions of the organization's packages, keyed `@scope/name`
///
/// Keys keep first-seen order; a repeated key takes the last version seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencySnapshot(IndexMap<String, String>);

impl DependencySnapshot {
  pub fn get(&self, name: &str) -> Option<&str> {
    self.0.get(name).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  /// JSON object text, as stored in the record table
  pub fn to_json(&self) -> PageResult<String> {
    Ok(serde_json::to_string(&self.0)?)
  }
}

/// Parse a lock document into entries, in file order
pub fn parse_lockfile(content: &str) -> PageResult<Vec<LockEntry>> {
  let mut entries: Vec<LockEntry> = Vec::new();

  for (idx, line) in content.lines().enumerate() {
    let line_no = idx + 1;
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
      continue;
    }

    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent == 0 {
      let header = trimmed
        .strip_suffix(':')
        .ok_or_else(|| parse_error(line_no, "expected ':' after entry header"))?;
      let aliases = split_aliases(header).map_err(|reason| parse_error(line_no, reason))?;
      if aliases.is_empty() {
        return Err(parse_error(line_no, "entry header lists no packages"));
      }
      entries.push(LockEntry { aliases, version: None });
      continue;
    }

    let entry = entries
      .last_mut()
      .ok_or_else(|| parse_error(line_no, "indented line outside of an entry"))?;

    // Nested blocks (dependencies, checksums) sit deeper than 2
    if indent != 2 {
      continue;
    }

    let Some((key, value)) = trimmed.split_once(|c: char| c == ':' || c.is_whitespace()) else {
      continue;
    };
    if key == "version" {
      let value = unquote(value.trim()).map_err(|reason| parse_error(line_no, reason))?;
      entry.version = Some(value.to_string());
    }
  }

  Ok(entries)
}

/// Extract the snapshot of entries whose aliases live in `namespace`
pub fn extract_snapshot(content: &str, namespace: &str) -> PageResult<DependencySnapshot> {
  let mut snapshot = IndexMap::new();

  for entry in parse_lockfile(content)? {
    let Some(version) = entry.version else {
      continue;
    };
    for alias in entry.aliases.iter().filter(|a| a.starts_with(namespace)) {
      snapshot.insert(normalize_alias(alias), version.clone());
    }
  }

  Ok(DependencySnapshot(snapshot))
}

/// Load the repository's lock document and extract its snapshot
///
/// A missing, unreadable or malformed lock document is logged and yields
/// `None`, which skips the record write.
pub fn load_snapshot(root: &Path, config: &PageConfig) -> Option<DependencySnapshot> {
  let path = root.join(&config.lockfile);
  let content = match std::fs::read_to_string(&path) {
    Ok(content) => content,
    Err(e) => {
      tracing::warn!(path = %path.display(), error = %e, "lock document unavailable");
      return None;
    }
  };

  match extract_snapshot(&content, &config.namespace) {
    Ok(snapshot) => Some(snapshot),
    Err(e) => {
      tracing::warn!(path = %path.display(), error = %e, "lock document could not be parsed");
      None
    }
  }
}

/// `@scope/name@^1.0.0` → `@scope/name`
fn normalize_alias(alias: &str) -> String {
  format!("@{}", alias.split('@').nth(1).unwrap_or_default())
}

/// `"a", "b"` (v1) or `"a, b"` (berry, one quoted string for all aliases)
fn split_aliases(header: &str) -> Result<Vec<String>, &'static str> {
  let header = header.trim();
  let joined = header
    .strip_prefix('"')
    .and_then(|rest| rest.strip_suffix('"'))
    .filter(|inner| !inner.contains('"'));

  joined
    .unwrap_or(header)
    .split(',')
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .map(|part| unquote(part).map(str::to_string))
    .collect()
}

fn unquote(value: &str) -> Result<&str, &'static str> {
  match value.strip_prefix('"') {
    Some(rest) => rest.strip_suffix('"').ok_or("unterminated string"),
    None => Ok(value),
  }
}

fn parse_error(line: usize, reason: &str) -> PageError {
  PageError::message(format!("Lock document parse error at line {}: {}", line, reason))
}
