//! Version token helpers
//!
//! The version comes from the release pull-request title and shapes every
//! published path: `<major>/<version>/`.

use crate::core::error::{ConfigError, PageError, PageResult};

/// Take the second whitespace-delimited field of a pull-request title
///
/// `"Release v1.2.3 notes"` → `"v1.2.3"`
pub fn extract_version(title: &str) -> PageResult<String> {
  title
    .split_whitespace()
    .nth(1)
    .map(str::to_string)
    .ok_or_else(|| {
      PageError::Config(ConfigError::NoVersion {
        title: title.to_string(),
      })
    })
}

/// Major version segment without the leading `v`
///
/// Uses semver when the token parses; otherwise the text before the first dot.
pub fn major_segment(version: &str) -> String {
  let bare = version.strip_prefix('v').unwrap_or(version);
  match semver::Version::parse(bare) {
    Ok(parsed) => parsed.major.to_string(),
    Err(_) => bare.split('.').next().unwrap_or(bare).to_string(),
  }
}

/// `<major>/<version>` path segment, without trailing slash
pub fn artifact_path(version: &str) -> String {
  format!("{}/{}", major_segment(version), version)
}

/// Version as recorded in the tracking table (leading `v` stripped)
pub fn record_version(version: &str) -> &str {
  version.strip_prefix('v').unwrap_or(version)
}
