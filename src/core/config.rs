use crate::core::error::{ConfigError, PageError, PageResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for release-page
/// Searched in order: release-page.toml, .release-page.toml, .github/release-page.toml
///
/// Every field is optional; a repository without a config file gets the
/// defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
  /// Organization namespace prefix (e.g. "@kungfu-trader/")
  ///
  /// Stripped from package names to form artifact names, and used to filter
  /// which lock document entries are tracked.
  pub namespace: String,

  /// Public base URL of the prebuilt bucket (must end with '/')
  pub download_base_url: String,

  /// Public base URL of the release bucket (must end with '/')
  pub release_base_url: String,

  /// Platform tags in display priority order
  pub platforms: Vec<String>,

  /// Recognized download suffixes in display priority order
  pub suffixes: Vec<String>,

  /// Companion packages whose downloads appear on every page
  pub related_artifacts: Vec<String>,

  /// Page template (relative to the root); the bundled one when unset
  pub template: Option<PathBuf>,

  /// Record table receiving the dependency snapshot
  pub table: String,

  /// Lock document (relative to the root)
  pub lockfile: PathBuf,

  /// Publish every workspace package instead of only `binary` ones
  pub include_all_packages: bool,
}

impl Default for PageConfig {
  fn default() -> Self {
    Self {
      namespace: "@kungfu-trader/".to_string(),
      download_base_url: "https://download.kungfu-trader.com/".to_string(),
      release_base_url: "https://releases.kungfu-trader.com/".to_string(),
      platforms: default_platforms(),
      suffixes: default_suffixes(),
      related_artifacts: default_related_artifacts(),
      template: None,
      table: "pr dependencies".to_string(),
      lockfile: PathBuf::from("yarn.lock"),
      include_all_packages: false,
    }
  }
}

fn default_platforms() -> Vec<String> {
  ["win", "linux", "mac"].iter().map(|s| s.to_string()).collect()
}

fn default_suffixes() -> Vec<String> {
  [
    ".exe", ".dmg", ".AppImage", ".deb", ".rpm", ".zip", ".7z", ".tar.gz", ".tgz", ".whl",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

fn default_related_artifacts() -> Vec<String> {
  [
    "kungfu-js-api",
    "kungfu-app",
    "kungfu-cli",
    "kungfu-core",
    "kungfu-sdk",
    "kungfu-toolchain",
    "kfx-operator-bar",
    "kfx-indexer-live",
    "kfx-matcher-101-cpp",
    "kfx-broker-sim",
    "kfx-broker-xtp-demo",
    "examples-operator-cpp",
    "examples-operator-python",
    "example-report-cpp",
    "example-report-python",
    "examples-data-tool",
    "examples-strategy-cpp",
    "examples-strategy-python",
  ]
  .iter()
  .map(|s| s.to_string())
  .collect()
}

impl PageConfig {
  /// Find config file in search order
  pub fn find_config_path(root: &Path) -> Option<PathBuf> {
    let candidates = vec![
      root.join("release-page.toml"),
      root.join(".release-page.toml"),
      root.join(".github").join("release-page.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config from the root, falling back to defaults when no file exists
  pub fn load(root: &Path) -> PageResult<Self> {
    let Some(config_path) = Self::find_config_path(root) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config = Self::from_toml(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded page config");
    Ok(config)
  }

  /// Parse and validate a config document
  pub fn from_toml(content: &str) -> PageResult<Self> {
    let config: PageConfig = toml_edit::de::from_str(content)?;
    config.validate()?;
    Ok(config)
  }

  /// Validate field values
  pub fn validate(&self) -> PageResult<()> {
    if self.platforms.is_empty() {
      return Err(invalid("platforms", "at least one platform tag is required"));
    }
    if self.suffixes.is_empty() {
      return Err(invalid("suffixes", "at least one file suffix is required"));
    }
    for (field, url) in [
      ("download_base_url", &self.download_base_url),
      ("release_base_url", &self.release_base_url),
    ] {
      if !url.ends_with('/') {
        return Err(invalid(field, &format!("'{}' must end with '/'", url)));
      }
    }
    Ok(())
  }

  /// Strip the namespace prefix from a package name
  pub fn short_name<'a>(&self, package: &'a str) -> &'a str {
    package.strip_prefix(self.namespace.as_str()).unwrap_or(package)
  }
}

fn invalid(field: &str, reason: &str) -> PageError {
  PageError::Config(ConfigError::InvalidField {
    field: field.to_string(),
    reason: reason.to_string(),
  })
}
