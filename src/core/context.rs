//! Run context - resolve inputs once, pass everywhere
//!
//! Nothing downstream reads the process working directory or the environment:
//! the root path and the resolved inputs travel in [`RunContext`].

use crate::core::config::PageConfig;
use crate::core::error::{ConfigError, PageError, PageResult, ResultExt};
use crate::release::version;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Inputs supplied by the hosting workflow
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
  /// Record table credential; empty disables the record write
  pub api_key: String,
  /// Bucket receiving rendered pages and release notes
  pub bucket_release: String,
  /// Bucket holding prebuilt downloads
  pub bucket_prebuilt: String,
  /// Record table base identifier
  pub base_id: String,
  pub owner: String,
  pub repo: String,
  pub pull_request_title: String,
}

impl ActionInputs {
  /// Whether a record table credential was supplied
  pub fn has_credential(&self) -> bool {
    !self.api_key.trim().is_empty()
  }

  /// Ensure the inputs every run needs are present
  pub fn validate(&self) -> PageResult<()> {
    for (name, value) in [
      ("bucket-release", &self.bucket_release),
      ("bucket-prebuilt", &self.bucket_prebuilt),
      ("title", &self.pull_request_title),
    ] {
      if value.trim().is_empty() {
        return Err(PageError::Config(ConfigError::MissingInput { name: name.to_string() }));
      }
    }
    Ok(())
  }
}

/// Subset of the GitHub event payload we read
#[derive(Debug, Default, Deserialize)]
pub struct EventPayload {
  #[serde(default)]
  pub pull_request: Option<PullRequest>,
  #[serde(default)]
  pub repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequest {
  #[serde(default)]
  pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Repository {
  pub name: String,
  pub owner: Owner,
}

#[derive(Debug, Deserialize)]
pub struct Owner {
  pub login: String,
}

impl EventPayload {
  /// Read an event payload file (`GITHUB_EVENT_PATH`)
  pub fn load(path: &Path) -> PageResult<Self> {
    let content =
      std::fs::read_to_string(path).with_context(|| format!("Failed to read event payload {}", path.display()))?;
    let payload = serde_json::from_str(&content)
      .with_context(|| format!("Failed to parse event payload {}", path.display()))?;
    Ok(payload)
  }

  /// Fill inputs the command line left empty
  pub fn fill(self, inputs: &mut ActionInputs) {
    if inputs.pull_request_title.is_empty()
      && let Some(title) = self.pull_request.and_then(|pr| pr.title)
    {
      inputs.pull_request_title = title;
    }
    if let Some(repository) = self.repository {
      if inputs.owner.is_empty() {
        inputs.owner = repository.owner.login;
      }
      if inputs.repo.is_empty() {
        inputs.repo = repository.name;
      }
    }
  }
}

/// Everything a run needs, built once in main
#[derive(Debug, Clone)]
pub struct RunContext {
  /// Repository root (manifests, lock document, config)
  pub root: PathBuf,
  pub inputs: ActionInputs,
  pub config: PageConfig,
  /// Version token taken from the pull-request title
  pub version: String,
}

impl RunContext {
  /// Build the context, loading config from the root
  pub fn build(root: &Path, inputs: ActionInputs) -> PageResult<Self> {
    let config = PageConfig::load(root)?;
    Self::with_config(root, inputs, config)
  }

  /// Build the context with an explicit config
  pub fn with_config(root: &Path, inputs: ActionInputs, config: PageConfig) -> PageResult<Self> {
    inputs.validate()?;
    let version = version::extract_version(&inputs.pull_request_title)?;

    Ok(Self {
      root: root.to_path_buf(),
      inputs,
      config,
      version,
    })
  }

  /// `<major>/<version>` for this run
  pub fn artifact_path(&self) -> String {
    version::artifact_path(&self.version)
  }
}
