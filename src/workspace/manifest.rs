//! Package manifest discovery
//!
//! Supports:
//! - artifact manifests (`artifact*/package.json` next to the root)
//! - lerna workspaces (lerna.json with "packages")
//! - everything else as a single package (root package.json name)

use crate::core::config::PageConfig;
use crate::core::error::{PageError, PageResult};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// package.json structure (minimal fields we care about)
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
  pub name: String,
  /// Set on packages that produce a binary distribution
  #[serde(default)]
  pub binary: bool,
  #[serde(default)]
  pub dependencies: IndexMap<String, String>,
}

/// lerna.json structure
#[derive(Debug, Deserialize)]
struct LernaJson {
  #[serde(default)]
  packages: Vec<String>,
}

/// A publishable package and its declared dependency ranges
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
  pub name: String,
  pub dependencies: IndexMap<String, String>,
}

impl From<PackageManifest> for ArtifactDescriptor {
  fn from(manifest: PackageManifest) -> Self {
    Self {
      name: manifest.name,
      dependencies: manifest.dependencies,
    }
  }
}

/// Read and parse one manifest
pub fn read_manifest(path: &Path) -> PageResult<PackageManifest> {
  let content = std::fs::read_to_string(path).map_err(|e| PageError::Manifest {
    path: path.to_path_buf(),
    reason: e.to_string(),
  })?;
  serde_json::from_str(&content).map_err(|e| PageError::Manifest {
    path: path.to_path_buf(),
    reason: e.to_string(),
  })
}

/// List artifact descriptors from `artifact*/package.json`
///
/// Empty when the repository has no artifact directories; callers fall back
/// to [`package_names`].
pub fn list_artifacts(root: &Path) -> PageResult<Vec<ArtifactDescriptor>> {
  manifests_matching(root, "artifact*")?
    .iter()
    .map(|path| read_manifest(path).map(ArtifactDescriptor::from))
    .collect()
}

/// List package names of the repository
///
/// In a lerna workspace, only packages marked `binary` are returned unless
/// `include_all` is set. Without lerna.json the root package name is the only
/// target, even when package.json declares `workspaces`.
pub fn package_names(root: &Path, include_all: bool) -> PageResult<Vec<String>> {
  let lerna = root.join("lerna.json");
  if !lerna.exists() {
    let root_manifest = read_manifest(&root.join("package.json"))?;
    return Ok(vec![root_manifest.name]);
  }

  let content = std::fs::read_to_string(&lerna)?;
  let config: LernaJson = serde_json::from_str(&content).map_err(|e| PageError::Manifest {
    path: lerna.clone(),
    reason: e.to_string(),
  })?;

  let mut names = Vec::new();
  for pattern in &config.packages {
    for path in manifests_matching(root, pattern)? {
      let manifest = read_manifest(&path)?;
      if include_all || manifest.binary {
        names.push(manifest.name);
      }
    }
  }
  Ok(names)
}

/// Artifact names to publish, with the namespace prefix stripped
pub fn publish_targets(root: &Path, config: &PageConfig) -> PageResult<Vec<String>> {
  let artifacts = list_artifacts(root)?;
  let names = if artifacts.is_empty() {
    package_names(root, config.include_all_packages)?
  } else {
    artifacts.into_iter().map(|a| a.name).collect()
  };

  Ok(names.iter().map(|name| config.short_name(name).to_string()).collect())
}

/// Expand `<root>/<pattern>/package.json`, sorted by path
fn manifests_matching(root: &Path, pattern: &str) -> PageResult<Vec<PathBuf>> {
  let base = glob::Pattern::escape(&root.to_string_lossy());
  let full = format!("{}/{}/package.json", base.trim_end_matches('/'), pattern.trim_end_matches('/'));

  let mut paths: Vec<PathBuf> = glob::glob(&full)?.filter_map(Result::ok).collect();
  paths.sort();
  Ok(paths)
}
