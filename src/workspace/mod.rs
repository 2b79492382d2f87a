//! Repository introspection
//!
//! - **manifest**: discover publishable packages from package.json / lerna.json
//! - **lockfile**: parse the lock document into a dependency snapshot

pub mod lockfile;
pub mod manifest;

pub use lockfile::{DependencySnapshot, extract_snapshot, load_snapshot};
pub use manifest::{ArtifactDescriptor, list_artifacts, package_names, publish_targets};
