//! Download table assembly
//!
//! - **listing**: parse storage listing text into [`DownloadEntry`] records
//! - **rules**: platform / suffix classification and ordering
//!
//! [`DownloadTable::build`] fetches the primary artifact's listing and every
//! related artifact's listing in parallel, concatenates them in request order
//! and sorts them with a stable composite key.

pub mod listing;
pub mod rules;

pub use listing::{DownloadEntry, parse_listing};
pub use rules::FileRules;

use crate::storage::ObjectStore;
use rayon::prelude::*;

/// Listing source for one version of the prebuilt bucket
pub struct DownloadTable<'a> {
  store: &'a dyn ObjectStore,
  bucket: &'a str,
  /// `<major>/<version>` of the run
  version_path: &'a str,
  download_base_url: &'a str,
  rules: FileRules<'a>,
}

impl<'a> DownloadTable<'a> {
  pub fn new(
    store: &'a dyn ObjectStore,
    bucket: &'a str,
    version_path: &'a str,
    download_base_url: &'a str,
    rules: FileRules<'a>,
  ) -> Self {
    Self {
      store,
      bucket,
      version_path,
      download_base_url,
      rules,
    }
  }

  /// Downloads of one artifact, in listing order
  ///
  /// Any storage failure (missing prefix, CLI error, bad output) yields an
  /// empty list so one missing artifact never aborts the run.
  pub fn fetch(&self, artifact_name: &str) -> Vec<DownloadEntry> {
    let base_path = format!("{}/{}/", artifact_name, self.version_path);
    match self.store.list(self.bucket, &base_path) {
      Ok(raw) => parse_listing(&raw, &base_path, self.download_base_url, &self.rules),
      Err(e) => {
        tracing::warn!(artifact = artifact_name, prefix = %base_path, error = %e, "listing unavailable");
        Vec::new()
      }
    }
  }

  /// Ordered download table for an artifact and its companions
  pub fn build(&self, artifact_name: &str, related: &[String]) -> Vec<DownloadEntry> {
    let names: Vec<&str> = std::iter::once(artifact_name)
      .chain(related.iter().map(String::as_str))
      .collect();

    // collect() keeps request order regardless of completion order
    let listings: Vec<Vec<DownloadEntry>> = names.par_iter().map(|name| self.fetch(name)).collect();

    let mut table: Vec<DownloadEntry> = listings.into_iter().flatten().collect();
    table.sort_by_key(|entry| self.rules.order_key(&entry.name, entry.platform.as_deref()));
    table
  }
}
