//! Object storage access
//!
//! Everything the pipeline needs from the storage backend goes through
//! [`ObjectStore`]; [`AwsCli`] drives the `aws` command line.

pub mod aws_cli;

pub use aws_cli::AwsCli;

use crate::core::error::PageResult;
use std::path::Path;

/// Storage operations used while assembling pages
///
/// `Send + Sync` because listings for related artifacts are fetched in
/// parallel.
pub trait ObjectStore: Send + Sync {
  /// Raw human-readable listing of `s3://<bucket>/<prefix>`, one object per line
  fn list(&self, bucket: &str, prefix: &str) -> PageResult<String>;

  /// Keys under `prefix` whose key contains `needle`
  fn find_keys(&self, bucket: &str, prefix: &str, needle: &str) -> PageResult<Vec<String>>;

  /// Mirror a local directory to `s3://<bucket>/<prefix>` with public-read access
  fn sync(&self, source: &Path, bucket: &str, prefix: &str) -> PageResult<()>;
}
