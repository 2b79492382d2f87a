//! HTTP collaborators
//!
//! - **http**: plain GET for release-note documents ([`HttpFetcher`])
//! - **airtable**: record insertion into the tracking table ([`AirtableClient`])

pub mod airtable;
pub mod http;

pub use airtable::AirtableClient;
pub use http::HttpFetcher;

use crate::core::error::PageResult;
use serde::Serialize;

/// Fetch a text document over HTTP
pub trait DocumentFetcher: Send + Sync {
  fn fetch_text(&self, url: &str) -> PageResult<String>;
}

/// Append records to a table
pub trait RecordTable: Send + Sync {
  fn insert(&self, table: &str, records: &[TableRecord]) -> PageResult<()>;
}

/// Dependency snapshot row of the tracking table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRecord {
  pub name: String,
  /// Version without leading `v`
  pub version: String,
  /// JSON object text mapping package to pinned version
  pub dependencies: String,
  pub repo: String,
  /// Epoch milliseconds
  pub timestamp: i64,
}
