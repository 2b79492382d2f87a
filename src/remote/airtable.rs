//! Tracking table client (Airtable REST API)
//!
//! `POST https://api.airtable.com/v0/<base>/<table>` with
//! `{"records": [{"fields": {...}}]}`.

use super::http::http_error;
use super::{RecordTable, TableRecord};
use crate::core::error::PageResult;
use serde::Serialize;
use std::time::Duration;

const API_BASE: &str = "https://api.airtable.com/v0";

/// Request timeout for record writes (30 seconds).
const REQUEST_TIMEOUT_MS: u64 = 30_000;

/// The API accepts at most this many records per request
const MAX_RECORDS_PER_REQUEST: usize = 10;

pub struct AirtableClient {
  agent: ureq::Agent,
  api_key: String,
  base_id: String,
  api_base: String,
}

#[derive(Serialize)]
struct CreateRecords<'a> {
  records: Vec<RecordFields<'a>>,
}

#[derive(Serialize)]
struct RecordFields<'a> {
  fields: &'a TableRecord,
}

impl AirtableClient {
  pub fn new(api_key: impl Into<String>, base_id: impl Into<String>) -> Self {
    let agent = ureq::AgentBuilder::new()
      .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
      .build();
    Self {
      agent,
      api_key: api_key.into(),
      base_id: base_id.into(),
      api_base: API_BASE.to_string(),
    }
  }

  /// Point at another API root (proxies, tests)
  pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
    self.api_base = api_base.into();
    self
  }

  fn table_url(&self, table: &str) -> String {
    format!(
      "{}/{}/{}",
      self.api_base.trim_end_matches('/'),
      encode_path_segment(&self.base_id),
      encode_path_segment(table)
    )
  }
}

impl RecordTable for AirtableClient {
  fn insert(&self, table: &str, records: &[TableRecord]) -> PageResult<()> {
    let url = self.table_url(table);
    for chunk in records.chunks(MAX_RECORDS_PER_REQUEST) {
      let body = CreateRecords {
        records: chunk.iter().map(|fields| RecordFields { fields }).collect(),
      };
      tracing::debug!(url = %url, count = chunk.len(), "inserting records");
      self
        .agent
        .post(&url)
        .set("Authorization", &format!("Bearer {}", self.api_key))
        .send_json(&body)
        .map_err(|e| http_error(&url, e))?;
    }
    Ok(())
  }
}

/// Percent-encode one URL path segment (RFC 3986 unreserved kept)
fn encode_path_segment(segment: &str) -> String {
  let mut out = String::with_capacity(segment.len());
  for byte in segment.bytes() {
    match byte {
      b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => out.push(byte as char),
      _ => out.push_str(&format!("%{:02X}", byte)),
    }
  }
  out
}
