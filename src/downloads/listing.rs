//! Storage listing parser
//!
//! Turns `aws s3 ls --human-readable` output into download entries:
//!
//! ```text
//! 2024-01-02 10:11:12   85.3 MiB kungfu-app-2.0.0-win-x64.exe
//!                            PRE nightly/
//! ```

use crate::downloads::rules::FileRules;
use crate::utils;
use serde::Serialize;

/// One downloadable file on a release page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadEntry {
  /// Display timestamp (+8h convention)
  pub date: String,
  /// Human-readable size, e.g. "85.3 MiB"
  pub size: String,
  /// File name
  pub name: String,
  pub url: String,
  /// Matched platform tag; absent for cross-platform files
  #[serde(skip_serializing_if = "Option::is_none")]
  pub platform: Option<String>,
}

/// Parse listing text for objects under `base_path`
///
/// `base_path` is the object prefix (`<artifact>/<major>/<version>/`) and is
/// appended to `download_base_url` to build each URL. Lines that are blank,
/// malformed, or name a file outside the suffix allow-list are skipped.
pub fn parse_listing(raw: &str, base_path: &str, download_base_url: &str, rules: &FileRules<'_>) -> Vec<DownloadEntry> {
  raw
    .lines()
    .filter_map(split_line)
    .filter(|line| rules.is_download(line.name))
    .map(|line| DownloadEntry {
      date: utils::listing_time(line.date, line.time),
      size: format!("{} {}", line.size, line.unit),
      name: line.name.to_string(),
      url: format!("{}{}{}", download_base_url, base_path, line.name),
      platform: rules.platform_of(line.name).map(str::to_string),
    })
    .collect()
}

struct ListingLine<'a> {
  date: &'a str,
  time: &'a str,
  size: &'a str,
  unit: &'a str,
  name: &'a str,
}

/// Split `date time size unit name`; the name keeps any inner spaces
fn split_line(line: &str) -> Option<ListingLine<'_>> {
  let mut rest = line.trim();
  let mut fields = [""; 4];
  for field in fields.iter_mut() {
    let (head, tail) = rest.split_once(char::is_whitespace)?;
    *field = head;
    rest = tail.trim_start();
  }
  if rest.is_empty() {
    return None;
  }

  let [date, time, size, unit] = fields;
  Some(ListingLine {
    date,
    time,
    size,
    unit,
    name: rest,
  })
}
