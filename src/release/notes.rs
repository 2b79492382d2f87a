//! Release notes lookup
//!
//! Release notes live next to the page in the release bucket, under
//! `<artifact>/<major>/<version>/`, with "release-notes" in the key. At most
//! one document per format is linked; Markdown notes are also inlined.

use crate::remote::DocumentFetcher;
use crate::storage::ObjectStore;
use pulldown_cmark::{Options, Parser, html};
use serde::Serialize;

/// Substring identifying release-note keys
pub const RELEASE_NOTES_MARKER: &str = "release-notes";

/// Links to the release notes of one version, at most one per format
///
/// Absent formats are omitted from the serialized form, not null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNoteSet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub md_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub pdf_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub html_url: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub rst_url: Option<String>,
}

impl ReleaseNoteSet {
  /// Pick the first key per suffix and turn it into a public URL
  pub fn from_keys(keys: &[String], release_base_url: &str) -> Self {
    let pick = |suffix: &str| {
      keys
        .iter()
        .find(|key| key.ends_with(suffix))
        .map(|key| format!("{}{}", release_base_url, key))
    };

    Self {
      md_url: pick(".md"),
      pdf_url: pick(".pdf"),
      html_url: pick(".html"),
      rst_url: pick(".rst"),
    }
  }

  /// Present formats as labelled links, in md / pdf / html / rst order
  pub fn links(&self) -> Vec<NoteLink> {
    [
      ("Markdown", &self.md_url),
      ("PDF", &self.pdf_url),
      ("HTML", &self.html_url),
      ("reStructuredText", &self.rst_url),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
      url.as_ref().map(|url| NoteLink {
        label: label.to_string(),
        url: url.clone(),
      })
    })
    .collect()
  }

  pub fn is_empty(&self) -> bool {
    self.md_url.is_none() && self.pdf_url.is_none() && self.html_url.is_none() && self.rst_url.is_none()
  }
}

/// One release-note link as shown on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteLink {
  pub label: String,
  pub url: String,
}

/// Look up the release notes published under `prefix`
///
/// Query failures of any kind yield an empty set.
pub fn resolve_notes(store: &dyn ObjectStore, bucket: &str, prefix: &str, release_base_url: &str) -> ReleaseNoteSet {
  match store.find_keys(bucket, prefix, RELEASE_NOTES_MARKER) {
    Ok(keys) => ReleaseNoteSet::from_keys(&keys, release_base_url),
    Err(e) => {
      tracing::warn!(prefix, error = %e, "release notes query failed");
      ReleaseNoteSet::default()
    }
  }
}

/// Fetch the Markdown notes and convert them to HTML for inline display
///
/// Empty when there are no Markdown notes or the fetch fails; the link in
/// `notes.md_url` is left alone either way.
pub fn inline_notes(fetcher: &dyn DocumentFetcher, notes: &ReleaseNoteSet) -> String {
  let Some(url) = notes.md_url.as_deref() else {
    return String::new();
  };

  match fetcher.fetch_text(url) {
    Ok(markdown) => markdown_to_html(&markdown),
    Err(e) => {
      tracing::warn!(url, error = %e, "release notes could not be fetched");
      String::new()
    }
  }
}

/// GitHub-flavored Markdown to HTML
pub fn markdown_to_html(markdown: &str) -> String {
  let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS | Options::ENABLE_FOOTNOTES;
  let parser = Parser::new_ext(markdown, options);

  let mut out = String::with_capacity(markdown.len() * 3 / 2);
  html::push_html(&mut out, parser);
  out
}
