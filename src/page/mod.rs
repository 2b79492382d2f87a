//! Release page rendering
//!
//! Pages are Mustache templates rendered against a [`PageContext`]. A
//! template bundled with the binary is used unless the config names one.

use crate::core::config::PageConfig;
use crate::core::error::{PageResult, ResultExt};
use crate::downloads::DownloadEntry;
use crate::release::ReleaseNoteSet;
use crate::release::notes::NoteLink;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Bundled release page template
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/release-detail.html");

/// File name of the rendered page inside the output directory
pub const PAGE_FILE: &str = "index.html";

/// Render-time data of one artifact's page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
  pub artifact_name: String,
  pub version: String,
  /// Markdown notes exist (and are inlined in `notes`)
  pub has_notes: bool,
  pub home_url: String,
  pub table_item: Vec<DownloadEntry>,
  /// Serialized as top-level `mdUrl`, `pdfUrl`, `htmlUrl` and `rstUrl`
  #[serde(flatten)]
  pub release_notes: ReleaseNoteSet,
  /// `release_notes` as an ordered link list for the template
  pub note_links: Vec<NoteLink>,
  /// Display timestamp of the render
  pub created: String,
  /// Inline HTML of the Markdown notes
  pub notes: String,
}

/// A compiled page template
pub struct PageTemplate {
  template: mustache::Template,
}

impl PageTemplate {
  /// Compile template source
  pub fn compile(source: &str) -> PageResult<Self> {
    let template = mustache::compile_str(source)?;
    Ok(Self { template })
  }

  /// Load the configured template, or the bundled one
  pub fn load(root: &Path, config: &PageConfig) -> PageResult<Self> {
    match &config.template {
      Some(rel) => {
        let path = root.join(rel);
        let source = std::fs::read_to_string(&path)
          .with_context(|| format!("Failed to read page template {}", path.display()))?;
        Self::compile(&source).with_context(|| format!("Failed to compile page template {}", path.display()))
      }
      None => Self::compile(DEFAULT_TEMPLATE),
    }
  }

  pub fn render(&self, context: &PageContext) -> PageResult<String> {
    let mut out = Vec::new();
    self.template.render(&mut out, context)?;
    Ok(String::from_utf8(out)?)
  }
}

/// Write a rendered page into `dir`, creating it if needed
pub fn write_page(dir: &Path, html: &str) -> PageResult<PathBuf> {
  std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
  let path = dir.join(PAGE_FILE);
  std::fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}
