//! Page generation command
//!
//! For every publish target, in catalog order:
//! 1. build the download table (primary + related listings)
//! 2. resolve release notes and inline the Markdown ones
//! 3. render the page into a fresh scratch directory
//! 4. sync that directory to `<artifact>/<major>/<version>/` in the release bucket
//!
//! The scratch directory is dropped before the next artifact starts. Once
//! every page is out, the dependency snapshot is recorded per artifact.

use crate::core::context::RunContext;
use crate::core::error::{PageResult, ResultExt};
use crate::downloads::{DownloadTable, FileRules};
use crate::page::{PageContext, PageTemplate, write_page};
use crate::release::{inline_notes, publish_snapshot, resolve_notes};
use crate::remote::{DocumentFetcher, RecordTable};
use crate::storage::ObjectStore;
use crate::ui::ArtifactProgress;
use crate::utils::now_display;
use crate::workspace::{load_snapshot, publish_targets};
use std::path::PathBuf;
use tempfile::TempDir;

/// External collaborators of a run
pub struct Services<'a> {
  pub store: &'a dyn ObjectStore,
  pub fetcher: &'a dyn DocumentFetcher,
  pub table: &'a dyn RecordTable,
}

/// How a run publishes its output
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
  /// Render into `out_dir` and skip sync and record writes
  pub dry_run: bool,
  /// Kept output directory for dry runs (default: `<root>/release-pages`)
  pub out_dir: Option<PathBuf>,
  pub progress: bool,
}

/// One page produced by a run
#[derive(Debug, Clone)]
pub struct GeneratedPage {
  pub artifact: String,
  /// `<artifact>/<major>/<version>/`
  pub prefix: String,
  pub downloads: usize,
  pub has_notes: bool,
  /// Location of the rendered page when it was kept (dry run)
  pub kept_at: Option<PathBuf>,
}

/// Result of a run
#[derive(Debug, Clone, Default)]
pub struct GenerateSummary {
  pub version: String,
  pub pages: Vec<GeneratedPage>,
  /// Records submitted to the tracking table
  pub records: usize,
}

/// Run the page generation pipeline
pub fn run_generate(ctx: &RunContext, services: &Services<'_>, options: &GenerateOptions) -> PageResult<GenerateSummary> {
  let targets = publish_targets(&ctx.root, &ctx.config)?;
  let template = PageTemplate::load(&ctx.root, &ctx.config)?;
  let related: Vec<String> = ctx
    .config
    .related_artifacts
    .iter()
    .map(|name| ctx.config.short_name(name).to_string())
    .collect();

  tracing::info!(version = %ctx.version, artifacts = targets.len(), dry_run = options.dry_run, "generating release pages");

  let keep_root = options
    .out_dir
    .clone()
    .unwrap_or_else(|| ctx.root.join("release-pages"));

  let mut progress = options
    .progress
    .then(|| ArtifactProgress::new(targets.len(), "Publishing release pages"));

  let mut pages = Vec::with_capacity(targets.len());
  for artifact in &targets {
    let page = assemble(ctx, services, artifact, &related);
    let prefix = format!("{}/{}/", artifact, ctx.artifact_path());
    let html = template.render(&page)?;

    let kept_at = if options.dry_run {
      let dir = keep_root.join(artifact).join(ctx.artifact_path());
      Some(write_page(&dir, &html)?)
    } else {
      let scratch = TempDir::new().context("Failed to create scratch directory")?;
      write_page(scratch.path(), &html)?;
      services
        .store
        .sync(scratch.path(), &ctx.inputs.bucket_release, &prefix)?;
      None
    };

    tracing::info!(artifact = %artifact, prefix = %prefix, downloads = page.table_item.len(), "page published");
    pages.push(GeneratedPage {
      artifact: artifact.clone(),
      prefix,
      downloads: page.table_item.len(),
      has_notes: page.has_notes,
      kept_at,
    });

    if let Some(bar) = progress.as_mut() {
      bar.inc();
    }
  }

  let records = if options.dry_run {
    tracing::info!("dry run, skipping dependency snapshot");
    0
  } else {
    let snapshot = load_snapshot(&ctx.root, &ctx.config);
    publish_snapshot(ctx, services.table, snapshot.as_ref(), &targets)?
  };

  Ok(GenerateSummary {
    version: ctx.version.clone(),
    pages,
    records,
  })
}

/// Gather everything the page of one artifact shows
fn assemble(ctx: &RunContext, services: &Services<'_>, artifact: &str, related: &[String]) -> PageContext {
  let version_path = ctx.artifact_path();
  let table = DownloadTable::new(
    services.store,
    &ctx.inputs.bucket_prebuilt,
    &version_path,
    &ctx.config.download_base_url,
    FileRules::from_config(&ctx.config),
  );
  let table_item = table.build(artifact, related);

  let prefix = format!("{}/{}/", artifact, version_path);
  let release_notes = resolve_notes(
    services.store,
    &ctx.inputs.bucket_release,
    &prefix,
    &ctx.config.release_base_url,
  );
  let notes = inline_notes(services.fetcher, &release_notes);

  PageContext {
    artifact_name: artifact.to_string(),
    version: ctx.version.clone(),
    has_notes: release_notes.md_url.is_some(),
    home_url: ctx.config.release_base_url.clone(),
    table_item,
    note_links: release_notes.links(),
    release_notes,
    created: now_display(),
    notes,
  }
}

/// Print the run summary to stdout
pub fn print_summary(summary: &GenerateSummary, dry_run: bool) {
  println!("📦 Release pages for {}", summary.version);
  for page in &summary.pages {
    let notes = if page.has_notes { ", notes" } else { "" };
    match &page.kept_at {
      Some(path) => println!("  {} ({} downloads{}) → {}", page.prefix, page.downloads, notes, path.display()),
      None => println!("  {} ({} downloads{})", page.prefix, page.downloads, notes),
    }
  }
  if dry_run {
    println!("🔍 Dry-run mode (nothing synced, no records written)");
  } else {
    println!("✅ Published {} page(s), {} record(s)", summary.pages.len(), summary.records);
  }
}
