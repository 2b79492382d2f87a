//! Integration tests for the page generation pipeline

use crate::helpers::{FakeFetcher, FakeStore, RecordingTable, TestWorkspace};
use anyhow::Result;
use pretty_assertions::assert_eq;
use release_page::commands::{GenerateOptions, Services, run_generate};

const LOCKFILE: &str = r#"# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.
# yarn lockfile v1


"@kungfu-trader/kungfu-core@^2.4.0", "@kungfu-trader/kungfu-core@~2.4.5":
  version "2.4.5"
  resolved "https://registry.yarnpkg.com/@kungfu-trader/kungfu-core/-/kungfu-core-2.4.5.tgz"

"@kungfu-trader/kungfu-js-api@^2.4.0":
  version "2.4.7"
  dependencies:
    "@kungfu-trader/kungfu-core" "^2.4.0"

lodash@^4.17.21:
  version "4.17.21"
"#;

fn position(haystack: &str, needle: &str) -> usize {
  haystack
    .find(needle)
    .unwrap_or_else(|| panic!("'{}' not found in page", needle))
}

#[test]
fn test_pages_land_under_major_version_path() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  let ctx = ws.context("Release v2.0.0 (hotfix)", "")?;

  let store = FakeStore::new().with_listing(
    "kungfu-app/2/v2.0.0/",
    "2024-01-02 10:11:12   80.3 MiB kungfu-app-win.exe\n",
  );
  let (fetcher, table) = (FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  let summary = run_generate(&ctx, &services, &GenerateOptions::default())?;

  assert_eq!(summary.version, "v2.0.0");
  let synced = store.synced();
  assert_eq!(synced.len(), 1);
  assert_eq!(synced[0].bucket, "kungfu-releases");
  assert_eq!(synced[0].prefix, "kungfu-app/2/v2.0.0/");
  assert!(synced[0].html.contains("kungfu-app v2.0.0"));
  Ok(())
}

#[test]
fn test_windows_row_first_regardless_of_listing_order() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  let ctx = ws.context("Release v2.0.0", "")?;

  let store = FakeStore::new().with_listing(
    "kungfu-app/2/v2.0.0/",
    "\
2024-01-02 10:11:12   60.1 MiB kungfu-app.tar.gz
2024-01-02 10:11:12   80.3 MiB kungfu-app-win.exe
2024-01-02 10:11:12    1.0 KiB checksums.txt
",
  );
  let (fetcher, table) = (FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  let summary = run_generate(&ctx, &services, &GenerateOptions::default())?;
  assert_eq!(summary.pages[0].downloads, 2);

  let html = &store.synced()[0].html;
  assert!(position(html, "kungfu-app-win.exe") < position(html, "kungfu-app.tar.gz"));
  assert!(!html.contains("checksums.txt"));
  Ok(())
}

#[test]
fn test_related_artifact_downloads_are_merged() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  let ctx = ws.context("Release v2.0.0", "")?;

  let store = FakeStore::new()
    .with_listing(
      "kungfu-app/2/v2.0.0/",
      "2024-01-02 10:11:12   60.1 MiB kungfu-app.tar.gz\n",
    )
    .with_listing(
      "kungfu-core/2/v2.0.0/",
      "2024-01-02 09:00:00   12.0 MiB kungfu-core-linux-x64.zip\n",
    );
  let (fetcher, table) = (FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  let summary = run_generate(&ctx, &services, &GenerateOptions::default())?;
  assert_eq!(summary.pages[0].downloads, 2);

  let html = &store.synced()[0].html;
  assert!(position(html, "kungfu-core-linux-x64.zip") < position(html, "kungfu-app.tar.gz"));
  Ok(())
}

#[test]
fn test_listing_failure_does_not_stop_other_artifacts() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.lerna(&["packages/*"])?;
  ws.add_package("packages/app", "@kungfu-trader/kungfu-app", true)?;
  ws.add_package("packages/cli", "@kungfu-trader/kungfu-cli", true)?;
  ws.add_package("packages/utils", "@kungfu-trader/kungfu-utils", false)?;
  let ctx = ws.context("Release v2.0.0", "")?;

  // Nothing is listed for kungfu-cli or kungfu-core
  let store = FakeStore::new().with_listing(
    "kungfu-app/2/v2.0.0/",
    "2024-01-02 10:11:12   80.3 MiB kungfu-app-win.exe\n",
  );
  let (fetcher, table) = (FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  let summary = run_generate(&ctx, &services, &GenerateOptions::default())?;

  let prefixes: Vec<String> = store.synced().into_iter().map(|p| p.prefix).collect();
  assert_eq!(prefixes, vec!["kungfu-app/2/v2.0.0/", "kungfu-cli/2/v2.0.0/"]);
  assert_eq!(summary.pages[0].downloads, 1);
  assert_eq!(summary.pages[1].downloads, 0);
  Ok(())
}

#[test]
fn test_artifact_manifests_take_precedence() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-monorepo", false)?;
  ws.add_package("artifact-app", "@kungfu-trader/kungfu-app", false)?;
  let ctx = ws.context("Release v2.0.0", "")?;

  let store = FakeStore::new();
  let (fetcher, table) = (FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  run_generate(&ctx, &services, &GenerateOptions::default())?;
  assert_eq!(store.synced()[0].prefix, "kungfu-app/2/v2.0.0/");
  assert_eq!(store.synced().len(), 1);
  Ok(())
}

#[test]
fn test_release_notes_linked_and_inlined() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  let ctx = ws.context("Release v2.0.0", "")?;

  let store = FakeStore::new().with_notes(
    "kungfu-app/2/v2.0.0/",
    &[
      "kungfu-app/2/v2.0.0/release-notes.md",
      "kungfu-app/2/v2.0.0/release-notes.pdf",
    ],
  );
  let fetcher = FakeFetcher::new().with_document(
    "https://releases.kungfu-trader.com/kungfu-app/2/v2.0.0/release-notes.md",
    "## Fixes\n\n- order book snapshot\n",
  );
  let table = RecordingTable::new();
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  let summary = run_generate(&ctx, &services, &GenerateOptions::default())?;
  assert!(summary.pages[0].has_notes);

  let html = &store.synced()[0].html;
  assert!(html.contains("<h2>Fixes</h2>"));
  assert!(html.contains("release-notes.pdf"));
  assert!(!html.contains(">HTML<"));
  Ok(())
}

#[test]
fn test_unreachable_markdown_keeps_link_without_inline_notes() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  let ctx = ws.context("Release v2.0.0", "")?;

  let store = FakeStore::new().with_notes("kungfu-app/2/v2.0.0/", &["kungfu-app/2/v2.0.0/release-notes.md"]);
  let (fetcher, table) = (FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  run_generate(&ctx, &services, &GenerateOptions::default())?;

  let html = &store.synced()[0].html;
  assert!(html.contains("release-notes.md"));
  assert!(html.contains("<article class=\"notes\"></article>"));
  Ok(())
}

#[test]
fn test_no_credential_writes_no_records() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  ws.write_file("yarn.lock", LOCKFILE)?;
  let ctx = ws.context("Release v2.0.0", "")?;

  let (store, fetcher, table) = (FakeStore::new(), FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  let summary = run_generate(&ctx, &services, &GenerateOptions::default())?;
  assert_eq!(summary.records, 0);
  assert!(table.calls().is_empty());
  Ok(())
}

#[test]
fn test_snapshot_recorded_per_artifact() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.lerna(&["packages/*"])?;
  ws.add_package("packages/app", "@kungfu-trader/kungfu-app", true)?;
  ws.add_package("packages/cli", "@kungfu-trader/kungfu-cli", true)?;
  ws.write_file("yarn.lock", LOCKFILE)?;
  let ctx = ws.context("Release v2.0.0", "keyTest")?;

  let (store, fetcher, table) = (FakeStore::new(), FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  let summary = run_generate(&ctx, &services, &GenerateOptions::default())?;
  assert_eq!(summary.records, 2);

  let calls = table.calls();
  assert_eq!(calls.len(), 2);
  let (table_name, records) = &calls[0];
  assert_eq!(table_name, "pr dependencies");
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].name, "kungfu-app");
  assert_eq!(records[0].version, "2.0.0");
  assert_eq!(records[0].repo, "kungfu");
  assert_eq!(
    records[0].dependencies,
    r#"{"@kungfu-trader/kungfu-core":"2.4.5","@kungfu-trader/kungfu-js-api":"2.4.7"}"#
  );
  assert_eq!(calls[1].1[0].name, "kungfu-cli");
  Ok(())
}

#[test]
fn test_missing_lockfile_skips_records() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  let ctx = ws.context("Release v2.0.0", "keyTest")?;

  let (store, fetcher, table) = (FakeStore::new(), FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  let summary = run_generate(&ctx, &services, &GenerateOptions::default())?;
  assert_eq!(store.synced().len(), 1);
  assert_eq!(summary.records, 0);
  assert!(table.calls().is_empty());
  Ok(())
}

#[test]
fn test_sync_failure_aborts_run() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  ws.write_file("yarn.lock", LOCKFILE)?;
  let ctx = ws.context("Release v2.0.0", "keyTest")?;

  let store = FakeStore::new().failing_sync();
  let (fetcher, table) = (FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };

  let err = run_generate(&ctx, &services, &GenerateOptions::default()).unwrap_err();
  assert!(err.to_string().contains("AccessDenied"));
  assert!(table.calls().is_empty());
  Ok(())
}

#[test]
fn test_dry_run_keeps_pages_and_skips_publishing() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  ws.write_file("yarn.lock", LOCKFILE)?;
  let ctx = ws.context("Release v2.0.0", "keyTest")?;

  let store = FakeStore::new().with_listing(
    "kungfu-app/2/v2.0.0/",
    "2024-01-02 10:11:12   80.3 MiB kungfu-app-win.exe\n",
  );
  let (fetcher, table) = (FakeFetcher::new(), RecordingTable::new());
  let services = Services {
    store: &store,
    fetcher: &fetcher,
    table: &table,
  };
  let options = GenerateOptions {
    dry_run: true,
    out_dir: Some(ws.path.join("out")),
    progress: false,
  };

  let summary = run_generate(&ctx, &services, &options)?;

  assert!(store.synced().is_empty());
  assert!(table.calls().is_empty());
  assert_eq!(summary.records, 0);
  assert!(ws.file_exists("out/kungfu-app/2/v2.0.0/index.html"));
  assert!(ws.read_file("out/kungfu-app/2/v2.0.0/index.html")?.contains("kungfu-app-win.exe"));
  Ok(())
}
