//! Integration tests for the release-page binary
//!
//! Only failure paths run here; a successful run needs the storage CLI.

use crate::helpers::{TestWorkspace, run_release_page};
use anyhow::Result;

#[test]
fn test_missing_inputs_fail_with_user_exit_code() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;

  let output = run_release_page(&ws.path, &[], &[])?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("Missing required input: bucket-release"), "stderr: {}", stderr);
  Ok(())
}

#[test]
fn test_title_without_version_is_rejected() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;

  let output = run_release_page(
    &ws.path,
    &["--bucket-release", "releases", "--bucket-prebuilt", "prebuilt"],
    &[("PR_TITLE", "Release")],
  )?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("No version found"), "stderr: {}", stderr);
  Ok(())
}

#[test]
fn test_title_read_from_event_payload() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  let event = ws.write_file(
    "event.json",
    r#"{"pull_request": {"title": "Prepare"}, "repository": {"name": "kungfu", "owner": {"login": "kungfu-trader"}}}"#,
  )?;
  let event = event.to_string_lossy().into_owned();

  let output = run_release_page(
    &ws.path,
    &["--bucket-release", "releases", "--bucket-prebuilt", "prebuilt"],
    &[("GITHUB_EVENT_PATH", event.as_str())],
  )?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("'Prepare'"), "stderr: {}", stderr);
  Ok(())
}

#[test]
fn test_invalid_config_is_reported() -> Result<()> {
  let ws = TestWorkspace::new()?;
  ws.add_package(".", "@kungfu-trader/kungfu-app", true)?;
  ws.write_file("release-page.toml", "platforms = []\n")?;

  let output = run_release_page(
    &ws.path,
    &["--bucket-release", "releases", "--bucket-prebuilt", "prebuilt", "--title", "Release v2.0.0"],
    &[],
  )?;
  let stderr = String::from_utf8_lossy(&output.stderr);

  assert_eq!(output.status.code(), Some(1));
  assert!(stderr.contains("platforms"), "stderr: {}", stderr);
  Ok(())
}
