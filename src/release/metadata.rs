//! Dependency snapshot records
//!
//! Every published artifact gets one tracking-table row pinning the
//! organization's packages at the versions the lock document resolved.

use crate::core::context::RunContext;
use crate::core::error::PageResult;
use crate::release::version;
use crate::remote::{RecordTable, TableRecord};
use crate::workspace::DependencySnapshot;
use chrono::Utc;

/// Build the tracking-table row for one artifact
pub fn build_record(
  artifact_name: &str,
  release_version: &str,
  snapshot: &DependencySnapshot,
  repo: &str,
) -> PageResult<TableRecord> {
  Ok(TableRecord {
    name: artifact_name.to_string(),
    version: version::record_version(release_version).to_string(),
    dependencies: snapshot.to_json()?,
    repo: repo.to_string(),
    timestamp: Utc::now().timestamp_millis(),
  })
}

/// Push the dependency snapshot for the published artifacts
///
/// Nothing is written without a credential or without a snapshot. Returns
/// the number of records submitted.
pub fn publish_snapshot(
  ctx: &RunContext,
  table: &dyn RecordTable,
  snapshot: Option<&DependencySnapshot>,
  artifacts: &[String],
) -> PageResult<usize> {
  if !ctx.inputs.has_credential() {
    tracing::info!("no record table credential, skipping dependency snapshot");
    return Ok(0);
  }
  let Some(snapshot) = snapshot else {
    tracing::info!("no dependency snapshot, skipping record table write");
    return Ok(0);
  };

  let mut submitted = 0;
  for artifact in artifacts {
    let record = build_record(artifact, &ctx.version, snapshot, &ctx.inputs.repo)?;
    table.insert(&ctx.config.table, std::slice::from_ref(&record))?;
    submitted += 1;
  }

  tracing::info!(records = submitted, table = %ctx.config.table, "dependency snapshot recorded");
  Ok(submitted)
}
