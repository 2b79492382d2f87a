//! `aws` CLI backend
//!
//! One subprocess per operation. Non-zero exit is always an error here;
//! callers that tolerate missing prefixes swallow it themselves.

use super::ObjectStore;
use crate::core::error::{PageError, PageResult, StorageError};
use serde::Deserialize;
use std::path::Path;
use std::process::{Command, Output};

/// Storage backend using the system `aws` CLI
pub struct AwsCli {
  program: String,
}

/// One element of a `list-objects-v2` query result
#[derive(Debug, Deserialize)]
struct StoredObject {
  #[serde(rename = "Key")]
  key: String,
}

impl AwsCli {
  pub fn new() -> Self {
    Self::with_program("aws")
  }

  /// Use a different executable (wrappers, tests)
  pub fn with_program(program: impl Into<String>) -> Self {
    Self { program: program.into() }
  }

  fn aws_cmd(&self) -> Command {
    let mut cmd = Command::new(&self.program);
    // Never page output in CI
    cmd.env("AWS_PAGER", "");
    cmd
  }

  /// Run the CLI and require a zero exit status
  fn run(&self, args: &[&str]) -> PageResult<Output> {
    let command = format!("{} {}", self.program, args.join(" "));
    tracing::debug!("$ {}", command);

    let output = self.aws_cmd().args(args).output().map_err(|e| {
      PageError::Storage(StorageError::Unavailable {
        program: self.program.clone(),
        reason: e.to_string(),
      })
    })?;

    if !output.status.success() {
      return Err(PageError::Storage(StorageError::CommandFailed {
        command,
        status: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
      }));
    }

    Ok(output)
  }
}

impl Default for AwsCli {
  fn default() -> Self {
    Self::new()
  }
}

impl ObjectStore for AwsCli {
  fn list(&self, bucket: &str, prefix: &str) -> PageResult<String> {
    let source = format!("s3://{}/{}", bucket, prefix);
    let output = self.run(&["s3", "ls", source.as_str(), "--human-readable"])?;
    Ok(String::from_utf8(output.stdout)?)
  }

  fn find_keys(&self, bucket: &str, prefix: &str, needle: &str) -> PageResult<Vec<String>> {
    let query = format!("Contents[?contains(Key, '{}')]", needle);
    let output = self.run(&[
      "s3api",
      "list-objects-v2",
      "--bucket",
      bucket,
      "--prefix",
      prefix,
      "--query",
      query.as_str(),
      "--output",
      "json",
    ])?;
    parse_key_query(&String::from_utf8(output.stdout)?)
  }

  fn sync(&self, source: &Path, bucket: &str, prefix: &str) -> PageResult<()> {
    let source = source.to_string_lossy().into_owned();
    let dest = format!("s3://{}/{}", bucket, prefix);
    self.run(&[
      "s3",
      "sync",
      source.as_str(),
      dest.as_str(),
      "--acl",
      "public-read",
      "--only-show-errors",
    ])?;
    Ok(())
  }
}

/// Parse `list-objects-v2 --query` output (`null` when nothing matched)
fn parse_key_query(stdout: &str) -> PageResult<Vec<String>> {
  let trimmed = stdout.trim();
  if trimmed.is_empty() {
    return Ok(Vec::new());
  }
  let objects: Option<Vec<StoredObject>> = serde_json::from_str(trimmed)?;
  Ok(objects.unwrap_or_default().into_iter().map(|o| o.key).collect())
}
