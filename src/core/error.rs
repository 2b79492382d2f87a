//! Error types for release-page with contextual messages and exit codes
//!
//! Failures of the listing and release-note queries never reach this type's
//! callers: they are swallowed where they happen. Everything that does surface
//! here aborts the run and is reported as an action failure.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (missing inputs, bad config, malformed manifests)
  User = 1,
  /// System error (storage CLI, network, I/O)
  System = 2,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-page
#[derive(Debug)]
pub enum PageError {
  /// Configuration and input errors
  Config(ConfigError),

  /// Object-storage CLI errors
  Storage(StorageError),

  /// A package manifest could not be read or parsed
  Manifest { path: PathBuf, reason: String },

  /// HTTP request failed
  Http { url: String, reason: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message { message: String, context: Option<String> },
}

impl PageError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    PageError::Message {
      message: msg.into(),
      context: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      PageError::Message { message, context } => PageError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
      },
      PageError::Io(err) => PageError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      PageError::Config(_) => ExitCode::User,
      PageError::Manifest { .. } => ExitCode::User,
      PageError::Storage(_) => ExitCode::System,
      PageError::Http { .. } => ExitCode::System,
      PageError::Io(_) => ExitCode::System,
      PageError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      PageError::Config(e) => e.help_message(),
      PageError::Storage(e) => e.help_message(),
      PageError::Manifest { .. } => Some("Check that every package.json in the workspace is valid JSON.".to_string()),
      _ => None,
    }
  }
}

impl fmt::Display for PageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PageError::Config(e) => write!(f, "{}", e),
      PageError::Storage(e) => write!(f, "{}", e),
      PageError::Manifest { path, reason } => {
        write!(f, "Failed to load manifest {}: {}", path.display(), reason)
      }
      PageError::Http { url, reason } => write!(f, "Request to {} failed: {}", url, reason),
      PageError::Io(e) => write!(f, "I/O error: {}", e),
      PageError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for PageError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      PageError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for PageError {
  fn from(err: io::Error) -> Self {
    PageError::Io(err)
  }
}

impl From<String> for PageError {
  fn from(msg: String) -> Self {
    PageError::message(msg)
  }
}

impl From<&str> for PageError {
  fn from(msg: &str) -> Self {
    PageError::message(msg)
  }
}

impl From<serde_json::Error> for PageError {
  fn from(err: serde_json::Error) -> Self {
    PageError::message(format!("JSON error: {}", err))
  }
}

impl From<toml_edit::de::Error> for PageError {
  fn from(err: toml_edit::de::Error) -> Self {
    PageError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<mustache::Error> for PageError {
  fn from(err: mustache::Error) -> Self {
    PageError::message(format!("Template error: {}", err))
  }
}

impl From<glob::PatternError> for PageError {
  fn from(err: glob::PatternError) -> Self {
    PageError::message(format!("Invalid glob pattern: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for PageError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    PageError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Configuration and input errors
#[derive(Debug)]
pub enum ConfigError {
  /// A required action input was empty or absent
  MissingInput { name: String },

  /// The pull-request title carries no version token
  NoVersion { title: String },

  /// A config field holds an unusable value
  InvalidField { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MissingInput { name } => Some(format!(
        "Pass --{} or set the matching INPUT_* variable in the workflow.",
        name
      )),
      ConfigError::NoVersion { .. } => {
        Some("Release pull requests must be titled like \"Release v1.2.3\".".to_string())
      }
      ConfigError::InvalidField { .. } => Some("Fix the value in release-page.toml.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MissingInput { name } => write!(f, "Missing required input: {}", name),
      ConfigError::NoVersion { title } => {
        write!(f, "No version found in pull request title '{}'", title)
      }
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid config field '{}': {}", field, reason)
      }
    }
  }
}

/// Object-storage CLI errors
#[derive(Debug)]
pub enum StorageError {
  /// The CLI exited with a non-zero status
  CommandFailed {
    command: String,
    status: Option<i32>,
    stderr: String,
  },

  /// The CLI could not be started at all
  Unavailable { program: String, reason: String },
}

impl StorageError {
  fn help_message(&self) -> Option<String> {
    match self {
      StorageError::CommandFailed { stderr, .. } => {
        if stderr.contains("AccessDenied") || stderr.contains("credentials") {
          Some("Check the AWS credentials configured for this workflow.".to_string())
        } else {
          None
        }
      }
      StorageError::Unavailable { program, .. } => Some(format!("Install the {} CLI and make sure it is on PATH.", program)),
    }
  }
}

impl fmt::Display for StorageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StorageError::CommandFailed { command, status, stderr } => {
        match status {
          Some(code) => write!(f, "Failed to call {} with status {}", command, code)?,
          None => write!(f, "Failed to call {} (terminated by signal)", command)?,
        }
        if !stderr.trim().is_empty() {
          write!(f, "\n{}", stderr.trim())?;
        }
        Ok(())
      }
      StorageError::Unavailable { program, reason } => {
        write!(f, "Could not run {}: {}", program, reason)
      }
    }
  }
}

/// Result type alias for release-page
pub type PageResult<T> = Result<T, PageError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> PageResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> PageResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<PageError>,
{
  fn context(self, ctx: impl Into<String>) -> PageResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> PageResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &PageError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
