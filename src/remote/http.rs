use super::DocumentFetcher;
use crate::core::error::{PageError, PageResult};
use std::time::Duration;

/// Connection timeout for document fetches (10 seconds).
const CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Request timeout for document fetches (60 seconds).
const REQUEST_TIMEOUT_MS: u64 = 60_000;

/// Blocking HTTP client for release-note documents
pub struct HttpFetcher {
  agent: ureq::Agent,
}

impl HttpFetcher {
  pub fn new() -> Self {
    let agent = ureq::AgentBuilder::new()
      .timeout_connect(Duration::from_millis(CONNECT_TIMEOUT_MS))
      .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
      .build();
    Self { agent }
  }
}

impl Default for HttpFetcher {
  fn default() -> Self {
    Self::new()
  }
}

impl DocumentFetcher for HttpFetcher {
  fn fetch_text(&self, url: &str) -> PageResult<String> {
    tracing::debug!(url, "fetching document");
    let response = self.agent.get(url).call().map_err(|e| http_error(url, e))?;
    response.into_string().map_err(|e| PageError::Http {
      url: url.to_string(),
      reason: format!("failed to read body: {}", e),
    })
  }
}

/// Convert ureq error to PageError
pub(crate) fn http_error(url: &str, error: ureq::Error) -> PageError {
  let reason = match error {
    ureq::Error::Status(status, response) => {
      let body = response.into_string().unwrap_or_default();
      if body.trim().is_empty() {
        format!("status {}", status)
      } else {
        format!("status {}: {}", status, body.trim())
      }
    }
    ureq::Error::Transport(transport) => match transport.kind() {
      ureq::ErrorKind::Dns => "DNS resolution failed".to_string(),
      ureq::ErrorKind::ConnectionFailed => "connection failed".to_string(),
      _ => transport.to_string(),
    },
  };
  PageError::Http {
    url: url.to_string(),
    reason,
  }
}
