//! Core building blocks for release-page
//!
//! - **config**: page configuration (release-page.toml) parsing and validation
//! - **context**: action inputs and the run context shared by every step
//! - **error**: error types with contextual help messages

pub mod config;
pub mod context;
pub mod error;
