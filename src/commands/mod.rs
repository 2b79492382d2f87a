//! CLI commands for release-page
//!
//! - **generate**: build, render and publish the release page of every
//!   artifact, then record the dependency snapshot
//!
//! Commands take a `&RunContext` built once in `main`.

pub mod generate;

pub use generate::{GenerateOptions, GenerateSummary, Services, print_summary, run_generate};
