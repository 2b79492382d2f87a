//! Release publishing
//!
//! # Invariants
//!
//! 1. **Every published path is `<artifact>/<major>/<version>/`**
//!    - the version is the second word of the release pull-request title
//!    - the major segment carries no leading `v`
//!
//! 2. **Missing release data never aborts a run**
//!    - no listing → no rows, no notes → no links, no lock document → no record
//!
//! 3. **Publishing failures do**
//!    - a failed sync or record write stops the run with an error
//!
//! # Modules
//!
//! - **version**: version token extraction and path segments
//! - **notes**: release-note lookup and Markdown inlining
//! - **metadata**: dependency snapshot records for the tracking table

pub mod metadata;
pub mod notes;
pub mod version;

pub use metadata::publish_snapshot;
pub use notes::{ReleaseNoteSet, inline_notes, resolve_notes};
