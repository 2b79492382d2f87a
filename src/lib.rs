//! Release page assembly for multi-package distributions
//!
//! Given a release version, lists every artifact's downloads from object
//! storage, links its release notes, renders one page per artifact, syncs
//! it to the release bucket and records the dependency snapshot.

pub mod commands;
pub mod core;
pub mod downloads;
pub mod page;
pub mod release;
pub mod remote;
pub mod storage;
pub mod ui;
pub mod utils;
pub mod workspace;
