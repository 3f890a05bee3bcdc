//! Diagnostic utilities for inspecting a foreign engine
//!
//! This module provides tools for:
//! - Dumping raw memory as hex (`MemoryDump`)
//! - Reporting every readable field of an actor (`ActorReport`)
//! - Summarizing root resolution and the world chain (`EngineSummary`)

mod actor;
mod dump;
mod summary;

pub use actor::ActorReport;
pub use dump::MemoryDump;
pub use summary::{EngineSummary, RootSummary, WorldSummary};
