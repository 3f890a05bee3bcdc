//! # uegraph-core
//!
//! Core library for reading an Unreal Engine object graph out of a foreign
//! process.
//!
//! This crate provides:
//! - The memory oracle seam (`ReadMemory`) and a snapshot-backed oracle
//! - Root pointer resolution with a bounded scan fallback (`EngineHandle`)
//! - Bounded decoding of engine dynamic arrays
//! - Read-only navigation of the world, its actors and players (`ObjectGraph`)
//!
//! ## Feature Flags
//!
//! - `debug-tools`: Enables hex dumps, actor reports and engine summaries.
//!   This feature is intended for CLI tools and development, not production use.

pub mod array;
pub mod config;
#[cfg(feature = "debug-tools")]
pub mod debug;
pub mod engine;
pub mod error;
pub mod graph;
pub mod memory;
pub mod offset;
pub mod types;

pub use array::{ArrayDescriptor, ArrayKind, narrow_ascii, read_pointer_array, read_wide_chars};
pub use config::Config;
pub use engine::{EngineHandle, ResolveStatus, ResolvedAddress, RootKind, ScanWindow};
pub use error::{Error, Result};
pub use graph::{Movement, ObjectGraph};
pub use memory::{Address, ByteBuffer, ReadMemory, Snapshot, SnapshotReader};
pub use offset::{EngineLayout, RootOffsets, load_layout, load_offsets, save_layout, save_offsets};
pub use types::{FName, ObjectHeader, Quaternion, Rotator, Transform, Vector3};
