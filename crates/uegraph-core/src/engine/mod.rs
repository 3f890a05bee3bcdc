//! Root resolution and the per-session engine handle.

mod handle;
mod resolver;

pub use handle::EngineHandle;
pub use resolver::{
    ResolveStatus, ResolvedAddress, RootKind, RootTarget, ScanWindow, SecondaryCheck, resolve,
};
