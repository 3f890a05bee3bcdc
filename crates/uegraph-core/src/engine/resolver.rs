//! Root pointer resolution.
//!
//! A root is a global pointer inside the game image (GWorld, GNames,
//! GObjects). Its static offset comes from a previous build and may have
//! drifted. Resolution reads the pointer at `base + offset`; if the slot is
//! readable but null, nearby slots are probed for something that looks like
//! the intended root.
//!
//! ```text
//!   Unresolved ──read fails──────────────────────────► Failed (Unreadable)
//!       │
//!       ├──read ok, non-zero─────────────────────────► Resolved (Direct)
//!       │
//!       └──read ok, zero──► Scanning ──first hit─────► Resolved (Scanned)
//!                               └────window exhausted─► Failed (NotFound)
//! ```
//!
//! Both terminal states are final for the session.

use serde::Serialize;
use strum::{Display, EnumIter};
use tracing::{debug, info, warn};

use crate::memory::layout::scan;
use crate::memory::{Address, ReadMemory};
use crate::offset::EngineLayout;

/// The root globals the object graph hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize)]
pub enum RootKind {
    #[strum(serialize = "GObjects")]
    Objects,
    #[strum(serialize = "GNames")]
    Names,
    #[strum(serialize = "GWorld")]
    World,
}

impl RootKind {
    /// Extra read used to confirm a scan candidate for this root.
    pub fn secondary_check(self, layout: &EngineLayout) -> SecondaryCheck {
        match self {
            RootKind::Objects | RootKind::Names => SecondaryCheck::Dereference,
            RootKind::World => SecondaryCheck::ReadableAt(layout.world.persistent_level),
        }
    }
}

/// Confirmation read performed on a plausible scan candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryCheck {
    /// The candidate itself must be readable as a pointer.
    Dereference,
    /// A pointer-sized read at `candidate + offset` must succeed.
    ReadableAt(u64),
}

impl SecondaryCheck {
    fn passes<R: ReadMemory + ?Sized>(self, reader: &R, candidate: Address) -> bool {
        let probe = match self {
            SecondaryCheck::Dereference => candidate,
            SecondaryCheck::ReadableAt(offset) => candidate.field(offset),
        };
        match reader.read_u64(probe.as_u64()) {
            Ok(value) => {
                debug!("  - Can read value at {}: 0x{:X}", probe, value);
                true
            }
            Err(_) => false,
        }
    }
}

/// Symmetric window of byte deltas probed around a stale root slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanWindow {
    pub radius: u64,
    pub step: u64,
}

impl Default for ScanWindow {
    fn default() -> Self {
        Self {
            radius: scan::WINDOW_RADIUS,
            step: scan::STEP,
        }
    }
}

impl ScanWindow {
    /// Deltas from `-radius` to `+radius` inclusive, ascending.
    pub fn deltas(&self) -> impl Iterator<Item = i64> {
        let radius = self.radius.min(i64::MAX as u64) as i64;
        let step = self.step.max(1) as usize;
        (-radius..=radius).step_by(step)
    }
}

/// What to resolve: a root, its guessed offset, and how to confirm a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootTarget {
    pub kind: RootKind,
    pub offset: u64,
    pub check: SecondaryCheck,
}

/// Terminal state of a root resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResolveStatus {
    /// The slot at the static offset held a non-zero value.
    Direct,
    /// The static offset was stale; the root was found `delta` bytes away.
    Scanned { delta: i64 },
    /// The slot at the static offset could not be read at all.
    Unreadable,
    /// The slot was null and no candidate in the window passed validation.
    NotFound,
}

/// Outcome of resolving one root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedAddress {
    pub kind: RootKind,
    /// Offset from the module base (corrected when found by scanning)
    pub offset: u64,
    pub absolute_address: Address,
    /// Pointer stored in the root slot; null unless resolved
    pub value: Address,
    pub status: ResolveStatus,
}

impl ResolvedAddress {
    pub fn is_valid(&self) -> bool {
        matches!(
            self.status,
            ResolveStatus::Direct | ResolveStatus::Scanned { .. }
        )
    }

    /// The root value if resolved.
    pub fn get(&self) -> Option<Address> {
        self.is_valid().then_some(self.value)
    }

    fn failed(kind: RootKind, offset: u64, absolute_address: Address, status: ResolveStatus) -> Self {
        Self {
            kind,
            offset,
            absolute_address,
            value: Address::NULL,
            status,
        }
    }
}

/// Resolve one root pointer.
///
/// Pure with respect to the caller: nothing is mutated, the result is a new
/// value. The window is scanned in ascending delta order and the first
/// candidate that is a plausible pointer and passes `target.check` is adopted.
pub fn resolve<R: ReadMemory + ?Sized>(
    reader: &R,
    base: Address,
    target: &RootTarget,
    window: &ScanWindow,
) -> ResolvedAddress {
    let kind = target.kind;
    let absolute = base.field(target.offset);
    debug!("Reading {} at {}...", kind, absolute);

    match reader.read_u64(absolute.as_u64()) {
        Err(e) => {
            warn!("Failed to read {} at {}: {}", kind, absolute, e);
            ResolvedAddress::failed(kind, target.offset, absolute, ResolveStatus::Unreadable)
        }
        Ok(value) if value != 0 => {
            info!("{} value: 0x{:X}", kind, value);
            ResolvedAddress {
                kind,
                offset: target.offset,
                absolute_address: absolute,
                value: Address::new(value),
                status: ResolveStatus::Direct,
            }
        }
        Ok(_) => {
            warn!(
                "{} value is null, scanning ±0x{:X} around {}",
                kind, window.radius, absolute
            );
            scan_window(reader, base, target, absolute, window).unwrap_or_else(|| {
                warn!(
                    "No {} candidate found within ±0x{:X} of offset 0x{:X}",
                    kind, window.radius, target.offset
                );
                ResolvedAddress::failed(kind, target.offset, absolute, ResolveStatus::NotFound)
            })
        }
    }
}

fn scan_window<R: ReadMemory + ?Sized>(
    reader: &R,
    base: Address,
    target: &RootTarget,
    absolute: Address,
    window: &ScanWindow,
) -> Option<ResolvedAddress> {
    for delta in window.deltas() {
        let Some(probe) = absolute.as_u64().checked_add_signed(delta) else {
            continue;
        };
        let Ok(raw) = reader.read_u64(probe) else {
            continue;
        };
        let candidate = Address::new(raw);
        if !candidate.is_plausible_pointer() {
            continue;
        }

        let offset = target.offset.wrapping_add_signed(delta);
        debug!(
            "Potential {} at offset 0x{:X} (address: 0x{:X}): {}",
            target.kind, offset, probe, candidate
        );

        if target.check.passes(reader, candidate) {
            let absolute_address = base.field(offset);
            info!(
                "Using {} as {}. Updated offset to 0x{:X} (delta {} bytes)",
                candidate, target.kind, offset, delta
            );
            return Some(ResolvedAddress {
                kind: target.kind,
                offset,
                absolute_address,
                value: candidate,
                status: ResolveStatus::Scanned { delta },
            });
        }
    }

    None
}
