use serde::Serialize;
use tracing::{info, warn};

use crate::engine::{ResolvedAddress, RootKind, RootTarget, ScanWindow, resolve};
use crate::error::{Error, Result};
use crate::memory::{Address, ReadMemory};
use crate::offset::{EngineLayout, RootOffsets};

/// The three resolved roots for one session.
///
/// Built once by [`EngineHandle::resolve`] and read-only afterwards. Roots
/// resolve independently, so a handle can be partially valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EngineHandle {
    base_address: Address,
    objects: ResolvedAddress,
    names: ResolvedAddress,
    world: ResolvedAddress,
}

impl EngineHandle {
    /// Locate the module base and resolve every root.
    ///
    /// Fails only when the base address cannot be obtained; without it no
    /// offset means anything. Individual roots that fail to resolve are
    /// recorded as invalid.
    pub fn resolve<R: ReadMemory + ?Sized>(
        reader: &R,
        offsets: &RootOffsets,
        layout: &EngineLayout,
        window: &ScanWindow,
    ) -> Result<Self> {
        let base = reader
            .base_address(&offsets.process_name)
            .map_err(|e| {
                warn!("Failed to get base address for {}: {}", offsets.process_name, e);
                Error::ProcessNotFound(offsets.process_name.clone())
            })?;
        if base == 0 {
            return Err(Error::ProcessNotFound(offsets.process_name.clone()));
        }
        let base = Address::new(base);
        info!("Found base address for {} at {}", offsets.process_name, base);

        let resolve_root = |kind: RootKind, offset: u64| {
            let target = RootTarget {
                kind,
                offset,
                check: kind.secondary_check(layout),
            };
            resolve(reader, base, &target, window)
        };

        let handle = Self {
            base_address: base,
            objects: resolve_root(RootKind::Objects, offsets.objects),
            names: resolve_root(RootKind::Names, offsets.names),
            world: resolve_root(RootKind::World, offsets.world),
        };

        if handle.is_valid() {
            info!("All roots resolved");
        } else {
            warn!(
                "Roots partially resolved: GObjects={}, GNames={}, GWorld={}",
                handle.objects.is_valid(),
                handle.names.is_valid(),
                handle.world.is_valid()
            );
        }

        Ok(handle)
    }

    /// Assemble a handle from roots resolved elsewhere.
    pub fn from_parts(
        base_address: Address,
        objects: ResolvedAddress,
        names: ResolvedAddress,
        world: ResolvedAddress,
    ) -> Self {
        Self {
            base_address,
            objects,
            names,
            world,
        }
    }

    /// True only when every root resolved.
    pub fn is_valid(&self) -> bool {
        self.objects.is_valid() && self.names.is_valid() && self.world.is_valid()
    }

    pub fn base_address(&self) -> Address {
        self.base_address
    }

    pub fn objects(&self) -> &ResolvedAddress {
        &self.objects
    }

    pub fn names(&self) -> &ResolvedAddress {
        &self.names
    }

    pub fn world(&self) -> &ResolvedAddress {
        &self.world
    }

    pub fn root(&self, kind: RootKind) -> &ResolvedAddress {
        match kind {
            RootKind::Objects => &self.objects,
            RootKind::Names => &self.names,
            RootKind::World => &self.world,
        }
    }

    /// Offsets as corrected by resolution, suitable for saving and reuse on
    /// the next run.
    pub fn corrected_offsets(&self, previous: &RootOffsets) -> RootOffsets {
        RootOffsets {
            objects: self.objects.offset,
            names: self.names.offset,
            world: self.world.offset,
            ..previous.clone()
        }
    }
}
