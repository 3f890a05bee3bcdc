//! Fixtures shared by the graph tests.

use crate::engine::{EngineHandle, ResolveStatus, ResolvedAddress, RootKind};
use crate::memory::Address;

pub const BASE: u64 = 0x1_4000_0000;
pub const WORLD: u64 = 0x2_0000_0000;
pub const NAMES: u64 = 0x2_1000_0000;
pub const OBJECTS: u64 = 0x2_2000_0000;

pub fn resolved(kind: RootKind, value: Option<u64>) -> ResolvedAddress {
    ResolvedAddress {
        kind,
        offset: 0x100,
        absolute_address: Address::new(BASE + 0x100),
        value: Address::new(value.unwrap_or(0)),
        status: if value.is_some() {
            ResolveStatus::Direct
        } else {
            ResolveStatus::NotFound
        },
    }
}

/// Handle with every root resolved to the fixture addresses.
pub fn valid_handle() -> EngineHandle {
    EngineHandle::from_parts(
        Address::new(BASE),
        resolved(RootKind::Objects, Some(OBJECTS)),
        resolved(RootKind::Names, Some(NAMES)),
        resolved(RootKind::World, Some(WORLD)),
    )
}

/// Handle where no root resolved.
pub fn invalid_handle() -> EngineHandle {
    EngineHandle::from_parts(
        Address::new(BASE),
        resolved(RootKind::Objects, None),
        resolved(RootKind::Names, None),
        resolved(RootKind::World, None),
    )
}
