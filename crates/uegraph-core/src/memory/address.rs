use std::fmt;

use serde::{Deserialize, Serialize};

use crate::memory::layout::pointer;

/// A location in the foreign address space.
///
/// An `Address` is never dereferenced natively; it is only ever handed back to
/// a [`ReadMemory`](crate::memory::ReadMemory) implementation. Zero means
/// "absent".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(u64);

impl Address {
    pub const NULL: Address = Address(0);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Address of a field `offset` bytes into the object at `self`.
    pub const fn field(self, offset: u64) -> Address {
        Address(self.0.wrapping_add(offset))
    }

    /// Whether the raw value falls inside the userspace range real heap and
    /// image pointers live in. Rejects null, small integers and kernel-space
    /// values.
    pub const fn is_plausible_pointer(self) -> bool {
        self.0 > pointer::MIN_PLAUSIBLE && self.0 < pointer::MAX_PLAUSIBLE
    }
}

impl From<u64> for Address {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<Address> for u64 {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}
