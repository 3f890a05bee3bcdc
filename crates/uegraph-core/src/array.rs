//! Dynamic array descriptors (`TArray`) found inside foreign objects.
//!
//! A descriptor is `{ data: ptr, count: i32, capacity: i32 }`. The count is
//! untrusted: each kind of array has a plausible upper bound, and a count
//! outside `0..=bound` yields an empty sequence instead of a bulk read.

use serde::Serialize;
use strum::Display;
use tracing::debug;

use crate::error::Result;
use crate::memory::layout::{POINTER_SIZE, array, bounds};
use crate::memory::reader::ensure_len;
use crate::memory::{Address, ByteBuffer, ReadMemory};

/// The arrays the graph reader knows how to bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ArrayKind {
    /// ULevel actor list
    LevelActors,
    /// AGameStateBase player array
    Players,
    /// UGameInstance local players
    LocalPlayers,
    /// FString character buffer of a player name
    NameChars,
}

impl ArrayKind {
    /// Largest count accepted for this kind.
    pub const fn max_count(self) -> i32 {
        match self {
            ArrayKind::LevelActors => bounds::MAX_LEVEL_ACTORS,
            ArrayKind::Players => bounds::MAX_PLAYERS,
            ArrayKind::LocalPlayers => bounds::MAX_LOCAL_PLAYERS,
            ArrayKind::NameChars => bounds::MAX_NAME_CHARS,
        }
    }

    /// Size in bytes of one element.
    pub const fn element_size(self) -> usize {
        match self {
            ArrayKind::LevelActors | ArrayKind::Players | ArrayKind::LocalPlayers => POINTER_SIZE,
            ArrayKind::NameChars => 2,
        }
    }
}

/// Raw array descriptor as stored in foreign memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ArrayDescriptor {
    pub data: Address,
    pub count: i32,
    pub capacity: i32,
}

impl ArrayDescriptor {
    pub const SIZE: usize = array::DESCRIPTOR_SIZE;

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let buf = ByteBuffer::new(bytes);
        Ok(Self {
            data: Address::new(buf.read_u64(array::DATA)?),
            count: buf.read_i32(array::COUNT)?,
            capacity: buf.read_i32(array::CAPACITY)?,
        })
    }

    /// Read the descriptor stored at `address`. `None` on a null address or a
    /// failed read.
    pub fn read<R: ReadMemory + ?Sized>(reader: &R, address: Address) -> Option<Self> {
        if address.is_null() {
            return None;
        }
        let bytes = reader.read_bytes(address.as_u64(), Self::SIZE).ok()?;
        Self::from_bytes(&bytes).ok()
    }

    /// Whether the count lies within the bound for `kind`.
    pub fn is_plausible(&self, kind: ArrayKind) -> bool {
        (0..=kind.max_count()).contains(&self.count)
    }
}

/// Decode the array whose descriptor sits `offset` bytes into `container`.
///
/// Returns every element in storage order, or an empty vector when the
/// container is null, any read fails, or the count is implausible. Never a
/// partial result.
pub fn read_array<R, T, F>(
    reader: &R,
    container: Address,
    offset: u64,
    kind: ArrayKind,
    decode: F,
) -> Vec<T>
where
    R: ReadMemory + ?Sized,
    F: Fn(&ByteBuffer<'_>, usize) -> Result<T>,
{
    if container.is_null() {
        return Vec::new();
    }

    let Some(descriptor) = ArrayDescriptor::read(reader, container.field(offset)) else {
        debug!("{} descriptor unreadable at {}+0x{:X}", kind, container, offset);
        return Vec::new();
    };

    if !descriptor.is_plausible(kind) {
        debug!(
            "{} count {} outside 0..={}, ignoring",
            kind,
            descriptor.count,
            kind.max_count()
        );
        return Vec::new();
    }
    if descriptor.count == 0 || descriptor.data.is_null() {
        return Vec::new();
    }

    let count = descriptor.count as usize;
    let size = count * kind.element_size();
    let bytes = match reader.read_bytes(descriptor.data.as_u64(), size) {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("{} bulk read of {} bytes failed: {}", kind, size, e);
            return Vec::new();
        }
    };
    if ensure_len(descriptor.data.as_u64(), &bytes, size).is_err() {
        return Vec::new();
    }

    let buf = ByteBuffer::new(&bytes);
    (0..count)
        .map(|i| decode(&buf, i * kind.element_size()))
        .collect::<Result<Vec<T>>>()
        .unwrap_or_default()
}

/// Decode an array of object pointers. Null entries are kept in place.
pub fn read_pointer_array<R: ReadMemory + ?Sized>(
    reader: &R,
    container: Address,
    offset: u64,
    kind: ArrayKind,
) -> Vec<Address> {
    read_array(reader, container, offset, kind, |buf, at| {
        buf.read_u64(at).map(Address::new)
    })
}

/// Decode a UTF-16 code unit buffer (an `FString`).
pub fn read_wide_chars<R: ReadMemory + ?Sized>(
    reader: &R,
    container: Address,
    offset: u64,
) -> Vec<u16> {
    read_array(reader, container, offset, ArrayKind::NameChars, |buf, at| {
        buf.read_u16(at)
    })
}

/// Down-convert wide characters to ASCII.
///
/// Code units above 127 are dropped, not replaced. NUL units (the `FString`
/// terminator and padding) are dropped as well.
pub fn narrow_ascii(units: &[u16]) -> String {
    units
        .iter()
        .filter(|&&unit| (1..=127).contains(&unit))
        .map(|&unit| unit as u8 as char)
        .collect()
}
