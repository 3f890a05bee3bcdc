//! The memory oracle seam.
//!
//! Everything the core knows about the foreign process arrives through
//! [`ReadMemory`]. Implementations own the actual channel (a live process
//! handle, a hardware-backed reader, a snapshot file); the core only asks for
//! bytes at an address and for a module's base address.

use crate::error::{Error, Result};
use crate::memory::ByteBuffer;
use crate::memory::layout::POINTER_SIZE;

/// Read access to a foreign process address space.
///
/// Calls are blocking. A wedged channel stalls the caller; timeouts belong to
/// the implementation.
pub trait ReadMemory {
    /// Read `size` bytes starting at `address`.
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>>;

    /// Resolve the load address of a module (usually the main executable).
    fn base_address(&self, process_name: &str) -> Result<u64>;

    /// Read a pointer-sized little-endian value.
    fn read_u64(&self, address: u64) -> Result<u64> {
        let bytes = self.read_bytes(address, POINTER_SIZE)?;
        ByteBuffer::new(&bytes).read_u64(0)
    }

    fn read_i32(&self, address: u64) -> Result<i32> {
        let bytes = self.read_bytes(address, 4)?;
        ByteBuffer::new(&bytes).read_i32(0)
    }

    fn read_f32(&self, address: u64) -> Result<f32> {
        let bytes = self.read_bytes(address, 4)?;
        ByteBuffer::new(&bytes).read_f32(0)
    }

    /// Read `count` consecutive `f32` values.
    fn read_f32_array(&self, address: u64, count: usize) -> Result<Vec<f32>> {
        let bytes = self.read_bytes(address, count * 4)?;
        let buffer = ByteBuffer::new(&bytes);
        (0..count).map(|i| buffer.read_f32(i * 4)).collect()
    }
}

impl<R: ReadMemory + ?Sized> ReadMemory for &R {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(address, size)
    }

    fn base_address(&self, process_name: &str) -> Result<u64> {
        (**self).base_address(process_name)
    }
}

/// Check that a reader returned exactly the number of bytes requested.
pub(crate) fn ensure_len(address: u64, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.len() != expected {
        return Err(Error::read_failed(
            address,
            format!("short read: {} of {} bytes", bytes.len(), expected),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MockMemoryBuilder;

    #[test]
    fn test_typed_reads_are_little_endian() {
        let reader = MockMemoryBuilder::new()
            .write_u64(0x2000, 0x1122_3344_5566_7788)
            .write_i32(0x3000, -5)
            .write_f32(0x3004, 1.5)
            .build();

        assert_eq!(reader.read_u64(0x2000).unwrap(), 0x1122_3344_5566_7788);
        assert_eq!(reader.read_i32(0x3000).unwrap(), -5);
        assert_eq!(reader.read_f32(0x3004).unwrap(), 1.5);
    }

    #[test]
    fn test_read_f32_array() {
        let reader = MockMemoryBuilder::new()
            .write_f32s(0x100, &[1.0, 2.0, 3.0])
            .build();

        assert_eq!(reader.read_f32_array(0x100, 3).unwrap(), vec![1.0, 2.0, 3.0]);
        assert!(reader.read_f32_array(0x100, 4).is_err());
    }

    #[test]
    fn test_reader_by_reference() {
        let reader = MockMemoryBuilder::new().write_u64(0x10, 7).build();
        let by_ref = &reader;
        assert_eq!(by_ref.read_u64(0x10).unwrap(), 7);
    }

    #[test]
    fn test_ensure_len() {
        assert!(ensure_len(0, &[0; 8], 8).is_ok());
        assert!(ensure_len(0, &[0; 4], 8).is_err());
    }
}
