//! In-memory fake of the foreign process for tests.
//!
//! Memory is a sparse byte map: a read succeeds only when every byte it
//! touches was written through the builder. Every read attempt, successful
//! or not, is appended to a log so tests can assert which addresses were
//! touched.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::memory::ReadMemory;

#[derive(Debug, Default)]
pub struct MockMemoryReader {
    bytes: HashMap<u64, u8>,
    modules: HashMap<String, u64>,
    reads: RefCell<Vec<(u64, usize)>>,
}

impl MockMemoryReader {
    /// All `(address, size)` pairs requested so far, in order.
    pub fn read_log(&self) -> Vec<(u64, usize)> {
        self.reads.borrow().clone()
    }

    pub fn read_count(&self) -> usize {
        self.reads.borrow().len()
    }

    pub fn clear_read_log(&self) {
        self.reads.borrow_mut().clear();
    }
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        self.reads.borrow_mut().push((address, size));

        (0..size as u64)
            .map(|i| {
                address
                    .checked_add(i)
                    .and_then(|addr| self.bytes.get(&addr).copied())
                    .ok_or_else(|| Error::read_failed(address, "unmapped"))
            })
            .collect()
    }

    fn base_address(&self, process_name: &str) -> Result<u64> {
        self.modules
            .get(process_name)
            .copied()
            .ok_or_else(|| Error::ProcessNotFound(process_name.to_string()))
    }
}

/// Builder for [`MockMemoryReader`]
#[derive(Debug, Default)]
pub struct MockMemoryBuilder {
    bytes: HashMap<u64, u8>,
    modules: HashMap<String, u64>,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module base address.
    pub fn module(mut self, name: &str, base: u64) -> Self {
        self.modules.insert(name.to_string(), base);
        self
    }

    pub fn write_bytes(mut self, address: u64, data: &[u8]) -> Self {
        for (i, byte) in data.iter().enumerate() {
            self.bytes.insert(address + i as u64, *byte);
        }
        self
    }

    /// Map `len` zero bytes.
    pub fn zeroed(self, address: u64, len: usize) -> Self {
        self.write_bytes(address, &vec![0; len])
    }

    pub fn write_u64(self, address: u64, value: u64) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_i32(self, address: u64, value: i32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_f32(self, address: u64, value: f32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    pub fn write_f32s(self, address: u64, values: &[f32]) -> Self {
        let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.write_bytes(address, &data)
    }

    pub fn write_u16s(self, address: u64, values: &[u16]) -> Self {
        let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.write_bytes(address, &data)
    }

    /// Write consecutive pointer-sized values.
    pub fn write_u64s(self, address: u64, values: &[u64]) -> Self {
        let data: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.write_bytes(address, &data)
    }

    /// Write an array descriptor `{ data, count, capacity }`.
    pub fn write_array_descriptor(self, address: u64, data: u64, count: i32, capacity: i32) -> Self {
        self.write_u64(address, data)
            .write_i32(address + 8, count)
            .write_i32(address + 12, capacity)
    }

    pub fn build(self) -> MockMemoryReader {
        MockMemoryReader {
            bytes: self.bytes,
            modules: self.modules,
            reads: RefCell::new(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_read_fails() {
        let reader = MockMemoryBuilder::new().write_bytes(0x10, &[1, 2, 3]).build();
        assert_eq!(reader.read_bytes(0x10, 3).unwrap(), vec![1, 2, 3]);
        assert!(reader.read_bytes(0x10, 4).is_err());
        assert!(reader.read_bytes(0x0, 1).is_err());
    }

    #[test]
    fn test_read_log() {
        let reader = MockMemoryBuilder::new().zeroed(0x100, 8).build();
        let _ = reader.read_u64(0x100);
        let _ = reader.read_u64(0x200);
        assert_eq!(reader.read_log(), vec![(0x100, 8), (0x200, 8)]);

        reader.clear_read_log();
        assert_eq!(reader.read_count(), 0);
    }

    #[test]
    fn test_module_base() {
        let reader = MockMemoryBuilder::new().module("Game.exe", 0x1000).build();
        assert_eq!(reader.base_address("Game.exe").unwrap(), 0x1000);
        assert!(matches!(
            reader.base_address("Other.exe"),
            Err(Error::ProcessNotFound(_))
        ));
    }
}
