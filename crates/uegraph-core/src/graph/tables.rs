use tracing::debug;

use crate::graph::ObjectGraph;
use crate::memory::layout::{POINTER_SIZE, names};
use crate::memory::{Address, ReadMemory};
use crate::types::ObjectHeader;

impl<R: ReadMemory + ?Sized> ObjectGraph<'_, R> {
    /// Look up an entry of the global name table.
    ///
    /// The inline string is NUL-terminated inside a fixed 256 byte window and
    /// decoded lossily. `None` when the names root is invalid, the index is
    /// out of range or the entry is missing.
    pub fn name_from_index(&self, index: i32) -> Option<String> {
        let table = self.handle.names().get()?;
        if !(0..=names::MAX_INDEX).contains(&index) {
            debug!("name index {} out of range", index);
            return None;
        }

        let entry = self.follow(table, index as u64 * POINTER_SIZE as u64);
        if entry.is_null() {
            return None;
        }

        let bytes = self
            .reader
            .read_bytes(entry.field(names::ENTRY_STRING).as_u64(), names::MAX_LEN)
            .ok()?;
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Some(String::from_utf8_lossy(&bytes[..end]).into_owned())
    }

    /// Object pointer stored in slot `index` of the global object table.
    pub fn object_address(&self, index: i32) -> Address {
        let Some(table) = self.handle.objects().get() else {
            return Address::NULL;
        };
        if index < 0 {
            return Address::NULL;
        }
        self.follow(table, index as u64 * POINTER_SIZE as u64)
    }

    /// Header of the object in slot `index`, if the slot is populated.
    pub fn object_at(&self, index: i32) -> Option<ObjectHeader> {
        let object = self.object_address(index);
        if object.is_null() {
            return None;
        }
        let bytes = self
            .reader
            .read_bytes(object.as_u64(), ObjectHeader::SIZE)
            .ok()?;
        ObjectHeader::from_bytes(&bytes).ok()
    }

    /// Resolve the name of an object header through the name table.
    pub fn object_name(&self, header: &ObjectHeader) -> Option<String> {
        self.name_from_index(header.name.comparison_index)
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::ObjectGraph;
    use crate::graph::test_support::*;
    use crate::memory::{Address, MockMemoryBuilder};
    use crate::offset::EngineLayout;

    const ENTRY: u64 = 0x8_0000_0000;
    const OBJECT: u64 = 0x8_1000_0000;

    fn name_entry(builder: MockMemoryBuilder, entry: u64, text: &[u8]) -> MockMemoryBuilder {
        builder
            .zeroed(entry + 0x10, 256)
            .write_bytes(entry + 0x10, text)
    }

    #[test]
    fn test_name_from_index() {
        let builder = MockMemoryBuilder::new()
            .write_u64(NAMES + 5 * 8, ENTRY)
            .write_u64(NAMES + 6 * 8, 0);
        let reader = name_entry(builder, ENTRY, b"PlayerState\0junk").build();
        let handle = valid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        assert_eq!(graph.name_from_index(5).as_deref(), Some("PlayerState"));
        assert_eq!(graph.name_from_index(6), None);
        assert_eq!(graph.name_from_index(7), None);
    }

    #[test]
    fn test_name_index_bounds() {
        let reader = MockMemoryBuilder::new().build();
        let handle = valid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        assert_eq!(graph.name_from_index(-1), None);
        assert_eq!(graph.name_from_index(500_001), None);
        assert_eq!(reader.read_count(), 0);
    }

    #[test]
    fn test_name_without_terminator_uses_full_window() {
        let builder = MockMemoryBuilder::new().write_u64(NAMES, ENTRY);
        let reader = name_entry(builder, ENTRY, &[b'a'; 256]).build();
        let handle = valid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        assert_eq!(graph.name_from_index(0).map(|s| s.len()), Some(256));
    }

    #[test]
    fn test_object_at() {
        let reader = MockMemoryBuilder::new()
            .write_u64(OBJECTS + 2 * 8, OBJECT)
            .zeroed(OBJECT, 0x30)
            .write_u64(OBJECT, 0x1_4100_0000)
            .write_i32(OBJECT + 0x08, 0x41)
            .write_u64(OBJECT + 0x10, 2)
            .write_u64(OBJECT + 0x18, 0x8_2000_0000)
            .write_i32(OBJECT + 0x20, 5)
            .write_u64(OBJECT + 0x28, 0x8_3000_0000)
            .write_u64(NAMES + 5 * 8, ENTRY);
        let reader = name_entry(reader, ENTRY, b"Default__Pawn\0").build();
        let handle = valid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        let header = graph.object_at(2).unwrap();
        assert_eq!(header.vtable, Address::new(0x1_4100_0000));
        assert_eq!(header.flags, 0x41);
        assert_eq!(header.internal_index, 2);
        assert_eq!(header.class, Address::new(0x8_2000_0000));
        assert_eq!(header.outer, Address::new(0x8_3000_0000));
        assert_eq!(graph.object_name(&header).as_deref(), Some("Default__Pawn"));

        assert!(graph.object_at(3).is_none());
        assert!(graph.object_at(-1).is_none());
    }

    #[test]
    fn test_tables_need_valid_roots() {
        let reader = MockMemoryBuilder::new()
            .write_u64(OBJECTS, OBJECT)
            .write_u64(NAMES, ENTRY)
            .build();
        let handle = invalid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        assert!(graph.object_at(0).is_none());
        assert!(graph.name_from_index(0).is_none());
        assert_eq!(reader.read_count(), 0);
    }
}
