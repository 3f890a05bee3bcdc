//! Object graph navigation from the resolved roots.
//!
//! Every accessor here is total: a null input, a failed read or an
//! implausible array yields a null address, an empty vector or a zero
//! vector. Nothing is cached, so the same call against unchanged memory
//! returns the same result.

mod entity;
mod tables;

#[cfg(test)]
pub(crate) mod test_support;

pub use entity::Movement;

use tracing::debug;

use crate::array::{ArrayKind, read_pointer_array};
use crate::engine::EngineHandle;
use crate::memory::{Address, ReadMemory};
use crate::offset::EngineLayout;

/// Read-only view of the foreign engine's object graph.
pub struct ObjectGraph<'a, R: ReadMemory + ?Sized> {
    reader: &'a R,
    handle: &'a EngineHandle,
    layout: EngineLayout,
}

impl<'a, R: ReadMemory + ?Sized> ObjectGraph<'a, R> {
    pub fn new(reader: &'a R, handle: &'a EngineHandle, layout: EngineLayout) -> Self {
        Self {
            reader,
            handle,
            layout,
        }
    }

    pub fn reader(&self) -> &R {
        self.reader
    }

    pub fn handle(&self) -> &EngineHandle {
        self.handle
    }

    pub fn layout(&self) -> &EngineLayout {
        &self.layout
    }

    /// Follow the pointer stored `offset` bytes into `from`.
    fn follow(&self, from: Address, offset: u64) -> Address {
        if from.is_null() {
            return Address::NULL;
        }
        let at = from.field(offset);
        match self.reader.read_u64(at.as_u64()) {
            Ok(value) => Address::new(value),
            Err(e) => {
                debug!("pointer read at {} failed: {}", at, e);
                Address::NULL
            }
        }
    }

    /// The world object, or null when the world root did not resolve.
    pub fn world(&self) -> Address {
        self.handle.world().get().unwrap_or(Address::NULL)
    }

    pub fn persistent_level(&self) -> Address {
        self.follow(self.world(), self.layout.world.persistent_level)
    }

    pub fn game_state(&self) -> Address {
        self.follow(self.world(), self.layout.world.game_state)
    }

    pub fn game_instance(&self) -> Address {
        self.follow(self.world(), self.layout.world.owning_game_instance)
    }

    /// Actors of the persistent level, null entries included.
    pub fn actors(&self) -> Vec<Address> {
        read_pointer_array(
            self.reader,
            self.persistent_level(),
            self.layout.level.actors,
            ArrayKind::LevelActors,
        )
    }

    /// Player states listed by the game state.
    pub fn players(&self) -> Vec<Address> {
        read_pointer_array(
            self.reader,
            self.game_state(),
            self.layout.game_state.player_array,
            ArrayKind::Players,
        )
    }

    pub fn local_players(&self) -> Vec<Address> {
        read_pointer_array(
            self.reader,
            self.game_instance(),
            self.layout.game_instance.local_players,
            ArrayKind::LocalPlayers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::memory::{MockMemoryBuilder, MockMemoryReader};

    const LEVEL: u64 = 0x3_0000_0000;
    const GAME_STATE: u64 = 0x3_1000_0000;
    const GAME_INSTANCE: u64 = 0x3_2000_0000;
    const ACTOR_DATA: u64 = 0x3_3000_0000;
    const PLAYER_DATA: u64 = 0x3_4000_0000;
    const LOCAL_DATA: u64 = 0x3_5000_0000;

    fn world_reader() -> MockMemoryReader {
        MockMemoryBuilder::new()
            .write_u64(WORLD + 0x30, LEVEL)
            .write_u64(WORLD + 0x120, GAME_STATE)
            .write_u64(WORLD + 0x180, GAME_INSTANCE)
            .write_array_descriptor(LEVEL + 0x98, ACTOR_DATA, 3, 4)
            .write_u64s(ACTOR_DATA, &[0x4_0000_0000, 0, 0x4_0000_1000])
            .write_array_descriptor(GAME_STATE + 0x238, PLAYER_DATA, 2, 2)
            .write_u64s(PLAYER_DATA, &[0x5_0000_0000, 0x5_0000_1000])
            .write_array_descriptor(GAME_INSTANCE + 0x38, LOCAL_DATA, 1, 1)
            .write_u64s(LOCAL_DATA, &[0x6_0000_0000])
            .build()
    }

    #[test]
    fn test_world_chain() {
        let reader = world_reader();
        let handle = valid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        assert_eq!(graph.world(), Address::new(WORLD));
        assert_eq!(graph.persistent_level(), Address::new(LEVEL));
        assert_eq!(graph.game_state(), Address::new(GAME_STATE));
        assert_eq!(graph.game_instance(), Address::new(GAME_INSTANCE));
    }

    #[test]
    fn test_collections() {
        let reader = world_reader();
        let handle = valid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        assert_eq!(
            graph.actors(),
            vec![
                Address::new(0x4_0000_0000),
                Address::NULL,
                Address::new(0x4_0000_1000)
            ]
        );
        assert_eq!(graph.players().len(), 2);
        assert_eq!(graph.local_players(), vec![Address::new(0x6_0000_0000)]);
    }

    #[test]
    fn test_invalid_world_reads_nothing() {
        let reader = world_reader();
        let handle = invalid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        assert!(graph.world().is_null());
        assert!(graph.persistent_level().is_null());
        assert!(graph.game_state().is_null());
        assert!(graph.game_instance().is_null());
        assert!(graph.actors().is_empty());
        assert!(graph.players().is_empty());
        assert!(graph.local_players().is_empty());
        assert_eq!(reader.read_count(), 0);
    }

    #[test]
    fn test_unreadable_world_fields_are_null() {
        let reader = MockMemoryBuilder::new().build();
        let handle = valid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        assert!(graph.persistent_level().is_null());
        assert!(graph.actors().is_empty());
    }

    #[test]
    fn test_player_count_over_bound_is_empty() {
        let reader = MockMemoryBuilder::new()
            .write_u64(WORLD + 0x120, GAME_STATE)
            .write_array_descriptor(GAME_STATE + 0x238, PLAYER_DATA, 101, 128)
            .build();
        let handle = valid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        assert!(graph.players().is_empty());
    }

    #[test]
    fn test_repeated_calls_agree() {
        let reader = world_reader();
        let handle = valid_handle();
        let graph = ObjectGraph::new(&reader, &handle, EngineLayout::default());

        assert_eq!(graph.actors(), graph.actors());
        assert_eq!(graph.players(), graph.players());
        assert_eq!(graph.game_instance(), graph.game_instance());
    }

    #[test]
    fn test_custom_layout_is_honored() {
        let mut layout = EngineLayout::default();
        layout.world.persistent_level = 0x40;
        let reader = MockMemoryBuilder::new()
            .write_u64(WORLD + 0x40, LEVEL)
            .build();
        let handle = valid_handle();
        let graph = ObjectGraph::new(&reader, &handle, layout);

        assert_eq!(graph.persistent_level(), Address::new(LEVEL));
    }
}
