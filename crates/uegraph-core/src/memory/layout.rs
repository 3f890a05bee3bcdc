//! Memory layout constants for the foreign engine's data structures
//!
//! This module centralizes every byte offset, bound and heuristic threshold
//! used to walk the object graph. Values are the defaults for the currently
//! known build; per-build overrides go through
//! [`EngineLayout`](crate::offset::EngineLayout) and
//! [`RootOffsets`](crate::offset::RootOffsets) rather than edits here.
//!
//! Most structural offsets below were never confirmed against a live build.
//! Nothing in the crate assumes they are right: a wrong offset surfaces as
//! "not found" or an empty sequence, never as a crash.

/// Size of a pointer in the foreign process (64-bit target)
pub const POINTER_SIZE: usize = 8;

/// Plausibility range for values that claim to be pointers
pub mod pointer {
    /// Values at or below this are small integers or low guard pages
    pub const MIN_PLAUSIBLE: u64 = 0x1000_0000;
    /// Values at or above this are outside the 47-bit userspace range
    pub const MAX_PLAUSIBLE: u64 = 0x7FFF_FFFF_FFFF;
}

/// Static offsets (from module base) of the three root globals
pub mod roots {
    /// Executable whose base address the root offsets are relative to
    pub const PROCESS_NAME: &str = "TL.exe";

    /// GObjects: the global object table
    pub const OBJECTS: u64 = 0x998_C9B8;
    /// GNames: the global name table
    pub const NAMES: u64 = 0x995_3B68;
    /// GWorld: the current world
    pub const WORLD: u64 = 0x967_6F30;
}

/// Fallback scan around a root offset whose direct read came back zero
pub mod scan {
    use super::POINTER_SIZE;

    /// Bytes scanned on each side of the expected address (64 KiB)
    pub const WINDOW_RADIUS: u64 = 0x10000;
    /// Distance between candidates
    pub const STEP: u64 = POINTER_SIZE as u64;
}

/// UWorld
pub mod world {
    pub const PERSISTENT_LEVEL: u64 = 0x30;
    pub const GAME_STATE: u64 = 0x120;
    pub const OWNING_GAME_INSTANCE: u64 = 0x180;
}

/// ULevel
pub mod level {
    pub const ACTORS: u64 = 0x98;
}

/// AGameStateBase
pub mod game_state {
    pub const PLAYER_ARRAY: u64 = 0x238;
}

/// UGameInstance
pub mod game_instance {
    pub const LOCAL_PLAYERS: u64 = 0x38;
}

/// AActor
pub mod actor {
    pub const ROOT_COMPONENT: u64 = 0x178;
}

/// APawn (extends AActor)
pub mod pawn {
    pub const CONTROLLER: u64 = 0x230;
    pub const PLAYER_STATE: u64 = 0x240;
}

/// APlayerState
pub mod player_state {
    /// FString (wide-character array descriptor)
    pub const PLAYER_NAME: u64 = 0x300;
    pub const TEAM_ID: u64 = 0x340;
}

/// USceneComponent
pub mod scene_component {
    pub const PHYSICS_VOLUME: u64 = 0xB8;
    pub const ATTACH_PARENT: u64 = 0xC0;
    /// FName
    pub const ATTACH_SOCKET_NAME: u64 = 0xC8;
    /// Array descriptor of child components
    pub const ATTACH_CHILDREN: u64 = 0xD0;
    /// FVector
    pub const RELATIVE_LOCATION: u64 = 0x11C;
    /// FRotator (pitch, yaw, roll)
    pub const RELATIVE_ROTATION: u64 = 0x128;
    /// FVector
    pub const RELATIVE_SCALE: u64 = 0x134;
    /// FVector
    pub const COMPONENT_VELOCITY: u64 = 0x140;
    /// FTransform
    pub const COMPONENT_TO_WORLD: u64 = 0x210;
}

/// Dynamic array descriptor: { data: ptr, count: i32, capacity: i32 }
pub mod array {
    pub const DATA: usize = 0;
    pub const COUNT: usize = 8;
    pub const CAPACITY: usize = 12;
    pub const DESCRIPTOR_SIZE: usize = 16;
}

/// Plausible element counts per array kind
pub mod bounds {
    pub const MAX_LEVEL_ACTORS: i32 = 10_000;
    pub const MAX_PLAYERS: i32 = 100;
    pub const MAX_LOCAL_PLAYERS: i32 = 4;
    pub const MAX_NAME_CHARS: i32 = 64;
}

/// FTransform: rotation quaternion, translation, scale
pub mod transform {
    pub const ROTATION: usize = 0;
    pub const TRANSLATION: usize = 0x10;
    pub const SCALE: usize = 0x1C;
    pub const SIZE: usize = 0x28;
}

/// UObject header
pub mod object {
    pub const VTABLE: usize = 0;
    pub const FLAGS: usize = 0x08;
    pub const INTERNAL_INDEX: usize = 0x10;
    pub const CLASS: usize = 0x18;
    /// FName { comparison_index: i32, number: i32 }
    pub const NAME: usize = 0x20;
    pub const OUTER: usize = 0x28;
    pub const SIZE: usize = 0x30;
}

/// GNames entry lookup
pub mod names {
    /// Highest index accepted before the lookup is rejected as corrupt
    pub const MAX_INDEX: i32 = 500_000;
    /// Offset of the inline string inside a name entry
    pub const ENTRY_STRING: u64 = 0x10;
    /// Bytes read for the inline string
    pub const MAX_LEN: usize = 256;
}

/// Movement heuristics
pub mod motion {
    /// Squared speed above which an actor counts as moving
    pub const MOVING_SPEED_SQUARED: f32 = 1.0;
}

/// Diagnostic dump defaults
pub mod dump {
    pub const DEFAULT_SIZE: usize = 0x100;
    pub const BYTES_PER_ROW: usize = 16;
}
