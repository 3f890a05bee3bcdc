mod address;
mod bytes;
pub mod layout;
pub(crate) mod reader;
pub mod snapshot;

// Mock memory reader for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use address::Address;
pub use bytes::ByteBuffer;
pub use reader::ReadMemory;
pub use snapshot::{Snapshot, SnapshotModule, SnapshotRegion, SnapshotReader};

// Re-export mock for convenient access in tests
#[doc(hidden)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
