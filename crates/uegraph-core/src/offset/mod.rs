mod collection;
mod loader;

pub use collection::*;
pub use loader::*;
