//! Hexdump command implementation.
//!
//! Displays raw memory bytes from the snapshot in hexdump format.
//!
//! # Output Format
//!
//! ```text
//! 140001000: 48 65 6c 6c 6f 20 57 6f 72 6c 64 00 00 00 00 00 | Hello World.....
//! ```

use anyhow::Result;
use uegraph_core::debug::MemoryDump;

use super::hex_utils::parse_hex_address;
use super::session::{Session, SessionOptions};

/// Run the hexdump command
pub fn run(options: &SessionOptions, address: &str, size: usize) -> Result<()> {
    let address = parse_hex_address(address)?;
    let session = Session::open(options)?;
    let dump = MemoryDump::capture(&session.reader, address, size)?;

    println!("Hexdump at {} ({} bytes):", address, size);
    println!();
    print!("{}", dump);

    Ok(())
}
