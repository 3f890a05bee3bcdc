use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::memory::layout::dump::BYTES_PER_ROW;
use crate::memory::{Address, ReadMemory};

/// Raw bytes captured for a hex dump
#[derive(Debug, Clone, Serialize)]
pub struct MemoryDump {
    pub address: Address,
    pub bytes: Vec<u8>,
}

impl MemoryDump {
    pub fn capture<R: ReadMemory + ?Sized>(
        reader: &R,
        address: Address,
        size: usize,
    ) -> Result<Self> {
        let bytes = reader.read_bytes(address.as_u64(), size)?;
        Ok(Self { address, bytes })
    }

    /// Formatted dump lines, 16 bytes each.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.bytes
            .chunks(BYTES_PER_ROW)
            .enumerate()
            .map(|(i, chunk)| {
                let row = self.address.field((i * BYTES_PER_ROW) as u64);
                format_row(row.as_u64(), chunk)
            })
    }
}

fn format_row(address: u64, chunk: &[u8]) -> String {
    let hex = chunk
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ");
    let ascii: String = chunk
        .iter()
        .map(|&b| {
            if (32..=126).contains(&b) {
                b as char
            } else {
                '.'
            }
        })
        .collect();
    format!(
        "{:08x}: {:<width$} | {}",
        address,
        hex,
        ascii,
        width = BYTES_PER_ROW * 3 - 1
    )
}

impl fmt::Display for MemoryDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
