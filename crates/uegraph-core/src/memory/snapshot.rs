//! File-backed memory oracle.
//!
//! A snapshot is a JSON manifest listing module base addresses and captured
//! memory regions, each region stored as a raw binary file next to the
//! manifest:
//!
//! ```json
//! {
//!   "modules": [{ "name": "TL.exe", "base": 5368709120 }],
//!   "regions": [{ "address": 5368709120, "file": "region_0_140000000.bin" }]
//! }
//! ```
//!
//! Capturing the regions is the job of whatever channel has access to the
//! live process; this module only replays them.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::memory::ReadMemory;

/// Snapshot manifest
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub modules: Vec<SnapshotModule>,
    #[serde(default)]
    pub regions: Vec<SnapshotRegion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotModule {
    pub name: String,
    pub base: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRegion {
    pub address: u64,
    /// Path of the raw bytes, relative to the manifest
    pub file: PathBuf,
}

/// Memory reader replaying a captured snapshot
#[derive(Debug, Default)]
pub struct SnapshotReader {
    modules: HashMap<String, u64>,
    /// Sorted by start address, non-overlapping
    regions: Vec<(u64, Vec<u8>)>,
}

impl SnapshotReader {
    /// Build a reader from in-memory parts.
    pub fn from_parts(modules: HashMap<String, u64>, mut regions: Vec<(u64, Vec<u8>)>) -> Result<Self> {
        regions.sort_by_key(|(address, _)| *address);

        for pair in regions.windows(2) {
            let (start, data) = &pair[0];
            let (next, _) = &pair[1];
            let end = start
                .checked_add(data.len() as u64)
                .ok_or_else(|| Error::InvalidSnapshot(format!("region at 0x{:X} wraps", start)))?;
            if end > *next {
                return Err(Error::InvalidSnapshot(format!(
                    "region at 0x{:X} overlaps region at 0x{:X}",
                    start, next
                )));
            }
        }

        Ok(Self { modules, regions })
    }

    /// Load a snapshot from its manifest file.
    pub fn load<P: AsRef<Path>>(manifest_path: P) -> Result<Self> {
        let manifest_path = manifest_path.as_ref();
        let content = fs::read_to_string(manifest_path)?;
        let manifest: Snapshot = serde_json::from_str(&content)?;
        let dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));

        let modules = manifest
            .modules
            .into_iter()
            .map(|m| (m.name, m.base))
            .collect();

        let mut regions = Vec::with_capacity(manifest.regions.len());
        for region in manifest.regions {
            let data = fs::read(dir.join(&region.file))?;
            debug!(
                "Loaded region 0x{:X} ({} bytes) from {}",
                region.address,
                data.len(),
                region.file.display()
            );
            regions.push((region.address, data));
        }

        let reader = Self::from_parts(modules, regions)?;
        info!(
            "Loaded snapshot {} ({} modules, {} regions, {} bytes)",
            manifest_path.display(),
            reader.modules.len(),
            reader.regions.len(),
            reader.total_bytes()
        );
        Ok(reader)
    }

    /// Write the manifest and one binary file per region.
    pub fn save<P: AsRef<Path>>(&self, manifest_path: P) -> Result<()> {
        let manifest_path = manifest_path.as_ref();
        let dir = manifest_path.parent().unwrap_or_else(|| Path::new("."));

        let mut manifest = Snapshot::default();
        let mut names: Vec<_> = self.modules.iter().collect();
        names.sort();
        for (name, base) in names {
            manifest.modules.push(SnapshotModule {
                name: name.clone(),
                base: *base,
            });
        }

        for (i, (address, data)) in self.regions.iter().enumerate() {
            let file = PathBuf::from(format!("region_{}_{:x}.bin", i, address));
            fs::write(dir.join(&file), data)?;
            manifest.regions.push(SnapshotRegion {
                address: *address,
                file,
            });
        }

        fs::write(manifest_path, serde_json::to_string_pretty(&manifest)?)?;
        Ok(())
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn total_bytes(&self) -> usize {
        self.regions.iter().map(|(_, data)| data.len()).sum()
    }

    fn find_region(&self, address: u64) -> Option<&(u64, Vec<u8>)> {
        let idx = self.regions.partition_point(|(start, _)| *start <= address);
        idx.checked_sub(1).map(|i| &self.regions[i])
    }
}

impl ReadMemory for SnapshotReader {
    fn read_bytes(&self, address: u64, size: usize) -> Result<Vec<u8>> {
        let (start, data) = self
            .find_region(address)
            .ok_or_else(|| Error::read_failed(address, "no captured region"))?;

        let offset = (address - start) as usize;
        offset
            .checked_add(size)
            .and_then(|end| data.get(offset..end))
            .map(|bytes| bytes.to_vec())
            .ok_or_else(|| Error::read_failed(address, "read crosses end of captured region"))
    }

    fn base_address(&self, process_name: &str) -> Result<u64> {
        self.modules
            .get(process_name)
            .copied()
            .ok_or_else(|| Error::ProcessNotFound(process_name.to_string()))
    }
}
