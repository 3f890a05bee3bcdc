//! Loading the snapshot, offsets and layout shared by every memory command.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};
use uegraph_core::{
    EngineHandle, EngineLayout, ObjectGraph, RootOffsets, ScanWindow, SnapshotReader,
};

/// Global options naming the inputs of a session
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub snapshot: Option<PathBuf>,
    pub offsets: Option<PathBuf>,
    pub layout: Option<PathBuf>,
    pub process: Option<String>,
}

/// A loaded snapshot with the offsets and layout to read it with
pub struct Session {
    pub reader: SnapshotReader,
    pub offsets: RootOffsets,
    pub layout: EngineLayout,
}

impl Session {
    pub fn open(options: &SessionOptions) -> Result<Self> {
        let Some(snapshot) = &options.snapshot else {
            bail!("No snapshot given; pass --snapshot <manifest> or set UEGRAPH_SNAPSHOT");
        };
        let reader = SnapshotReader::load(snapshot)
            .with_context(|| format!("Failed to load snapshot {}", snapshot.display()))?;

        let mut offsets = match &options.offsets {
            Some(path) => {
                let offsets = uegraph_core::load_offsets(path)
                    .with_context(|| format!("Failed to load offsets {}", path.display()))?;
                info!("Loaded offsets version: {}", offsets.version);
                offsets
            }
            None => RootOffsets::default(),
        };
        if let Some(process) = &options.process {
            offsets.process_name = process.clone();
        }
        if !offsets.is_valid() {
            warn!("Root offsets look incomplete: {:?}", offsets);
        }

        let layout = match &options.layout {
            Some(path) => uegraph_core::load_layout(path)
                .with_context(|| format!("Failed to load layout {}", path.display()))?,
            None => EngineLayout::default(),
        };

        Ok(Self {
            reader,
            offsets,
            layout,
        })
    }

    pub fn resolve(&self) -> Result<EngineHandle> {
        let handle = EngineHandle::resolve(
            &self.reader,
            &self.offsets,
            &self.layout,
            &ScanWindow::default(),
        )?;
        Ok(handle)
    }

    pub fn graph<'a>(&'a self, handle: &'a EngineHandle) -> ObjectGraph<'a, SnapshotReader> {
        ObjectGraph::new(&self.reader, handle, self.layout)
    }
}
