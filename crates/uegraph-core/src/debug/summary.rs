use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::engine::{ResolveStatus, ResolvedAddress, RootKind};
use crate::graph::ObjectGraph;
use crate::memory::ReadMemory;

/// Root resolution and world chain state, for diagnostics
#[derive(Debug, Clone, Serialize)]
pub struct EngineSummary {
    pub base_address: String,
    pub valid: bool,
    pub roots: Vec<RootSummary>,
    pub world: Option<WorldSummary>,
}

/// One root, addresses in hex string format
#[derive(Debug, Clone, Serialize)]
pub struct RootSummary {
    pub name: String,
    pub offset: String,
    pub absolute_address: String,
    pub value: String,
    pub valid: bool,
    pub status: ResolveStatus,
}

/// World chain, present only when the world root resolved
#[derive(Debug, Clone, Serialize)]
pub struct WorldSummary {
    pub world: String,
    pub persistent_level: String,
    pub game_state: String,
    pub game_instance: String,
    pub actor_count: usize,
    pub player_count: usize,
    pub local_player_count: usize,
}

impl RootSummary {
    fn from_resolved(root: &ResolvedAddress) -> Self {
        Self {
            name: root.kind.to_string(),
            offset: format!("0x{:X}", root.offset),
            absolute_address: root.absolute_address.to_string(),
            value: root.value.to_string(),
            valid: root.is_valid(),
            status: root.status,
        }
    }
}

impl EngineSummary {
    pub fn collect<R: ReadMemory + ?Sized>(graph: &ObjectGraph<'_, R>) -> Self {
        let handle = graph.handle();
        let roots = RootKind::iter()
            .map(|kind| RootSummary::from_resolved(handle.root(kind)))
            .collect();

        let world = handle.world().get().map(|world| WorldSummary {
            world: world.to_string(),
            persistent_level: graph.persistent_level().to_string(),
            game_state: graph.game_state().to_string(),
            game_instance: graph.game_instance().to_string(),
            actor_count: graph.actors().len(),
            player_count: graph.players().len(),
            local_player_count: graph.local_players().len(),
        });

        Self {
            base_address: handle.base_address().to_string(),
            valid: handle.is_valid(),
            roots,
            world,
        }
    }

    /// Save summary to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
