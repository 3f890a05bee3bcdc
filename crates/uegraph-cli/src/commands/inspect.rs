//! Inspect command implementation.
//!
//! Resolves the roots, then walks the world: the persistent level and its
//! actors, the game state and its players, the game instance and its local
//! players. Ends with hex dumps around the world and the level.

use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use tracing::{info, warn};
use uegraph_core::debug::MemoryDump;
use uegraph_core::memory::layout::dump;
use uegraph_core::{Address, EngineHandle, ObjectGraph, ReadMemory, ResolvedAddress, RootKind};

use super::session::{Session, SessionOptions};

/// Run the inspect command
pub fn run(options: &SessionOptions, max_actors: usize, save_offsets: Option<&Path>) -> Result<()> {
    let session = Session::open(options)?;
    let handle = session.resolve()?;

    print_roots(&handle);

    if let Some(path) = save_offsets {
        uegraph_core::save_offsets(path, &handle.corrected_offsets(&session.offsets))?;
        info!("Corrected offsets written to {}", path.display());
    }

    let graph = session.graph(&handle);

    if !handle.world().is_valid() {
        warn!("World root did not resolve; dumping around its slot");
        print_dump(&session.reader, "GWorld slot", handle.world().absolute_address);
        return Ok(());
    }

    print_level(&graph, max_actors);
    print_players(&graph);
    print_local_players(&graph);

    print_dump(&session.reader, "World", graph.world());
    print_dump(&session.reader, "Persistent level", graph.persistent_level());

    Ok(())
}

fn yes_no(valid: bool) -> String {
    if valid {
        "Yes".green().to_string()
    } else {
        "No".red().to_string()
    }
}

fn print_root(root: &ResolvedAddress) {
    println!("{}:", root.kind);
    println!("  Offset: 0x{:X}", root.offset);
    println!("  Address: {}", root.absolute_address);
    println!("  Value: {}", root.value);
    println!("  Valid: {}", yes_no(root.is_valid()));
}

fn print_roots(handle: &EngineHandle) {
    println!("Base address: {}", handle.base_address());
    for kind in [RootKind::Objects, RootKind::Names, RootKind::World] {
        print_root(handle.root(kind));
    }
    println!("All roots valid: {}", yes_no(handle.is_valid()));
    println!();
}

fn print_level<R: ReadMemory + ?Sized>(graph: &ObjectGraph<'_, R>, max_actors: usize) {
    let level = graph.persistent_level();
    println!("Persistent level: {}", level);
    if level.is_null() {
        println!();
        return;
    }

    let actors = graph.actors();
    println!("Actors: {}", actors.len());
    for (i, actor) in actors.iter().take(max_actors).enumerate() {
        if actor.is_null() {
            println!("  [{}] (null)", i);
            continue;
        }
        let moving = if graph.is_actor_moving(*actor) {
            " (moving)"
        } else {
            ""
        };
        println!(
            "  [{}] {} at {}{}",
            i,
            actor,
            graph.actor_position(*actor),
            moving
        );
    }
    if actors.len() > max_actors {
        println!("  ... {} more", actors.len() - max_actors);
    }
    println!();
}

fn print_players<R: ReadMemory + ?Sized>(graph: &ObjectGraph<'_, R>) {
    let game_state = graph.game_state();
    println!("Game state: {}", game_state);
    if game_state.is_null() {
        println!();
        return;
    }

    let players = graph.players();
    println!("Players: {}", players.len());
    for (i, player) in players.iter().enumerate() {
        let name = graph.player_name(*player);
        let team = graph
            .player_team_id(*player)
            .map(|t| t.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!("  [{}] {} {:?} (team {})", i, player, name, team);
    }
    println!();
}

fn print_local_players<R: ReadMemory + ?Sized>(graph: &ObjectGraph<'_, R>) {
    let instance = graph.game_instance();
    println!("Game instance: {}", instance);
    if instance.is_null() {
        println!();
        return;
    }

    let local_players = graph.local_players();
    println!("Local players: {}", local_players.len());
    for (i, player) in local_players.iter().enumerate() {
        println!("  [{}] {}", i, player);
    }
    println!();
}

fn print_dump<R: ReadMemory + ?Sized>(reader: &R, label: &str, address: Address) {
    if address.is_null() {
        println!("{}: (null, nothing to dump)", label);
        return;
    }
    match MemoryDump::capture(reader, address, dump::DEFAULT_SIZE) {
        Ok(memory) => {
            println!("{} at {}:", label, address);
            print!("{}", memory);
            println!();
        }
        Err(e) => warn!("Failed to dump {} at {}: {}", label, address, e),
    }
}
