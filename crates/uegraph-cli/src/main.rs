mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uegraph_core::Config;
use uegraph_core::memory::layout::dump;

use commands::session::SessionOptions;

#[derive(Parser)]
#[command(name = "uegraph")]
#[command(about = "Unreal Engine object graph inspector")]
struct Args {
    /// Snapshot manifest to read memory from
    #[arg(short, long, global = true, env = "UEGRAPH_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Root offsets file (JSON); built-in offsets when omitted
    #[arg(long, global = true)]
    offsets: Option<PathBuf>,

    /// Structure layout file (JSON); built-in layout when omitted
    #[arg(long, global = true)]
    layout: Option<PathBuf>,

    #[arg(short, long, global = true, default_value = "config.cfg")]
    config: PathBuf,

    /// Module name to take the base address from
    #[arg(short, long, global = true)]
    process: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the roots and walk the world
    Inspect {
        /// Number of actors to list
        #[arg(long, default_value_t = 10)]
        actors: usize,

        /// Write the corrected root offsets here
        #[arg(long)]
        save_offsets: Option<PathBuf>,
    },
    /// Print the root resolution summary as JSON
    Resolve {
        /// Also write the summary to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Dump raw memory
    Hexdump {
        /// Start address (hex)
        #[arg(short, long)]
        address: String,

        /// Number of bytes
        #[arg(short = 'n', long, default_value_t = dump::DEFAULT_SIZE)]
        size: usize,
    },
    /// Report every readable field of an actor
    Actor {
        /// Actor address (hex)
        #[arg(short, long)]
        address: String,
    },
    /// Show the effective configuration
    Config {
        /// Write the effective configuration back to the config file
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("uegraph=info".parse()?))
        .init();

    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(c) => {
            info!("Loaded config from {:?}", args.config);
            c
        }
        Err(e) => {
            warn!("Failed to load config: {}, using defaults", e);
            Config::default()
        }
    };

    let session = SessionOptions {
        snapshot: args.snapshot,
        offsets: args.offsets,
        layout: args.layout,
        process: args.process,
    };

    match args.command {
        Command::Inspect {
            actors,
            save_offsets,
        } => commands::inspect::run(&session, actors, save_offsets.as_deref()),
        Command::Resolve { output } => commands::resolve::run(&session, output.as_deref()),
        Command::Hexdump { address, size } => commands::hexdump::run(&session, &address, size),
        Command::Actor { address } => commands::actor::run(&session, &address),
        Command::Config { write } => commands::config::run(&config, &args.config, write),
    }
}
