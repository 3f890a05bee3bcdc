//! Config command implementation.

use std::path::Path;

use anyhow::Result;
use uegraph_core::Config;

/// Run the config command
pub fn run(config: &Config, path: &Path, write: bool) -> Result<()> {
    println!("Configuration ({}):", path.display());
    println!();
    print!("{}", config);

    if write {
        config.save(path)?;
        println!();
        println!("Written to {}", path.display());
    }

    Ok(())
}
