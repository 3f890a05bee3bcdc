//! Resolve command implementation.

use std::path::Path;

use anyhow::Result;
use tracing::info;
use uegraph_core::debug::EngineSummary;

use super::session::{Session, SessionOptions};

/// Run the resolve command
pub fn run(options: &SessionOptions, output: Option<&Path>) -> Result<()> {
    let session = Session::open(options)?;
    let handle = session.resolve()?;
    let summary = EngineSummary::collect(&session.graph(&handle));

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if let Some(path) = output {
        summary.save(path)?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}
