//! Actor command implementation.

use anyhow::Result;
use uegraph_core::debug::ActorReport;

use super::hex_utils::parse_hex_address;
use super::session::{Session, SessionOptions};

/// Run the actor command
pub fn run(options: &SessionOptions, address: &str) -> Result<()> {
    let actor = parse_hex_address(address)?;
    let session = Session::open(options)?;
    let handle = session.resolve()?;
    let graph = session.graph(&handle);

    print!("{}", ActorReport::collect(&graph, actor));

    Ok(())
}
