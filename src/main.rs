use anyhow::Result;
use tracing::info;

use c4_console::ConsoleEngine;

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    info!("c4 starting");
    ConsoleEngine::new().run()?;
    Ok(())
}
