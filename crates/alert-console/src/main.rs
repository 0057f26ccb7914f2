//! Conveyor Alert Console - Main Entry Point
//!
//! Usage: `conveyor-console [--config <path>]`

use std::io;
use std::path::PathBuf;

use alert_console::{init_logging, Console, HELP};
use anyhow::{bail, Context};
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut config_path: Option<PathBuf> = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => {
                println!("Usage: conveyor-console [--config <path>]\n\n{}", HELP);
                return Ok(());
            }
            other => bail!("unexpected argument '{}'", other),
        }
    }

    info!("=== Conveyor Alert Console v{} ===", env!("CARGO_PKG_VERSION"));

    let mut console = Console::sample(config_path.as_deref()).context("failed to start console")?;
    let stdin = io::stdin();
    console.run(stdin.lock(), io::stdout().lock())?;

    Ok(())
}
