use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod display;
mod keymap;
mod run;

/// A Chip-8 virtual machine with an SDL2 display.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Path to the ROM image to execute
    rom: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    run::run(args.rom)
}
