mod cli;
mod compiler;
mod config;
mod ds;
mod emitter;
mod error;
mod instruction_set;
mod registry;
mod resolver;
mod rom;

use std::path::PathBuf;

use clap::Parser;
use cli::Cli;
use config::ConfigDocument;
use instruction_set::InstructionSet;
use log::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    run(&cli)?;
    Ok(())
}

/// Loads, compiles and, unless checking, emits every ROM image
fn run(cli: &Cli) -> error::Result<Vec<PathBuf>> {
    let doc = ConfigDocument::load(&cli.config)?;
    let mut set = InstructionSet::from_document(&doc)?;
    compiler::compile(&mut set)?;

    if cli.check {
        info!("{} is valid, no images written", cli.config.display());
        return Ok(Vec::new());
    }
    emitter::emit(&set.roms, &cli.output, cli.format)
}
