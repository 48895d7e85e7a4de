use std::path::PathBuf;

use clap::Parser;

use crate::emitter::ImageFormat;

#[derive(Debug, Parser)]
#[command(name = "Microcode Compiler")]
#[command(version)]
#[command(about = "Compiles an instruction set description into microcode ROM images", long_about = None)]
pub(crate) struct Cli {
    /// Instruction set description (TOML)
    #[arg(short, long, default_value = "microcode.toml")]
    pub(crate) config: PathBuf,

    /// Directory the ROM images are written to
    #[arg(short, long, default_value = ".")]
    pub(crate) output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = ImageFormat::Binary)]
    pub(crate) format: ImageFormat,

    /// Validate and compile without writing any images
    #[arg(long)]
    pub(crate) check: bool,
}
