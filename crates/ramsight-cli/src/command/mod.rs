use clap::{Parser, Subcommand};

use self::{compare::CompareArg, decode::DecodeArg};

mod compare;
mod decode;
mod games;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// List supported games and their extraction modes
    Games,
    /// Decode a RAM trace into per-frame objects or raw fields
    Decode(#[clap(flatten)] DecodeArg),
    /// Match RAM-decoded objects against vision detections
    Compare(#[clap(flatten)] CompareArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Games => games::run(),
        Mode::Decode(arg) => decode::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
    }
    Ok(())
}
