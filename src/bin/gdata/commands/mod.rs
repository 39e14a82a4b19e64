mod export;
mod info;
mod merge;
mod mi_coor;
mod read;
mod resize;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Read(args) => read::run(args, ctx),
        Command::Info(args) => info::run(args, ctx),
        Command::Merge(args) => merge::run(args, ctx),
        Command::Resize(args) => resize::run(args, ctx),
        Command::ExportXyz(args) => export::run(args, ctx),
        Command::MiCoor(args) => mi_coor::run(args, ctx),
    }
}
