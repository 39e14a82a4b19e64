use anyhow::{Context, Result};
use log::warn;

use crate::cli::MiCoorArgs;
use crate::display::{Context as DisplayContext, Progress};
use crate::io::{load_dataset, save_dataset};

const TOTAL_STEPS: u8 = 2;

pub fn run(args: MiCoorArgs, ctx: DisplayContext) -> Result<()> {
    let mut data = load_dataset(&args.dataset)?;
    let output = args.output.as_deref().unwrap_or(&args.dataset);
    if data.mi_coor() {
        warn!(
            "{} is already in principal-axis coordinates",
            args.dataset.display()
        );
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);
    progress.step("Rotating to principal axes");
    data.convert_to_mi_coordinates()
        .context("Principal-axis conversion failed")?;
    progress.complete_step(
        "Rotating to principal axes",
        &[format!("{} structures", data.data_shape().structure)],
    );

    progress.step("Saving dataset");
    save_dataset(&data, output)?;
    progress.complete_step("Saving dataset", &[output.display().to_string()]);

    progress.finish("Conversion complete");
    Ok(())
}
