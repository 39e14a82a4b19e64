use anyhow::{Context, Result};

use crate::cli::MergeArgs;
use crate::display::{Context as DisplayContext, Progress, print_dataset_summary};
use crate::io::{load_dataset, save_dataset};

const TOTAL_STEPS: u8 = 3;

pub fn run(args: MergeArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Loading datasets");
    let left = load_dataset(&args.left)?;
    let right = load_dataset(&args.right)?;
    progress.complete_step(
        "Loading datasets",
        &[
            format!("{}: {} records", args.left.display(), left.len()),
            format!("{}: {} records", args.right.display(), right.len()),
        ],
    );

    progress.step("Merging by record name");
    let merged = gdata::merge(&left, &right).context("Merge failed")?;
    let matched = left.len() + right.len() - merged.len();
    progress.complete_step(
        "Merging by record name",
        &[
            format!("{matched} records matched"),
            format!("{} records, max_atom {}", merged.len(), merged.max_atom()),
        ],
    );

    progress.step("Saving dataset");
    save_dataset(&merged, &args.output)?;
    progress.complete_step("Saving dataset", &[args.output.display().to_string()]);

    progress.finish("Merge complete");

    if ctx.interactive {
        print_dataset_summary(&args.output, &merged);
    }
    Ok(())
}
