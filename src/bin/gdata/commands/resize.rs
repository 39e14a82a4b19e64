use anyhow::{Context, Result, bail};
use log::info;

use crate::cli::ResizeArgs;
use crate::display::{Context as DisplayContext, Progress};
use crate::io::{load_dataset, save_dataset};

const TOTAL_STEPS: u8 = 2;

pub fn run(args: ResizeArgs, ctx: DisplayContext) -> Result<()> {
    let mut data = load_dataset(&args.dataset)?;
    let output = args.output.as_deref().unwrap_or(&args.dataset);
    let before = data.max_atom();
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Resizing atom axis");
    let after = match (args.minimise, args.max_atom) {
        (true, _) => match data.minimise() {
            Some(bound) => bound,
            None => bail!("{} holds no records to minimise", args.dataset.display()),
        },
        (false, Some(max_atom)) => {
            data.change_max_atom(max_atom)
                .with_context(|| format!("Cannot resize to max_atom {max_atom}"))?;
            max_atom
        }
        (false, None) => bail!("Pass --max-atom or --minimise"),
    };
    info!("max_atom {before} -> {after}");
    progress.complete_step("Resizing atom axis", &[format!("max_atom {before} → {after}")]);

    progress.step("Saving dataset");
    save_dataset(&data, output)?;
    progress.complete_step("Saving dataset", &[output.display().to_string()]);

    progress.finish("Resize complete");
    Ok(())
}
