use anyhow::{Context, Result, bail};

use crate::cli::ExportArgs;
use crate::display::{Context as DisplayContext, Progress};
use crate::io::load_dataset;

const TOTAL_STEPS: u8 = 1;

pub fn run(args: ExportArgs, ctx: DisplayContext) -> Result<()> {
    let data = load_dataset(&args.dataset)?;
    if data.structures().is_none() {
        bail!("{} holds no structures to export", args.dataset.display());
    }

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);
    progress.step("Writing xyz files");
    let report = data
        .export_xyz(&args.output, !args.no_header)
        .with_context(|| format!("Failed to export to {}", args.output.display()))?;

    let mut details = vec![format!("{} files in {}", report.written, args.output.display())];
    details.extend(
        report
            .failures
            .iter()
            .map(|f| format!("failed: {} ({})", f.path.display(), f.error)),
    );
    progress.complete_step("Writing xyz files", &details);

    if report.written == 0 {
        bail!("None of the {} structures could be written", report.failures.len());
    }
    progress.finish("Export complete");
    Ok(())
}
