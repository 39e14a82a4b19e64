use anyhow::{Context, Result, bail};
use log::warn;

use gdata::io::Format;
use gdata::{BatchReport, ChargeType, Dataset};

use crate::cli::ReadArgs;
use crate::display::{Context as DisplayContext, Progress, print_batch_report, print_dataset_summary};
use crate::io::{holds_dataset, infer_dir_format, infer_file_format, load_dataset, save_dataset};
use crate::util::convert;

const TOTAL_STEPS: u8 = 3;

pub fn run(args: ReadArgs, ctx: DisplayContext) -> Result<()> {
    let format = resolve_format(&args)?;
    let options = convert::read_options(&args.parse);
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Preparing dataset");
    let mut data = prepare_dataset(&args)?;
    progress.complete_step(
        "Preparing dataset",
        &[format!(
            "{} records, max_atom {}, {} charges",
            data.len(),
            data.max_atom(),
            data.charge_type()
        )],
    );

    progress.step(&format!("Reading {format} input"));
    let before = data.len();
    let report = if args.input.is_dir() {
        Some(data.read_dir(&args.input, format, &options)?)
    } else {
        data.read_file(&args.input, format, &options)
            .with_context(|| format!("Failed to read {}", args.input.display()))?;
        None
    };
    if data.len() == before {
        bail!("No records could be read from {}", args.input.display());
    }
    data.pad_zeros();
    if args.minimise {
        data.minimise();
    }
    progress.complete_step(
        &format!("Reading {format} input"),
        &read_details(&data, before, report.as_ref()),
    );

    progress.step("Saving dataset");
    save_dataset(&data, &args.output)?;
    progress.complete_step(
        "Saving dataset",
        &[format!("{}", args.output.display())],
    );

    progress.finish("Read complete");

    if ctx.interactive {
        if let Some(report) = &report {
            print_batch_report(report);
        }
        print_dataset_summary(&args.output, &data);
    }
    Ok(())
}

fn resolve_format(args: &ReadArgs) -> Result<Format> {
    if let Some(format) = args.parse.format {
        return Ok(convert::format(format));
    }
    if args.input.is_dir() {
        return infer_dir_format(&args.input);
    }
    infer_file_format(&args.input).with_context(|| {
        format!(
            "Cannot infer the format of {}; pass --format",
            args.input.display()
        )
    })
}

fn prepare_dataset(args: &ReadArgs) -> Result<Dataset> {
    let requested_charge = args.dataset.charge_type.map(convert::charge_type);

    if !holds_dataset(&args.output) {
        let max_atom = args.dataset.max_atom.unwrap_or(Dataset::DEFAULT_MAX_ATOM);
        return Dataset::new(max_atom, requested_charge.unwrap_or_default())
            .context("Invalid dataset options");
    }
    if !args.append {
        bail!(
            "{} already holds a dataset; pass --append to add to it",
            args.output.display()
        );
    }

    let mut data = load_dataset(&args.output)?;
    check_charge_type(data.charge_type(), requested_charge)?;
    if let Some(max_atom) = args.dataset.max_atom {
        if max_atom < data.max_atom() {
            warn!(
                "keeping max_atom {} of the existing dataset (requested {max_atom})",
                data.max_atom()
            );
        } else {
            data.change_max_atom(max_atom)?;
        }
    }
    Ok(data)
}

fn check_charge_type(existing: ChargeType, requested: Option<ChargeType>) -> Result<()> {
    match requested {
        Some(requested) if requested != existing => bail!(
            "The existing dataset holds {existing} charges, not {requested}"
        ),
        _ => Ok(()),
    }
}

fn read_details(data: &Dataset, before: usize, report: Option<&BatchReport>) -> Vec<String> {
    let mut details = vec![format!("{} new records", data.len() - before)];
    if let Some(report) = report.filter(|r| r.failed() > 0) {
        details.push(format!("{} of {} files skipped", report.failed(), report.total()));
    }
    details.push(format!("max_atom {}", data.max_atom()));
    details
}
