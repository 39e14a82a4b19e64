use std::io::{self, Write};

use anyhow::Result;

use crate::cli::InfoArgs;
use crate::display::{Context as DisplayContext, print_dataset_summary, print_element_counts};
use crate::io::load_dataset;
use crate::util::text::name_list;

pub fn run(args: InfoArgs, ctx: DisplayContext) -> Result<()> {
    let data = load_dataset(&args.dataset)?;

    if ctx.interactive {
        print_dataset_summary(&args.dataset, &data);
        print_element_counts(&data);
    }

    let shape = data.data_shape().as_array();
    let mut stdout = io::stdout().lock();
    writeln!(
        stdout,
        "records={} max_atom={} charge_type={} mi_coor={} shape={:?}",
        data.len(),
        data.max_atom(),
        data.charge_type(),
        data.mi_coor(),
        shape
    )?;

    if let Some(norms) = data.dipole_norms() {
        if let Some(mean) = norms.mean() {
            writeln!(stdout, "mean_dipole_norm={mean:.4}")?;
        }
    }

    if args.names {
        if let Some(names) = data.names() {
            for name in names {
                writeln!(stdout, "{name}")?;
            }
        }
    } else if ctx.interactive {
        if let Some(names) = data.names() {
            writeln!(stdout, "names: {}", name_list(names, 8))?;
        }
    }
    Ok(())
}
