use gdata::ChargeType;
use gdata::io::{Format, ReadOptions};

use crate::cli;

pub fn format(format: cli::InputFormat) -> Format {
    match format {
        cli::InputFormat::Xyz => Format::Xyz,
        cli::InputFormat::Zmat => Format::Zmat,
        cli::InputFormat::Log => Format::Log,
        cli::InputFormat::Mol => Format::Mol,
        cli::InputFormat::Mol2 => Format::Mol2,
    }
}

pub fn charge_type(scheme: cli::ChargeScheme) -> ChargeType {
    match scheme {
        cli::ChargeScheme::Mulliken => ChargeType::Mulliken,
        cli::ChargeScheme::Hirshfeld => ChargeType::Hirshfeld,
    }
}

pub fn read_options(options: &cli::ParseOptions) -> ReadOptions {
    ReadOptions {
        xyz_header: !options.no_xyz_header,
        validate_log: !options.no_validate_log,
    }
}
