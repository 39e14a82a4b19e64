//! Readers for the supported quantum-chemistry input formats and the xyz writer.
//!
//! Every reader consumes a [`BufRead`] source and returns a [`Molecule`] of
//! natural length. Padding to a dataset's `max_atom` happens later, in
//! [`Dataset`](crate::Dataset).

use crate::model::{molecule::Molecule, types::ChargeType};
use std::fmt;
use std::io::{BufRead, Cursor};
use std::path::Path;

pub mod error;
pub mod util;

pub mod xyz {
    pub mod reader;
    pub mod writer;
}

pub mod zmat {
    pub mod reader;
}

pub mod log {
    pub mod reader;
}

pub mod mol {
    pub mod reader;
}

pub mod mol2 {
    pub mod reader;
}

pub use error::Error;

/// Input format of a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Plain coordinates, optionally with the two-line header.
    Xyz,
    /// Gaussian newzmat `.com` input with a connectivity block.
    Zmat,
    /// Gaussian output log.
    Log,
    /// MDL connection table.
    Mol,
    /// Tripos mol2.
    Mol2,
}

impl Format {
    pub const ALL: [Format; 5] = [
        Format::Xyz,
        Format::Zmat,
        Format::Log,
        Format::Mol,
        Format::Mol2,
    ];

    /// Maps a file extension (without the dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xyz" => Some(Format::Xyz),
            "com" | "gjf" | "zmat" => Some(Format::Zmat),
            "log" | "out" => Some(Format::Log),
            "mol" => Some(Format::Mol),
            "mol2" => Some(Format::Mol2),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Whether a record too wide for the dataset grows `max_atom` instead of failing.
    pub fn grows_max_atom(self) -> bool {
        matches!(self, Format::Mol | Format::Mol2)
    }

    pub fn carries_charge(self) -> bool {
        matches!(self, Format::Log)
    }

    pub fn carries_topology(self) -> bool {
        matches!(self, Format::Zmat | Format::Mol | Format::Mol2)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Xyz => write!(f, "XYZ"),
            Format::Zmat => write!(f, "ZMAT"),
            Format::Log => write!(f, "Gaussian log"),
            Format::Mol => write!(f, "MOL"),
            Format::Mol2 => write!(f, "MOL2"),
        }
    }
}

/// Per-call switches for the file readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Skip the atom-count and comment lines of `.xyz` input.
    pub xyz_header: bool,
    /// Require "Normal termination of Gaussian" on the last line of a log.
    pub validate_log: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            xyz_header: true,
            validate_log: true,
        }
    }
}

/// Parses one molecule in `format`.
///
/// `charge_type` selects the charge block of Gaussian logs and is ignored by
/// every other format.
pub fn read<R: BufRead>(
    format: Format,
    mut reader: R,
    options: &ReadOptions,
    charge_type: ChargeType,
) -> Result<Molecule, Error> {
    match format {
        Format::Xyz => xyz::reader::read(reader, options.xyz_header),
        Format::Zmat => zmat::reader::read(reader),
        Format::Mol => mol::reader::read(reader),
        Format::Mol2 => mol2::reader::read(reader),
        Format::Log => {
            let mut text = String::new();
            reader.read_to_string(&mut text)?;
            if options.validate_log {
                self::log::reader::validate(&text)?;
            }
            self::log::reader::read(Cursor::new(text), charge_type)
        }
    }
}
