//! Error types for dataset operations.
//!
//! Failures are grouped into the four [`ErrorKind`]s: file access, malformed
//! content, failed log validation, and consistency violations (shape
//! mismatches, impossible resizes and merge conflicts).

use crate::ErrorKind;
use crate::model::types::{ChargeType, SymbolError};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// One of the five per-record fields held by a [`Dataset`](super::Dataset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Structure,
    Charge,
    Name,
    Topology,
    Dipole,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Structure,
        Field::Charge,
        Field::Name,
        Field::Topology,
        Field::Dipole,
    ];

    /// Rank of the stored batch tensor (record axis included).
    pub fn rank(self) -> usize {
        match self {
            Field::Structure | Field::Topology => 3,
            Field::Charge | Field::Dipole => 2,
            Field::Name => 1,
        }
    }

    /// Base name of the persisted file.
    pub fn file_stem(self) -> &'static str {
        match self {
            Field::Structure => "structure",
            Field::Charge => "charge",
            Field::Name => "name",
            Field::Topology => "topology",
            Field::Dipole => "dipole",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Errors raised by [`Dataset`](super::Dataset) and [`merge`](super::merge).
#[derive(Debug, Error)]
pub enum Error {
    /// A single input file could not be read or parsed.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: crate::io::Error,
    },

    /// File-system failure while saving, loading or exporting.
    #[error("file operation on '{path}' failed: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A `.npy` tensor file could not be read or written.
    #[error("npy file '{path}' could not be processed: {details}")]
    Npy { path: PathBuf, details: String },

    /// The dataset configuration file is malformed.
    #[error("invalid dataset configuration '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The dataset configuration could not be serialised.
    #[error("failed to serialise dataset configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    /// A field tensor has the wrong number of axes.
    #[error("{field} data has rank {found}, expected {expected} (one record) or {} (a batch)", expected + 1)]
    Rank {
        field: Field,
        expected: usize,
        found: usize,
    },

    /// A fixed-size inner axis has the wrong length.
    #[error("{field} data has length {found} on axis {axis}, expected {expected}")]
    Width {
        field: Field,
        axis: usize,
        expected: usize,
        found: usize,
    },

    /// Populated fields disagree on the number of records.
    #[error("{field} holds {found} records, but {expected} were expected")]
    RecordCount {
        field: Field,
        expected: usize,
        found: usize,
    },

    /// Fields with an atom axis disagree on `max_atom`.
    #[error("{field} data uses max_atom {found}, but the dataset uses {expected}")]
    MaxAtom {
        field: Field,
        expected: usize,
        found: usize,
    },

    /// `change_max_atom` was asked to cut into real atoms.
    #[error("cannot shrink max_atom to {requested}: records need at least {required} slots")]
    CannotShrink { requested: usize, required: usize },

    #[error("max_atom must be at least 1")]
    InvalidMaxAtom,

    /// Merge inputs were built with different charge schemes.
    #[error("cannot merge {left} charges with {right} charges")]
    ChargeTypeMismatch { left: ChargeType, right: ChargeType },

    /// More than one record in the second dataset shares a name.
    #[error("record '{name}' matches {count} records in the other dataset")]
    AmbiguousMatch { name: String, count: usize },

    /// Both datasets hold different non-zero data for the same record.
    #[error("conflicting {field} for record '{name}': {left} vs {right}")]
    Conflict {
        name: String,
        field: Field,
        left: String,
        right: String,
    },

    /// The operation needs a field that holds no records.
    #[error("no {0} data in the dataset")]
    Empty(Field),

    /// A structure slot holds an atomic number outside the element table.
    #[error(transparent)]
    Symbol(#[from] SymbolError),

    /// An internal array operation failed on mismatched shapes.
    #[error("array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Read { source, .. } => source.kind(),
            Error::Store { .. } | Error::Npy { .. } | Error::ConfigWrite(_) => ErrorKind::Io,
            Error::Config { .. } | Error::Symbol(_) => ErrorKind::Content,
            Error::Rank { .. }
            | Error::Width { .. }
            | Error::RecordCount { .. }
            | Error::MaxAtom { .. }
            | Error::CannotShrink { .. }
            | Error::InvalidMaxAtom
            | Error::ChargeTypeMismatch { .. }
            | Error::AmbiguousMatch { .. }
            | Error::Conflict { .. }
            | Error::Empty(_)
            | Error::Shape(_) => ErrorKind::Consistency,
        }
    }
}
