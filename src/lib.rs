//! A pure Rust library for turning quantum-chemistry output files into a padded,
//! array-oriented molecular dataset.
//!
//! Gaussian logs, Gaussian newzmat inputs, plain `.xyz` files and MDL / Tripos
//! connection tables are parsed into records that share one `max_atom` bound:
//! atomic numbers and coordinates, per-atom partial charges, a bond-order
//! topology matrix, a dipole vector and a name.
//!
//! # Features
//!
//! - **Format parsers**: xyz, newzmat `.com`, Gaussian `.log` (Mulliken or
//!   Hirshfeld charges), MDL `.mol` and Tripos `.mol2`
//! - **Dataset container**: incremental growth, zero padding, shrink-to-fit
//!   and resizing of the atom axis with consistency checks
//! - **Derived features**: mass centres, moment-of-inertia tensors,
//!   principal-axis coordinates, adjacency, degree and distance matrices
//! - **Merge**: name-keyed union of two datasets with field-level conflict
//!   detection
//! - **Persistence**: `.npy` tensors plus a `config.toml` record
//!
//! # Quick Start
//!
//! ```
//! use gdata::{ChargeType, DataBatch, Dataset, DatasetError};
//! use ndarray::{arr1, arr2};
//!
//! // Water, padded to four atom slots
//! let mut data = Dataset::new(4, ChargeType::Mulliken)?;
//! data.add_data(
//!     DataBatch::new()
//!         .with_structure(arr2(&[
//!             [8.0, 0.0, 0.0, 0.117],
//!             [1.0, 0.0, 0.757, -0.469],
//!             [1.0, 0.0, -0.757, -0.469],
//!             [0.0, 0.0, 0.0, 0.0],
//!         ]))
//!         .with_charge(arr1(&[-0.8, 0.4, 0.4, 0.0]))
//!         .with_name("water"),
//! )?;
//! data.self_check()?;
//!
//! // Shrink the atom axis to what the records actually use
//! assert_eq!(data.minimise(), Some(3));
//! assert_eq!(data.data_shape().as_array(), [1, 1, 1, 0, 0]);
//!
//! // Padding-free mass centre and a symmetric inertia tensor
//! let tensor = data.inertia_tensors()?.expect("structures are present");
//! assert_eq!(tensor.shape(), &[1, 3, 3]);
//! assert!((tensor[[0, 0, 1]] - tensor[[0, 1, 0]]).abs() < 1e-12);
//! # Ok::<(), DatasetError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: Format readers, the xyz writer and [`io::ReadOptions`]
//! - [`Dataset`]: The container, its accessors, geometry and persistence
//! - [`merge`]: Name-keyed merge of two datasets
//!
//! # Error Kinds
//!
//! Every error maps to an [`ErrorKind`]: unreadable files ([`ErrorKind::Io`]),
//! malformed content ([`ErrorKind::Content`]), Gaussian logs without a normal
//! termination ([`ErrorKind::Validation`]) and shape or merge violations
//! ([`ErrorKind::Consistency`]). Batch readers skip the first three and
//! report them; consistency errors always abort.

mod dataset;
mod model;

pub mod io;

pub use model::atom::Atom;
pub use model::molecule::{Bond, Molecule, PaddedMolecule};
pub use model::types::{ChargeType, Element, ParseChargeTypeError, SymbolError, sybyl_bond_order};

pub use dataset::{
    BatchReport, DataBatch, DataShape, Dataset, ExportReport, Failure, Field, Record,
    StoreConfig, StorePaths, check_shapes, merge,
};

pub use dataset::Error as DatasetError;

/// Broad classification of every error the library reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A file could not be opened, read or written.
    Io,
    /// A recognised file is malformed.
    Content,
    /// A Gaussian log did not end with a normal termination.
    Validation,
    /// Field shapes disagree, a resize would lose data, or a merge conflicts.
    Consistency,
}
