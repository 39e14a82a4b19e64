#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use gdata::{ChargeType, DataBatch, Dataset};
use ndarray::{Array1, Array2};

pub const H2_XYZ: &str = "2\n\nH 0.0 0.0 0.0\nH 0.0 0.0 0.74\n";

pub const WATER_XYZ: &str = "3\nwater\nO 0.0 0.0 0.1173\nH 0.0 0.7572 -0.4692\nH 0.0 -0.7572 -0.4692\n";

pub const BENZENE_RING_MOL2: &str = "\
@<TRIPOS>MOLECULE
ring
 6 6 1 0 0
SMALL
NO_CHARGES

@<TRIPOS>ATOM
      1 C1          1.3970    0.0000    0.0000 C.ar      1 UNL1        0.0000
      2 C2          0.6985    1.2098    0.0000 C.ar      1 UNL1        0.0000
      3 C3         -0.6985    1.2098    0.0000 C.ar      1 UNL1        0.0000
      4 C4         -1.3970    0.0000    0.0000 C.ar      1 UNL1        0.0000
      5 C5         -0.6985   -1.2098    0.0000 C.ar      1 UNL1        0.0000
      6 C6          0.6985   -1.2098    0.0000 C.ar      1 UNL1        0.0000
@<TRIPOS>BOND
     1     1     2   ar
     2     2     3   ar
     3     3     4   ar
     4     4     5   ar
     5     5     6   nc
     6     6     1    1
";

pub const WATER_LOG: &str = "\
 Entering Gaussian System
                         Standard orientation:
 ---------------------------------------------------------------------
 Center     Atomic      Atomic             Coordinates (Angstroms)
 Number     Number       Type             X           Y           Z
 ---------------------------------------------------------------------
      1          8           0        0.000000    0.000000    0.117300
      2          1           0        0.000000    0.757200   -0.469200
      3          1           0        0.000000   -0.757200   -0.469200
 ---------------------------------------------------------------------
 Mulliken charges:
               1
     1  O   -0.869000
     2  H    0.434500
     3  H    0.434500
 Sum of Mulliken charges =   0.00000
 Dipole moment (field-independent basis, Debye):
    X=              0.0000    Y=              0.0000    Z=             -2.4300  Tot=              2.4300
 Normal termination of Gaussian 16 at Mon Jan  1 00:00:00 2024.
";

pub fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).expect("failed to write fixture");
    path
}

/// A structure row block with the given `(Z, x, y, z)` atoms, padded to `max_atom`.
pub fn structure(atoms: &[[f64; 4]], max_atom: usize) -> Array2<f64> {
    let mut rows = Array2::zeros((max_atom, 4));
    for (slot, atom) in atoms.iter().enumerate() {
        rows.row_mut(slot).assign(&Array1::from(atom.to_vec()));
    }
    rows
}

pub fn water_structure(max_atom: usize) -> Array2<f64> {
    structure(
        &[
            [8.0, 0.0, 0.0, 0.1173],
            [1.0, 0.0, 0.7572, -0.4692],
            [1.0, 0.0, -0.7572, -0.4692],
        ],
        max_atom,
    )
}

/// A dataset holding one carbon atom per named record, offset along x.
pub fn carbons(names: &[&str], max_atom: usize) -> Dataset {
    let mut data = Dataset::new(max_atom, ChargeType::Mulliken).expect("valid max_atom");
    for (i, name) in names.iter().enumerate() {
        data.add_data(
            DataBatch::new()
                .with_structure(structure(&[[6.0, i as f64, 0.0, 0.0]], max_atom))
                .with_name(*name),
        )
        .expect("consistent record");
    }
    data
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}
