use ndarray::{Array1, Array2};

use super::atom::Atom;

/// A bond between two 0-based atom slots with an integer bond-order code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: i64,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize, order: i64) -> Self {
        if idx1 <= idx2 {
            Self {
                i: idx1,
                j: idx2,
                order,
            }
        } else {
            Self {
                i: idx2,
                j: idx1,
                order,
            }
        }
    }

    #[inline]
    pub fn is_self_bond(&self) -> bool {
        self.i == self.j
    }
}

/// One parsed molecule, before padding to a dataset's `max_atom`.
///
/// Parsers fill only the fields their format carries: xyz yields atoms alone,
/// connectivity formats add `bonds`, Gaussian logs add `charges` and `dipole`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub charges: Option<Vec<f64>>,
    pub bonds: Option<Vec<Bond>>,
    pub dipole: Option<[f64; 3]>,
}

/// A molecule laid out as rows of the dataset tensors.
#[derive(Debug, Clone, PartialEq)]
pub struct PaddedMolecule {
    pub structure: Array2<f64>,
    pub charge: Option<Array1<f64>>,
    pub topology: Option<Array2<i64>>,
    pub dipole: Option<Array1<f64>>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.as_ref().map_or(0, Vec::len)
    }

    /// Smallest `max_atom` that holds every atom, charge and bond index.
    pub fn required_max_atom(&self) -> usize {
        let charges = self.charges.as_ref().map_or(0, Vec::len);
        let bonds = self
            .bonds
            .iter()
            .flatten()
            .map(|b| b.j + 1)
            .max()
            .unwrap_or(0);
        self.atoms.len().max(charges).max(bonds)
    }

    /// Zero-pads every populated field to `max_atom` slots.
    ///
    /// Returns `None` when the molecule does not fit. Bonds are written
    /// symmetrically in file order, so a later entry for the same pair wins;
    /// self-bonds are dropped and the diagonal stays zero.
    pub fn pad(&self, max_atom: usize) -> Option<PaddedMolecule> {
        if self.required_max_atom() > max_atom {
            return None;
        }

        let mut structure = Array2::<f64>::zeros((max_atom, 4));
        for (slot, atom) in self.atoms.iter().enumerate() {
            for (k, value) in atom.to_row().into_iter().enumerate() {
                structure[[slot, k]] = value;
            }
        }

        let charge = self.charges.as_ref().map(|charges| {
            let mut row = Array1::<f64>::zeros(max_atom);
            for (slot, q) in charges.iter().enumerate() {
                row[slot] = *q;
            }
            row
        });

        let topology = self.bonds.as_ref().map(|bonds| {
            let mut matrix = Array2::<i64>::zeros((max_atom, max_atom));
            for bond in bonds.iter().filter(|b| !b.is_self_bond()) {
                matrix[[bond.i, bond.j]] = bond.order;
                matrix[[bond.j, bond.i]] = bond.order;
            }
            matrix
        });

        let dipole = self.dipole.map(|d| Array1::from(d.to_vec()));

        Some(PaddedMolecule {
            structure,
            charge,
            topology,
            dipole,
        })
    }
}
