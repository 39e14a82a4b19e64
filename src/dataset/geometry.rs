use super::{Dataset, Error, Field};
use crate::model::types::{Element, SymbolError};
use log::info;
use nalgebra::{Matrix3, Vector3};
use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, Axis};

impl Dataset {
    /// Atomic mass of every slot, `n × max_atom`; padding slots weigh 0.
    pub fn atom_weights(&self) -> Result<Option<Array2<f64>>, Error> {
        let Some(structures) = self.structures() else {
            return Ok(None);
        };
        let mut weights = Array2::zeros((structures.len_of(Axis(0)), self.max_atom));
        for (mut row, structure) in weights.outer_iter_mut().zip(structures.outer_iter()) {
            row.assign(&slot_masses(structure)?);
        }
        Ok(Some(weights))
    }

    /// Mass-weighted centre of each record, `n × 3`.
    pub fn mass_centres(&self) -> Result<Option<Array2<f64>>, Error> {
        let Some(structures) = self.structures() else {
            return Ok(None);
        };
        let mut centres = Array2::zeros((structures.len_of(Axis(0)), 3));
        for (mut row, structure) in centres.outer_iter_mut().zip(structures.outer_iter()) {
            let masses = slot_masses(structure)?;
            let centre = mass_centre(structure, masses.view());
            row.assign(&ArrayView1::from(centre.as_slice()));
        }
        Ok(Some(centres))
    }

    /// Moment-of-inertia tensor of each record about its mass centre, `n × 3 × 3`.
    pub fn inertia_tensors(&self) -> Result<Option<Array3<f64>>, Error> {
        let Some(structures) = self.structures() else {
            return Ok(None);
        };
        let mut tensors = Array3::zeros((structures.len_of(Axis(0)), 3, 3));
        for (mut out, structure) in tensors.outer_iter_mut().zip(structures.outer_iter()) {
            let masses = slot_masses(structure)?;
            let tensor = inertia_tensor(structure, masses.view());
            for ((r, c), value) in out.indexed_iter_mut() {
                *value = tensor[(r, c)];
            }
        }
        Ok(Some(tensors))
    }

    /// Rewrites every structure in its principal-axis frame and sets `mi_coor`.
    ///
    /// Each atom's coordinates are projected onto the inertia eigenvectors,
    /// ordered by ascending eigenvalue. Atomic numbers and slot order are
    /// kept; padding slots stay zero.
    pub fn convert_to_mi_coordinates(&mut self) -> Result<(), Error> {
        if self.structures().is_none() {
            return Err(Error::Empty(Field::Structure));
        }

        let mut converted = self.structures.clone();
        for mut structure in converted.outer_iter_mut() {
            let masses = slot_masses(structure.view())?;
            let axes = principal_axes(&inertia_tensor(structure.view(), masses.view()));
            for mut row in structure.outer_iter_mut() {
                if row[0] == 0.0 {
                    row.fill(0.0);
                    continue;
                }
                let position = Vector3::new(row[1], row[2], row[3]);
                let projected = axes.transpose() * position;
                row[1] = projected.x;
                row[2] = projected.y;
                row[3] = projected.z;
            }
        }

        self.structures = converted;
        self.mi_coor = true;
        info!(
            "converted {} structures to principal-axis coordinates",
            self.structures.len_of(Axis(0))
        );
        Ok(())
    }

    /// Pairwise atom distances per record, `n × max_atom × max_atom`, zero
    /// whenever either slot is padding.
    pub fn atomic_distances(&self) -> Option<Array3<f64>> {
        let structures = self.structures()?;
        let m = self.max_atom;
        let mut distances = Array3::zeros((structures.len_of(Axis(0)), m, m));
        for (mut out, structure) in distances.outer_iter_mut().zip(structures.outer_iter()) {
            for i in 0..m {
                if structure[[i, 0]] == 0.0 {
                    continue;
                }
                for j in (i + 1)..m {
                    if structure[[j, 0]] == 0.0 {
                        continue;
                    }
                    let d = (position(structure, i) - position(structure, j)).norm();
                    out[[i, j]] = d;
                    out[[j, i]] = d;
                }
            }
        }
        Some(distances)
    }
}

fn position(structure: ArrayView2<f64>, slot: usize) -> Vector3<f64> {
    Vector3::new(
        structure[[slot, 1]],
        structure[[slot, 2]],
        structure[[slot, 3]],
    )
}

fn slot_masses(structure: ArrayView2<f64>) -> Result<Array1<f64>, SymbolError> {
    structure
        .outer_iter()
        .map(|row| Element::from_slot(row[0]).map(|e| e.atomic_mass()))
        .collect::<Result<Vec<_>, _>>()
        .map(Array1::from)
}

fn mass_centre(structure: ArrayView2<f64>, masses: ArrayView1<f64>) -> Vector3<f64> {
    let total: f64 = masses.sum();
    if total == 0.0 {
        return Vector3::zeros();
    }
    let weighted = masses
        .iter()
        .enumerate()
        .fold(Vector3::zeros(), |acc, (slot, &m)| {
            acc + position(structure, slot) * m
        });
    weighted / total
}

/// Inertia tensor about the mass centre. Padding slots contribute nothing.
fn inertia_tensor(structure: ArrayView2<f64>, masses: ArrayView1<f64>) -> Matrix3<f64> {
    let centre = mass_centre(structure, masses);
    let (mut ixx, mut iyy, mut izz) = (0.0, 0.0, 0.0);
    let (mut ixy, mut ixz, mut iyz) = (0.0, 0.0, 0.0);

    for (slot, &m) in masses.iter().enumerate() {
        if structure[[slot, 0]] == 0.0 {
            continue;
        }
        let r = position(structure, slot) - centre;
        ixx += m * (r.y * r.y + r.z * r.z);
        iyy += m * (r.x * r.x + r.z * r.z);
        izz += m * (r.x * r.x + r.y * r.y);
        ixy -= m * r.x * r.y;
        ixz -= m * r.x * r.z;
        iyz -= m * r.y * r.z;
    }

    Matrix3::new(ixx, ixy, ixz, ixy, iyy, iyz, ixz, iyz, izz)
}

/// Eigenvectors of a symmetric tensor as columns, by ascending eigenvalue.
fn principal_axes(tensor: &Matrix3<f64>) -> Matrix3<f64> {
    let eigen = tensor.symmetric_eigen();
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| eigen.eigenvalues[a].total_cmp(&eigen.eigenvalues[b]));
    let mut axes = Matrix3::zeros();
    for (col_out, &col_in) in order.iter().enumerate() {
        axes.set_column(col_out, &eigen.eigenvectors.column(col_in));
    }
    axes
}
