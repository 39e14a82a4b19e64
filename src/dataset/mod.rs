//! The padded, array-oriented molecular dataset.
//!
//! A [`Dataset`] keeps five parallel per-record fields that share one
//! `max_atom` bound:
//!
//! | field     | tensor                          |
//! |-----------|---------------------------------|
//! | structure | `n × max_atom × 4` (`Z, x, y, z`) |
//! | charge    | `n × max_atom`                  |
//! | name      | `n` strings                     |
//! | topology  | `n × max_atom × max_atom` bond orders |
//! | dipole    | `n × 3`                         |
//!
//! Fields grow independently through [`Dataset::add_data`] and the file
//! readers; [`Dataset::pad_zeros`] aligns their record counts. Resizing the
//! atom axis, deleting fields, derived geometry, graph views, persistence and
//! merging are implemented in the submodules.

mod batch;
mod check;
mod error;
mod geometry;
mod graph;
mod merge;
mod read;
mod store;

pub use batch::DataBatch;
pub use check::check_shapes;
pub use error::{Error, Field};
pub use merge::merge;
pub use read::{BatchReport, ExportReport, Failure};
pub use store::{StoreConfig, StorePaths};

use crate::model::types::ChargeType;
use log::{debug, warn};
use ndarray::{
    Array, Array1, Array2, Array3, ArrayD, ArrayView2, ArrayView3, Axis, Ix2, Ix3,
    RemoveAxis, Slice, s,
};

/// Record counts of the five fields, in `structure, charge, name, topology,
/// dipole` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataShape {
    pub structure: usize,
    pub charge: usize,
    pub name: usize,
    pub topology: usize,
    pub dipole: usize,
}

impl DataShape {
    pub fn as_array(&self) -> [usize; 5] {
        [
            self.structure,
            self.charge,
            self.name,
            self.topology,
            self.dipole,
        ]
    }

    pub fn get(&self, field: Field) -> usize {
        match field {
            Field::Structure => self.structure,
            Field::Charge => self.charge,
            Field::Name => self.name,
            Field::Topology => self.topology,
            Field::Dipole => self.dipole,
        }
    }

    pub fn max(&self) -> usize {
        self.as_array().into_iter().max().unwrap_or(0)
    }

    /// True when every populated field holds the same number of records.
    pub fn is_balanced(&self) -> bool {
        let max = self.max();
        self.as_array().into_iter().all(|n| n == 0 || n == max)
    }
}

/// One record across all five fields, padded to the dataset's `max_atom`.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub structure: Array2<f64>,
    pub charge: Array1<f64>,
    pub topology: Array2<i64>,
    pub dipole: Array1<f64>,
}

impl Record {
    pub fn zeros(max_atom: usize) -> Self {
        Self {
            name: String::new(),
            structure: Array2::zeros((max_atom, 4)),
            charge: Array1::zeros(max_atom),
            topology: Array2::zeros((max_atom, max_atom)),
            dipole: Array1::zeros(3),
        }
    }
}

/// An ordered collection of molecular records sharing one `max_atom` bound
/// and one charge scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    max_atom: usize,
    charge_type: ChargeType,
    mi_coor: bool,
    structures: Array3<f64>,
    charges: Array2<f64>,
    names: Vec<String>,
    topologies: Array3<i64>,
    dipoles: Array2<f64>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty(Self::DEFAULT_MAX_ATOM, ChargeType::default())
    }
}

impl Dataset {
    pub const DEFAULT_MAX_ATOM: usize = 100;

    /// Creates an empty dataset.
    pub fn new(max_atom: usize, charge_type: ChargeType) -> Result<Self, Error> {
        if max_atom == 0 {
            return Err(Error::InvalidMaxAtom);
        }
        Ok(Self::empty(max_atom, charge_type))
    }

    /// Creates a dataset from field tensors and checks it for consistency.
    pub fn from_batch(
        max_atom: usize,
        charge_type: ChargeType,
        batch: DataBatch,
    ) -> Result<Self, Error> {
        let mut dataset = Self::new(max_atom, charge_type)?;
        dataset.add_data(batch)?;
        dataset.self_check()?;
        Ok(dataset)
    }

    fn empty(max_atom: usize, charge_type: ChargeType) -> Self {
        Self {
            max_atom,
            charge_type,
            mi_coor: false,
            structures: Array3::zeros((0, max_atom, 4)),
            charges: Array2::zeros((0, max_atom)),
            names: Vec::new(),
            topologies: Array3::zeros((0, max_atom, max_atom)),
            dipoles: Array2::zeros((0, 3)),
        }
    }

    pub fn max_atom(&self) -> usize {
        self.max_atom
    }

    pub fn charge_type(&self) -> ChargeType {
        self.charge_type
    }

    /// Whether structures hold principal-axis coordinates.
    pub fn mi_coor(&self) -> bool {
        self.mi_coor
    }

    pub fn data_shape(&self) -> DataShape {
        DataShape {
            structure: self.structures.len_of(Axis(0)),
            charge: self.charges.len_of(Axis(0)),
            name: self.names.len(),
            topology: self.topologies.len_of(Axis(0)),
            dipole: self.dipoles.len_of(Axis(0)),
        }
    }

    /// Largest record count over all fields.
    pub fn len(&self) -> usize {
        self.data_shape().max()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends single records or batches to any subset of fields.
    ///
    /// Every supplied tensor is checked for rank and inner shape before
    /// anything is appended, so a rejected batch leaves the dataset untouched.
    /// Fields are appended independently and need not stay aligned.
    pub fn add_data(&mut self, batch: DataBatch) -> Result<(), Error> {
        let m = self.max_atom;
        let structure = batch
            .structure
            .map(|a| as_batch(Field::Structure, a, &[m, 4]))
            .transpose()?
            .map(|a| a.into_dimensionality::<Ix3>())
            .transpose()?;
        let charge = batch
            .charge
            .map(|a| as_batch(Field::Charge, a, &[m]))
            .transpose()?
            .map(|a| a.into_dimensionality::<Ix2>())
            .transpose()?;
        let topology = batch
            .topology
            .map(|a| as_batch(Field::Topology, a, &[m, m]))
            .transpose()?
            .map(|a| a.into_dimensionality::<Ix3>())
            .transpose()?;
        let dipole = batch
            .dipole
            .map(|a| as_batch(Field::Dipole, a, &[3]))
            .transpose()?
            .map(|a| a.into_dimensionality::<Ix2>())
            .transpose()?;

        if let Some(structure) = structure {
            self.structures.append(Axis(0), structure.view())?;
        }
        if let Some(charge) = charge {
            self.charges.append(Axis(0), charge.view())?;
        }
        if let Some(names) = batch.names {
            self.names.extend(names);
        }
        if let Some(topology) = topology {
            self.topologies.append(Axis(0), topology.view())?;
        }
        if let Some(dipole) = dipole {
            self.dipoles.append(Axis(0), dipole.view())?;
        }
        Ok(())
    }

    /// Right-pads every field with zero records (empty names) up to the
    /// largest record count. Idempotent.
    pub fn pad_zeros(&mut self) {
        let target = self.len();
        pad_records(&mut self.structures, target);
        pad_records(&mut self.charges, target);
        pad_records(&mut self.topologies, target);
        pad_records(&mut self.dipoles, target);
        self.names.resize(target, String::new());
    }

    /// Number of atom slots needed to hold every non-padding entry: one past
    /// the last slot with a non-zero atomic number, charge or bond. Zero
    /// when the dataset holds no structural content.
    pub fn content_bound(&self) -> usize {
        let mut bound = 0;
        for record in self.structures.outer_iter() {
            for (slot, row) in record.outer_iter().enumerate() {
                if row[0] != 0.0 {
                    bound = bound.max(slot + 1);
                }
            }
        }
        for record in self.charges.outer_iter() {
            if let Some(slot) = record.iter().rposition(|&q| q != 0.0) {
                bound = bound.max(slot + 1);
            }
        }
        for record in self.topologies.outer_iter() {
            for ((i, j), &order) in record.indexed_iter() {
                if order != 0 {
                    bound = bound.max(i.max(j) + 1);
                }
            }
        }
        bound
    }

    /// Shrinks the atom axis to [`content_bound`](Self::content_bound).
    ///
    /// Returns the new `max_atom`, or `None` (leaving the dataset unchanged)
    /// when there is no structural content.
    pub fn minimise(&mut self) -> Option<usize> {
        let bound = self.content_bound();
        if bound == 0 {
            warn!("dataset holds no structural content; max_atom stays {}", self.max_atom);
            return None;
        }
        if bound != self.max_atom {
            debug!("minimising max_atom {} -> {bound}", self.max_atom);
            self.resize_atom_axis(bound);
        }
        Some(bound)
    }

    /// Sets `max_atom`, zero-padding or truncating the atom axis.
    ///
    /// Fails without touching the dataset when `new_max_atom` is zero or
    /// would cut into the content bound.
    pub fn change_max_atom(&mut self, new_max_atom: usize) -> Result<(), Error> {
        if new_max_atom == 0 {
            return Err(Error::InvalidMaxAtom);
        }
        let required = self.content_bound();
        if new_max_atom < required {
            return Err(Error::CannotShrink {
                requested: new_max_atom,
                required,
            });
        }
        self.resize_atom_axis(new_max_atom);
        Ok(())
    }

    fn resize_atom_axis(&mut self, new_max: usize) {
        let n_structure = self.structures.len_of(Axis(0));
        let n_charge = self.charges.len_of(Axis(0));
        let n_topology = self.topologies.len_of(Axis(0));
        let keep = self.max_atom.min(new_max);

        let mut structures = Array3::zeros((n_structure, new_max, 4));
        structures
            .slice_mut(s![.., ..keep, ..])
            .assign(&self.structures.slice(s![.., ..keep, ..]));

        let mut charges = Array2::zeros((n_charge, new_max));
        charges
            .slice_mut(s![.., ..keep])
            .assign(&self.charges.slice(s![.., ..keep]));

        let mut topologies = Array3::zeros((n_topology, new_max, new_max));
        topologies
            .slice_mut(s![.., ..keep, ..keep])
            .assign(&self.topologies.slice(s![.., ..keep, ..keep]));

        self.structures = structures;
        self.charges = charges;
        self.topologies = topologies;
        self.max_atom = new_max;
    }

    pub fn delete_structures(&mut self) {
        self.structures = Array3::zeros((0, self.max_atom, 4));
        self.mi_coor = false;
    }

    pub fn delete_charges(&mut self) {
        self.charges = Array2::zeros((0, self.max_atom));
    }

    pub fn delete_names(&mut self) {
        self.names.clear();
    }

    pub fn delete_topologies(&mut self) {
        self.topologies = Array3::zeros((0, self.max_atom, self.max_atom));
    }

    pub fn delete_dipoles(&mut self) {
        self.dipoles = Array2::zeros((0, 3));
    }

    /// Runs the consistency checker over the populated fields.
    pub fn self_check(&self) -> Result<(), Error> {
        let names = [self.names.len()];
        let found = check_shapes(&[
            (Field::Structure, self.structures.shape()),
            (Field::Charge, self.charges.shape()),
            (Field::Name, &names),
            (Field::Topology, self.topologies.shape()),
            (Field::Dipole, self.dipoles.shape()),
        ])?;
        match found {
            Some(found) if found != self.max_atom => Err(Error::MaxAtom {
                field: Field::Structure,
                expected: self.max_atom,
                found,
            }),
            _ => Ok(()),
        }
    }

    /// Record `index` across all fields; fields shorter than `index` yield zeros.
    pub fn record(&self, index: usize) -> Option<Record> {
        if index >= self.len() {
            return None;
        }
        let mut record = Record::zeros(self.max_atom);
        if let Some(name) = self.names.get(index) {
            record.name = name.clone();
        }
        if index < self.structures.len_of(Axis(0)) {
            record.structure = self.structures.index_axis(Axis(0), index).to_owned();
        }
        if index < self.charges.len_of(Axis(0)) {
            record.charge = self.charges.index_axis(Axis(0), index).to_owned();
        }
        if index < self.topologies.len_of(Axis(0)) {
            record.topology = self.topologies.index_axis(Axis(0), index).to_owned();
        }
        if index < self.dipoles.len_of(Axis(0)) {
            record.dipole = self.dipoles.index_axis(Axis(0), index).to_owned();
        }
        Some(record)
    }

    /// Appends one full record; unbalanced fields are padded first so the
    /// new row lands at the same index in every field.
    pub fn push_record(&mut self, record: Record) -> Result<(), Error> {
        let m = self.max_atom;
        expect_shape(Field::Structure, record.structure.shape(), &[m, 4])?;
        expect_shape(Field::Charge, record.charge.shape(), &[m])?;
        expect_shape(Field::Topology, record.topology.shape(), &[m, m])?;
        expect_shape(Field::Dipole, record.dipole.shape(), &[3])?;

        self.pad_zeros();
        self.structures.push(Axis(0), record.structure.view())?;
        self.charges.push(Axis(0), record.charge.view())?;
        self.topologies.push(Axis(0), record.topology.view())?;
        self.dipoles.push(Axis(0), record.dipole.view())?;
        self.names.push(record.name);
        Ok(())
    }

    /// Full `n × max_atom × 4` structure tensor.
    pub fn structures(&self) -> Option<ArrayView3<'_, f64>> {
        populated(self.structures.len_of(Axis(0))).then(|| self.structures.view())
    }

    /// Structure tensor without the atomic-number column.
    pub fn coordinates(&self) -> Option<ArrayView3<'_, f64>> {
        self.structures()
            .map(|view| view.slice_move(s![.., .., 1..]))
    }

    /// Atomic numbers per slot, `n × max_atom`.
    pub fn atom_info(&self) -> Option<Array2<i64>> {
        self.structures()
            .map(|view| view.index_axis_move(Axis(2), 0).mapv(|z| z as i64))
    }

    pub fn charges(&self) -> Option<ArrayView2<'_, f64>> {
        populated(self.charges.len_of(Axis(0))).then(|| self.charges.view())
    }

    pub fn names(&self) -> Option<&[String]> {
        populated(self.names.len()).then_some(self.names.as_slice())
    }

    pub fn topologies(&self) -> Option<ArrayView3<'_, i64>> {
        populated(self.topologies.len_of(Axis(0))).then(|| self.topologies.view())
    }

    pub fn dipoles(&self) -> Option<ArrayView2<'_, f64>> {
        populated(self.dipoles.len_of(Axis(0))).then(|| self.dipoles.view())
    }

    /// Euclidean length of each dipole vector.
    pub fn dipole_norms(&self) -> Option<Array1<f64>> {
        self.dipoles().map(|d| {
            d.outer_iter()
                .map(|v| v.dot(&v).sqrt())
                .collect::<Array1<f64>>()
        })
    }
}

fn populated(count: usize) -> bool {
    count > 0
}

/// Promotes a single record to a batch of one and checks the inner axes.
fn as_batch<A>(field: Field, array: ArrayD<A>, inner: &[usize]) -> Result<ArrayD<A>, Error> {
    let rank = field.rank();
    let array = if array.ndim() + 1 == rank {
        array.insert_axis(Axis(0))
    } else if array.ndim() == rank {
        array
    } else {
        return Err(Error::Rank {
            field,
            expected: rank - 1,
            found: array.ndim(),
        });
    };
    expect_shape(field, &array.shape()[1..], inner)?;
    Ok(array)
}

/// Compares a single-record shape with the expected one. A wrong first axis
/// of an atom-indexed field is reported as a `max_atom` mismatch.
fn expect_shape(field: Field, shape: &[usize], expected: &[usize]) -> Result<(), Error> {
    if shape.len() != expected.len() {
        return Err(Error::Rank {
            field,
            expected: expected.len(),
            found: shape.len(),
        });
    }
    for (axis, (&found, &want)) in shape.iter().zip(expected).enumerate() {
        if found == want {
            continue;
        }
        let atom_axis = axis == 0 && field != Field::Dipole;
        return Err(if atom_axis {
            Error::MaxAtom {
                field,
                expected: want,
                found,
            }
        } else {
            Error::Width {
                field,
                axis: axis + 1,
                expected: want,
                found,
            }
        });
    }
    Ok(())
}

/// Appends default-valued records along axis 0 until `target` is reached.
fn pad_records<A, D>(array: &mut Array<A, D>, target: usize)
where
    A: Clone + Default,
    D: RemoveAxis,
{
    let current = array.len_of(Axis(0));
    if current >= target {
        return;
    }
    let mut dim = array.raw_dim();
    dim.slice_mut()[0] = target;
    let mut padded = Array::from_elem(dim, A::default());
    padded
        .slice_axis_mut(Axis(0), Slice::from(..current))
        .assign(&*array);
    *array = padded;
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, arr2};

    fn water_structure() -> Array2<f64> {
        arr2(&[
            [8.0, 0.0, 0.0, 0.117],
            [1.0, 0.0, 0.757, -0.469],
            [1.0, 0.0, -0.757, -0.469],
            [0.0, 0.0, 0.0, 0.0],
        ])
    }

    fn water() -> Dataset {
        let mut topology = Array2::<i64>::zeros((4, 4));
        topology[[0, 1]] = 1;
        topology[[1, 0]] = 1;
        topology[[0, 2]] = 1;
        topology[[2, 0]] = 1;
        Dataset::from_batch(
            4,
            ChargeType::Mulliken,
            DataBatch::new()
                .with_structure(water_structure())
                .with_charge(arr1(&[-0.8, 0.4, 0.4, 0.0]))
                .with_name("water")
                .with_topology(topology)
                .with_dipole(arr1(&[0.0, 0.0, 2.1])),
        )
        .unwrap()
    }

    #[test]
    fn new_rejects_zero_max_atom() {
        assert!(matches!(
            Dataset::new(0, ChargeType::Mulliken),
            Err(Error::InvalidMaxAtom)
        ));
        let data = Dataset::default();
        assert_eq!(data.max_atom(), Dataset::DEFAULT_MAX_ATOM);
        assert!(data.is_empty());
    }

    #[test]
    fn add_data_accepts_single_records_and_batches() {
        let mut data = water();
        let batch = Array3::<f64>::zeros((2, 4, 4));
        data.add_data(DataBatch::new().with_structure(batch)).unwrap();
        let shape = data.data_shape();
        assert_eq!(shape.as_array(), [3, 1, 1, 1, 1]);
        assert!(!shape.is_balanced());
    }

    #[test]
    fn add_data_rejects_wrong_rank_before_appending_anything() {
        let mut data = water();
        let err = data
            .add_data(
                DataBatch::new()
                    .with_structure(water_structure())
                    .with_charge(Array3::<f64>::zeros((1, 1, 4))),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Rank { field: Field::Charge, .. }));
        assert_eq!(data.data_shape().structure, 1);
    }

    #[test]
    fn add_data_rejects_wrong_max_atom() {
        let mut data = water();
        let err = data
            .add_data(DataBatch::new().with_structure(Array2::<f64>::zeros((5, 4))))
            .unwrap_err();
        assert!(matches!(err, Error::MaxAtom { expected: 4, found: 5, .. }));

        let err = data
            .add_data(DataBatch::new().with_dipole(arr1(&[1.0, 2.0])))
            .unwrap_err();
        assert!(matches!(err, Error::Width { field: Field::Dipole, .. }));
    }

    #[test]
    fn pad_zeros_aligns_counts_and_is_idempotent() {
        let mut data = water();
        data.add_data(DataBatch::new().with_structure(Array3::<f64>::zeros((2, 4, 4))))
            .unwrap();
        data.pad_zeros();
        let once = data.clone();
        assert_eq!(once.data_shape().as_array(), [3; 5]);
        assert_eq!(once.names().unwrap()[2], "");

        data.pad_zeros();
        assert_eq!(data, once);
    }

    #[test]
    fn minimise_then_grow_restores_shape() {
        let mut data = water();
        data.change_max_atom(10).unwrap();
        let before = data.clone();

        assert_eq!(data.minimise(), Some(3));
        assert_eq!(data.max_atom(), 3);
        assert_eq!(data.structures().unwrap().shape(), &[1, 3, 4]);
        assert_eq!(data.topologies().unwrap().shape(), &[1, 3, 3]);

        data.change_max_atom(10).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn change_max_atom_refuses_to_cut_content() {
        let mut data = water();
        let err = data.change_max_atom(2).unwrap_err();
        assert!(matches!(
            err,
            Error::CannotShrink {
                requested: 2,
                required: 3
            }
        ));
        assert_eq!(data.max_atom(), 4);
        assert!(matches!(data.change_max_atom(0), Err(Error::InvalidMaxAtom)));
    }

    #[test]
    fn minimise_leaves_empty_dataset_alone() {
        let mut data = Dataset::new(7, ChargeType::Hirshfeld).unwrap();
        assert_eq!(data.minimise(), None);
        assert_eq!(data.max_atom(), 7);
    }

    #[test]
    fn deleting_one_field_keeps_the_others() {
        let mut data = water();
        data.delete_charges();
        assert!(data.charges().is_none());
        assert_eq!(data.data_shape().as_array(), [1, 0, 1, 1, 1]);
        data.self_check().unwrap();

        data.delete_structures();
        data.delete_names();
        data.delete_topologies();
        data.delete_dipoles();
        assert!(data.is_empty());
    }

    #[test]
    fn accessors_signal_missing_data() {
        let data = Dataset::new(3, ChargeType::Mulliken).unwrap();
        assert!(data.structures().is_none());
        assert!(data.coordinates().is_none());
        assert!(data.atom_info().is_none());
        assert!(data.names().is_none());
        assert!(data.dipole_norms().is_none());
    }

    #[test]
    fn coordinates_and_atom_info_split_the_structure() {
        let data = water();
        let coordinates = data.coordinates().unwrap();
        assert_eq!(coordinates.shape(), &[1, 4, 3]);
        assert_eq!(coordinates[[0, 1, 1]], 0.757);
        assert_eq!(data.atom_info().unwrap().row(0).to_vec(), vec![8, 1, 1, 0]);
        assert_eq!(data.dipole_norms().unwrap()[0], 2.1);
    }

    #[test]
    fn record_round_trips_through_push_record() {
        let data = water();
        let record = data.record(0).unwrap();
        assert_eq!(record.name, "water");
        assert!(data.record(1).is_none());

        let mut other = Dataset::new(4, ChargeType::Mulliken).unwrap();
        other.push_record(record.clone()).unwrap();
        assert_eq!(other.record(0).unwrap(), record);

        let err = other.push_record(Record::zeros(5)).unwrap_err();
        assert!(matches!(err, Error::MaxAtom { .. }));
    }

    #[test]
    fn self_check_reports_unbalanced_fields() {
        let mut data = water();
        data.add_data(DataBatch::new().with_name("extra")).unwrap();
        let err = data.self_check().unwrap_err();
        assert!(matches!(err, Error::RecordCount { field: Field::Name, .. }));
    }
}
