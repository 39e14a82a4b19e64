use ndarray::{Array, ArrayD, Dimension};

/// Field data handed to [`Dataset::add_data`](super::Dataset::add_data).
///
/// Each tensor is either a single record (one axis fewer than the stored
/// field) or a batch with the record axis first. Absent fields are left
/// untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataBatch {
    pub structure: Option<ArrayD<f64>>,
    pub charge: Option<ArrayD<f64>>,
    pub names: Option<Vec<String>>,
    pub topology: Option<ArrayD<i64>>,
    pub dipole: Option<ArrayD<f64>>,
}

impl DataBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_structure<D: Dimension>(mut self, structure: Array<f64, D>) -> Self {
        self.structure = Some(structure.into_dyn());
        self
    }

    pub fn with_charge<D: Dimension>(mut self, charge: Array<f64, D>) -> Self {
        self.charge = Some(charge.into_dyn());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.names.get_or_insert_with(Vec::new).push(name.into());
        self
    }

    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names
            .get_or_insert_with(Vec::new)
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_topology<D: Dimension>(mut self, topology: Array<i64, D>) -> Self {
        self.topology = Some(topology.into_dyn());
        self
    }

    pub fn with_dipole<D: Dimension>(mut self, dipole: Array<f64, D>) -> Self {
        self.dipole = Some(dipole.into_dyn());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.structure.is_none()
            && self.charge.is_none()
            && self.names.is_none()
            && self.topology.is_none()
            && self.dipole.is_none()
    }
}
