use super::{Dataset, Error, Field};
use ndarray::{Array3, ArrayView2, Axis};

impl Dataset {
    /// Atomic numbers placed on the diagonal of `max_atom × max_atom` matrices.
    pub fn atom_info_matrix(&self) -> Option<Array3<i64>> {
        self.atom_info().map(|info| diagonal(info.view()))
    }

    /// Charges placed on the diagonal of `max_atom × max_atom` matrices.
    pub fn charge_matrices(&self) -> Option<Array3<f64>> {
        self.charges().map(diagonal)
    }

    /// Topologies with 1 added on the diagonal of every occupied slot.
    pub fn topologies_with_self_loops(&self) -> Result<Option<Array3<i64>>, Error> {
        let Some(topologies) = self.topologies() else {
            return Ok(None);
        };
        let loops = self.self_loops(topologies.len_of(Axis(0)))?;
        Ok(Some(&topologies + &loops))
    }

    /// Topologies with every non-zero bond order clamped to 1.
    pub fn adjacency(&self) -> Option<Array3<i64>> {
        self.topologies()
            .map(|t| t.mapv(|order| i64::from(order != 0)))
    }

    /// Adjacency with 1 on the diagonal of every occupied slot.
    pub fn adjacency_with_self_loops(&self) -> Result<Option<Array3<i64>>, Error> {
        let Some(adjacency) = self.adjacency() else {
            return Ok(None);
        };
        let loops = self.self_loops(adjacency.len_of(Axis(0)))?;
        Ok(Some(adjacency + loops))
    }

    /// Row sums of the adjacency on an otherwise zero diagonal matrix.
    pub fn degree(&self) -> Option<Array3<i64>> {
        self.adjacency()
            .map(|adjacency| diagonal(adjacency.sum_axis(Axis(2)).view()))
    }

    fn self_loops(&self, expected: usize) -> Result<Array3<i64>, Error> {
        let info = self
            .atom_info()
            .ok_or(Error::Empty(Field::Structure))?;
        let found = info.len_of(Axis(0));
        if found != expected {
            return Err(Error::RecordCount {
                field: Field::Structure,
                expected,
                found,
            });
        }
        Ok(diagonal(info.mapv(|z| i64::from(z != 0)).view()))
    }
}

/// Spreads each row of an `n × m` array over the diagonal of an `m × m` matrix.
fn diagonal<A: Clone + Default>(rows: ArrayView2<A>) -> Array3<A> {
    let (n, m) = rows.dim();
    let mut out = Array3::from_elem((n, m, m), A::default());
    for (mut matrix, row) in out.outer_iter_mut().zip(rows.outer_iter()) {
        matrix.diag_mut().assign(&row);
    }
    out
}
