use super::{Dataset, Error, Field, Record};
use log::{debug, info, warn};
use ndarray::{Array, Dimension};
use std::fmt::Display;

/// Merges two datasets by record name into a new dataset.
///
/// Both inputs are checked for consistency and must share a charge scheme.
/// Working copies are minimised, grown to a common `max_atom` and padded;
/// the inputs themselves are never modified.
///
/// Every record of `a` is matched by name against the unmatched records of
/// `b`. A single match is reconciled field by field: equal values are kept,
/// an all-zero side yields the other side, and two distinct non-zero values
/// are a [`Error::Conflict`]. Several matches are an
/// [`Error::AmbiguousMatch`]. Records of `a` without a match, then the
/// remaining records of `b`, are appended unchanged. Unnamed records never
/// match.
pub fn merge(a: &Dataset, b: &Dataset) -> Result<Dataset, Error> {
    if a.charge_type != b.charge_type {
        return Err(Error::ChargeTypeMismatch {
            left: a.charge_type,
            right: b.charge_type,
        });
    }
    a.self_check()?;
    b.self_check()?;
    if a.mi_coor != b.mi_coor {
        warn!("merging datasets with and without principal-axis coordinates");
    }

    let mut left = a.clone();
    let mut right = b.clone();
    let bound_left = left.minimise();
    let bound_right = right.minimise();
    let max_atom = match (bound_left, bound_right) {
        (None, None) => a.max_atom.max(b.max_atom),
        (l, r) => l.unwrap_or(0).max(r.unwrap_or(0)),
    };
    left.change_max_atom(max_atom)?;
    right.change_max_atom(max_atom)?;
    left.pad_zeros();
    right.pad_zeros();

    let mut pool: Vec<Record> = (0..right.len()).filter_map(|i| right.record(i)).collect();
    let mut merged = Dataset::new(max_atom, a.charge_type)?;
    merged.mi_coor = a.mi_coor && b.mi_coor;
    let mut matched = 0;

    for record in (0..left.len()).filter_map(|i| left.record(i)) {
        let hits: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|(_, other)| !record.name.is_empty() && other.name == record.name)
            .map(|(i, _)| i)
            .collect();

        match hits.as_slice() {
            [] => merged.push_record(record)?,
            [hit] => {
                let other = pool.remove(*hit);
                debug!("reconciling record '{}'", record.name);
                merged.push_record(reconcile_records(record, other)?)?;
                matched += 1;
            }
            _ => {
                return Err(Error::AmbiguousMatch {
                    name: record.name,
                    count: hits.len(),
                });
            }
        }
    }

    for record in pool {
        merged.push_record(record)?;
    }

    info!(
        "merged {} + {} records into {} ({matched} matched by name)",
        left.len(),
        right.len(),
        merged.len()
    );
    Ok(merged)
}

fn reconcile_records(left: Record, right: Record) -> Result<Record, Error> {
    let name = left.name;
    Ok(Record {
        structure: reconcile(&name, Field::Structure, left.structure, right.structure)?,
        charge: reconcile(&name, Field::Charge, left.charge, right.charge)?,
        topology: reconcile(&name, Field::Topology, left.topology, right.topology)?,
        dipole: reconcile(&name, Field::Dipole, left.dipole, right.dipole)?,
        name,
    })
}

/// Reconciles one field of a matched pair.
///
/// An all-zero side is absent, so the other side is the elementwise sum.
fn reconcile<A, D>(
    name: &str,
    field: Field,
    left: Array<A, D>,
    right: Array<A, D>,
) -> Result<Array<A, D>, Error>
where
    A: Clone + Default + PartialEq + Display,
    D: Dimension,
{
    if left == right {
        return Ok(left);
    }
    let is_absent = |values: &Array<A, D>| values.iter().all(|v| *v == A::default());
    if is_absent(&right) {
        return Ok(left);
    }
    if is_absent(&left) {
        return Ok(right);
    }
    Err(Error::Conflict {
        name: name.to_string(),
        field,
        left: left.to_string(),
        right: right.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DataBatch;
    use crate::model::types::ChargeType;
    use ndarray::{Array2, arr1, arr2};

    fn structure(z: f64) -> Array2<f64> {
        arr2(&[[z, 0.0, 0.0, 0.0], [1.0, 0.0, 0.0, 1.0]])
    }

    /// One carbon per record, placed at `x` on the x axis.
    fn named_at(records: &[(&str, f64)], max_atom: usize) -> Dataset {
        let mut data = Dataset::new(max_atom, ChargeType::Mulliken).unwrap();
        for (name, x) in records {
            let mut row = Array2::<f64>::zeros((max_atom, 4));
            row[[0, 0]] = 6.0;
            row[[0, 1]] = *x;
            data.add_data(DataBatch::new().with_structure(row).with_name(*name))
                .unwrap();
        }
        data
    }

    fn named(names: &[&str], max_atom: usize) -> Dataset {
        let records: Vec<_> = names.iter().map(|n| (*n, 0.0)).collect();
        named_at(&records, max_atom)
    }

    #[test]
    fn structure_and_charge_halves_combine() {
        let a = Dataset::from_batch(
            2,
            ChargeType::Mulliken,
            DataBatch::new().with_structure(structure(8.0)).with_name("mol_a"),
        )
        .unwrap();
        let b = Dataset::from_batch(
            2,
            ChargeType::Mulliken,
            DataBatch::new()
                .with_charge(arr1(&[-0.4, 0.4]))
                .with_name("mol_a"),
        )
        .unwrap();

        let merged = merge(&a, &b).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.structures().unwrap()[[0, 0, 0]], 8.0);
        assert_eq!(merged.charges().unwrap()[[0, 0]], -0.4);
        assert_eq!(merged.names().unwrap(), ["mol_a".to_string()]);
    }

    #[test]
    fn inputs_are_left_untouched() {
        let a = named(&["x"], 6);
        let b = named(&["y"], 4);
        let (a0, b0) = (a.clone(), b.clone());
        let merged = merge(&a, &b).unwrap();
        assert_eq!(a, a0);
        assert_eq!(b, b0);
        assert_eq!(merged.max_atom(), 1);
    }

    #[test]
    fn differing_dipoles_conflict() {
        let make = |dipole: [f64; 3]| {
            Dataset::from_batch(
                2,
                ChargeType::Mulliken,
                DataBatch::new()
                    .with_structure(structure(8.0))
                    .with_name("mol_b")
                    .with_dipole(arr1(&dipole)),
            )
            .unwrap()
        };
        let err = merge(&make([1.0, 0.0, 0.0]), &make([0.0, 2.0, 0.0])).unwrap_err();
        match err {
            Error::Conflict {
                name,
                field,
                left,
                right,
            } => {
                assert_eq!(name, "mol_b");
                assert_eq!(field, Field::Dipole);
                assert_eq!(left, arr1(&[1.0, 0.0, 0.0]).to_string());
                assert_eq!(right, arr1(&[0.0, 2.0, 0.0]).to_string());
            }
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn overlapping_names_are_merged_once() {
        let a = named_at(&[("a", 0.0), ("b", 1.0)], 3);
        let b = named_at(&[("b", 1.0), ("c", 2.0)], 3);

        let merged = merge(&a, &b).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.names().unwrap(),
            ["a".to_string(), "b".to_string(), "c".to_string()]
        );
        let structures = merged.structures().unwrap();
        assert_eq!(structures[[1, 0, 1]], 1.0);
        assert_eq!(structures[[2, 0, 1]], 2.0);
    }

    #[test]
    fn same_name_at_different_positions_conflicts() {
        let a = named_at(&[("b", 1.0)], 2);
        let b = named_at(&[("b", 3.0)], 2);
        let err = merge(&a, &b).unwrap_err();
        assert!(matches!(
            err,
            Error::Conflict { ref name, field: Field::Structure, .. } if name == "b"
        ));
    }

    #[test]
    fn duplicate_names_are_ambiguous() {
        let err = merge(&named(&["a"], 2), &named(&["a", "a"], 2)).unwrap_err();
        assert!(matches!(err, Error::AmbiguousMatch { count: 2, .. }));
    }

    #[test]
    fn charge_scheme_must_agree() {
        let a = Dataset::new(2, ChargeType::Mulliken).unwrap();
        let b = Dataset::new(2, ChargeType::Hirshfeld).unwrap();
        assert!(matches!(
            merge(&a, &b),
            Err(Error::ChargeTypeMismatch { .. })
        ));
    }

    #[test]
    fn unbalanced_inputs_are_rejected() {
        let mut a = named(&["a"], 2);
        a.add_data(DataBatch::new().with_name("orphan")).unwrap();
        assert!(matches!(
            merge(&a, &named(&["b"], 2)),
            Err(Error::RecordCount { .. })
        ));
    }
}
