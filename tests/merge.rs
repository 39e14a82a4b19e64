mod common;

use common::{carbons, water_structure};
use gdata::{ChargeType, DataBatch, Dataset, DatasetError, Field, merge};
use ndarray::arr1;

#[test]
fn absent_structure_and_charge_are_reconciled() {
    let structures = Dataset::from_batch(
        3,
        ChargeType::Mulliken,
        DataBatch::new()
            .with_structure(water_structure(3))
            .with_name("mol_a"),
    )
    .unwrap();
    let charges = Dataset::from_batch(
        3,
        ChargeType::Mulliken,
        DataBatch::new()
            .with_charge(arr1(&[-0.8, 0.4, 0.4]))
            .with_name("mol_a"),
    )
    .unwrap();

    let merged = merge(&structures, &charges).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged.names().unwrap(), ["mol_a".to_string()]);
    assert_eq!(merged.atom_info().unwrap().row(0).to_vec(), vec![8, 1, 1]);
    assert_eq!(merged.charges().unwrap().row(0).to_vec(), vec![-0.8, 0.4, 0.4]);
    merged.self_check().unwrap();
}

#[test]
fn differing_dipoles_are_a_fatal_conflict() {
    let with_dipole = |dipole: [f64; 3]| {
        Dataset::from_batch(
            3,
            ChargeType::Mulliken,
            DataBatch::new()
                .with_structure(water_structure(3))
                .with_dipole(arr1(&dipole))
                .with_name("mol_b"),
        )
        .unwrap()
    };

    let err = merge(&with_dipole([0.0, 0.0, 1.8]), &with_dipole([0.0, 0.0, 2.1])).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("mol_b"));
    assert!(message.contains("1.8"));
    assert!(message.contains("2.1"));
    assert!(matches!(
        err,
        DatasetError::Conflict {
            field: Field::Dipole,
            ..
        }
    ));
}

#[test]
fn overlapping_names_are_reconciled_once() {
    let left = carbons(&["a", "b"], 2);
    let mut right = Dataset::new(2, ChargeType::Mulliken).unwrap();
    right
        .add_data(
            DataBatch::new()
                .with_structure(left.record(1).unwrap().structure)
                .with_name("b"),
        )
        .unwrap();
    right
        .add_data(
            DataBatch::new()
                .with_structure(common::structure(&[[7.0, 0.0, 0.0, 0.0]], 2))
                .with_name("c"),
        )
        .unwrap();

    let merged = merge(&left, &right).unwrap();
    assert_eq!(merged.len(), 3);
    assert_eq!(
        merged.names().unwrap(),
        ["a".to_string(), "b".to_string(), "c".to_string()]
    );
    assert_eq!(merged.atom_info().unwrap().column(0).to_vec(), vec![6, 6, 7]);
}

#[test]
fn merge_grows_to_the_larger_content_bound() {
    let small = carbons(&["methane"], 8);
    let large = Dataset::from_batch(
        3,
        ChargeType::Mulliken,
        DataBatch::new()
            .with_structure(water_structure(3))
            .with_name("water"),
    )
    .unwrap();

    let merged = merge(&small, &large).unwrap();
    assert_eq!(merged.max_atom(), 3);
    assert_eq!(merged.len(), 2);
    assert_eq!(small.max_atom(), 8);
}
