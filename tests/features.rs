mod common;

use common::{BENZENE_RING_MOL2, assert_close, water_structure, write_file};
use gdata::io::{Format, ReadOptions};
use gdata::{ChargeType, DataBatch, Dataset, Element};
use ndarray::{Axis, s};

#[test]
fn adjacency_is_the_binary_image_of_topology() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "ring.mol2", BENZENE_RING_MOL2);
    let mut data = Dataset::new(6, ChargeType::Mulliken).unwrap();
    data.read_file(&path, Format::Mol2, &ReadOptions::default())
        .unwrap();

    let topology = data.topologies().unwrap();
    let adjacency = data.adjacency().unwrap();
    assert!(adjacency.iter().all(|a| *a == 0 || *a == 1));
    for (a, t) in adjacency.iter().zip(topology.iter()) {
        assert_eq!(*a == 1, *t != 0);
    }

    let degree = data.degree().unwrap();
    assert_eq!(
        degree.index_axis(Axis(0), 0).diag().to_vec(),
        vec![2, 2, 2, 2, 1, 1]
    );
}

#[test]
fn inertia_tensor_is_symmetric_with_the_expected_trace() {
    let data = Dataset::from_batch(
        4,
        ChargeType::Mulliken,
        DataBatch::new().with_structure(water_structure(4)),
    )
    .unwrap();

    let tensor = data.inertia_tensors().unwrap().unwrap();
    let t = tensor.index_axis(Axis(0), 0);
    for i in 0..3 {
        for j in 0..3 {
            assert_close(t[[i, j]], t[[j, i]], 1e-12);
        }
    }

    let structure = water_structure(4);
    let masses: Vec<f64> = structure
        .outer_iter()
        .map(|row| Element::from_slot(row[0]).unwrap().atomic_mass())
        .collect();
    let total: f64 = masses.iter().sum();
    let mut centre = [0.0; 3];
    for (row, m) in structure.outer_iter().zip(&masses) {
        for k in 0..3 {
            centre[k] += m * row[k + 1] / total;
        }
    }
    let expected_trace: f64 = structure
        .outer_iter()
        .zip(&masses)
        .map(|(row, m)| {
            let r2: f64 = (0..3).map(|k| (row[k + 1] - centre[k]).powi(2)).sum();
            2.0 * m * r2
        })
        .sum();
    assert_close(t.diag().sum(), expected_trace, 1e-9);

    let centres = data.mass_centres().unwrap().unwrap();
    assert_close(centres[[0, 2]], centre[2], 1e-12);
}

#[test]
fn principal_axis_frame_diagonalises_the_tensor() {
    let mut data = Dataset::from_batch(
        4,
        ChargeType::Mulliken,
        DataBatch::new().with_structure(water_structure(4)),
    )
    .unwrap();
    let distances_before = data.atomic_distances().unwrap();

    data.convert_to_mi_coordinates().unwrap();
    assert!(data.mi_coor());

    let tensor = data.inertia_tensors().unwrap().unwrap();
    let t = tensor.index_axis(Axis(0), 0);
    assert_close(t[[0, 1]], 0.0, 1e-9);
    assert_close(t[[0, 2]], 0.0, 1e-9);
    assert_close(t[[1, 2]], 0.0, 1e-9);
    assert!(t[[0, 0]] <= t[[1, 1]] + 1e-9 && t[[1, 1]] <= t[[2, 2]] + 1e-9);

    let distances_after = data.atomic_distances().unwrap();
    for (a, b) in distances_before.iter().zip(distances_after.iter()) {
        assert_close(*a, *b, 1e-9);
    }
    let padding = data.structures().unwrap().slice(s![0, 3, ..]).to_vec();
    assert_eq!(padding, vec![0.0; 4]);
}
