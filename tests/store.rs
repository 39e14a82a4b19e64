mod common;

use std::fs;

use common::{H2_XYZ, WATER_LOG, WATER_XYZ, write_file};
use gdata::io::{Format, ReadOptions};
use gdata::{ChargeType, Dataset, DatasetError, ErrorKind, StorePaths};

fn read_mixed(dir: &std::path::Path) -> Dataset {
    let inputs = dir.join("inputs");
    fs::create_dir(&inputs).unwrap();
    write_file(&inputs, "water.log", WATER_LOG);
    write_file(&inputs, "h2.xyz", H2_XYZ);

    let mut data = Dataset::new(4, ChargeType::Mulliken).unwrap();
    let options = ReadOptions::default();
    data.read_dir(&inputs, Format::Log, &options).unwrap();
    data.read_dir(&inputs, Format::Xyz, &options).unwrap();
    data.pad_zeros();
    data
}

#[test]
fn save_all_then_load_all_restores_the_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let mut data = read_mixed(dir.path());
    data.convert_to_mi_coordinates().unwrap();

    let store = dir.path().join("set");
    data.save_all(&store).unwrap();
    for file in ["structure.npy", "charge.npy", "name.npy", "topology.npy", "dipole.npy", "config.toml"] {
        assert!(store.join(file).is_file(), "{file} was not written");
    }

    let mut loaded = Dataset::default();
    loaded.load_all(&store).unwrap();
    assert_eq!(loaded, data);
    assert!(loaded.mi_coor());
    assert_eq!(
        loaded.names().unwrap(),
        ["water".to_string(), "h2".to_string()]
    );
}

#[test]
fn subsets_can_be_saved_and_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let data = read_mixed(dir.path());

    let store = dir.path().join("partial");
    fs::create_dir(&store).unwrap();
    let paths = StorePaths {
        structure: Some(store.join("structure.npy")),
        name: Some(store.join("name.npy")),
        ..StorePaths::default()
    };
    data.save(&paths).unwrap();
    assert!(!store.join("charge.npy").exists());

    let mut loaded = Dataset::new(9, ChargeType::Hirshfeld).unwrap();
    loaded.load_all(&store).unwrap();
    assert_eq!(loaded.max_atom(), 4);
    assert_eq!(loaded.charge_type(), ChargeType::Hirshfeld);
    assert_eq!(loaded.data_shape().as_array(), [2, 0, 2, 0, 0]);
    assert_eq!(loaded.structures(), data.structures());
}

#[test]
fn inconsistent_store_is_rejected_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let data = read_mixed(dir.path());
    let store = dir.path().join("set");
    data.save_all(&store).unwrap();
    fs::write(
        store.join("config.toml"),
        "max_atom = 7\ncharge_type = \"Mulliken\"\nmi_coor = false\n",
    )
    .unwrap();

    let mut target = Dataset::new(2, ChargeType::Mulliken).unwrap();
    let before = target.clone();
    let err = target.load_all(&store).unwrap_err();
    assert!(matches!(err, DatasetError::MaxAtom { expected: 7, found: 4, .. }));
    assert_eq!(err.kind(), ErrorKind::Consistency);
    assert_eq!(target, before);
}

#[test]
fn exported_xyz_reads_back_to_the_same_structures() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_file(dir.path(), "water.xyz", WATER_XYZ);
    let mut data = Dataset::new(3, ChargeType::Mulliken).unwrap();
    data.read_file(&source, Format::Xyz, &ReadOptions::default())
        .unwrap();

    let out = dir.path().join("export");
    let report = data.export_xyz(&out, true).unwrap();
    assert_eq!(report.written, 1);
    assert!(report.failures.is_empty());

    let mut again = Dataset::new(3, ChargeType::Mulliken).unwrap();
    again
        .read_file(&out.join("water.xyz"), Format::Xyz, &ReadOptions::default())
        .unwrap();
    assert_eq!(again.structures(), data.structures());
}
