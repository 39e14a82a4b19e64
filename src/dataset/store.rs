use super::{Dataset, Error, Field, check_shapes};
use crate::model::types::ChargeType;
use log::{debug, info};
use ndarray::{Array2, ArrayD, ArrayView2, Ix2, Ix3};
use ndarray_npy::{ReadableElement, read_npy, write_npy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";

/// The persisted dataset configuration (`config.toml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub max_atom: usize,
    pub charge_type: ChargeType,
    pub mi_coor: bool,
}

/// Locations of the persisted files; `None` entries are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorePaths {
    pub structure: Option<PathBuf>,
    pub charge: Option<PathBuf>,
    pub name: Option<PathBuf>,
    pub topology: Option<PathBuf>,
    pub dipole: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

impl StorePaths {
    /// The standard file names (`structure.npy`, ..., `config.toml`) inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        let npy = |field: Field| Some(dir.join(format!("{}.npy", field.file_stem())));
        Self {
            structure: npy(Field::Structure),
            charge: npy(Field::Charge),
            name: npy(Field::Name),
            topology: npy(Field::Topology),
            dipole: npy(Field::Dipole),
            config: Some(dir.join(CONFIG_FILE)),
        }
    }

    pub fn get(&self, field: Field) -> Option<&Path> {
        match field {
            Field::Structure => self.structure.as_deref(),
            Field::Charge => self.charge.as_deref(),
            Field::Name => self.name.as_deref(),
            Field::Topology => self.topology.as_deref(),
            Field::Dipole => self.dipole.as_deref(),
        }
    }

    /// Drops every path that does not point at an existing file.
    pub fn existing(self) -> Self {
        let keep = |path: Option<PathBuf>| path.filter(|p| p.is_file());
        Self {
            structure: keep(self.structure),
            charge: keep(self.charge),
            name: keep(self.name),
            topology: keep(self.topology),
            dipole: keep(self.dipole),
            config: keep(self.config),
        }
    }
}

impl Dataset {
    pub fn config(&self) -> StoreConfig {
        StoreConfig {
            max_atom: self.max_atom,
            charge_type: self.charge_type,
            mi_coor: self.mi_coor,
        }
    }

    /// Writes the selected fields and the configuration.
    pub fn save(&self, paths: &StorePaths) -> Result<(), Error> {
        if let Some(path) = &paths.structure {
            write_tensor(path, &self.structures)?;
        }
        if let Some(path) = &paths.charge {
            write_tensor(path, &self.charges)?;
        }
        if let Some(path) = &paths.name {
            write_tensor(path, &encode_names(&self.names))?;
        }
        if let Some(path) = &paths.topology {
            write_tensor(path, &self.topologies)?;
        }
        if let Some(path) = &paths.dipole {
            write_tensor(path, &self.dipoles)?;
        }
        if let Some(path) = &paths.config {
            let text = toml::to_string(&self.config())?;
            fs::write(path, text).map_err(|source| Error::Store {
                path: path.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Writes every field and the configuration into `dir`, creating it if needed.
    pub fn save_all(&self, dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(dir).map_err(|source| Error::Store {
            path: dir.to_path_buf(),
            source,
        })?;
        self.save(&StorePaths::in_dir(dir))?;
        info!("saved {} records to {}", self.len(), dir.display());
        Ok(())
    }

    /// Replaces the whole dataset with the selected files.
    ///
    /// All files are read and checked for consistency before anything is
    /// replaced; on error the dataset is unchanged. Fields without a file
    /// come back empty. Without a configuration file, `max_atom` is taken
    /// from the tensors and the charge scheme is kept.
    pub fn load(&mut self, paths: &StorePaths) -> Result<(), Error> {
        let config = paths.config.as_deref().map(read_config).transpose()?;

        let structures = paths.structure.as_deref().map(read_tensor::<f64>).transpose()?;
        let charges = paths.charge.as_deref().map(read_tensor::<f64>).transpose()?;
        let topologies = paths.topology.as_deref().map(read_tensor::<i64>).transpose()?;
        let dipoles = paths.dipole.as_deref().map(read_tensor::<f64>).transpose()?;
        let names = paths
            .name
            .as_deref()
            .map(read_names)
            .transpose()?;

        let name_count = names.as_ref().map(|n| [n.len()]);
        let mut shapes: Vec<(Field, &[usize])> = Vec::new();
        if let Some(a) = &structures {
            shapes.push((Field::Structure, a.shape()));
        }
        if let Some(a) = &charges {
            shapes.push((Field::Charge, a.shape()));
        }
        if let Some(n) = &name_count {
            shapes.push((Field::Name, n.as_slice()));
        }
        if let Some(a) = &topologies {
            shapes.push((Field::Topology, a.shape()));
        }
        if let Some(a) = &dipoles {
            shapes.push((Field::Dipole, a.shape()));
        }
        let inferred = check_shapes(&shapes)?;

        let max_atom = match (config, inferred) {
            (Some(config), Some(found)) if config.max_atom != found => {
                return Err(Error::MaxAtom {
                    field: Field::Structure,
                    expected: config.max_atom,
                    found,
                });
            }
            (Some(config), _) => config.max_atom,
            (None, Some(found)) => found,
            (None, None) => self.max_atom,
        };
        let charge_type = config.map_or(self.charge_type, |c| c.charge_type);

        let mut loaded = Dataset::new(max_atom, charge_type)?;
        loaded.mi_coor = config.is_some_and(|c| c.mi_coor);
        if let Some(a) = structures {
            loaded.structures = a.into_dimensionality::<Ix3>()?;
        }
        if let Some(a) = charges {
            loaded.charges = a.into_dimensionality::<Ix2>()?;
        }
        if let Some(names) = names {
            loaded.names = names;
        }
        if let Some(a) = topologies {
            loaded.topologies = a.into_dimensionality::<Ix3>()?;
        }
        if let Some(a) = dipoles {
            loaded.dipoles = a.into_dimensionality::<Ix2>()?;
        }

        *self = loaded;
        info!(
            "loaded dataset: {:?} records, max_atom {}, {} charges",
            self.data_shape().as_array(),
            self.max_atom,
            self.charge_type
        );
        Ok(())
    }

    /// Loads whichever standard files exist in `dir`.
    pub fn load_all(&mut self, dir: &Path) -> Result<(), Error> {
        let paths = StorePaths::in_dir(dir).existing();
        debug!("loading from {}: {paths:?}", dir.display());
        self.load(&paths)
    }
}

fn npy_error(path: &Path, err: impl std::fmt::Display) -> Error {
    Error::Npy {
        path: path.to_path_buf(),
        details: err.to_string(),
    }
}

fn write_tensor<T: ndarray_npy::WriteNpyExt>(path: &Path, array: &T) -> Result<(), Error> {
    write_npy(path, array).map_err(|e| npy_error(path, e))
}

fn read_tensor<A: ReadableElement>(path: &Path) -> Result<ArrayD<A>, Error> {
    read_npy(path).map_err(|e| npy_error(path, e))
}

fn read_config(path: &Path) -> Result<StoreConfig, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Store {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

fn read_names(path: &Path) -> Result<Vec<String>, Error> {
    let bytes = read_tensor::<u8>(path)?;
    if bytes.ndim() != 2 {
        return Err(Error::Rank {
            field: Field::Name,
            expected: 1,
            found: bytes.ndim(),
        });
    }
    let bytes = bytes.into_dimensionality::<Ix2>()?;
    Ok(decode_names(bytes.view()))
}

/// Fixed-width, zero-padded UTF-8 rows, one per name.
fn encode_names(names: &[String]) -> Array2<u8> {
    let width = names.iter().map(String::len).max().unwrap_or(0);
    let mut out = Array2::zeros((names.len(), width));
    for (mut row, name) in out.outer_iter_mut().zip(names) {
        for (slot, byte) in row.iter_mut().zip(name.bytes()) {
            *slot = byte;
        }
    }
    out
}

fn decode_names(bytes: ArrayView2<u8>) -> Vec<String> {
    bytes
        .outer_iter()
        .map(|row| {
            let raw: Vec<u8> = row.iter().copied().take_while(|&b| b != 0).collect();
            String::from_utf8_lossy(&raw).into_owned()
        })
        .collect()
}
