use super::{DataBatch, Dataset, Error};
use crate::ErrorKind;
use crate::io::{self, Format, ReadOptions};
use crate::model::{atom::Atom, molecule::Molecule};
use log::{debug, info, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// A file that a batch operation skipped.
#[derive(Debug)]
pub struct Failure {
    pub path: PathBuf,
    pub error: Error,
}

/// Outcome of [`Dataset::read_dir`].
#[derive(Debug, Default)]
pub struct BatchReport {
    pub read: usize,
    pub io_failures: Vec<Failure>,
    pub content_failures: Vec<Failure>,
    pub validation_failures: Vec<Failure>,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.io_failures.len() + self.content_failures.len() + self.validation_failures.len()
    }

    pub fn total(&self) -> usize {
        self.read + self.failed()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Failure> {
        self.io_failures
            .iter()
            .chain(&self.content_failures)
            .chain(&self.validation_failures)
    }

    fn record(&mut self, path: PathBuf, error: Error) {
        let failure = Failure { path, error };
        match failure.error.kind() {
            ErrorKind::Io => self.io_failures.push(failure),
            ErrorKind::Validation => self.validation_failures.push(failure),
            ErrorKind::Content | ErrorKind::Consistency => self.content_failures.push(failure),
        }
    }
}

/// Outcome of [`Dataset::export_xyz`].
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: usize,
    pub failures: Vec<Failure>,
}

/// Record name for a file: its name without directory and final extension.
fn record_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Dataset {
    /// Parses one file and appends it as a record named after the file.
    ///
    /// Structure and name are always appended; charge, topology and dipole
    /// only when the format carries them. A molecule wider than `max_atom`
    /// grows the dataset for `.mol`/`.mol2` and fails for other formats.
    pub fn read_file(
        &mut self,
        path: &Path,
        format: Format,
        options: &ReadOptions,
    ) -> Result<(), Error> {
        let read_error = |source: io::Error| Error::Read {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(|e| read_error(e.into()))?;
        let molecule = io::read(format, BufReader::new(file), options, self.charge_type)
            .map_err(read_error)?;

        let required = molecule.required_max_atom();
        if required > self.max_atom {
            if !format.grows_max_atom() {
                return Err(read_error(io::Error::TooManyAtoms {
                    format,
                    found: required,
                    max_atom: self.max_atom,
                }));
            }
            warn!(
                "{} needs {required} atom slots; growing max_atom from {}",
                path.display(),
                self.max_atom
            );
            self.change_max_atom(required)?;
        }

        self.add_molecule(record_name(path), &molecule)?;
        if format == Format::Xyz {
            warn!(
                "{}: xyz input carries no charge or topology",
                path.display()
            );
        }
        info!(
            "read {} ({} atoms) from {}",
            format,
            molecule.atom_count(),
            path.display()
        );
        Ok(())
    }

    /// Reads every `format` file directly inside `dir`, in name order.
    ///
    /// Sub-directories and files with other extensions are skipped. Files
    /// that fail to read are tallied by error kind and do not stop the batch;
    /// only an unreadable `dir` is an error.
    pub fn read_dir(
        &mut self,
        dir: &Path,
        format: Format,
        options: &ReadOptions,
    ) -> Result<BatchReport, Error> {
        let store_error = |source: std::io::Error| Error::Store {
            path: dir.to_path_buf(),
            source,
        };
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(store_error)? {
            let path = entry.map_err(store_error)?.path();
            if path.is_dir() {
                debug!("skipping directory {}", path.display());
                continue;
            }
            if Format::from_path(&path) != Some(format) {
                debug!("skipping {} (not {format})", path.display());
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        let mut report = BatchReport::default();
        for path in paths {
            match self.read_file(&path, format, options) {
                Ok(()) => report.read += 1,
                Err(err) => {
                    warn!("skipping {}: {err}", path.display());
                    report.record(path, err);
                }
            }
        }

        info!(
            "read {} of {} {format} files from {} ({} io, {} content, {} validation failures)",
            report.read,
            report.total(),
            dir.display(),
            report.io_failures.len(),
            report.content_failures.len(),
            report.validation_failures.len()
        );
        Ok(report)
    }

    /// Pads `molecule` to `max_atom` and appends its fields.
    pub fn add_molecule(&mut self, name: String, molecule: &Molecule) -> Result<(), Error> {
        let padded = molecule.pad(self.max_atom).ok_or(Error::CannotShrink {
            requested: self.max_atom,
            required: molecule.required_max_atom(),
        })?;

        let mut batch = DataBatch::new()
            .with_structure(padded.structure)
            .with_name(name);
        if let Some(charge) = padded.charge {
            batch = batch.with_charge(charge);
        }
        if let Some(topology) = padded.topology {
            batch = batch.with_topology(topology);
        }
        if let Some(dipole) = padded.dipole {
            batch = batch.with_dipole(dipole);
        }
        self.add_data(batch)
    }

    /// Writes one `<name>.xyz` per structure record into `dir`.
    ///
    /// Records without a name are written as `<index>.xyz`. Records with an
    /// unknown atomic number and files that cannot be written are reported
    /// and skipped.
    pub fn export_xyz(&self, dir: &Path, header: bool) -> Result<ExportReport, Error> {
        let Some(structures) = self.structures() else {
            return Ok(ExportReport::default());
        };
        fs::create_dir_all(dir).map_err(|source| Error::Store {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut report = ExportReport::default();
        for (index, structure) in structures.outer_iter().enumerate() {
            let stem = export_stem(self.names.get(index).map(String::as_str), index);
            let path = dir.join(format!("{stem}.xyz"));

            let atoms = match structure
                .outer_iter()
                .map(|row| Atom::from_row([row[0], row[1], row[2], row[3]]))
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(atoms) => atoms,
                Err(err) => {
                    warn!("skipping {}: {err}", path.display());
                    report.failures.push(Failure {
                        path,
                        error: err.into(),
                    });
                    continue;
                }
            };

            match write_xyz(&path, &atoms, header) {
                Ok(count) => {
                    debug!("wrote {count} atoms to {}", path.display());
                    report.written += 1;
                }
                Err(error) => {
                    warn!("could not write {}: {error}", path.display());
                    report.failures.push(Failure { path, error });
                }
            }
        }

        info!(
            "exported {} structures to {} ({} failed)",
            report.written,
            dir.display(),
            report.failures.len()
        );
        Ok(report)
    }
}

/// File stem for an exported record. Path separators in the name become `_`,
/// and empty or dot-only names fall back to the record index.
fn export_stem(name: Option<&str>, index: usize) -> String {
    match name {
        Some(name) if !name.is_empty() && name != "." && name != ".." => name
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect(),
        _ => index.to_string(),
    }
}

fn write_xyz(path: &Path, atoms: &[Atom], header: bool) -> Result<usize, Error> {
    let store_error = |source: std::io::Error| Error::Store {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(store_error)?;
    io::xyz::writer::write(BufWriter::new(file), atoms, header).map_err(|err| match err {
        io::Error::Io { source } => store_error(source),
        other => Error::Read {
            path: path.to_path_buf(),
            source: other,
        },
    })
}
