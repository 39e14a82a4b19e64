use std::io::{self, Write};

use anyhow::Error;
use gdata::io::{Error as IoError, Format};
use gdata::{DatasetError, Element, ErrorKind};

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
    }

    let hints = hints_for(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

fn hints_for(err: &Error) -> Vec<String> {
    let mut collector = HintCollector::default();
    if let Some(data_err) = err.downcast_ref::<DatasetError>() {
        collector.dataset(data_err);
    } else if let Some(io_err) = err.downcast_ref::<IoError>() {
        collector.parse(io_err);
    } else if let Some(source) = err.downcast_ref::<std::io::Error>() {
        collector.std_io(source);
    }
    collector.hints
}

#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
}

impl HintCollector {
    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn dataset(&mut self, err: &DatasetError) {
        match err {
            DatasetError::Read { source, .. } => self.parse(source),
            DatasetError::Store { source, .. } => self.std_io(source),
            DatasetError::Npy { .. } => {
                self.add("A tensor file is not a readable .npy array of the expected type");
                self.add("Re-save the dataset with `gdata read` or remove the damaged file");
            }
            DatasetError::Config { .. } => {
                self.add("config.toml needs max_atom, charge_type and mi_coor entries");
                self.add("charge_type must be \"Mulliken\" or \"Hirshfeld\"");
            }
            DatasetError::CannotShrink { required, .. } => {
                self.add(format!("At least {required} atom slots are in use"));
                self.add("Use `gdata resize --minimise` to find the smallest valid size");
            }
            DatasetError::ChargeTypeMismatch { .. } => {
                self.add("Both datasets must be read with the same --charge-type");
            }
            DatasetError::AmbiguousMatch { name, .. } => {
                self.add(format!("Record names must be unique; '{name}' is repeated"));
            }
            DatasetError::Conflict { field, .. } => {
                self.add(format!(
                    "Both datasets hold different non-zero {field} data for this record"
                ));
                self.add("Rename one of the records or drop the field before merging");
            }
            DatasetError::Empty(field) => {
                self.add(format!("The dataset holds no {field} records"));
            }
            DatasetError::Symbol(_) => {
                let symbols: Vec<&str> = Element::ALL
                    .iter()
                    .filter(|e| !e.is_ghost())
                    .map(|e| e.symbol())
                    .collect();
                self.add(format!("Supported elements: {}", symbols.join(", ")));
            }
            other => self.kind(other.kind()),
        }
    }

    fn parse(&mut self, err: &IoError) {
        match err {
            IoError::Io { source } => self.std_io(source),
            IoError::Parse { format, line, .. } => {
                self.add(format!(
                    "Parser stopped near line {line} of the {format} input"
                ));
                self.add("Inspect the file around that line for malformed entries");
                self.format(*format);
            }
            IoError::Validation { .. } => {
                self.add("The Gaussian job did not finish with a normal termination");
                self.add("Pass --no-validate-log to read it anyway");
            }
            IoError::TooManyAtoms { max_atom, .. } => {
                self.add(format!("The dataset was created with max_atom {max_atom}"));
                self.add("Pass a larger --max-atom or resize the dataset first");
            }
        }
    }

    fn format(&mut self, format: Format) {
        match format {
            Format::Xyz => {
                self.add("Pass --no-xyz-header for files without count and comment lines")
            }
            Format::Zmat => self.add("Atom lines need 'X x y z' after the charge line"),
            Format::Log => self.add("The log needs an orientation block and a charge table"),
            Format::Mol | Format::Mol2 => {
                self.add("Check that the counts line matches the atom and bond blocks")
            }
        }
    }

    fn kind(&mut self, kind: ErrorKind) {
        if kind == ErrorKind::Consistency {
            self.add("Field tensors disagree on record count or max_atom");
            self.add("Run `gdata info` on the dataset to see every field's shape");
        }
    }

    fn std_io(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure it exists");
            }
            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the path");
                self.add("Check permissions with `ls -la`");
            }
            ErrorKind::InvalidData => {
                self.add("The file is not valid UTF-8 text or is corrupted");
            }
            _ => self.add("Check the path, permissions and available disk space"),
        }
    }
}
