use super::Format;
use crate::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse {format} data: {details} (at line ~{line})")]
    Parse {
        format: Format,
        line: usize,
        details: String,
    },

    #[error("{format} file failed validation: {details}")]
    Validation { format: Format, details: String },

    #[error("{format} file holds {found} atoms but max_atom is {max_atom}")]
    TooManyAtoms {
        format: Format,
        found: usize,
        max_atom: usize,
    },
}

impl Error {
    pub fn parse(format: Format, line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            line,
            details: details.into(),
        }
    }

    pub fn validation(format: Format, details: impl Into<String>) -> Self {
        Self::Validation {
            format,
            details: details.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io { .. } => ErrorKind::Io,
            Error::Parse { .. } | Error::TooManyAtoms { .. } => ErrorKind::Content,
            Error::Validation { .. } => ErrorKind::Validation,
        }
    }
}
