mod infer;

pub use infer::{dir_format as infer_dir_format, file_format as infer_file_format};

use std::io::{self, IsTerminal};
use std::path::Path;

use anyhow::{Context, Result};
use gdata::{Dataset, Field, StorePaths};

/// Returns `true` if stderr is a terminal (interactive).
pub fn stderr_is_tty() -> bool {
    io::stderr().is_terminal()
}

/// Loads the dataset saved in `dir`.
pub fn load_dataset(dir: &Path) -> Result<Dataset> {
    if !dir.is_dir() {
        anyhow::bail!("Dataset directory {} does not exist", dir.display());
    }
    let mut data = Dataset::default();
    data.load_all(dir)
        .with_context(|| format!("Failed to load dataset from {}", dir.display()))?;
    Ok(data)
}

/// Saves `data` into `dir`, creating the directory if needed.
pub fn save_dataset(data: &Dataset, dir: &Path) -> Result<()> {
    data.save_all(dir)
        .with_context(|| format!("Failed to save dataset to {}", dir.display()))
}

/// Returns `true` if `dir` already holds any saved dataset file.
pub fn holds_dataset(dir: &Path) -> bool {
    let paths = StorePaths::in_dir(dir).existing();
    paths.config.is_some() || Field::ALL.into_iter().any(|field| paths.get(field).is_some())
}
