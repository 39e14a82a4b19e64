use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use gdata::io::Format;

/// Format of a single input file, from its extension.
pub fn file_format(path: &Path) -> Option<Format> {
    Format::from_path(path)
}

/// Most common recognised format among the files directly inside `dir`.
pub fn dir_format(dir: &Path) -> Result<Format> {
    let mut counts: HashMap<Format, usize> = HashMap::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("Cannot list directory {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if let Some(format) = Format::from_path(&path) {
            *counts.entry(format).or_insert(0) += 1;
        }
    }
    pick_dominant(&counts).with_context(|| format!("Cannot infer input format of {}", dir.display()))
}

fn pick_dominant(counts: &HashMap<Format, usize>) -> Result<Format> {
    let Some(best) = counts.values().copied().max() else {
        bail!("no files with a recognised extension");
    };
    let leaders: Vec<Format> = Format::ALL
        .into_iter()
        .filter(|format| counts.get(format) == Some(&best))
        .collect();
    match leaders.as_slice() {
        [format] => Ok(*format),
        _ => bail!(
            "{} formats are equally common ({}); pass --format",
            leaders.len(),
            leaders
                .iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}
