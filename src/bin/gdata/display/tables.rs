use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;

use gdata::{BatchReport, Dataset, Element, Field};

use crate::util::text::truncate;

const INDENT: &str = "      ";
const KEY_W: usize = 20;
const VALUE_W: usize = 30;

pub fn print_dataset_summary(dir: &Path, data: &Dataset) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let shape = data.data_shape();
    let mut rows = vec![
        ("Location".to_string(), dir.display().to_string()),
        ("Records".to_string(), data.len().to_string()),
        ("max_atom".to_string(), data.max_atom().to_string()),
        ("Charge type".to_string(), data.charge_type().to_string()),
        (
            "Principal axes".to_string(),
            if data.mi_coor() { "yes" } else { "no" }.to_string(),
        ),
    ];
    for field in Field::ALL {
        rows.push((format!("{field} records"), shape.get(field).to_string()));
    }
    if !shape.is_balanced() {
        rows.push(("Balanced".to_string(), "no".to_string()));
    }

    print_kv_table(&mut out, "Dataset Summary", &rows);
}

pub fn print_element_counts(data: &Dataset) {
    let Some(info) = data.atom_info() else {
        return;
    };
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for z in info.iter().filter(|z| **z != 0) {
        *counts.entry(*z).or_insert(0) += 1;
    }
    let rows: Vec<(String, String)> = counts
        .into_iter()
        .map(|(z, count)| {
            let label = u8::try_from(z)
                .ok()
                .and_then(|n| Element::from_atomic_number(n).ok())
                .map(|e| e.symbol().to_string())
                .unwrap_or_else(|| format!("Z={z}"));
            (label, count.to_string())
        })
        .collect();

    let stderr = io::stderr();
    let mut out = stderr.lock();
    print_kv_table(&mut out, "Atoms by Element", &rows);
}

pub fn print_batch_report(report: &BatchReport) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let rows = vec![
        ("Read".to_string(), report.read.to_string()),
        ("I/O failures".to_string(), report.io_failures.len().to_string()),
        (
            "Content failures".to_string(),
            report.content_failures.len().to_string(),
        ),
        (
            "Validation failures".to_string(),
            report.validation_failures.len().to_string(),
        ),
    ];
    print_kv_table(&mut out, "Batch Report", &rows);

    for failure in report.failures().take(10) {
        let name = failure
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{INDENT}  \x1b[33m!\x1b[0m {}: {:?}",
            truncate(&name, KEY_W),
            failure.error.kind()
        );
    }
    if report.failed() > 10 {
        let _ = writeln!(out, "{INDENT}  … {} more", report.failed() - 10);
    }
}

fn print_kv_table(out: &mut impl Write, title: &str, rows: &[(String, String)]) {
    let key_line = "─".repeat(KEY_W + 2);
    let value_line = "─".repeat(VALUE_W + 2);

    let _ = writeln!(out, "{INDENT}┌─ {title} ─┐");
    let _ = writeln!(out, "{INDENT}┌{key_line}┬{value_line}┐");
    for (key, value) in rows {
        let _ = writeln!(
            out,
            "{INDENT}│ {:<KEY_W$} │ {:>VALUE_W$} │",
            truncate(key, KEY_W),
            truncate(value, VALUE_W)
        );
    }
    let _ = writeln!(out, "{INDENT}└{key_line}┴{value_line}┘");
}
