use super::{Format, error::Error};
use crate::model::types::Element;
use std::io::BufRead;
use std::str::FromStr;

/// A source line paired with its 1-based line number.
pub type Line = (usize, String);

pub fn collect_lines<R: BufRead>(reader: R) -> Result<Vec<Line>, Error> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| {
            line.map(|v| (i + 1, v))
                .map_err(|e| Error::Io { source: e })
        })
        .collect()
}

/// Index of the first line containing `marker`.
pub fn find_first(lines: &[Line], marker: &str) -> Option<usize> {
    lines.iter().position(|(_, line)| line.contains(marker))
}

/// Index of the last line containing any of `markers`.
pub fn find_last(lines: &[Line], markers: &[&str]) -> Option<usize> {
    lines
        .iter()
        .rposition(|(_, line)| markers.iter().any(|m| line.contains(m)))
}

/// Line number for error reporting at `idx`, falling back to the last line.
pub fn line_no(lines: &[Line], idx: usize) -> usize {
    lines
        .get(idx)
        .or_else(|| lines.last())
        .map(|(ln, _)| *ln)
        .unwrap_or(0)
}

pub fn parse_f64(format: Format, line: usize, token: &str, what: &str) -> Result<f64, Error> {
    token
        .parse::<f64>()
        .map_err(|_| Error::parse(format, line, format!("invalid {what}: '{token}'")))
}

pub fn parse_usize(format: Format, line: usize, token: &str, what: &str) -> Result<usize, Error> {
    token
        .parse::<usize>()
        .map_err(|_| Error::parse(format, line, format!("invalid {what}: '{token}'")))
}

/// Parses a 1-based atom index into a 0-based slot, checked against `atom_count`.
pub fn parse_atom_index(
    format: Format,
    line: usize,
    token: &str,
    atom_count: usize,
) -> Result<usize, Error> {
    let index = parse_usize(format, line, token, "atom index")?;
    if index == 0 || index > atom_count {
        return Err(Error::parse(
            format,
            line,
            format!("atom index {index} outside 1..={atom_count}"),
        ));
    }
    Ok(index - 1)
}

pub fn parse_element(format: Format, line: usize, token: &str) -> Result<Element, Error> {
    Element::from_str(token).map_err(|e| Error::parse(format, line, e.to_string()))
}

/// Parses the three tokens starting at `start` as Cartesian coordinates.
pub fn parse_position(
    format: Format,
    line: usize,
    tokens: &[&str],
    start: usize,
) -> Result<[f64; 3], Error> {
    if tokens.len() < start + 3 {
        return Err(Error::parse(format, line, "expected three coordinates"));
    }
    Ok([
        parse_f64(format, line, tokens[start], "x coordinate")?,
        parse_f64(format, line, tokens[start + 1], "y coordinate")?,
        parse_f64(format, line, tokens[start + 2], "z coordinate")?,
    ])
}
