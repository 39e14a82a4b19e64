use crate::io::{Format, error::Error, util};
use crate::model::{
    atom::Atom,
    molecule::{Bond, Molecule},
};
use std::io::BufRead;

const COUNTS_LINE: usize = 3;
const PROPERTY_PREFIX: &str = "M  ";

/// Reads an MDL `.mol` connection table.
///
/// The atom count is the first token of the counts line (line 4). The bond
/// block follows the atom block and runs up to, but not including, the final
/// line of the file; property lines (`M  ...`) also end it.
pub fn read<R: BufRead>(reader: R) -> Result<Molecule, Error> {
    let lines = util::collect_lines(reader)?;

    let (counts_ln, counts) = lines.get(COUNTS_LINE).ok_or_else(|| {
        Error::parse(
            Format::Mol,
            util::line_no(&lines, COUNTS_LINE),
            "missing counts line",
        )
    })?;
    let count_token = counts
        .split_whitespace()
        .next()
        .ok_or_else(|| Error::parse(Format::Mol, *counts_ln, "empty counts line"))?;
    let atom_count = util::parse_usize(Format::Mol, *counts_ln, count_token, "atom count")?;

    let atom_start = COUNTS_LINE + 1;
    let atom_end = atom_start + atom_count;
    if atom_end > lines.len() {
        return Err(Error::parse(
            Format::Mol,
            util::line_no(&lines, lines.len()),
            format!("atom block ended before {atom_count} atoms"),
        ));
    }

    let mut atoms = Vec::with_capacity(atom_count);
    for (ln, raw) in &lines[atom_start..atom_end] {
        let tokens: Vec<_> = raw.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(Error::parse(Format::Mol, *ln, "atom line must be 'x y z symbol'"));
        }
        let position = util::parse_position(Format::Mol, *ln, &tokens, 0)?;
        let element = util::parse_element(Format::Mol, *ln, tokens[3])?;
        atoms.push(Atom::new(element, position));
    }

    let bond_end = lines.len().saturating_sub(1).max(atom_end);
    let mut bonds = Vec::new();
    for (ln, raw) in &lines[atom_end..bond_end] {
        if raw.starts_with(PROPERTY_PREFIX) {
            break;
        }
        let tokens: Vec<_> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() < 3 {
            return Err(Error::parse(
                Format::Mol,
                *ln,
                "bond line must be 'atom1 atom2 order'",
            ));
        }
        let i = util::parse_atom_index(Format::Mol, *ln, tokens[0], atom_count)?;
        let j = util::parse_atom_index(Format::Mol, *ln, tokens[1], atom_count)?;
        let order = tokens[2]
            .parse::<i64>()
            .map_err(|_| Error::parse(Format::Mol, *ln, format!("invalid bond order: '{}'", tokens[2])))?;
        bonds.push(Bond::new(i, j, order));
    }

    Ok(Molecule {
        atoms,
        bonds: Some(bonds),
        ..Molecule::default()
    })
}
