use crate::io::{Format, error::Error, util};
use crate::model::{
    atom::Atom,
    molecule::{Bond, Molecule},
    types::sybyl_bond_order,
};
use std::collections::HashMap;
use std::io::BufRead;

const MOLECULE_SECTION: &str = "@<TRIPOS>MOLECULE";
const ATOM_SECTION: &str = "@<TRIPOS>ATOM";
const BOND_SECTION: &str = "@<TRIPOS>BOND";

/// Reads a Tripos `.mol2` file.
///
/// The element is the SYBYL atom type up to its first `.` (`C.ar` is carbon).
/// Bond orders go through [`sybyl_bond_order`], so unknown codes become 0.
pub fn read<R: BufRead>(reader: R) -> Result<Molecule, Error> {
    let lines = util::collect_lines(reader)?;

    let mol_idx = find_section(&lines, MOLECULE_SECTION).ok_or_else(|| {
        Error::parse(
            Format::Mol2,
            util::line_no(&lines, 0),
            format!("missing {MOLECULE_SECTION} section"),
        )
    })?;

    let counts_idx = mol_idx + 2;
    let (counts_ln, counts) = lines.get(counts_idx).ok_or_else(|| {
        Error::parse(
            Format::Mol2,
            util::line_no(&lines, counts_idx),
            "missing counts line",
        )
    })?;
    let (atom_count, bond_count) = parse_counts(counts, *counts_ln)?;

    let atom_section = find_section(&lines, ATOM_SECTION).ok_or_else(|| {
        Error::parse(
            Format::Mol2,
            *counts_ln,
            format!("missing {ATOM_SECTION} section"),
        )
    })?;
    let bond_section = find_section(&lines, BOND_SECTION).unwrap_or(lines.len());

    let (atoms, id_map) = parse_atoms(&lines, atom_section + 1, bond_section, atom_count)?;
    let bonds = parse_bonds(&lines, bond_section + 1, bond_count, &id_map)?;

    Ok(Molecule {
        atoms,
        bonds: Some(bonds),
        ..Molecule::default()
    })
}

fn find_section(lines: &[util::Line], name: &str) -> Option<usize> {
    lines
        .iter()
        .position(|(_, line)| line.trim().eq_ignore_ascii_case(name))
}

fn parse_counts(line: &str, line_no: usize) -> Result<(usize, usize), Error> {
    let parts: Vec<_> = line.split_whitespace().collect();
    if parts.is_empty() {
        return Err(Error::parse(Format::Mol2, line_no, "empty counts line"));
    }
    let atoms = util::parse_usize(Format::Mol2, line_no, parts[0], "atom count")?;
    let bonds = match parts.get(1) {
        Some(token) => util::parse_usize(Format::Mol2, line_no, token, "bond count")?,
        None => 0,
    };
    Ok((atoms, bonds))
}

fn element_token(atom_type: &str) -> &str {
    atom_type.split('.').next().unwrap_or(atom_type)
}

fn parse_atoms(
    lines: &[util::Line],
    start: usize,
    end: usize,
    expected: usize,
) -> Result<(Vec<Atom>, HashMap<usize, usize>), Error> {
    let mut atoms = Vec::with_capacity(expected);
    let mut id_map = HashMap::with_capacity(expected);

    for idx in 0..expected {
        let line_idx = start + idx;
        if line_idx >= end {
            return Err(Error::parse(
                Format::Mol2,
                util::line_no(lines, line_idx),
                "ATOM section ended before expected atom count",
            ));
        }
        let (ln, raw) = &lines[line_idx];
        let parts: Vec<_> = raw.split_whitespace().collect();
        if parts.len() < 6 {
            return Err(Error::parse(Format::Mol2, *ln, "invalid ATOM line"));
        }

        let atom_id = util::parse_usize(Format::Mol2, *ln, parts[0], "atom id")?;
        let position = util::parse_position(Format::Mol2, *ln, &parts, 2)?;
        let element = util::parse_element(Format::Mol2, *ln, element_token(parts[5]))?;

        id_map.insert(atom_id, atoms.len());
        atoms.push(Atom::new(element, position));
    }

    Ok((atoms, id_map))
}

fn parse_bonds(
    lines: &[util::Line],
    start: usize,
    expected: usize,
    id_map: &HashMap<usize, usize>,
) -> Result<Vec<Bond>, Error> {
    let mut bonds = Vec::with_capacity(expected);

    for idx in 0..expected {
        let line_idx = start + idx;
        if line_idx >= lines.len() {
            return Err(Error::parse(
                Format::Mol2,
                util::line_no(lines, line_idx),
                "BOND section ended before expected bond count",
            ));
        }
        let (ln, raw) = &lines[line_idx];
        let parts: Vec<_> = raw.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(Error::parse(Format::Mol2, *ln, "invalid BOND line"));
        }

        let a1 = util::parse_usize(Format::Mol2, *ln, parts[1], "first atom id")?;
        let a2 = util::parse_usize(Format::Mol2, *ln, parts[2], "second atom id")?;

        let i = *id_map
            .get(&a1)
            .ok_or_else(|| Error::parse(Format::Mol2, *ln, "bond references unknown atom id"))?;
        let j = *id_map
            .get(&a2)
            .ok_or_else(|| Error::parse(Format::Mol2, *ln, "bond references unknown atom id"))?;

        bonds.push(Bond::new(i, j, sybyl_bond_order(parts[3])));
    }

    Ok(bonds)
}
