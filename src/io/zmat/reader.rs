use crate::io::{Format, error::Error, util};
use crate::model::{
    atom::Atom,
    molecule::{Bond, Molecule},
};
use std::io::BufRead;

pub const TITLE_MARKER: &str = "No Title Specified";

/// Lines between the title marker and the first coordinate line
/// (blank separator and the charge/multiplicity line).
const COORDINATE_OFFSET: usize = 3;

/// Reads a Gaussian newzmat `.com` file with a `geom=connectivity` section.
pub fn read<R: BufRead>(reader: R) -> Result<Molecule, Error> {
    let lines = util::collect_lines(reader)?;

    let title = util::find_first(&lines, TITLE_MARKER).ok_or_else(|| {
        Error::parse(
            Format::Zmat,
            util::line_no(&lines, 0),
            format!("missing '{TITLE_MARKER}' title line"),
        )
    })?;

    let start = title + COORDINATE_OFFSET;
    if start > lines.len() {
        return Err(Error::parse(
            Format::Zmat,
            util::line_no(&lines, start),
            "file ended before the coordinate block",
        ));
    }
    let end = block_end(&lines, start);
    let atoms = parse_atoms(&lines[start..end])?;

    let connectivity_start = (end + 1).min(lines.len());
    let connectivity_end = block_end(&lines, connectivity_start);
    let bonds = parse_connectivity(&lines[connectivity_start..connectivity_end], atoms.len())?;

    Ok(Molecule {
        atoms,
        bonds: Some(bonds),
        ..Molecule::default()
    })
}

/// Index of the first whitespace-only line at or after `from`, or EOF.
fn block_end(lines: &[util::Line], from: usize) -> usize {
    lines[from..]
        .iter()
        .position(|(_, line)| line.trim().is_empty())
        .map_or(lines.len(), |offset| from + offset)
}

fn parse_atoms(lines: &[util::Line]) -> Result<Vec<Atom>, Error> {
    let mut atoms = Vec::with_capacity(lines.len());
    for (ln, raw) in lines {
        let tokens: Vec<_> = raw.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(Error::parse(
                Format::Zmat,
                *ln,
                "coordinate line must be 'symbol x y z'",
            ));
        }
        let element = util::parse_element(Format::Zmat, *ln, tokens[0])?;
        let position = util::parse_position(Format::Zmat, *ln, &tokens, tokens.len() - 3)?;
        atoms.push(Atom::new(element, position));
    }
    Ok(atoms)
}

fn parse_connectivity(lines: &[util::Line], atom_count: usize) -> Result<Vec<Bond>, Error> {
    let mut bonds = Vec::new();
    for (ln, raw) in lines {
        let tokens: Vec<_> = raw.split_whitespace().collect();
        let Some((first, rest)) = tokens.split_first() else {
            continue;
        };
        if rest.len() % 2 != 0 {
            return Err(Error::parse(
                Format::Zmat,
                *ln,
                "connectivity entries must come in 'neighbour order' pairs",
            ));
        }

        let atom = util::parse_atom_index(Format::Zmat, *ln, first, atom_count)?;
        for pair in rest.chunks(2) {
            let neighbour = util::parse_atom_index(Format::Zmat, *ln, pair[0], atom_count)?;
            let order = util::parse_f64(Format::Zmat, *ln, pair[1], "bond order")?;
            bonds.push(Bond::new(atom, neighbour, order.floor() as i64));
        }
    }
    Ok(bonds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Element;
    use std::io::Cursor;

    const FORMALDEHYDE: &str = "\
%chk=formaldehyde.chk
# hf/3-21g geom=connectivity

No Title Specified

0 1
 C                 -0.13158000    0.53947000    0.00000000
 O                  1.07842000    0.53947000    0.00000000
 H                 -0.66654000    1.46593000    0.00000000
 H                 -0.66654000   -0.38699000    0.00000000

 1 2 2.0 3 1.0 4 1.0
 2
 3
 4

";

    #[test]
    fn reads_coordinates_and_connectivity() {
        let mol = read(Cursor::new(FORMALDEHYDE)).unwrap();
        assert_eq!(mol.atom_count(), 4);
        assert_eq!(mol.atoms[0].element, Element::C);
        assert_eq!(mol.atoms[1].position, [1.07842, 0.53947, 0.0]);

        let bonds = mol.bonds.unwrap();
        assert_eq!(
            bonds,
            vec![Bond::new(0, 1, 2), Bond::new(0, 2, 1), Bond::new(0, 3, 1)]
        );
    }

    #[test]
    fn fractional_bond_orders_are_floored() {
        let text = FORMALDEHYDE.replace(" 1 2 2.0 3 1.0 4 1.0", " 1 2 1.5 3 1.0 4 1.0");
        let bonds = read(Cursor::new(text)).unwrap().bonds.unwrap();
        assert_eq!(bonds[0].order, 1);
    }

    #[test]
    fn padded_topology_is_symmetric() {
        let mol = read(Cursor::new(FORMALDEHYDE)).unwrap();
        let topology = mol.pad(6).unwrap().topology.unwrap();
        assert_eq!(topology[[0, 1]], 2);
        assert_eq!(topology[[1, 0]], 2);
        assert_eq!(topology[[3, 0]], 1);
        assert_eq!(topology[[0, 0]], 0);
    }

    #[test]
    fn missing_title_is_a_content_error() {
        let text = FORMALDEHYDE.replace(TITLE_MARKER, "Some Title");
        let err = read(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn neighbour_beyond_atom_count_is_rejected() {
        let text = FORMALDEHYDE.replace(" 1 2 2.0 3 1.0 4 1.0", " 1 9 1.0");
        assert!(read(Cursor::new(text)).is_err());
    }
}
