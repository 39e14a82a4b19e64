use crate::io::{Format, error::Error, util};
use crate::model::{atom::Atom, molecule::Molecule};
use std::io::BufRead;

/// Reads an `.xyz` file into a structure-only molecule.
///
/// With `header` set, the atom-count and comment lines are skipped. Blank
/// lines are ignored. Charge and topology are never produced.
pub fn read<R: BufRead>(reader: R, header: bool) -> Result<Molecule, Error> {
    let lines = util::collect_lines(reader)?;
    let start = if header { 2 } else { 0 };

    let mut atoms = Vec::new();
    for (ln, raw) in lines.iter().skip(start) {
        let tokens: Vec<_> = raw.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        if tokens.len() != 4 {
            return Err(Error::parse(
                Format::Xyz,
                *ln,
                "atom line must be 'symbol x y z'",
            ));
        }
        let element = util::parse_element(Format::Xyz, *ln, tokens[0])?;
        let position = util::parse_position(Format::Xyz, *ln, &tokens, 1)?;
        atoms.push(Atom::new(element, position));
    }

    Ok(Molecule {
        atoms,
        ..Molecule::default()
    })
}
