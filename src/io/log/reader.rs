use crate::io::{Format, error::Error, util};
use crate::model::{
    atom::Atom,
    molecule::Molecule,
    types::{ChargeType, Element},
};
use std::io::BufRead;

pub const ORIENTATION_MARKER: &str = "Standard orientation:";
pub const MULLIKEN_MARKERS: [&str; 2] = [
    "Mulliken charges:",
    "Mulliken charges and spin densities:",
];
pub const HIRSHFELD_MARKER: &str = "Hirshfeld charges, spin densities, dipoles, and CM5 charges";
pub const DIPOLE_MARKER: &str = "Dipole moment (field-independent basis, Debye):";
pub const TERMINATION_MARKER: &str = "Normal termination of Gaussian";

const ORIENTATION_SKIP: usize = 5;
const CHARGE_SKIP: usize = 2;
const SEPARATOR: &str = "-----";
const MULLIKEN_END: &str = "Sum of Mulliken charges";
const HIRSHFELD_END: &str = "Tot";

/// Reads the final geometry, the selected partial charges and the dipole
/// moment from a Gaussian output log.
///
/// Every section is taken from its last occurrence in the file, so
/// optimisation logs yield the converged geometry.
pub fn read<R: BufRead>(reader: R, charge_type: ChargeType) -> Result<Molecule, Error> {
    let lines = util::collect_lines(reader)?;

    let orientation = util::find_last(&lines, &[ORIENTATION_MARKER])
        .ok_or_else(|| missing(&lines, ORIENTATION_MARKER))?;
    let atoms = parse_orientation(&lines, orientation + ORIENTATION_SKIP)?;

    let charges = match charge_type {
        ChargeType::Mulliken => {
            let marker = util::find_last(&lines, &MULLIKEN_MARKERS)
                .ok_or_else(|| missing(&lines, MULLIKEN_MARKERS[0]))?;
            parse_charges(&lines, marker + CHARGE_SKIP, MULLIKEN_END)?
        }
        ChargeType::Hirshfeld => {
            let marker = util::find_last(&lines, &[HIRSHFELD_MARKER])
                .ok_or_else(|| missing(&lines, "Hirshfeld charges"))?;
            parse_charges(&lines, marker + CHARGE_SKIP, HIRSHFELD_END)?
        }
    };

    let dipole_marker =
        util::find_last(&lines, &[DIPOLE_MARKER]).ok_or_else(|| missing(&lines, DIPOLE_MARKER))?;
    let dipole = parse_dipole(&lines, dipole_marker + 1)?;

    Ok(Molecule {
        atoms,
        charges: Some(charges),
        bonds: None,
        dipole: Some(dipole),
    })
}

/// Checks that the last non-empty line reports a normal Gaussian exit.
pub fn validate(text: &str) -> Result<(), Error> {
    let last = text.lines().rev().find(|line| !line.trim().is_empty());
    match last {
        Some(line) if line.contains(TERMINATION_MARKER) => Ok(()),
        _ => Err(Error::validation(
            Format::Log,
            format!("last line does not contain '{TERMINATION_MARKER}'"),
        )),
    }
}

fn missing(lines: &[util::Line], what: &str) -> Error {
    Error::parse(
        Format::Log,
        util::line_no(lines, lines.len()),
        format!("missing '{what}' section"),
    )
}

fn parse_orientation(lines: &[util::Line], start: usize) -> Result<Vec<Atom>, Error> {
    let mut atoms = Vec::new();
    for (ln, raw) in lines.iter().skip(start) {
        if raw.contains(SEPARATOR) {
            break;
        }
        let tokens: Vec<_> = raw.split_whitespace().collect();
        if tokens.len() < 6 {
            return Err(Error::parse(
                Format::Log,
                *ln,
                "orientation row must have center, atomic number, type and x y z",
            ));
        }
        let number = util::parse_f64(Format::Log, *ln, tokens[1], "atomic number")?;
        let element = Element::from_slot(number)
            .map_err(|e| Error::parse(Format::Log, *ln, e.to_string()))?;
        let position = util::parse_position(Format::Log, *ln, &tokens, 3)?;
        atoms.push(Atom::new(element, position));
    }
    Ok(atoms)
}

fn parse_charges(lines: &[util::Line], start: usize, end_marker: &str) -> Result<Vec<f64>, Error> {
    let mut charges = Vec::new();
    for (ln, raw) in lines.iter().skip(start) {
        if raw.contains(end_marker) {
            break;
        }
        let tokens: Vec<_> = raw.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(Error::parse(
                Format::Log,
                *ln,
                "charge row must have index, symbol and charge",
            ));
        }
        util::parse_element(Format::Log, *ln, tokens[1])?;
        charges.push(util::parse_f64(Format::Log, *ln, tokens[2], "charge")?);
    }
    Ok(charges)
}

fn parse_dipole(lines: &[util::Line], idx: usize) -> Result<[f64; 3], Error> {
    let (ln, raw) = lines
        .get(idx)
        .ok_or_else(|| Error::parse(Format::Log, util::line_no(lines, idx), "missing dipole line"))?;
    let tokens: Vec<_> = raw.split_whitespace().collect();
    if tokens.len() < 6 {
        return Err(Error::parse(
            Format::Log,
            *ln,
            "dipole line must read 'X= x Y= y Z= z'",
        ));
    }
    Ok([
        util::parse_f64(Format::Log, *ln, tokens[1], "dipole x")?,
        util::parse_f64(Format::Log, *ln, tokens[3], "dipole y")?,
        util::parse_f64(Format::Log, *ln, tokens[5], "dipole z")?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WATER_LOG: &str = "\
 Entering Gaussian System
                         Standard orientation:
 ---------------------------------------------------------------------
 Center     Atomic      Atomic             Coordinates (Angstroms)
 Number     Number       Type             X           Y           Z
 ---------------------------------------------------------------------
      1          8           0        0.000000    0.000000    0.100000
      2          1           0        0.000000    0.800000   -0.500000
      3          1           0        0.000000   -0.800000   -0.500000
 ---------------------------------------------------------------------
                         Standard orientation:
 ---------------------------------------------------------------------
 Center     Atomic      Atomic             Coordinates (Angstroms)
 Number     Number       Type             X           Y           Z
 ---------------------------------------------------------------------
      1          8           0        0.000000    0.000000    0.117300
      2          1           0        0.000000    0.757200   -0.469200
      3          1           0        0.000000   -0.757200   -0.469200
 ---------------------------------------------------------------------
 Mulliken charges:
               1
     1  O   -0.869000
     2  H    0.434500
     3  H    0.434500
 Sum of Mulliken charges =   0.00000
 Hirshfeld charges, spin densities, dipoles, and CM5 charges using IRadAn=      4:
              Q-H        S-H        Dx         Dy         Dz        Q-CM5
     1  O   -0.330000   0.000000   0.000000   0.000000  -0.200000  -0.650000
     2  H    0.165000   0.000000   0.000000   0.100000   0.050000   0.325000
     3  H    0.165000   0.000000   0.000000  -0.100000   0.050000   0.325000
       Tot   0.000000   0.000000   0.000000   0.000000  -0.100000   0.000000
 Dipole moment (field-independent basis, Debye):
    X=              0.0000    Y=              0.0000    Z=             -2.4300  Tot=              2.4300
 Normal termination of Gaussian 16 at Mon Jan  1 00:00:00 2024.
";

    #[test]
    fn reads_last_orientation_mulliken_and_dipole() {
        let mol = read(Cursor::new(WATER_LOG), ChargeType::Mulliken).unwrap();
        assert_eq!(mol.atom_count(), 3);
        assert_eq!(mol.atoms[0].element, Element::O);
        assert_eq!(mol.atoms[1].position, [0.0, 0.7572, -0.4692]);
        assert_eq!(mol.charges.unwrap(), vec![-0.869, 0.4345, 0.4345]);
        assert_eq!(mol.dipole.unwrap(), [0.0, 0.0, -2.43]);
        assert!(mol.bonds.is_none());
    }

    #[test]
    fn reads_hirshfeld_charge_column() {
        let mol = read(Cursor::new(WATER_LOG), ChargeType::Hirshfeld).unwrap();
        assert_eq!(mol.charges.unwrap(), vec![-0.33, 0.165, 0.165]);
    }

    #[test]
    fn missing_hirshfeld_block_is_a_content_error() {
        let text: String = WATER_LOG
            .lines()
            .filter(|l| !l.contains("Hirshfeld"))
            .map(|l| format!("{l}\n"))
            .collect();
        let err = read(Cursor::new(text), ChargeType::Hirshfeld).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn missing_orientation_is_a_content_error() {
        let err = read(Cursor::new(" Mulliken charges:\n"), ChargeType::Mulliken).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn validation_checks_last_non_empty_line() {
        assert!(validate(WATER_LOG).is_ok());
        assert!(validate(&format!("{WATER_LOG}\n\n")).is_ok());

        let truncated = WATER_LOG.replace("Normal termination", "Error termination");
        let err = validate(&truncated).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(validate("").is_err());
    }
}
