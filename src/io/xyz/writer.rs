use crate::io::error::Error;
use crate::model::atom::Atom;
use std::io::Write;

/// Writes non-ghost atoms as `<symbol> <x> <y> <z>` lines with six decimals.
///
/// The optional header is the atom count followed by an empty comment line.
/// Returns the number of atoms written.
pub fn write<W: Write>(mut writer: W, atoms: &[Atom], header: bool) -> Result<usize, Error> {
    let real: Vec<&Atom> = atoms.iter().filter(|a| !a.element.is_ghost()).collect();

    if header {
        writeln!(writer, "{}", real.len())?;
        writeln!(writer)?;
    }

    for atom in &real {
        writeln!(
            writer,
            "{} {:.6} {:.6} {:.6}",
            atom.element.symbol(),
            atom.position[0],
            atom.position[1],
            atom.position[2]
        )?;
    }

    writer.flush()?;
    Ok(real.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::xyz::reader;
    use crate::model::types::Element;
    use std::io::Cursor;

    fn atoms() -> Vec<Atom> {
        vec![
            Atom::new(Element::C, [0.0, 0.0, 0.0]),
            Atom::new(Element::O, [1.2, 0.0, -0.5]),
            Atom::new(Element::Ghost, [0.0, 0.0, 0.0]),
        ]
    }

    #[test]
    fn writes_header_and_skips_ghosts() {
        let mut buf = Vec::new();
        let written = write(&mut buf, &atoms(), true).unwrap();
        assert_eq!(written, 2);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "2\n\nC 0.000000 0.000000 0.000000\nO 1.200000 0.000000 -0.500000\n"
        );
    }

    #[test]
    fn output_reads_back() {
        let mut buf = Vec::new();
        write(&mut buf, &atoms(), false).unwrap();
        let mol = reader::read(Cursor::new(buf), false).unwrap();
        assert_eq!(mol.atom_count(), 2);
        assert_eq!(mol.atoms[1].position, [1.2, 0.0, -0.5]);
    }
}
