use super::types::{Element, SymbolError};

/// One atom of a parsed molecule.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: Element, position: [f64; 3]) -> Self {
        Self { element, position }
    }

    /// The `[Z, x, y, z]` row stored in a structure tensor.
    pub fn to_row(&self) -> [f64; 4] {
        let [x, y, z] = self.position;
        [f64::from(self.element.atomic_number()), x, y, z]
    }

    /// Rebuilds an atom from a structure row; padding rows give a ghost.
    pub fn from_row(row: [f64; 4]) -> Result<Self, SymbolError> {
        let [z, x, y, w] = row;
        Ok(Self::new(Element::from_slot(z)?, [x, y, w]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_round_trip() {
        let atom = Atom::new(Element::Cl, [1.5, -0.25, 3.0]);
        assert_eq!(atom.to_row(), [17.0, 1.5, -0.25, 3.0]);
        assert_eq!(Atom::from_row(atom.to_row()).unwrap(), atom);
        assert!(Atom::from_row([0.0; 4]).unwrap().element.is_ghost());
    }

    #[test]
    fn unknown_atomic_numbers_are_rejected() {
        assert!(Atom::from_row([26.0, 0.0, 0.0, 0.0]).is_err());
        assert!(Atom::from_row([1.5, 0.0, 0.0, 0.0]).is_err());
    }
}
