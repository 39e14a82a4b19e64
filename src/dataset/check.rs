use super::error::{Error, Field};

/// Validates the shapes of a set of field tensors against each other.
///
/// Each entry is a field with its full shape, record axis first. Checks, in
/// order: rank and fixed inner widths per field, equal record counts across
/// populated fields, and one shared `max_atom` across fields with an atom
/// axis. Returns that `max_atom`, or `None` when no atom-axis field is given.
pub fn check_shapes(fields: &[(Field, &[usize])]) -> Result<Option<usize>, Error> {
    for &(field, shape) in fields {
        check_field(field, shape)?;
    }

    let mut populated = fields.iter().filter(|(_, shape)| shape[0] > 0);
    if let Some(&(_, first)) = populated.next() {
        let expected = first[0];
        for &(field, shape) in populated {
            if shape[0] != expected {
                return Err(Error::RecordCount {
                    field,
                    expected,
                    found: shape[0],
                });
            }
        }
    }

    let mut max_atom = None;
    for &(field, shape) in fields {
        let Some(found) = atom_axis(field, shape) else {
            continue;
        };
        match max_atom {
            None => max_atom = Some(found),
            Some(expected) if expected != found => {
                return Err(Error::MaxAtom {
                    field,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }
    }
    Ok(max_atom)
}

fn check_field(field: Field, shape: &[usize]) -> Result<(), Error> {
    if shape.len() != field.rank() {
        return Err(Error::Rank {
            field,
            expected: field.rank() - 1,
            found: shape.len(),
        });
    }
    match field {
        Field::Structure => expect_width(field, shape, 2, 4),
        Field::Dipole => expect_width(field, shape, 1, 3),
        Field::Topology => expect_width(field, shape, 2, shape[1]),
        Field::Charge | Field::Name => Ok(()),
    }
}

fn expect_width(field: Field, shape: &[usize], axis: usize, expected: usize) -> Result<(), Error> {
    if shape[axis] != expected {
        return Err(Error::Width {
            field,
            axis,
            expected,
            found: shape[axis],
        });
    }
    Ok(())
}

fn atom_axis(field: Field, shape: &[usize]) -> Option<usize> {
    match field {
        Field::Structure | Field::Charge | Field::Topology => Some(shape[1]),
        Field::Name | Field::Dipole => None,
    }
}
