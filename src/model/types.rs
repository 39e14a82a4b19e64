use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Lookup failure in the element tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SymbolError {
    #[error("invalid or unsupported element symbol: '{0}'")]
    UnknownSymbol(String),
    #[error("invalid or unsupported atomic number: {0}")]
    UnknownAtomicNumber(f64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid charge type: '{0}' (expected Mulliken or Hirshfeld)")]
pub struct ParseChargeTypeError(String);

/// The closed set of elements a dataset can hold.
///
/// `Ghost` (atomic number 0) marks an empty padding slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    Ghost = 0,
    H = 1,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    P = 15,
    S = 16,
    Cl = 17,
}

impl Element {
    pub const ALL: [Element; 9] = [
        Element::Ghost,
        Element::H,
        Element::C,
        Element::N,
        Element::O,
        Element::F,
        Element::P,
        Element::S,
        Element::Cl,
    ];

    pub fn atomic_mass(&self) -> f64 {
        match self {
            Element::Ghost => 0.0,
            Element::H => 1.008,
            Element::C => 12.011,
            Element::N => 14.007,
            Element::O => 15.999,
            Element::F => 18.998,
            Element::P => 30.974,
            Element::S => 32.06,
            Element::Cl => 35.45,
        }
    }

    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    #[inline]
    pub fn is_ghost(&self) -> bool {
        matches!(self, Element::Ghost)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Element::Ghost => "Ghost",
            Element::H => "H",
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::F => "F",
            Element::P => "P",
            Element::S => "S",
            Element::Cl => "Cl",
        }
    }

    pub fn from_atomic_number(number: u8) -> Result<Self, SymbolError> {
        match number {
            0 => Ok(Element::Ghost),
            1 => Ok(Element::H),
            6 => Ok(Element::C),
            7 => Ok(Element::N),
            8 => Ok(Element::O),
            9 => Ok(Element::F),
            15 => Ok(Element::P),
            16 => Ok(Element::S),
            17 => Ok(Element::Cl),
            _ => Err(SymbolError::UnknownAtomicNumber(number as f64)),
        }
    }

    /// Resolves the atomic-number column of a structure tensor.
    pub fn from_slot(value: f64) -> Result<Self, SymbolError> {
        if value.fract() != 0.0 || !(0.0..=u8::MAX as f64).contains(&value) {
            return Err(SymbolError::UnknownAtomicNumber(value));
        }
        Self::from_atomic_number(value as u8)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = SymbolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ghost" => Ok(Element::Ghost),
            "H" => Ok(Element::H),
            "C" => Ok(Element::C),
            "N" => Ok(Element::N),
            "O" => Ok(Element::O),
            "F" => Ok(Element::F),
            "P" => Ok(Element::P),
            "S" => Ok(Element::S),
            "Cl" => Ok(Element::Cl),
            _ => Err(SymbolError::UnknownSymbol(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Element {
    type Error = SymbolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_atomic_number(value)
    }
}

/// Maps a Tripos SYBYL bond-type token to its integer code.
///
/// Unrecognised tokens (`nc`, `un`, upper-case variants, ...) map to 0,
/// i.e. "no bond", and never fail.
pub fn sybyl_bond_order(code: &str) -> i64 {
    match code {
        "1" => 1,
        "2" => 2,
        "3" => 3,
        "am" => 4,
        "ar" => 5,
        "du" => 6,
        _ => 0,
    }
}

/// Partial-charge scheme read from Gaussian logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChargeType {
    #[default]
    Mulliken,
    Hirshfeld,
}

impl fmt::Display for ChargeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChargeType::Mulliken => write!(f, "Mulliken"),
            ChargeType::Hirshfeld => write!(f, "Hirshfeld"),
        }
    }
}

impl FromStr for ChargeType {
    type Err = ParseChargeTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mulliken" => Ok(ChargeType::Mulliken),
            "hirshfeld" => Ok(ChargeType::Hirshfeld),
            _ => Err(ParseChargeTypeError(s.to_string())),
        }
    }
}
