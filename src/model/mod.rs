//! Core data structures shared by the parsers and the dataset container.
//!
//! - [`types`] – The closed element table, SYBYL bond codes and charge schemes.
//! - [`atom`] – Minimal atom representation with element and Cartesian coordinates.
//! - [`molecule`] – A single parsed molecule and its zero-padded tensor rows.
//!
//! Parsers produce [`Molecule`] values of natural length; the
//! [`Dataset`](crate::Dataset) pads them to its shared `max_atom` bound.
//!
//! [`Molecule`]: molecule::Molecule

pub mod atom;
pub mod molecule;
pub mod types;
