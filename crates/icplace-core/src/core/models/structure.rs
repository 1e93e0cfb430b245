use super::atom::Atom;
use nalgebra::{Matrix3, Point3, Vector3};

/// An ordered sequence of atoms parsed from a structure file.
///
/// Order is significant. Internal-coordinate enumeration addresses atoms by
/// their index in this sequence, and the placement engine uses the first atom
/// as the pivot for rigid-body rotations. Atoms are never reordered once
/// parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    atoms: Vec<Atom>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a structure from an existing atom sequence, preserving order.
    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Appends an atom to the end of the sequence.
    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    /// Returns the number of atoms in the structure.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Returns `true` if the structure contains no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Retrieves an atom by its sequence index.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Returns the position of the atom at `index`.
    pub fn position(&self, index: usize) -> Option<Point3<f64>> {
        self.atoms.get(index).map(|a| a.position)
    }

    /// Returns an iterator over all atoms in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    /// Returns the atom slice in sequence order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Translates every atom by `offset`.
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for atom in &mut self.atoms {
            atom.position += offset;
        }
    }

    /// Applies `rotation` to every atom position, rotating about the origin.
    ///
    /// Callers that need a rotation about an arbitrary pivot translate the
    /// pivot to the origin first and translate back afterwards.
    pub fn rotate(&mut self, rotation: &Matrix3<f64>) {
        for atom in &mut self.atoms {
            atom.position = Point3::from(rotation * atom.position.coords);
        }
    }
}
