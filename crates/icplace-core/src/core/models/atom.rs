use nalgebra::Point3;

/// Represents a single atom in a molecular structure.
///
/// An atom carries only what the numeric engines need: an element or
/// atom-name label as it appeared in the source file, and a 3D position in
/// Angstroms. Positions are mutated only by the rigid-body transforms applied
/// during placement; everything else treats atoms as immutable values.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element or atom-name token (e.g., "CA", "N1", "C").
    pub name: String,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
}

impl Atom {
    /// Creates a new `Atom` with the given label and position.
    ///
    /// # Arguments
    ///
    /// * `name` - The element or atom-name token.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_stores_name_and_position() {
        let atom = Atom::new("CA", Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let atom1 = Atom::new("N", Point3::new(0.0, 0.0, 0.0));
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
