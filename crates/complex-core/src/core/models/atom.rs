use super::ids::ResidueId;
use nalgebra::{Isometry3, Point3};

/// Represents an atom in a molecular structure.
///
/// Besides its identity and position, an atom keeps the file-level annotations
/// (serial number, occupancy, temperature factor, element symbol) so that a
/// structure read from disk can be written back without losing information.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The name of the atom (e.g., "CA", "C4'").
    pub name: String,
    /// The ID of the parent residue this atom belongs to.
    pub residue_id: ResidueId,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The element symbol as found in the source file, possibly empty.
    pub element: String,
    /// The serial number from the source file.
    pub serial: usize,
    /// The occupancy factor.
    pub occupancy: f64,
    /// The isotropic temperature factor.
    pub b_factor: f64,
}

impl Atom {
    /// Creates a new `Atom` with default values for the file-level annotations.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the atom.
    /// * `residue_id` - The ID of the residue this atom belongs to.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            name: name.to_string(),
            residue_id,
            position,
            element: String::new(),
            serial: 0,
            occupancy: 1.0,
            b_factor: 0.0,
        }
    }

    /// Moves the atom by a rigid-body transformation.
    pub fn transform(&mut self, isometry: &Isometry3<f64>) {
        self.position = isometry * self.position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Translation3, UnitQuaternion, Vector3};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let residue_id = ResidueId::default();
        let atom = Atom::new("CA", residue_id, Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.name, "CA");
        assert_eq!(atom.residue_id, residue_id);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.element, "");
        assert_eq!(atom.serial, 0);
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.b_factor, 0.0);
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let mut atom1 = Atom::new("N", ResidueId::default(), Point3::new(0.0, 0.0, 0.0));
        atom1.element = "N".to_string();
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }

    #[test]
    fn transform_applies_rotation_before_translation() {
        let mut atom = Atom::new("CA", ResidueId::default(), Point3::new(1.0, 0.0, 0.0));
        let isometry = Isometry3::from_parts(
            Translation3::new(0.0, 0.0, 5.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), FRAC_PI_2),
        );

        atom.transform(&isometry);

        assert!((atom.position - Point3::new(0.0, 1.0, 5.0)).norm() < 1e-12);
    }
}
