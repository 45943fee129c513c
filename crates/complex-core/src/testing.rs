//! Deterministic structures shared by the unit tests.

use crate::core::models::atom::Atom;
use crate::core::models::chain::MoleculeKind;
use crate::core::models::system::MolecularSystem;
use nalgebra::{Isometry3, Point3, Vector3};

/// Key-atom trace of an ideal alpha helix: 100 degrees and 1.5 Angstroms per residue.
pub(crate) fn helix_points(count: usize, placement: &Isometry3<f64>) -> Vec<Point3<f64>> {
    (0..count)
        .map(|k| {
            let angle = (k as f64 * 100.0).to_radians();
            placement * Point3::new(2.3 * angle.cos(), 2.3 * angle.sin(), 1.5 * k as f64)
        })
        .collect()
}

pub(crate) fn shifted(x: f64) -> Isometry3<f64> {
    Isometry3::translation(x, 0.0, 0.0)
}

pub(crate) fn rigid_motion() -> Isometry3<f64> {
    Isometry3::new(Vector3::new(12.0, -7.0, 3.0), Vector3::new(0.4, -1.1, 0.7))
}

#[derive(Default)]
pub(crate) struct SystemBuilder {
    system: MolecularSystem,
}

impl SystemBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn chain(mut self, label: &str, residue_name: &str, atom_name: &str, points: Vec<Point3<f64>>) -> Self {
        let chain_id = self.system.add_chain(label);
        for (i, position) in points.into_iter().enumerate() {
            let res_id = self
                .system
                .add_residue(chain_id, i as isize + 1, None, residue_name, false)
                .unwrap();
            self.system
                .add_atom_to_residue(res_id, Atom::new(atom_name, res_id, position))
                .unwrap();
        }
        self
    }

    /// Adds a protein chain of `residues` alanines whose alpha carbons follow a helix.
    pub(crate) fn protein(self, label: &str, residues: usize, placement: &Isometry3<f64>) -> Self {
        let points = helix_points(residues, placement);
        self.chain(label, "ALA", "CA", points)
    }

    pub(crate) fn nucleic(
        self,
        label: &str,
        kind: MoleculeKind,
        residues: usize,
        placement: &Isometry3<f64>,
    ) -> Self {
        let residue_name = match kind {
            MoleculeKind::DNA => "DA",
            MoleculeKind::RNA => "A",
            MoleculeKind::Protein => "ALA",
        };
        let points = helix_points(residues, placement);
        self.chain(label, residue_name, "C4'", points)
    }

    /// Adds a helix whose atoms are pushed up and down the axis by `amplitude`, alternately.
    pub(crate) fn distorted_protein(self, label: &str, residues: usize, amplitude: f64) -> Self {
        let points = helix_points(residues, &Isometry3::identity())
            .into_iter()
            .enumerate()
            .map(|(k, p)| {
                let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                p + Vector3::new(0.0, 0.0, sign * amplitude)
            })
            .collect();
        self.chain(label, "ALA", "CA", points)
    }

    pub(crate) fn build(self) -> MolecularSystem {
        self.system
    }
}
