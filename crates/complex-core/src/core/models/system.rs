use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use nalgebra::Isometry3;
use slotmap::SlotMap;
use std::collections::HashMap;

/// Represents a single model of a molecular structure: chains, residues and atoms.
///
/// This struct serves as the central data structure for complex assembly. Components live
/// in slot maps so that their IDs stay valid while chains are added; the chain order of the
/// source file is kept separately because it drives the enumeration order of matching and
/// clash detection.
#[derive(Debug, Clone, Default)]
pub struct MolecularSystem {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Chains in insertion order.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding residues by chain, residue number and insertion code.
    residue_id_map: HashMap<(ChainId, isize, Option<char>), ResidueId>,
    /// Lookup map for finding chains by their textual identifier.
    chain_id_map: HashMap<String, ChainId>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    /// Returns an iterator over all atoms in the system, in storage order.
    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    /// Returns the total number of atoms.
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    /// Retrieves an immutable reference to a residue by its ID.
    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    /// Retrieves an immutable reference to a chain by its ID.
    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Returns an iterator over all chains in the order they were added.
    ///
    /// # Return
    ///
    /// An iterator yielding `(ChainId, &Chain)` pairs.
    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    /// Returns the number of chains in the system.
    pub fn chain_count(&self) -> usize {
        self.chain_order.len()
    }

    /// Returns the textual identifiers of all chains, in chain order.
    pub fn chain_labels(&self) -> Vec<String> {
        self.chains_iter().map(|(_, chain)| chain.id.clone()).collect()
    }

    /// Finds a chain ID by its textual identifier.
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier of the chain (e.g. `"A"` or `"Ab"`).
    ///
    /// # Return
    ///
    /// Returns `Some(ChainId)` if the chain exists, otherwise `None`.
    pub fn find_chain_by_id(&self, id: &str) -> Option<ChainId> {
        self.chain_id_map.get(id).copied()
    }

    /// Adds a new chain to the system or returns the existing one.
    ///
    /// This method is idempotent; if a chain with the given identifier already exists,
    /// it returns the existing chain ID without creating a duplicate.
    pub fn add_chain(&mut self, id: &str) -> ChainId {
        if let Some(&existing) = self.chain_id_map.get(id) {
            return existing;
        }
        let chain_id = self.chains.insert(Chain::new(id));
        self.chain_id_map.insert(id.to_string(), chain_id);
        self.chain_order.push(chain_id);
        chain_id
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// This method is idempotent on `(chain, residue number, insertion code)`.
    ///
    /// # Return
    ///
    /// Returns `Some(ResidueId)` if successful, otherwise `None` (the chain doesn't exist).
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        residue_number: isize,
        insertion_code: Option<char>,
        name: &str,
        is_hetero: bool,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, residue_number, insertion_code);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(residue_number, insertion_code, name, is_hetero, chain_id);
            self.residues.insert(residue)
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a specific residue.
    ///
    /// # Return
    ///
    /// Returns `Some(AtomId)` if successful, otherwise `None` (the residue doesn't exist).
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        if !self.residues.contains_key(residue_id) {
            return None;
        }
        atom.residue_id = residue_id;
        let name = atom.name.clone();
        let atom_id = self.atoms.insert(atom);
        self.residues[residue_id].add_atom(&name, atom_id);
        Some(atom_id)
    }

    /// Iterates over the atoms of a chain in residue order.
    pub fn chain_atoms(&self, chain_id: ChainId) -> impl Iterator<Item = &Atom> {
        self.chains
            .get(chain_id)
            .map(|chain| chain.residues.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&res_id| self.residues.get(res_id))
            .flat_map(|residue| residue.atoms.iter())
            .filter_map(|&atom_id| self.atoms.get(atom_id))
    }

    /// Applies a rigid-body transformation to every atom of the system.
    pub fn transform(&mut self, isometry: &Isometry3<f64>) {
        for (_, atom) in self.atoms.iter_mut() {
            atom.transform(isometry);
        }
    }

    /// Copies a chain of another system into this one under a new identifier.
    ///
    /// Residues and atoms are duplicated with fresh IDs, keeping their order.
    ///
    /// # Arguments
    ///
    /// * `source` - The system holding the chain to copy.
    /// * `source_chain` - The ID of the chain within `source`.
    /// * `new_id` - The identifier the chain receives in this system.
    ///
    /// # Return
    ///
    /// Returns the new chain's ID, or `None` if the source chain doesn't exist or `new_id`
    /// is already used in this system.
    pub fn copy_chain_from(
        &mut self,
        source: &MolecularSystem,
        source_chain: ChainId,
        new_id: &str,
    ) -> Option<ChainId> {
        let chain = source.chain(source_chain)?;
        if self.chain_id_map.contains_key(new_id) {
            return None;
        }

        let chain_id = self.add_chain(new_id);
        for &res_id in chain.residues() {
            let Some(residue) = source.residue(res_id) else {
                continue;
            };
            let new_res_id = self.add_residue(
                chain_id,
                residue.number,
                residue.insertion_code,
                &residue.name,
                residue.is_hetero,
            )?;
            for &atom_id in residue.atoms() {
                if let Some(atom) = source.atom(atom_id) {
                    self.add_atom_to_residue(new_res_id, atom.clone())?;
                }
            }
        }
        Some(chain_id)
    }
}
