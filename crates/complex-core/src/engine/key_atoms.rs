use crate::core::models::chain::MoleculeKind;
use crate::core::models::ids::ChainId;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::identifiers::{classify_residue_name, key_atom_name};
use nalgebra::Point3;
use tracing::warn;

/// The key atoms of a chain: one position per polymer residue, in residue order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyAtomSet {
    pub positions: Vec<Point3<f64>>,
    /// `None` when the chain has no polymer residue at all.
    pub kind: Option<MoleculeKind>,
}

impl KeyAtomSet {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Whether two chains may be superimposed: same molecule kind and the same, non-zero,
    /// number of key atoms.
    pub fn is_compatible_with(&self, other: &KeyAtomSet) -> bool {
        self.kind.is_some()
            && self.kind == other.kind
            && !self.is_empty()
            && self.len() == other.len()
    }

    pub fn as_query_points(&self) -> Vec<[f64; 3]> {
        self.positions.iter().map(|p| [p.x, p.y, p.z]).collect()
    }
}

/// Collects the key atoms (`CA` for amino acids, `C4'` for nucleotides) of a chain.
///
/// Hetero residues are ignored. Residues lacking their key atom are reported and skipped.
/// The molecule kind is the majority kind among the classified residues, ties going to
/// protein, then DNA, then RNA.
pub fn extract(system: &MolecularSystem, chain_id: ChainId) -> KeyAtomSet {
    let Some(chain) = system.chain(chain_id) else {
        return KeyAtomSet::default();
    };

    let mut positions = Vec::with_capacity(chain.residues().len());
    let mut votes = [0usize; 3];

    for residue in chain
        .residues()
        .iter()
        .filter_map(|&id| system.residue(id))
        .filter(|residue| !residue.is_hetero)
    {
        let kind = classify_residue_name(residue.short_name());
        votes[kind_index(kind)] += 1;

        let atom_name = key_atom_name(kind);
        match residue
            .get_atom_id_by_name(atom_name)
            .and_then(|id| system.atom(id))
        {
            Some(atom) => positions.push(atom.position),
            None => warn!(
                chain = %chain.id,
                residue = %residue.name,
                number = residue.number,
                atom = atom_name,
                "Residue has no key atom; skipping it."
            ),
        }
    }

    let kind = majority_kind(&votes);
    if votes.iter().filter(|&&count| count > 0).count() > 1 {
        warn!(
            chain = %chain.id,
            protein = votes[0],
            dna = votes[1],
            rna = votes[2],
            "Chain mixes molecule kinds; using the majority kind."
        );
    }

    KeyAtomSet { positions, kind }
}

const KIND_ORDER: [MoleculeKind; 3] = [MoleculeKind::Protein, MoleculeKind::DNA, MoleculeKind::RNA];

fn kind_index(kind: MoleculeKind) -> usize {
    match kind {
        MoleculeKind::Protein => 0,
        MoleculeKind::DNA => 1,
        MoleculeKind::RNA => 2,
    }
}

fn majority_kind(votes: &[usize; 3]) -> Option<MoleculeKind> {
    let mut best: Option<(MoleculeKind, usize)> = None;
    for (kind, &count) in KIND_ORDER.iter().zip(votes) {
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((*kind, count));
        }
    }
    best.map(|(kind, _)| kind)
}

/// A one-line description of a chain, used to diagnose fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainProfile {
    pub label: String,
    pub kind: Option<MoleculeKind>,
    pub residues: usize,
    pub key_atoms: usize,
}

pub fn profile_chains(system: &MolecularSystem) -> Vec<ChainProfile> {
    system
        .chains_iter()
        .map(|(chain_id, chain)| {
            let key_atoms = extract(system, chain_id);
            ChainProfile {
                label: chain.id.clone(),
                kind: key_atoms.kind,
                residues: chain.residues().len(),
                key_atoms: key_atoms.len(),
            }
        })
        .collect()
}
