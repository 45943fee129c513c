use crate::core::models::ids::ChainId;
use crate::core::models::system::MolecularSystem;
use crate::core::utils::geometry::{Superposition, superimpose};
use crate::engine::error::EngineError;
use crate::engine::key_atoms::{self, KeyAtomSet};
use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A sample chain that superimposes onto a reference chain within the RMSD threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainMatch {
    pub reference_chain: ChainId,
    pub sample_chain: ChainId,
    pub superposition: Superposition,
}

impl ChainMatch {
    pub fn rmsd(&self) -> f64 {
        self.superposition.rmsd
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchReport {
    /// Accepted matches, by ascending RMSD.
    pub matches: Vec<ChainMatch>,
    /// Whether at least one pair superimposed within the RMSD threshold.
    pub any_superimposed: bool,
    /// Lowest RMSD over every superimposed pair, including rejected ones.
    pub best_rmsd: Option<f64>,
}

struct ChainKeyAtoms {
    id: ChainId,
    label: String,
    key_atoms: KeyAtomSet,
}

fn collect_key_atoms(system: &MolecularSystem) -> Vec<ChainKeyAtoms> {
    system
        .chains_iter()
        .map(|(id, chain)| ChainKeyAtoms {
            id,
            label: chain.id.clone(),
            key_atoms: key_atoms::extract(system, id),
        })
        .collect()
}

/// Superimposes every compatible (reference chain, sample chain) pair.
///
/// Pairs are enumerated with the reference chains in the outer loop and the sample chains
/// in the inner loop. Pairs of different molecule kinds or different key-atom counts are
/// reported and left out. Matches at or below `rmsd_threshold` are returned, stably sorted
/// by RMSD, so that ties keep the enumeration order.
#[instrument(skip_all, name = "chain_matching_task")]
pub fn run(
    reference: &MolecularSystem,
    sample: &MolecularSystem,
    rmsd_threshold: f64,
) -> Result<MatchReport, EngineError> {
    let reference_chains = collect_key_atoms(reference);
    let sample_chains = collect_key_atoms(sample);

    let pairs: Vec<(&ChainKeyAtoms, &ChainKeyAtoms)> = reference_chains
        .iter()
        .cartesian_product(sample_chains.iter())
        .filter(|(r, s)| {
            if r.key_atoms.is_compatible_with(&s.key_atoms) {
                return true;
            }
            if r.key_atoms.kind.is_none() || s.key_atoms.kind.is_none() {
                debug!(
                    reference = %r.label,
                    sample = %s.label,
                    "Chain without polymer residues; not superimposing."
                );
            } else if r.key_atoms.kind != s.key_atoms.kind {
                warn!(
                    reference = %r.label,
                    sample = %s.label,
                    "Chains are of different molecule kinds; not superimposing."
                );
            } else if r.key_atoms.len() != s.key_atoms.len() {
                warn!(
                    reference = %r.label,
                    sample = %s.label,
                    reference_atoms = r.key_atoms.len(),
                    sample_atoms = s.key_atoms.len(),
                    "Chains differ in key-atom count; not superimposing."
                );
            }
            false
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter();

    let superpositions: Vec<Superposition> = iterator
        .map(|(r, s)| superimpose(&r.key_atoms.positions, &s.key_atoms.positions))
        .collect::<Result<_, _>>()?;

    let best_rmsd = superpositions
        .iter()
        .map(|s| s.rmsd)
        .min_by(|a, b| a.total_cmp(b));

    let mut matches: Vec<ChainMatch> = pairs
        .iter()
        .zip(superpositions)
        .filter_map(|((r, s), superposition)| {
            debug!(
                reference = %r.label,
                sample = %s.label,
                rmsd = superposition.rmsd,
                "Superimposed chain pair."
            );
            (superposition.rmsd <= rmsd_threshold).then(|| ChainMatch {
                reference_chain: r.id,
                sample_chain: s.id,
                superposition,
            })
        })
        .collect();
    matches.sort_by(|a, b| a.rmsd().total_cmp(&b.rmsd()));

    info!(
        pairs = pairs.len(),
        matches = matches.len(),
        best_rmsd = ?best_rmsd,
        "Chain matching complete."
    );

    let any_superimposed = !matches.is_empty();
    Ok(MatchReport {
        matches,
        any_superimposed,
        best_rmsd,
    })
}
