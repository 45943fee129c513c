use crate::core::models::chain::MoleculeKind;
use phf::{Set, phf_set};
use std::collections::HashSet;
use thiserror::Error;

/// Representative atom of an amino-acid residue.
pub const PROTEIN_KEY_ATOM: &str = "CA";
/// Representative atom of a nucleotide.
pub const NUCLEOTIDE_KEY_ATOM: &str = "C4'";

static DNA_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "DA", "DT", "DC", "DG", "DI",
};

static RNA_RESIDUE_NAMES: Set<&'static str> = phf_set! {
    "A", "U", "C", "G", "I",
};

const CHAIN_ID_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChainIdError {
    #[error("All one- and two-character chain identifiers are in use ({in_use} chains)")]
    IdentifierSpaceExhausted { in_use: usize },
}

/// Classifies a (trimmed, at most three-character) residue name.
///
/// Names in the nucleic-acid tables map to DNA or RNA; every other name is treated as
/// an amino acid.
pub fn classify_residue_name(name: &str) -> MoleculeKind {
    let name = name.trim();
    if DNA_RESIDUE_NAMES.contains(name) {
        MoleculeKind::DNA
    } else if RNA_RESIDUE_NAMES.contains(name) {
        MoleculeKind::RNA
    } else {
        MoleculeKind::Protein
    }
}

/// Returns the name of the atom used to represent a residue of the given kind.
pub fn key_atom_name(kind: MoleculeKind) -> &'static str {
    match kind {
        MoleculeKind::Protein => PROTEIN_KEY_ATOM,
        MoleculeKind::DNA | MoleculeKind::RNA => NUCLEOTIDE_KEY_ATOM,
    }
}

fn single_character_ids() -> impl Iterator<Item = String> {
    CHAIN_ID_ALPHABET.iter().map(|&c| (c as char).to_string())
}

fn two_character_ids() -> impl Iterator<Item = String> {
    CHAIN_ID_ALPHABET.iter().flat_map(|&first| {
        CHAIN_ID_ALPHABET
            .iter()
            .map(move |&second| [first as char, second as char].iter().collect())
    })
}

/// Chooses an identifier for a chain joining a structure whose chains use `in_use`.
///
/// While fewer than 62 identifiers are taken, a single character is returned: `proposed`
/// itself if it is a free single character, otherwise the first free character of
/// `A-Z`, `a-z`, `0-9`. From 62 identifiers on, the first free two-character combination
/// of the same alphabet is returned.
///
/// # Errors
///
/// Returns [`ChainIdError::IdentifierSpaceExhausted`] if no identifier is left.
pub fn allocate_chain_id(in_use: &HashSet<String>, proposed: &str) -> Result<String, ChainIdError> {
    if in_use.len() < CHAIN_ID_ALPHABET.len() {
        let proposed_is_single = proposed.chars().count() == 1;
        if proposed_is_single && !in_use.contains(proposed) {
            return Ok(proposed.to_string());
        }
        if let Some(id) = single_character_ids().find(|id| !in_use.contains(id)) {
            return Ok(id);
        }
    }

    two_character_ids()
        .find(|id| !in_use.contains(id))
        .ok_or(ChainIdError::IdentifierSpaceExhausted {
            in_use: in_use.len(),
        })
}
