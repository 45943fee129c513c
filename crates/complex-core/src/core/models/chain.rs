use super::ids::ResidueId;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The polymer class of a chain, as inferred from its residue names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoleculeKind {
    Protein,
    DNA,
    RNA,
}

#[derive(Debug, Error)]
#[error("Invalid molecule kind string")]
pub struct ParseMoleculeKindError;

impl FromStr for MoleculeKind {
    type Err = ParseMoleculeKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "protein" => Ok(MoleculeKind::Protein),
            "dna" => Ok(MoleculeKind::DNA),
            "rna" => Ok(MoleculeKind::RNA),
            _ => Err(ParseMoleculeKindError),
        }
    }
}

impl fmt::Display for MoleculeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                MoleculeKind::Protein => "PROTEIN",
                MoleculeKind::DNA => "DNA",
                MoleculeKind::RNA => "RNA",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    pub id: String,                      // Chain identifier, one or two printable characters
    pub(crate) residues: Vec<ResidueId>, // Ordered list of residue IDs belonging to this chain
}

impl Chain {
    pub(crate) fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            residues: Vec::new(),
        }
    }

    pub fn residues(&self) -> &[ResidueId] {
        &self.residues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn molecule_kind_parses_case_insensitively() {
        assert_eq!(MoleculeKind::from_str("protein").ok(), Some(MoleculeKind::Protein));
        assert_eq!(MoleculeKind::from_str("DNA").ok(), Some(MoleculeKind::DNA));
        assert_eq!(MoleculeKind::from_str("Rna").ok(), Some(MoleculeKind::RNA));
        assert!(MoleculeKind::from_str("ligand").is_err());
    }

    #[test]
    fn molecule_kind_displays_in_upper_case() {
        assert_eq!(MoleculeKind::Protein.to_string(), "PROTEIN");
        assert_eq!(MoleculeKind::DNA.to_string(), "DNA");
        assert_eq!(MoleculeKind::RNA.to_string(), "RNA");
    }

    #[test]
    fn new_chain_is_empty() {
        let chain = Chain::new("AB");
        assert_eq!(chain.id, "AB");
        assert!(chain.residues().is_empty());
    }
}
