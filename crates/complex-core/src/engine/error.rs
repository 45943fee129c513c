use std::path::PathBuf;
use thiserror::Error;

use crate::core::utils::geometry::SuperpositionError;
use crate::core::utils::identifiers::ChainIdError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to load fragment '{}': {source}", path.display())]
    FragmentLoad {
        path: PathBuf,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Fragment '{}' must contain exactly 2 chains, found {chains}", path.display())]
    MalformedFragment { path: PathBuf, chains: usize },

    #[error("Cannot name a new chain: {source}")]
    ChainIdentifiers {
        #[from]
        source: ChainIdError,
    },

    #[error("Superposition failed: {source}")]
    Superposition {
        #[from]
        source: SuperpositionError,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
