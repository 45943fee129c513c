//! # Engine Module
//!
//! This module implements the building blocks of complex assembly: the configuration and
//! error types, progress reporting, the fragment worklist and loader, key-atom extraction and
//! the per-iteration tasks.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Target stoichiometry, RMSD and clash thresholds, search limits
//! - **Error Handling** ([`error`]) - Engine-specific error types and error propagation
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting
//! - **Fragments** ([`worklist`], [`loader`]) - The queue of pending fragments and how they are read
//! - **Key Atoms** ([`key_atoms`]) - One representative atom per residue, and the chain's molecule kind
//! - **Tasks** ([`tasks`]) - Chain matching by superposition and clash detection
//!
//! ## Key Capabilities
//!
//! - **Parallel superposition** of chain pairs behind the `parallel` feature
//! - **Spatial indexing** of key atoms with k-d trees for clash counting
//! - **Pluggable fragment sources** through the [`loader::FragmentLoader`] trait

pub mod config;
pub mod error;
pub mod key_atoms;
pub mod loader;
pub mod progress;
pub mod tasks;
pub mod worklist;
