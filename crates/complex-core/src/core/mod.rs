//! # Core Module
//!
//! This module provides the fundamental building blocks for complex assembly: the molecular
//! data model, structure file I/O and the geometric and naming utilities the engine relies on.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, residues, chains and the system that owns them
//! - **File I/O** ([`io`]) - Reading and writing structure files behind a common trait
//! - **Utilities** ([`utils`]) - Rigid-body superposition, RMSD, residue tables and chain identifiers

pub mod io;
pub mod models;
pub mod utils;
