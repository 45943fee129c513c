//! # Core Models Module
//!
//! This module contains the data structures used to represent molecular structures in
//! ComplexBuilder: atoms, residues, chains and the system that owns them.
//!
//! ## Overview
//!
//! A [`system::MolecularSystem`] corresponds to a single model of a structure file. Components
//! are stored in slot maps and referenced through the stable keys defined in [`ids`], so chains
//! can be copied between systems and renamed without invalidating other references.
//!
//! ## Key Components
//!
//! - [`atom`] - Individual atom with its coordinates and file-level annotations
//! - [`residue`] - Residue with its atoms, numbering and hetero flag
//! - [`chain`] - Chain identifier, residue ordering and the molecule-kind classification
//! - [`system`] - The complete system with lookup maps and rigid-body operations
//! - [`ids`] - Unique identifier types for atoms, residues, and chains
//!
//! ## Usage
//!
//! ```ignore
//! use complexbuilder::core::models::{system::MolecularSystem, atom::Atom};
//!
//! let mut system = MolecularSystem::new();
//! let chain_id = system.add_chain("A");
//! let residue_id = system.add_residue(chain_id, 1, None, "ALA", false)?;
//!
//! let atom = Atom::new("CA", residue_id, Point3::new(0.0, 0.0, 0.0));
//! system.add_atom_to_residue(residue_id, atom)?;
//! ```

pub mod atom;
pub mod chain;
pub mod ids;
pub mod residue;
pub mod system;
