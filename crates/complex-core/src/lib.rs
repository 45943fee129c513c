//! # ComplexBuilder Core Library
//!
//! A library for reconstructing multi-chain macromolecular complexes from a collection of
//! pairwise interaction fragments, by repeatedly superimposing shared chains and merging the
//! chains that are not yet present into a growing reference structure.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture to keep data, algorithms and procedures apart.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`MolecularSystem`), file I/O for the
//!   PDB format, residue classification tables and the geometric primitives (Kabsch
//!   superposition, RMSD).
//!
//! - **[`engine`]: The Logic Core.** Configuration, error types, progress reporting, the fragment
//!   worklist and the individual assembly tasks: key-atom extraction, chain matching and clash
//!   detection.
//!
//! - **[`workflows`]: The Public API.** The assembly driver that ties the `engine` and `core`
//!   together into a complete run, from a seed structure and a list of fragments to the final
//!   complex.

pub mod core;
pub mod engine;
pub mod workflows;

#[cfg(test)]
pub(crate) mod testing;
