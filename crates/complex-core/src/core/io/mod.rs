//! Provides input/output functionality for molecular file formats.
//!
//! This module contains the reader and writer for the PDB format, the format fragments and
//! assembled complexes are exchanged in, behind a trait-based interface shared by all formats.

pub mod pdb;
pub mod traits;
