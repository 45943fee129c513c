//! # Workflows Module
//!
//! High-level entry points that run a complete assembly.
//!
//! ## Overview
//!
//! A workflow takes a seed structure, the list of fragment files and an
//! [`AssemblyConfig`](crate::engine::config::AssemblyConfig), and drives the `engine` tasks
//! until the complex reaches its target number of chains or no fragment can contribute any
//! more.
//!
//! - **Assembly Workflow** ([`assemble`]) - The iterative superimpose, check and merge loop,
//!   available both as a one-shot [`assemble::run`] and as the step-wise [`assemble::Assembler`].

pub mod assemble;
