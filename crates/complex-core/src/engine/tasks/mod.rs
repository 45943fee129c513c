//! The computational steps of one assembly iteration.
//!
//! [`chain_matching`] finds the chains a fragment shares with the growing complex and the
//! superposition that aligns them; [`clash_detection`] decides whether the other chain of the
//! fragment, once moved, is new or already present.

pub mod chain_matching;
pub mod clash_detection;
