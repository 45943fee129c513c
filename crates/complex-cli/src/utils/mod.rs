pub mod fragments;
pub mod progress;
