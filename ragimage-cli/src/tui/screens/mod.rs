//! TUI screens

pub mod generate;

pub use generate::{GenerateResult, run_generate};
