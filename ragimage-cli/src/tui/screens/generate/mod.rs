//! Generation form screen
//!
//! - state.rs: form fields, focus and the generation session
//! - ui.rs: rendering
//! - input.rs: key handling
//! - runner.rs: event loop and background tasks

mod input;
mod runner;
mod state;
mod ui;

pub use input::{InputAction, handle_input};
pub use runner::{GenerateResult, run_generate};
pub use state::{Field, GenerateState, TextField};
pub use ui::GenerateUI;
