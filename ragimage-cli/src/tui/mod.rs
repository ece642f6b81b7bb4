//! TUI module for terminal user interface using Ratatui
//!
//! Provides the full-screen generation form.

pub mod screens;
pub mod terminal;
pub mod theme;

pub use terminal::{Tui, restore_terminal};
