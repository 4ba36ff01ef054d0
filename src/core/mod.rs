//! Core progression state, clock helpers and shared constants.

pub mod constants;
pub mod progression_state;
pub mod time_window;

pub use constants::*;
pub use progression_state::UserProgressionState;
pub use time_window::HourWindow;
