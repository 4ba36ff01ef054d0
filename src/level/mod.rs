//! Level calculator: maps cumulative XP onto an ascending threshold table.

pub mod data;
pub mod logic;
pub mod types;

pub use logic::compute_level;
pub use types::{LevelDef, LevelInfo, LevelTable};
