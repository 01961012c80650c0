//! Command implementations for the mafkit binary.

pub mod cat;
pub mod coords;
pub mod stats;

pub use cat::{CatCommand, CatStats};
pub use coords::CoordsCommand;
pub use stats::{MafStats, StatsCommand};
