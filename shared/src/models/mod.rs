//! Domain models for the cost calculator

mod calculation;
mod supply;

pub use calculation::*;
pub use supply::*;
