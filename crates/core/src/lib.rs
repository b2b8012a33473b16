#![forbid(unsafe_code)]

//! Daily status model for the chore tracker.
//!
//! Task definitions and the per-day status log are reached through the
//! [`TaskStore`] and [`StatusLog`] ports; everything in this crate is pure
//! logic over those two inputs.

mod board;
mod day;
mod ids;
mod model;
mod ports;
mod update;

pub use board::*;
pub use day::*;
pub use ids::*;
pub use model::*;
pub use ports::*;
pub use update::*;

#[cfg(test)]
mod tests;
