//! Domain models for DKA patient tracking.

mod evaluation;
mod labs;
mod patient;

pub use evaluation::*;
pub use labs::*;
pub use patient::*;
