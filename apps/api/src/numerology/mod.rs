// Numerology Engine
// Pure calculation: letter table, digit reduction, the four core numbers,
// description copy and recommendations. No I/O anywhere under this module.

pub mod engine;
pub mod letters;
pub mod recommendations;
pub mod reduction;
pub mod tables;

pub use engine::{calculate, BirthDate, FullName, NumerologyError, NumerologyReport};
pub use reduction::CoreNumber;
