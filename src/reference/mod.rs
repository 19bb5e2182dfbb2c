//! Static reference data: the third-place combination table and bracket presets.

mod combinations;
pub mod world_cup_2026;

pub use combinations::{binomial, CombinationTable, WORLD_CUP_2026_GROUPS};
