//! Flag Stack Layout Engine
//!
//! Procedural layout and constraint engine for a 3D flag-tile stacking game.
//! A single seed determines everything: which layout preset is chosen, how the
//! tile positions are mirrored, rotated, staggered and settled, which country
//! code lands on which tile, and in what order pairs can be cleared.

pub mod assign;
pub mod board;
pub mod countries;
pub mod easing;
pub mod geometry;
pub mod layouts;
pub mod mask;
pub mod pool;
pub mod rng;
pub mod settle;
pub mod transform;

pub use board::{build_board, build_piles, repopulate_piles, Board, BoardConfig, TileSlot};
pub use countries::Continent;
pub use geometry::{TileMetrics, Vec3};
pub use layouts::Preset;
pub use transform::TransformConfig;
