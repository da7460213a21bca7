//! Constructive heuristics.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbor tour from city 0, O(n²)

mod nearest_neighbor;

pub use nearest_neighbor::nearest_neighbor;
pub(crate) use nearest_neighbor::nearest_unvisited;
