//! Exact search by full enumeration.
//!
//! - [`Permutations`] — lazy, restartable permutation sequence
//! - [`brute_force`] — evaluates all n! orderings, n ≤ [`MAX_BRUTE_FORCE_CITIES`]

mod brute_force;
mod permutations;

pub use brute_force::{brute_force, MAX_BRUTE_FORCE_CITIES};
pub(crate) use brute_force::{check_size, Incumbent};
pub use permutations::{factorial, Permutations};
