//! Side-by-side results of all algorithms on one instance.
//!
//! - [`compare`] — greedy, 2-opt and (when small enough) brute force
//! - [`InvariantViolation`] — a heuristic beating the optimum, which means a bug

mod report;

pub use report::{compare, gap_percent, Comparison, InvariantViolation};
pub(crate) use report::check_against_optimum;
