//! Local search operators for improving tours.
//!
//! - [`two_opt`] — 2-opt segment reversal, first improvement

mod two_opt;

pub use two_opt::two_opt;
pub(crate) use two_opt::{two_opt_search, TwoOptEvent};
