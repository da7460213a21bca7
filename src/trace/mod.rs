//! Step traces for frame-by-frame replay.
//!
//! Each generator walks its algorithm's decisions and records them as an
//! append-only list of [`Step`]s. The last step is always terminal
//! ([`StepKind::FinalResult`] or [`StepKind::Final`]).
//!
//! - [`greedy_steps`] — candidate edges, decisions and commits of nearest neighbor
//! - [`two_opt_steps`] — every compared pair and every accepted swap
//! - [`brute_force_steps`] — sampled permutation checks and every new best

mod brute_force;
mod greedy;
mod step;
mod two_opt;

pub use brute_force::brute_force_steps;
pub use greedy::greedy_steps;
pub use step::{Step, StepKind};
pub use two_opt::two_opt_steps;
