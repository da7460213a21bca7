//! Live exhaustive search with cooperative yielding and cancellation.
//!
//! - [`CancellationToken`] — shared stop flag
//! - [`run_live_search`] — one permutation per tick, progress after each

mod cancellation;
mod runner;

pub use cancellation::CancellationToken;
pub use runner::{run_live_search, LiveSearchOutcome, SearchProgress};
