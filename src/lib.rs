//! # tsp-stepper
//!
//! Traveling salesman teaching core: three route algorithms on small
//! Euclidean instances, each paired with a replayable step trace, a
//! cancellable live brute-force search, and a playback controller that
//! walks a trace one step at a time.
//!
//! ## Modules
//!
//! - [`models`] — Cities, route encodings and algorithm results
//! - [`distance`] — Euclidean distance, route length and tolerance helpers
//! - [`constructive`] — Nearest-neighbor construction
//! - [`local_search`] — 2-opt improvement
//! - [`exact`] — Permutation enumeration and brute force
//! - [`trace`] — Step records and per-algorithm trace generators
//! - [`live`] — Async live brute-force search with cancellation
//! - [`playback`] — Step playback state machine with a timer
//! - [`instance`] — Random city generation
//! - [`comparison`] — Side-by-side results and optimality checks
//! - [`session`] — Per-user state tying the above together
//! - [`config`] — TOML configuration
//! - [`error`] — Crate error type
//!
//! ## Example
//!
//! ```
//! use tsp_stepper::constructive::nearest_neighbor;
//! use tsp_stepper::exact::brute_force;
//! use tsp_stepper::local_search::two_opt;
//! use tsp_stepper::models::City;
//!
//! let cities = City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
//! let greedy = nearest_neighbor(&cities);
//! let improved = two_opt(&cities, &greedy.route).unwrap();
//! let optimal = brute_force(&cities).unwrap();
//! assert!(optimal.distance <= improved.distance + 1e-9);
//! assert!(improved.distance <= greedy.distance + 1e-9);
//! ```

pub mod comparison;
pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod exact;
pub mod instance;
pub mod live;
pub mod local_search;
pub mod models;
pub mod playback;
pub mod session;
pub mod trace;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, TspError};
