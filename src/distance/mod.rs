//! Euclidean distance and route length.
//!
//! [`route_length`] is the only place a route's total is computed. Every
//! algorithm and trace generator goes through it so that comparisons
//! between algorithms see bit-identical values.

mod euclidean;

pub use euclidean::{approx_eq, distance, is_improvement, route_length, EPSILON};
