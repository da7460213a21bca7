//! Domain model types.
//!
//! Cities with stable ids, route encodings (open and closed), and the
//! result types returned by the route algorithms.

mod city;
mod route;
mod tour;

pub use city::City;
pub(crate) use route::validate_permutation;
pub use route::{close_route, is_closed, open_route};
pub use tour::{Algorithm, Tour, TwoOptTour};
