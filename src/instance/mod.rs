//! Random problem instances.
//!
//! - [`CityLayout`] — canvas bounds, city count and spacing
//! - [`random_cities`] — seeded uniform placement

mod layout;

pub use layout::{random_cities, CityLayout};
