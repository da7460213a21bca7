//! Nearest-neighbor constructive heuristic.
//!
//! Builds a tour greedily: starting from city 0, always travel to the
//! nearest unvisited city, then return to the start.
//!
//! # Complexity
//!
//! O(n²) where n = number of cities.
//!
//! # Reference
//!
//! Typically 20-25% above optimal on random Euclidean instances, but it
//! gives a fast baseline and a starting tour for 2-opt.

use tracing::instrument;

use crate::distance::{distance, route_length};
use crate::models::{City, Tour};

/// Constructs a closed tour using the nearest-neighbor heuristic.
///
/// The start city is always id 0. Ties are broken by the first city
/// found in ascending id order. Fewer than 2 cities give an empty tour.
///
/// # Examples
///
/// ```
/// use tsp_stepper::models::City;
/// use tsp_stepper::constructive::nearest_neighbor;
///
/// let cities = City::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
/// let tour = nearest_neighbor(&cities);
/// assert_eq!(tour.route, vec![0, 1, 2, 3, 0]);
/// assert!((tour.distance - 6.0).abs() < 1e-10);
/// ```
#[instrument(level = "debug", skip(cities), fields(cities = cities.len()))]
pub fn nearest_neighbor(cities: &[City]) -> Tour {
    let n = cities.len();
    if n < 2 {
        return Tour::empty();
    }

    let mut visited = vec![false; n];
    visited[0] = true;
    let mut route = Vec::with_capacity(n + 1);
    route.push(0);
    let mut current = 0;

    for _ in 1..n {
        match nearest_unvisited(current, cities, &visited) {
            Some((next, _)) => {
                visited[next] = true;
                route.push(next);
                current = next;
            }
            None => break,
        }
    }
    route.push(0);

    let dist = route_length(&route, cities);
    tracing::debug!(distance = dist, "nearest neighbor tour built");
    Tour::new(route, dist)
}

/// Returns the nearest unvisited city to `from` and its distance.
///
/// Scans ids in ascending order and keeps the first strict minimum.
pub(crate) fn nearest_unvisited(
    from: usize,
    cities: &[City],
    visited: &[bool],
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, city) in cities.iter().enumerate() {
        if visited[i] {
            continue;
        }
        let d = distance(&cities[from], city);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best
}
