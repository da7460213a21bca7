//! Euclidean geometry over cities.

use crate::models::{is_closed, City};

/// Tolerance for comparing route lengths.
pub const EPSILON: f64 = 1e-9;

/// Euclidean distance between two cities.
///
/// # Examples
///
/// ```
/// use tsp_stepper::models::City;
/// use tsp_stepper::distance::distance;
///
/// let a = City::new(0, 0.0, 0.0);
/// let b = City::new(1, 3.0, 4.0);
/// assert!((distance(&a, &b) - 5.0).abs() < 1e-10);
/// ```
pub fn distance(a: &City, b: &City) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    (dx * dx + dy * dy).sqrt()
}

/// Total length of a route over `cities`, indexed by id.
///
/// An open route gets its closing edge added; a closed route is summed
/// as-is so the closing edge is counted once. Routes shorter than 2
/// have length 0.
///
/// # Panics
///
/// Panics if the route contains an id outside `cities`.
///
/// # Examples
///
/// ```
/// use tsp_stepper::models::City;
/// use tsp_stepper::distance::route_length;
///
/// let cities = City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
/// assert!((route_length(&[0, 1, 2, 3], &cities) - 40.0).abs() < 1e-10);
/// assert!((route_length(&[0, 1, 2, 3, 0], &cities) - 40.0).abs() < 1e-10);
/// ```
pub fn route_length(route: &[usize], cities: &[City]) -> f64 {
    if route.len() < 2 {
        return 0.0;
    }
    let mut total: f64 = route
        .windows(2)
        .map(|pair| distance(&cities[pair[0]], &cities[pair[1]]))
        .sum();
    if !is_closed(route) {
        total += distance(&cities[route[route.len() - 1]], &cities[route[0]]);
    }
    total
}

/// Returns `true` if two lengths are equal within [`EPSILON`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Returns `true` if `candidate` beats `incumbent` by more than [`EPSILON`].
pub fn is_improvement(candidate: f64, incumbent: f64) -> bool {
    candidate < incumbent - EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<City> {
        City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)])
    }

    #[test]
    fn test_distance() {
        let a = City::new(0, 1.0, 2.0);
        let b = City::new(1, 4.0, 6.0);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-10);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = City::new(0, -3.5, 2.25);
        let b = City::new(1, 7.0, -1.0);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }

    #[test]
    fn test_route_length_open_and_closed_agree() {
        let cities = square();
        let open = route_length(&[0, 2, 1, 3], &cities);
        let closed = route_length(&[0, 2, 1, 3, 0], &cities);
        assert_eq!(open, closed);
    }

    #[test]
    fn test_route_length_short_routes() {
        let cities = square();
        assert_eq!(route_length(&[], &cities), 0.0);
        assert_eq!(route_length(&[2], &cities), 0.0);
    }

    #[test]
    fn test_route_length_two_cities_is_round_trip() {
        let cities = square();
        assert!((route_length(&[0, 1], &cities) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_tolerance_helpers() {
        assert!(approx_eq(1.0, 1.0 + 1e-12));
        assert!(!approx_eq(1.0, 1.0 + 1e-6));
        assert!(is_improvement(1.0, 2.0));
        assert!(!is_improvement(1.0 - 1e-12, 1.0));
        assert!(!is_improvement(2.0, 1.0));
    }
}
