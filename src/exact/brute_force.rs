//! Exhaustive permutation search.
//!
//! Every one of the n! orderings is evaluated, with no rotation or
//! reflection pruning, so the growth rate stays visible.

use tracing::instrument;

use crate::distance::{is_improvement, route_length};
use crate::error::{Result, TspError};
use crate::models::{close_route, City, Tour};

use super::permutations::Permutations;

/// Largest instance brute force accepts.
pub const MAX_BRUTE_FORCE_CITIES: usize = 9;

/// Finds an optimal tour by enumerating all permutations.
///
/// The first permutation reaching the optimum (in enumeration order) is
/// kept; later ties within [`EPSILON`](crate::distance::EPSILON) do not
/// replace it.
///
/// # Errors
///
/// [`TspError::SizeLimitExceeded`] for more than
/// [`MAX_BRUTE_FORCE_CITIES`] cities.
///
/// # Examples
///
/// ```
/// use tsp_stepper::models::City;
/// use tsp_stepper::exact::brute_force;
///
/// let cities = City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
/// let tour = brute_force(&cities).unwrap();
/// assert!((tour.distance - 40.0).abs() < 1e-9);
/// assert_eq!(tour.route, vec![0, 1, 2, 3, 0]);
/// ```
#[instrument(level = "debug", skip(cities), fields(cities = cities.len()))]
pub fn brute_force(cities: &[City]) -> Result<Tour> {
    check_size(cities.len())?;
    if cities.len() < 2 {
        return Ok(Tour::empty());
    }

    let mut incumbent = Incumbent::default();
    let mut checked = 0usize;
    for perm in Permutations::new((0..cities.len()).collect()) {
        let closed = close_route(&perm);
        let dist = route_length(&closed, cities);
        incumbent.offer(&closed, dist);
        checked += 1;
    }

    let tour = incumbent.into_tour();
    tracing::debug!(checked, distance = tour.distance, "brute force finished");
    Ok(tour)
}

/// Rejects instances above the brute-force limit.
pub(crate) fn check_size(n: usize) -> Result<()> {
    if n > MAX_BRUTE_FORCE_CITIES {
        return Err(TspError::SizeLimitExceeded {
            cities: n,
            limit: MAX_BRUTE_FORCE_CITIES,
        });
    }
    Ok(())
}

/// Best tour seen so far during an enumeration.
#[derive(Debug, Clone, Default)]
pub(crate) struct Incumbent {
    best: Option<Tour>,
}

impl Incumbent {
    /// Offers a closed route; returns `true` if it became the new incumbent.
    pub(crate) fn offer(&mut self, closed: &[usize], dist: f64) -> bool {
        let replace = match &self.best {
            None => true,
            Some(best) => is_improvement(dist, best.distance),
        };
        if replace {
            self.best = Some(Tour::new(closed.to_vec(), dist));
        }
        replace
    }

    /// Current best distance, infinite before the first offer.
    pub(crate) fn distance(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, |t| t.distance)
    }

    /// Current best closed route, empty before the first offer.
    pub(crate) fn route(&self) -> &[usize] {
        match &self.best {
            Some(tour) => &tour.route,
            None => &[],
        }
    }

    pub(crate) fn into_tour(self) -> Tour {
        self.best.unwrap_or_else(Tour::empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::nearest_neighbor;

    #[test]
    fn test_square_perimeter() {
        let cities = City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        let tour = brute_force(&cities).expect("within limit");
        assert!((tour.distance - 40.0).abs() < 1e-9);
        // First optimal permutation in enumeration order is kept
        assert_eq!(tour.route, vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_size_limit() {
        let coords: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, (i * i) as f64)).collect();
        let cities = City::from_coords(&coords);
        match brute_force(&cities) {
            Err(TspError::SizeLimitExceeded { cities, limit }) => {
                assert_eq!(cities, 10);
                assert_eq!(limit, 9);
            }
            other => panic!("expected size limit error, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate() {
        assert_eq!(brute_force(&[]).expect("empty"), Tour::empty());
        assert_eq!(
            brute_force(&[City::new(0, 1.0, 1.0)]).expect("single"),
            Tour::empty()
        );
    }

    #[test]
    fn test_never_worse_than_greedy() {
        let cities = City::from_coords(&[
            (0.0, 0.0),
            (7.0, 1.0),
            (2.0, 6.0),
            (9.0, 8.0),
            (4.0, 3.0),
            (1.0, 9.0),
        ]);
        let exact = brute_force(&cities).expect("within limit");
        let greedy = nearest_neighbor(&cities);
        assert!(exact.distance <= greedy.distance + crate::distance::EPSILON);
    }

    #[test]
    fn test_incumbent_keeps_first_tie() {
        let mut inc = Incumbent::default();
        assert_eq!(inc.distance(), f64::INFINITY);
        assert!(inc.offer(&[0, 1, 0], 10.0));
        assert!(!inc.offer(&[1, 0, 1], 10.0 + 1e-12));
        assert!(!inc.offer(&[1, 0, 1], 10.0 - 1e-12));
        assert_eq!(inc.route(), &[0, 1, 0]);
        assert!(inc.offer(&[1, 0, 1], 9.0));
        assert_eq!(inc.into_tour().distance, 9.0);
    }
}
