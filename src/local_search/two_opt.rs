//! 2-opt tour improvement.
//!
//! # Algorithm
//!
//! For each index pair `1 ≤ i < k ≤ n-1` of the open route, build the
//! candidate obtained by reversing `route[i..=k]` and measure it with
//! [`route_length`]. The first candidate shorter than the current tour by
//! more than [`EPSILON`](crate::distance::EPSILON) is accepted and the scan
//! restarts from `i = 1`. The search ends after a full pass with no
//! accepted move. City 0 never moves.
//!
//! # Complexity
//!
//! O(n²) candidates per pass, each measured in O(n).
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use tracing::instrument;

use crate::distance::{is_improvement, route_length};
use crate::error::Result;
use crate::models::{close_route, open_route, validate_permutation, City, TwoOptTour};

/// A decision point of the 2-opt scan.
#[derive(Debug, Clone, Copy)]
pub(crate) enum TwoOptEvent<'a> {
    /// Pair `(i, k)` is being tested against `route`.
    Compare {
        route: &'a [usize],
        i: usize,
        k: usize,
        current: f64,
        candidate: f64,
    },
    /// The reversal of `(i, k)` was accepted; `route` is the new tour.
    Swap {
        route: &'a [usize],
        i: usize,
        k: usize,
        before: f64,
        after: f64,
        iteration: usize,
    },
}

/// Improves `initial` with first-improvement 2-opt.
///
/// `initial` may be open or closed and must visit every city once.
/// Fewer than 2 cities give an empty tour; with fewer than 3 no swap is
/// possible and the input is returned closed with 0 iterations.
///
/// # Errors
///
/// [`TspError::InvalidRoute`](crate::error::TspError::InvalidRoute) if
/// `initial` is not a permutation of the city ids.
///
/// # Examples
///
/// ```
/// use tsp_stepper::models::City;
/// use tsp_stepper::local_search::two_opt;
///
/// let cities = City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
///
/// // 0→2→1→3 crosses itself
/// let result = two_opt(&cities, &[0, 2, 1, 3, 0]).unwrap();
/// assert!((result.distance - 40.0).abs() < 1e-10);
/// assert_eq!(result.iterations, 1);
/// ```
#[instrument(level = "debug", skip(cities, initial), fields(cities = cities.len()))]
pub fn two_opt(cities: &[City], initial: &[usize]) -> Result<TwoOptTour> {
    let n = cities.len();
    if n < 2 {
        return Ok(TwoOptTour {
            route: Vec::new(),
            distance: 0.0,
            iterations: 0,
        });
    }

    let open = open_route(initial);
    validate_permutation(open, n)?;

    let (route, distance, iterations) = two_opt_search(cities, open.to_vec(), |_| {});
    tracing::debug!(distance, iterations, "2-opt converged");
    Ok(TwoOptTour {
        route,
        distance,
        iterations,
    })
}

/// Runs the 2-opt scan over a validated open route, reporting every
/// decision to `on_event`. Returns the closed route, its length and the
/// number of accepted swaps.
pub(crate) fn two_opt_search<F>(
    cities: &[City],
    mut current: Vec<usize>,
    mut on_event: F,
) -> (Vec<usize>, f64, usize)
where
    F: FnMut(TwoOptEvent<'_>),
{
    let n = current.len();
    let mut current_len = route_length(&current, cities);
    let mut iterations = 0;

    if n >= 3 {
        'pass: loop {
            for i in 1..n - 1 {
                for k in i + 1..n {
                    let mut candidate = current.clone();
                    candidate[i..=k].reverse();
                    let candidate_len = route_length(&candidate, cities);
                    on_event(TwoOptEvent::Compare {
                        route: &current,
                        i,
                        k,
                        current: current_len,
                        candidate: candidate_len,
                    });

                    if is_improvement(candidate_len, current_len) {
                        iterations += 1;
                        let before = current_len;
                        current = candidate;
                        current_len = candidate_len;
                        on_event(TwoOptEvent::Swap {
                            route: &current,
                            i,
                            k,
                            before,
                            after: current_len,
                            iteration: iterations,
                        });
                        continue 'pass;
                    }
                }
            }
            break;
        }
    }

    let closed = close_route(&current);
    let distance = route_length(&closed, cities);
    (closed, distance, iterations)
}
