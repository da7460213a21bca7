//! 2-opt trace.

use tracing::instrument;

use crate::error::Result;
use crate::local_search::{two_opt_search, TwoOptEvent};
use crate::models::{close_route, open_route, validate_permutation, City};

use super::{Step, StepKind};

/// Records every pair 2-opt compares and every swap it accepts.
///
/// Runs the same scan as [`two_opt`](crate::local_search::two_opt), so the
/// final step's path and distance equal its result.
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
/// use tsp_stepper::trace::{two_opt_steps, StepKind};
///
/// let cities = City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
/// let steps = two_opt_steps(&cities, &[0, 2, 1, 3]).unwrap();
/// assert_eq!(steps[0].kind, StepKind::Compare);
/// assert_eq!(steps[1].kind, StepKind::Swap);
/// assert_eq!(steps.last().unwrap().kind, StepKind::Final);
/// ```
#[instrument(level = "debug", skip(cities, initial), fields(cities = cities.len()))]
pub fn two_opt_steps(cities: &[City], initial: &[usize]) -> Result<Vec<Step>> {
    let n = cities.len();
    if n < 2 {
        return Ok(vec![Step::new(
            StepKind::Final,
            "At least two cities are needed to build a route.",
        )
        .with_path(Vec::new())
        .with_distance(0.0)
        .with_meta("iterations", 0usize)]);
    }

    let open = open_route(initial);
    validate_permutation(open, n)?;

    let mut steps = Vec::new();
    let (route, distance, iterations) =
        two_opt_search(cities, open.to_vec(), |event| match event {
            TwoOptEvent::Compare {
                route,
                i,
                k,
                current,
                candidate,
            } => {
                steps.push(
                    Step::new(
                        StepKind::Compare,
                        format!(
                            "Reverse positions {i}..{k} (cities {} to {}): {candidate:.2} vs current {current:.2}.",
                            route[i], route[k]
                        ),
                    )
                    .with_edge(route[i], route[k])
                    .with_path(close_route(route))
                    .with_distance(current)
                    .with_meta("i", i)
                    .with_meta("k", k)
                    .with_meta("current_distance", current)
                    .with_meta("candidate_distance", candidate),
                );
            }
            TwoOptEvent::Swap {
                route,
                i,
                k,
                before,
                after,
                iteration,
            } => {
                steps.push(
                    Step::new(
                        StepKind::Swap,
                        format!(
                            "Swap accepted: reversing positions {i}..{k} shortens the tour by {:.2} to {after:.2}.",
                            before - after
                        ),
                    )
                    .with_edge(route[i], route[k])
                    .with_path(close_route(route))
                    .with_distance(after)
                    .with_meta("i", i)
                    .with_meta("k", k)
                    .with_meta("before", before)
                    .with_meta("after", after)
                    .with_meta("iteration", iteration),
                );
            }
        });

    steps.push(
        Step::new(
            StepKind::Final,
            format!(
                "No improving swap remains after {iterations} swaps: total distance {distance:.2}."
            ),
        )
        .with_path(route)
        .with_distance(distance)
        .with_meta("iterations", iterations),
    );

    tracing::debug!(steps = steps.len(), iterations, "2-opt trace generated");
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::nearest_neighbor;
    use crate::local_search::two_opt;

    fn sample() -> Vec<City> {
        City::from_coords(&[
            (0.0, 0.0),
            (6.0, 1.0),
            (1.0, 5.0),
            (7.0, 7.0),
            (3.0, 2.0),
            (2.0, 9.0),
        ])
    }

    #[test]
    fn test_final_matches_algorithm() {
        let cities = sample();
        let initial = [0, 3, 1, 5, 2, 4];
        let steps = two_opt_steps(&cities, &initial).expect("valid");
        let result = two_opt(&cities, &initial).expect("valid");
        let last = steps.last().expect("non-empty");
        assert_eq!(last.kind, StepKind::Final);
        assert_eq!(last.path.as_ref(), Some(&result.route));
        assert_eq!(last.distance, Some(result.distance));
        let swaps = steps.iter().filter(|s| s.kind == StepKind::Swap).count();
        assert_eq!(swaps, result.iterations);
    }

    #[test]
    fn test_every_swap_follows_a_compare() {
        let cities = sample();
        let greedy = nearest_neighbor(&cities);
        let steps = two_opt_steps(&cities, &greedy.route).expect("valid");
        for (idx, step) in steps.iter().enumerate() {
            if step.kind == StepKind::Swap {
                assert_eq!(steps[idx - 1].kind, StepKind::Compare);
                assert_eq!(steps[idx - 1].metadata["i"], step.metadata["i"]);
            }
        }
    }

    #[test]
    fn test_small_instances() {
        let two = City::from_coords(&[(0.0, 0.0), (1.0, 0.0)]);
        let steps = two_opt_steps(&two, &[0, 1]).expect("valid");
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].path.as_ref(), Some(&vec![0, 1, 0]));

        let none = two_opt_steps(&[], &[]).expect("trivial");
        assert_eq!(none.len(), 1);
        assert!(none[0].is_terminal());
    }

    #[test]
    fn test_rejects_invalid_route() {
        let cities = sample();
        assert!(two_opt_steps(&cities, &[0, 1, 2]).is_err());
    }
}
