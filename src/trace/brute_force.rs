//! Brute-force trace.

use tracing::instrument;

use crate::distance::route_length;
use crate::error::Result;
use crate::exact::{check_size, factorial, Incumbent, Permutations};
use crate::models::{close_route, City};

use super::{Step, StepKind};

/// Records the exhaustive search.
///
/// Every `sampling_rate`-th permutation gets a `permutation_check` step
/// (the 1st, the `rate+1`-th, ...). A permutation that becomes the new
/// best is always recorded, followed by a `best_found` step, so the final
/// incumbent is never skipped. A rate of 0 is treated as 1.
///
/// # Errors
///
/// [`TspError::SizeLimitExceeded`](crate::error::TspError::SizeLimitExceeded)
/// for more than 9 cities.
///
/// # Examples
///
/// ```
/// use tsp_stepper::models::City;
/// use tsp_stepper::trace::{brute_force_steps, StepKind};
///
/// let cities = City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
/// let steps = brute_force_steps(&cities, 1).unwrap();
/// let checks = steps.iter().filter(|s| s.kind == StepKind::PermutationCheck).count();
/// assert_eq!(checks, 24);
/// let last = steps.last().unwrap();
/// assert_eq!(last.kind, StepKind::FinalResult);
/// assert_eq!(last.metadata["total_permutations"], 24);
/// ```
#[instrument(level = "debug", skip(cities), fields(cities = cities.len()))]
pub fn brute_force_steps(cities: &[City], sampling_rate: usize) -> Result<Vec<Step>> {
    let n = cities.len();
    check_size(n)?;
    if n < 2 {
        return Ok(vec![Step::new(
            StepKind::FinalResult,
            "At least two cities are needed to build a route.",
        )
        .with_path(Vec::new())
        .with_distance(0.0)
        .with_meta("checked", 0usize)
        .with_meta("total_permutations", 0usize)]);
    }

    let rate = if sampling_rate == 0 {
        tracing::warn!("sampling rate 0 treated as 1");
        1
    } else {
        sampling_rate
    };

    let total = factorial(n);
    let mut incumbent = Incumbent::default();
    let mut steps = Vec::new();
    let mut checked = 0usize;

    for (idx, perm) in Permutations::new((0..n).collect()).enumerate() {
        let closed = close_route(&perm);
        let dist = route_length(&closed, cities);
        let improved = incumbent.offer(&closed, dist);
        checked = idx + 1;

        if idx % rate == 0 || improved {
            steps.push(
                Step::new(
                    StepKind::PermutationCheck,
                    format!("Permutation {checked} of {total}: distance {dist:.2}."),
                )
                .with_path(closed.clone())
                .with_distance(dist)
                .with_meta("checked", checked)
                .with_meta("total", total)
                .with_meta("best_distance", incumbent.distance()),
            );
        }
        if improved {
            steps.push(
                Step::new(
                    StepKind::BestFound,
                    format!("New best route at permutation {checked}: {dist:.2}."),
                )
                .with_path(closed)
                .with_distance(dist)
                .with_meta("checked", checked)
                .with_meta("total", total),
            );
        }
    }

    let best = incumbent.into_tour();
    steps.push(
        Step::new(
            StepKind::FinalResult,
            format!(
                "Checked all {total} permutations: shortest tour {:.2}.",
                best.distance
            ),
        )
        .with_path(best.route)
        .with_distance(best.distance)
        .with_meta("checked", checked)
        .with_meta("total_permutations", total),
    );

    tracing::debug!(steps = steps.len(), checked, "brute force trace generated");
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;
    use crate::exact::brute_force;

    fn sample() -> Vec<City> {
        City::from_coords(&[(0.0, 0.0), (4.0, 7.0), (9.0, 1.0), (3.0, 3.0), (8.0, 8.0)])
    }

    #[test]
    fn test_final_matches_algorithm() {
        let cities = sample();
        let steps = brute_force_steps(&cities, 1).expect("within limit");
        let tour = brute_force(&cities).expect("within limit");
        let last = steps.last().expect("non-empty");
        assert_eq!(last.path.as_ref(), Some(&tour.route));
        assert_eq!(last.distance, Some(tour.distance));
        assert_eq!(last.metadata["checked"], 120);
    }

    #[test]
    fn test_sampling_keeps_every_best() {
        let cities = sample();
        let full = brute_force_steps(&cities, 1).expect("within limit");
        let sampled = brute_force_steps(&cities, 7).expect("within limit");

        let bests = |steps: &[Step]| -> Vec<Option<Vec<usize>>> {
            steps
                .iter()
                .filter(|s| s.kind == StepKind::BestFound)
                .map(|s| s.path.clone())
                .collect()
        };
        assert_eq!(bests(&full), bests(&sampled));
        assert!(sampled.len() < full.len());
        assert_eq!(full.last(), sampled.last());
    }

    #[test]
    fn test_best_found_preceded_by_its_check() {
        let cities = sample();
        let steps = brute_force_steps(&cities, 50).expect("within limit");
        for (idx, step) in steps.iter().enumerate() {
            if step.kind == StepKind::BestFound {
                let prev = &steps[idx - 1];
                assert_eq!(prev.kind, StepKind::PermutationCheck);
                assert_eq!(prev.path, step.path);
            }
        }
    }

    #[test]
    fn test_zero_rate_behaves_like_one() {
        let cities = sample();
        assert_eq!(
            brute_force_steps(&cities, 0).expect("ok"),
            brute_force_steps(&cities, 1).expect("ok")
        );
    }

    #[test]
    fn test_size_limit() {
        let coords: Vec<(f64, f64)> = (0..10).map(|i| (i as f64, 0.0)).collect();
        assert!(matches!(
            brute_force_steps(&City::from_coords(&coords), 1),
            Err(TspError::SizeLimitExceeded { .. })
        ));
    }
}
