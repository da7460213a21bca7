//! Comparison report.

use serde::Serialize;
use tracing::instrument;

use crate::constructive::nearest_neighbor;
use crate::distance::{is_improvement, EPSILON};
use crate::error::Result;
use crate::exact::{brute_force, MAX_BRUTE_FORCE_CITIES};
use crate::local_search::two_opt;
use crate::models::{Algorithm, City, Tour, TwoOptTour};

/// A heuristic tour shorter than the proven optimum.
///
/// No correct heuristic can do this, so it points at a defect in distance
/// computation or comparison. It is reported, never raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvariantViolation {
    /// Heuristic that produced the tour.
    pub algorithm: Algorithm,
    /// Its distance.
    pub heuristic_distance: f64,
    /// The brute-force optimum.
    pub optimal_distance: f64,
}

/// Results of all algorithms on one instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Nearest-neighbor tour.
    pub greedy: Tour,
    /// 2-opt started from the greedy tour.
    pub two_opt: TwoOptTour,
    /// Optimal tour, `None` above the brute-force limit.
    pub brute_force: Option<Tour>,
    /// Heuristics found to beat the optimum.
    pub violations: Vec<InvariantViolation>,
}

impl Comparison {
    /// Distance reported for an algorithm, if it ran.
    pub fn distance(&self, algorithm: Algorithm) -> Option<f64> {
        match algorithm {
            Algorithm::Greedy => Some(self.greedy.distance),
            Algorithm::TwoOpt => Some(self.two_opt.distance),
            Algorithm::BruteForce => self.brute_force.as_ref().map(|t| t.distance),
        }
    }

    /// Percent above the optimum for an algorithm, if the optimum is known.
    pub fn gap(&self, algorithm: Algorithm) -> Option<f64> {
        let optimal = self.brute_force.as_ref()?.distance;
        self.distance(algorithm).map(|d| gap_percent(d, optimal))
    }

    /// The algorithm with the shortest tour (earliest wins ties).
    pub fn best(&self) -> Algorithm {
        let mut best = (Algorithm::Greedy, self.greedy.distance);
        for algorithm in [Algorithm::TwoOpt, Algorithm::BruteForce] {
            if let Some(d) = self.distance(algorithm) {
                if is_improvement(d, best.1) {
                    best = (algorithm, d);
                }
            }
        }
        best.0
    }
}

/// How far `distance` is above `optimal`, in percent. 0 when `optimal` is 0.
///
/// ```
/// use tsp_stepper::comparison::gap_percent;
///
/// assert!((gap_percent(110.0, 100.0) - 10.0).abs() < 1e-10);
/// assert_eq!(gap_percent(5.0, 0.0), 0.0);
/// ```
pub fn gap_percent(distance: f64, optimal: f64) -> f64 {
    if optimal.abs() < EPSILON {
        return 0.0;
    }
    (distance - optimal) / optimal * 100.0
}

/// Runs every algorithm and checks the heuristics against the optimum.
///
/// # Errors
///
/// Propagates errors from 2-opt; brute force is skipped, not failed, for
/// instances above the limit.
///
/// # Examples
///
/// ```
/// use tsp_stepper::comparison::compare;
/// use tsp_stepper::models::{Algorithm, City};
///
/// let cities = City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
/// let report = compare(&cities).unwrap();
/// assert!(report.violations.is_empty());
/// assert_eq!(report.gap(Algorithm::BruteForce), Some(0.0));
/// ```
#[instrument(level = "debug", skip(cities), fields(cities = cities.len()))]
pub fn compare(cities: &[City]) -> Result<Comparison> {
    let greedy = nearest_neighbor(cities);
    let two_opt = two_opt(cities, &greedy.route)?;
    let brute_force = if cities.len() <= MAX_BRUTE_FORCE_CITIES {
        Some(brute_force(cities)?)
    } else {
        None
    };

    let mut violations = Vec::new();
    if let Some(optimal) = &brute_force {
        violations.extend(check_against_optimum(
            Algorithm::Greedy,
            greedy.distance,
            optimal.distance,
        ));
        violations.extend(check_against_optimum(
            Algorithm::TwoOpt,
            two_opt.distance,
            optimal.distance,
        ));
    }

    Ok(Comparison {
        greedy,
        two_opt,
        brute_force,
        violations,
    })
}

/// Flags a heuristic distance that beats the optimum by more than EPSILON.
pub(crate) fn check_against_optimum(
    algorithm: Algorithm,
    heuristic_distance: f64,
    optimal_distance: f64,
) -> Option<InvariantViolation> {
    if !is_improvement(heuristic_distance, optimal_distance) {
        return None;
    }
    tracing::error!(
        %algorithm,
        heuristic_distance,
        optimal_distance,
        "heuristic beat the optimum; distance computation is inconsistent"
    );
    Some(InvariantViolation {
        algorithm,
        heuristic_distance,
        optimal_distance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<City> {
        City::from_coords(&[
            (0.0, 0.0),
            (8.0, 3.0),
            (2.0, 7.0),
            (6.0, 9.0),
            (9.0, 0.0),
            (4.0, 4.0),
            (1.0, 3.0),
        ])
    }

    #[test]
    fn test_compare_orders_distances() {
        let report = compare(&sample()).expect("valid");
        let optimal = report.distance(Algorithm::BruteForce).expect("small instance");
        assert!(optimal <= report.two_opt.distance + EPSILON);
        assert!(report.two_opt.distance <= report.greedy.distance + EPSILON);
        assert!(report.violations.is_empty());
        assert!(report.gap(Algorithm::Greedy).expect("optimum known") >= -EPSILON);
    }

    #[test]
    fn test_best_prefers_earliest_on_tie() {
        let cities = City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        let report = compare(&cities).expect("valid");
        assert_eq!(report.best(), Algorithm::Greedy);
    }

    #[test]
    fn test_large_instance_skips_brute_force() {
        let coords: Vec<(f64, f64)> = (0..12)
            .map(|i| ((i * 7 % 12) as f64, (i * 5 % 11) as f64))
            .collect();
        let report = compare(&City::from_coords(&coords)).expect("valid");
        assert!(report.brute_force.is_none());
        assert_eq!(report.gap(Algorithm::Greedy), None);
    }

    #[test]
    fn test_violation_detected() {
        let v = check_against_optimum(Algorithm::TwoOpt, 9.0, 10.0).expect("violation");
        assert_eq!(v.algorithm, Algorithm::TwoOpt);
        assert!(check_against_optimum(Algorithm::TwoOpt, 10.0 - 1e-12, 10.0).is_none());
        assert!(check_against_optimum(Algorithm::Greedy, 11.0, 10.0).is_none());
    }

    #[test]
    fn test_trivial_instance() {
        let report = compare(&[City::new(0, 0.0, 0.0)]).expect("valid");
        assert!(report.greedy.is_empty());
        assert_eq!(report.gap(Algorithm::TwoOpt), Some(0.0));
    }
}
