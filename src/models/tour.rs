//! Algorithm results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three route algorithms the crate compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Nearest-neighbor construction.
    Greedy,
    /// 2-opt local search.
    TwoOpt,
    /// Exhaustive permutation search.
    BruteForce,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Greedy => "Nearest Neighbor",
            Algorithm::TwoOpt => "2-opt",
            Algorithm::BruteForce => "Brute Force",
        };
        f.write_str(name)
    }
}

/// A closed route and its total length.
///
/// # Examples
///
/// ```
/// use tsp_stepper::models::Tour;
///
/// let t = Tour::empty();
/// assert!(t.is_empty());
/// assert_eq!(t.distance, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    /// Closed route (first id repeated at the end), empty for fewer than 2 cities.
    pub route: Vec<usize>,
    /// Total length including the closing edge.
    pub distance: f64,
}

impl Tour {
    /// Creates a tour from a closed route and its length.
    pub fn new(route: Vec<usize>, distance: f64) -> Self {
        Self { route, distance }
    }

    /// The trivial tour returned for fewer than 2 cities.
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// Returns `true` if the tour visits no cities.
    pub fn is_empty(&self) -> bool {
        self.route.is_empty()
    }

    /// Number of distinct cities visited.
    pub fn num_cities(&self) -> usize {
        self.route.len().saturating_sub(1)
    }
}

/// Result of 2-opt local search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwoOptTour {
    /// Locally optimal closed route.
    pub route: Vec<usize>,
    /// Total length including the closing edge.
    pub distance: f64,
    /// Number of accepted swaps.
    pub iterations: usize,
}

impl TwoOptTour {
    /// Drops the iteration count.
    pub fn to_tour(&self) -> Tour {
        Tour::new(self.route.clone(), self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tour_num_cities() {
        let t = Tour::new(vec![0, 1, 2, 0], 3.0);
        assert_eq!(t.num_cities(), 3);
        assert_eq!(Tour::empty().num_cities(), 0);
    }

    #[test]
    fn test_algorithm_display() {
        assert_eq!(Algorithm::Greedy.to_string(), "Nearest Neighbor");
        assert_eq!(Algorithm::TwoOpt.to_string(), "2-opt");
        assert_eq!(Algorithm::BruteForce.to_string(), "Brute Force");
    }

    #[test]
    fn test_two_opt_to_tour() {
        let t = TwoOptTour {
            route: vec![0, 1, 0],
            distance: 2.0,
            iterations: 0,
        };
        assert_eq!(t.to_tour(), Tour::new(vec![0, 1, 0], 2.0));
    }
}
