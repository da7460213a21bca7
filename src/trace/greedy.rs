//! Nearest-neighbor trace.

use tracing::instrument;

use crate::constructive::nearest_unvisited;
use crate::distance::{distance, route_length};
use crate::models::City;

use super::{Step, StepKind};

/// Records every decision of the nearest-neighbor heuristic.
///
/// For each extension: one `candidate_edge` per unvisited city (ascending
/// id), one `decision` for the nearest, one `edge_added`. Then a
/// `route_closed` and a `final_result` whose path and distance equal
/// [`nearest_neighbor`](crate::constructive::nearest_neighbor)'s tour.
///
/// # Examples
///
/// ```
/// use tsp_stepper::models::City;
/// use tsp_stepper::trace::{greedy_steps, StepKind};
///
/// let cities = City::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
/// let steps = greedy_steps(&cities);
/// // (2 candidates + decision + edge) + (1 candidate + decision + edge) + closed + final
/// assert_eq!(steps.len(), 9);
/// assert_eq!(steps.last().unwrap().kind, StepKind::FinalResult);
/// ```
#[instrument(level = "debug", skip(cities), fields(cities = cities.len()))]
pub fn greedy_steps(cities: &[City]) -> Vec<Step> {
    let n = cities.len();
    let mut steps = Vec::new();
    if n < 2 {
        steps.push(
            Step::new(
                StepKind::FinalResult,
                "At least two cities are needed to build a route.",
            )
            .with_path(Vec::new())
            .with_distance(0.0),
        );
        return steps;
    }

    let mut visited = vec![false; n];
    visited[0] = true;
    let mut route = vec![0];
    let mut current = 0;

    for _ in 1..n {
        let mut candidates = 0usize;
        for (j, city) in cities.iter().enumerate() {
            if visited[j] {
                continue;
            }
            candidates += 1;
            let d = distance(&cities[current], city);
            steps.push(
                Step::new(
                    StepKind::CandidateEdge,
                    format!("Consider city {j}: {d:.2} away from city {current}."),
                )
                .with_edge(current, j)
                .with_distance(d)
                .with_meta("distance", d),
            );
        }

        let Some((next, d)) = nearest_unvisited(current, cities, &visited) else {
            break;
        };
        steps.push(
            Step::new(
                StepKind::Decision,
                format!(
                    "City {next} is the nearest of {candidates} unvisited cities ({d:.2})."
                ),
            )
            .with_edge(current, next)
            .with_distance(d)
            .with_meta("distance", d)
            .with_meta("candidates", candidates),
        );

        visited[next] = true;
        route.push(next);
        steps.push(
            Step::new(
                StepKind::EdgeAdded,
                format!("Travel from city {current} to city {next}."),
            )
            .with_edge(current, next)
            .with_distance(d)
            .with_meta("partial_route", route.clone())
            .with_meta("visited", route.len()),
        );
        current = next;
    }

    let closing = distance(&cities[current], &cities[0]);
    route.push(0);
    let total = route_length(&route, cities);
    steps.push(
        Step::new(
            StepKind::RouteClosed,
            format!("All cities visited; return from city {current} to city 0 ({closing:.2})."),
        )
        .with_edge(current, 0)
        .with_path(route.clone())
        .with_distance(total)
        .with_meta("closing_distance", closing),
    );
    steps.push(
        Step::new(
            StepKind::FinalResult,
            format!("Nearest neighbor tour complete: total distance {total:.2}."),
        )
        .with_path(route)
        .with_distance(total),
    );

    tracing::debug!(steps = steps.len(), "greedy trace generated");
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::nearest_neighbor;

    fn sample() -> Vec<City> {
        City::from_coords(&[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0), (5.0, 5.0), (2.0, 8.0)])
    }

    #[test]
    fn test_final_matches_algorithm() {
        let cities = sample();
        let steps = greedy_steps(&cities);
        let tour = nearest_neighbor(&cities);
        let last = steps.last().expect("non-empty");
        assert_eq!(last.kind, StepKind::FinalResult);
        assert_eq!(last.path.as_ref(), Some(&tour.route));
        assert_eq!(last.distance, Some(tour.distance));
    }

    #[test]
    fn test_decisions_follow_route() {
        let cities = sample();
        let steps = greedy_steps(&cities);
        let tour = nearest_neighbor(&cities);
        let chosen: Vec<usize> = steps
            .iter()
            .filter(|s| s.kind == StepKind::Decision)
            .filter_map(|s| s.to_city)
            .collect();
        assert_eq!(chosen, tour.route[1..tour.route.len() - 1].to_vec());
    }

    #[test]
    fn test_candidate_counts_shrink() {
        let cities = sample();
        let steps = greedy_steps(&cities);
        let candidates = steps
            .iter()
            .filter(|s| s.kind == StepKind::CandidateEdge)
            .count();
        // 4 + 3 + 2 + 1
        assert_eq!(candidates, 10);
        assert_eq!(
            steps.iter().filter(|s| s.kind == StepKind::RouteClosed).count(),
            1
        );
    }

    #[test]
    fn test_degenerate_trace_is_terminal_only() {
        let steps = greedy_steps(&[City::new(0, 0.0, 0.0)]);
        assert_eq!(steps.len(), 1);
        assert!(steps[0].is_terminal());
        assert_eq!(steps[0].distance, Some(0.0));
    }
}
