//! Live brute-force runner.
//!
//! Evaluates one permutation per tick and suspends between permutations
//! so a caller can render progress. Cancellation is checked before each
//! permutation and again after each suspension; it takes effect at the
//! next boundary, never mid-evaluation.

use std::time::Duration;

use serde::Serialize;
use tracing::instrument;

use crate::distance::route_length;
use crate::error::Result;
use crate::exact::{check_size, factorial, Incumbent, Permutations};
use crate::models::{close_route, City};

use super::CancellationToken;

/// Snapshot reported after every permutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchProgress {
    /// Permutations evaluated so far.
    pub checked: usize,
    /// Permutations in the full search (n!).
    pub total: usize,
    /// Closed route just evaluated.
    pub current_route: Vec<usize>,
    /// Length of `current_route`.
    pub current_distance: f64,
    /// Best length so far.
    pub best_distance: f64,
    /// Best closed route so far.
    pub best_route: Vec<usize>,
}

/// How a live search ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiveSearchOutcome {
    /// Best closed route found (optimal unless cancelled).
    pub route: Vec<usize>,
    /// Length of `route`.
    pub distance: f64,
    /// Permutations evaluated.
    pub checked: usize,
    /// Permutations in the full search.
    pub total: usize,
    /// `true` if the run stopped before evaluating every permutation.
    pub cancelled: bool,
}

/// Runs brute force live.
///
/// Between permutations the task sleeps for `delay`, or just yields to the
/// scheduler when `delay` is zero. `on_progress` is called after every
/// permutation, in enumeration order.
///
/// Cancellation returns `Ok` with the best route seen so far and
/// `checked < total`. Fewer than 2 cities return an empty route with
/// `checked == total == 0`.
///
/// # Errors
///
/// [`TspError::SizeLimitExceeded`](crate::error::TspError::SizeLimitExceeded)
/// for more than 9 cities.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tsp_stepper::live::{run_live_search, CancellationToken};
/// use tsp_stepper::models::City;
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let cities = City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
/// let token = CancellationToken::new();
/// let outcome = run_live_search(&cities, Duration::ZERO, &token, |_| {}).await.unwrap();
/// assert_eq!(outcome.checked, 24);
/// assert!(!outcome.cancelled);
/// assert!((outcome.distance - 40.0).abs() < 1e-9);
/// # });
/// ```
#[instrument(level = "debug", skip(cities, token, on_progress), fields(cities = cities.len(), delay_ms = delay.as_millis() as u64))]
pub async fn run_live_search<F>(
    cities: &[City],
    delay: Duration,
    token: &CancellationToken,
    mut on_progress: F,
) -> Result<LiveSearchOutcome>
where
    F: FnMut(&SearchProgress),
{
    let n = cities.len();
    check_size(n)?;
    if n < 2 {
        return Ok(LiveSearchOutcome {
            route: Vec::new(),
            distance: 0.0,
            checked: 0,
            total: 0,
            cancelled: false,
        });
    }

    let total = factorial(n);
    let mut permutations = Permutations::new((0..n).collect());
    let mut incumbent = Incumbent::default();
    let mut checked = 0usize;

    loop {
        if token.is_cancelled() {
            break;
        }
        let Some(perm) = permutations.next() else {
            break;
        };

        let closed = close_route(&perm);
        let dist = route_length(&closed, cities);
        if incumbent.offer(&closed, dist) {
            tracing::trace!(checked = checked + 1, distance = dist, "new best");
        }
        checked += 1;

        on_progress(&SearchProgress {
            checked,
            total,
            current_route: closed,
            current_distance: dist,
            best_distance: incumbent.distance(),
            best_route: incumbent.route().to_vec(),
        });

        if checked == total {
            break;
        }
        suspend(delay).await;
        if token.is_cancelled() {
            break;
        }
    }

    let cancelled = checked < total;
    let best = incumbent.into_tour();
    if cancelled {
        tracing::info!(checked, total, best = best.distance, "live search cancelled");
    } else {
        tracing::info!(checked, distance = best.distance, "live search completed");
    }

    Ok(LiveSearchOutcome {
        route: best.route,
        distance: best.distance,
        checked,
        total,
        cancelled,
    })
}

async fn suspend(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}
