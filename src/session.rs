//! Explicit per-user state.
//!
//! A [`Session`] owns the city set, the cached result of each algorithm,
//! the playback controller and at most one live search. Callers pass it
//! around by reference instead of keeping this state in globals.

use tokio::task::JoinHandle;
use tracing::instrument;

use crate::comparison::{check_against_optimum, compare, Comparison, InvariantViolation};
use crate::config::Config;
use crate::constructive::nearest_neighbor;
use crate::error::{Result, TspError};
use crate::exact::{brute_force, check_size};
use crate::instance::random_cities;
use crate::live::{run_live_search, CancellationToken, LiveSearchOutcome, SearchProgress};
use crate::local_search::two_opt;
use crate::models::{Algorithm, City, Tour, TwoOptTour};
use crate::playback::PlaybackController;
use crate::trace::{brute_force_steps, greedy_steps, two_opt_steps};

struct LiveRun {
    token: CancellationToken,
    task: JoinHandle<Result<LiveSearchOutcome>>,
}

/// Cities, results, playback and the active live run for one user.
///
/// # Examples
///
/// ```
/// use tsp_stepper::config::Config;
/// use tsp_stepper::models::{Algorithm, City};
/// use tsp_stepper::session::Session;
///
/// let mut session = Session::new(Config::default()).unwrap();
/// session.set_cities(City::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]));
///
/// let greedy = session.run_greedy().distance;
/// let optimal = session.run_brute_force().unwrap().distance;
/// assert!(optimal <= greedy + 1e-9);
///
/// let steps = session.load_trace(Algorithm::Greedy).unwrap();
/// assert_eq!(session.playback().len(), steps);
/// ```
pub struct Session {
    config: Config,
    cities: Vec<City>,
    greedy: Option<Tour>,
    two_opt: Option<TwoOptTour>,
    brute_force: Option<Tour>,
    playback: PlaybackController,
    live: Option<LiveRun>,
}

impl Session {
    /// Creates an empty session.
    ///
    /// # Errors
    ///
    /// [`TspError::InvalidConfig`] if `config` fails validation.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let playback = PlaybackController::new();
        playback.set_speed(config.playback_interval_ms);
        Ok(Self {
            config,
            cities: Vec::new(),
            greedy: None,
            two_opt: None,
            brute_force: None,
            playback,
            live: None,
        })
    }

    /// The session's configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current city set.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// The playback controller (clone it to hand to a UI).
    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    /// Replaces the city set.
    ///
    /// Cancels any live run, drops cached results and clears playback.
    pub fn set_cities(&mut self, cities: Vec<City>) {
        if let Some(stale) = self.live.take() {
            stale.token.cancel();
            stale.task.abort();
        }
        self.cities = cities;
        self.greedy = None;
        self.two_opt = None;
        self.brute_force = None;
        self.playback.initialize(Vec::new());
        tracing::info!(cities = self.cities.len(), "city set replaced");
    }

    /// Generates a new city set from the configured layout and seed.
    pub fn generate_cities(&mut self) -> Result<&[City]> {
        let cities = random_cities(&self.config.layout, self.config.seed)?;
        self.set_cities(cities);
        Ok(&self.cities)
    }

    /// Runs nearest neighbor and caches the tour.
    pub fn run_greedy(&mut self) -> &Tour {
        self.greedy.insert(nearest_neighbor(&self.cities))
    }

    /// Runs 2-opt from the greedy tour (computing it if needed).
    pub fn run_two_opt(&mut self) -> Result<&TwoOptTour> {
        let initial = self.greedy_route();
        let result = two_opt(&self.cities, &initial)?;
        Ok(self.two_opt.insert(result))
    }

    /// Runs brute force, caches the optimum and checks cached heuristics against it.
    pub fn run_brute_force(&mut self) -> Result<&Tour> {
        let tour = brute_force(&self.cities)?;
        let violations = self.violations_against(tour.distance);
        if !violations.is_empty() {
            tracing::error!(count = violations.len(), "invariant violations after brute force");
        }
        Ok(self.brute_force.insert(tour))
    }

    /// Cached result of an algorithm.
    pub fn result(&self, algorithm: Algorithm) -> Option<Tour> {
        match algorithm {
            Algorithm::Greedy => self.greedy.clone(),
            Algorithm::TwoOpt => self.two_opt.as_ref().map(TwoOptTour::to_tour),
            Algorithm::BruteForce => self.brute_force.clone(),
        }
    }

    /// Heuristic results that beat the cached optimum.
    pub fn violations(&self) -> Vec<InvariantViolation> {
        match &self.brute_force {
            Some(optimal) => self.violations_against(optimal.distance),
            None => Vec::new(),
        }
    }

    fn violations_against(&self, optimal: f64) -> Vec<InvariantViolation> {
        [Algorithm::Greedy, Algorithm::TwoOpt]
            .into_iter()
            .filter_map(|algorithm| {
                let tour = self.result(algorithm)?;
                check_against_optimum(algorithm, tour.distance, optimal)
            })
            .collect()
    }

    /// Runs every algorithm on the current cities.
    pub fn comparison(&self) -> Result<Comparison> {
        compare(&self.cities)
    }

    /// Generates an algorithm's step trace and loads it into playback.
    ///
    /// Returns the number of steps loaded.
    #[instrument(level = "debug", skip(self), fields(cities = self.cities.len()))]
    pub fn load_trace(&mut self, algorithm: Algorithm) -> Result<usize> {
        let steps = match algorithm {
            Algorithm::Greedy => greedy_steps(&self.cities),
            Algorithm::TwoOpt => {
                let initial = self.greedy_route();
                two_opt_steps(&self.cities, &initial)?
            }
            Algorithm::BruteForce => brute_force_steps(&self.cities, self.config.sampling_rate)?,
        };
        let len = steps.len();
        self.playback.initialize(steps);
        Ok(len)
    }

    /// Starts a live brute-force search on the tokio runtime.
    ///
    /// Any previous run is cancelled and awaited first. Returns the new
    /// run's cancellation token.
    ///
    /// # Errors
    ///
    /// [`TspError::SizeLimitExceeded`] for too many cities, before anything
    /// is spawned.
    #[instrument(level = "debug", skip(self, on_progress), fields(cities = self.cities.len()))]
    pub async fn start_live_search<F>(&mut self, on_progress: F) -> Result<CancellationToken>
    where
        F: FnMut(&SearchProgress) + Send + 'static,
    {
        check_size(self.cities.len())?;
        if let Some(previous) = self.live.take() {
            previous.token.cancel();
            if let Err(err) = previous.task.await {
                tracing::warn!(error = %err, "previous live search ended abnormally");
            }
        }

        let token = CancellationToken::new();
        let task_token = token.clone();
        let cities = self.cities.clone();
        let delay = self.config.live_delay();
        let task = tokio::spawn(async move {
            run_live_search(&cities, delay, &task_token, on_progress).await
        });
        self.live = Some(LiveRun {
            token: token.clone(),
            task,
        });
        tracing::info!("live search started");
        Ok(token)
    }

    /// Requests the active live run to stop.
    pub fn cancel_live_search(&self) {
        if let Some(live) = &self.live {
            live.token.cancel();
        }
    }

    /// Waits for the active live run, if any.
    ///
    /// A completed (not cancelled) run becomes the cached brute-force result.
    pub async fn finish_live_search(&mut self) -> Option<Result<LiveSearchOutcome>> {
        let live = self.live.take()?;
        let outcome = match live.task.await {
            Ok(result) => result,
            Err(err) => Err(TspError::LiveSearchAborted(err.to_string())),
        };
        if let Ok(done) = &outcome {
            if !done.cancelled {
                self.brute_force = Some(Tour::new(done.route.clone(), done.distance));
            }
        }
        Some(outcome)
    }

    /// Returns `true` while a live run is in progress.
    ///
    /// Other algorithm triggers should stay disabled while busy.
    pub fn is_busy(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| !live.task.is_finished())
    }

    fn greedy_route(&mut self) -> Vec<usize> {
        match &self.greedy {
            Some(tour) => tour.route.clone(),
            None => self.run_greedy().route.clone(),
        }
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel_live_search();
    }
}
