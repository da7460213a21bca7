//! Playback controller.
//!
//! Holds a step trace and a position in it. `play` starts a recurring
//! timer on the current tokio runtime that advances one step per tick and
//! pauses on its own when it reaches the result. All operations are safe
//! to call at any time, including while a tick is running; invalid
//! transitions are no-ops.
//!
//! Observers are called synchronously after each state change, once the
//! internal lock is released, so they may call back into the controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::trace::Step;

use super::state::{PlaybackState, StepChange, UiState};

/// Timer interval used until [`PlaybackController::set_speed`] is called.
pub const DEFAULT_INTERVAL_MS: u64 = 500;
/// Shortest accepted timer interval.
pub const MIN_INTERVAL_MS: u64 = 100;

const IDLE_EXPLANATION: &str = "Press play or step forward to begin.";
const EMPTY_EXPLANATION: &str = "No steps loaded.";

type StepObserver = Arc<dyn Fn(&StepChange) + Send + Sync>;
type ExplanationObserver = Arc<dyn Fn(&str) + Send + Sync>;

struct Inner {
    steps: Vec<Step>,
    index: Option<usize>,
    playing: bool,
    interval: Duration,
    timer: Option<JoinHandle<()>>,
    // Bumped whenever a timer is started or stopped; stale ticks compare unequal.
    generation: u64,
    step_observers: Vec<StepObserver>,
    explanation_observers: Vec<ExplanationObserver>,
}

impl Inner {
    fn state(&self) -> PlaybackState {
        if self.playing {
            PlaybackState::Playing
        } else if self.index.is_none() {
            PlaybackState::Idle
        } else {
            PlaybackState::Stepped
        }
    }

    fn current_step(&self) -> Option<&Step> {
        self.index.and_then(|i| self.steps.get(i))
    }

    fn at_last(&self) -> bool {
        match (self.index, self.steps.len().checked_sub(1)) {
            (Some(i), Some(last)) => i >= last,
            _ => false,
        }
    }

    fn advance(&mut self) -> bool {
        let next = self.index.map_or(0, |i| i + 1);
        if next >= self.steps.len() {
            return false;
        }
        self.index = Some(next);
        true
    }

    fn stop_timer(&mut self) {
        self.playing = false;
        self.generation += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn ui_state(&self) -> UiState {
        UiState::new(
            self.state(),
            self.index,
            &self.steps,
            self.interval.as_millis() as u64,
        )
    }

    fn explanation(&self) -> String {
        match self.current_step() {
            Some(step) => step.explanation.clone(),
            None if self.steps.is_empty() => EMPTY_EXPLANATION.to_string(),
            None => IDLE_EXPLANATION.to_string(),
        }
    }

    fn notification(&self) -> Notification {
        Notification {
            change: StepChange {
                index: self.index,
                step: self.current_step().cloned(),
                ui: self.ui_state(),
            },
            explanation: self.explanation(),
            step_observers: self.step_observers.clone(),
            explanation_observers: self.explanation_observers.clone(),
        }
    }
}

/// Observer calls collected under the lock and made after releasing it.
struct Notification {
    change: StepChange,
    explanation: String,
    step_observers: Vec<StepObserver>,
    explanation_observers: Vec<ExplanationObserver>,
}

impl Notification {
    fn dispatch(self) {
        for observer in &self.step_observers {
            observer(&self.change);
        }
        for observer in &self.explanation_observers {
            observer(&self.explanation);
        }
    }
}

/// Play/pause/step controller over a step trace.
///
/// Cloning gives another handle to the same controller.
///
/// # Examples
///
/// ```
/// use tsp_stepper::playback::{PlaybackController, PlaybackState};
/// use tsp_stepper::trace::{Step, StepKind};
///
/// let controller = PlaybackController::new();
/// controller.initialize(vec![
///     Step::new(StepKind::Compare, "first"),
///     Step::new(StepKind::Final, "done"),
/// ]);
/// assert_eq!(controller.state(), PlaybackState::Idle);
///
/// assert!(controller.next());
/// assert!(controller.next());
/// assert!(!controller.next());
/// assert_eq!(controller.current_index(), Some(1));
/// assert_eq!(controller.state(), PlaybackState::Stepped);
/// ```
#[derive(Clone)]
pub struct PlaybackController {
    shared: Arc<Mutex<Inner>>,
}

impl PlaybackController {
    /// Creates a controller with no steps and the default interval.
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Inner {
                steps: Vec::new(),
                index: None,
                playing: false,
                interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
                timer: None,
                generation: 0,
                step_observers: Vec::new(),
                explanation_observers: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an observer for position and enablement changes.
    pub fn on_step_changed<F>(&self, observer: F)
    where
        F: Fn(&StepChange) + Send + Sync + 'static,
    {
        self.lock().step_observers.push(Arc::new(observer));
    }

    /// Registers an observer for the current explanation text.
    pub fn on_explanation<F>(&self, observer: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.lock().explanation_observers.push(Arc::new(observer));
    }

    /// Removes all observers.
    pub fn clear_observers(&self) {
        let mut inner = self.lock();
        inner.step_observers.clear();
        inner.explanation_observers.clear();
    }

    /// Loads a new trace, stopping playback and rewinding to the start.
    pub fn initialize(&self, steps: Vec<Step>) {
        let note = {
            let mut inner = self.lock();
            inner.stop_timer();
            inner.steps = steps;
            inner.index = None;
            inner.notification()
        };
        tracing::debug!(steps = note.change.ui.total_steps, "playback initialized");
        note.dispatch();
    }

    /// Appends one step to the loaded trace.
    pub fn add_step(&self, step: Step) {
        self.add_steps(std::iter::once(step));
    }

    /// Appends steps to the loaded trace.
    pub fn add_steps<I>(&self, steps: I)
    where
        I: IntoIterator<Item = Step>,
    {
        let note = {
            let mut inner = self.lock();
            inner.steps.extend(steps);
            inner.notification()
        };
        note.dispatch();
    }

    /// Starts auto-advancing.
    ///
    /// No-op while playing or with no steps. At the last step, rewinds to
    /// the start first. Needs a tokio runtime to drive the timer; without
    /// one the state never becomes playing and only manual steps advance.
    pub fn play(&self) {
        let note = {
            let mut inner = self.lock();
            if inner.playing || inner.steps.is_empty() {
                return;
            }
            if inner.at_last() {
                inner.index = None;
            }
            self.start_timer(&mut inner);
            inner.notification()
        };
        note.dispatch();
    }

    /// Stops auto-advancing.
    pub fn pause(&self) {
        let note = {
            let mut inner = self.lock();
            inner.stop_timer();
            inner.notification()
        };
        note.dispatch();
    }

    /// Advances one step. Returns `false` at the last step.
    ///
    /// Pauses first if playing.
    pub fn next(&self) -> bool {
        let (moved, note) = {
            let mut inner = self.lock();
            let was_playing = inner.playing;
            if was_playing {
                inner.stop_timer();
            }
            let moved = inner.advance();
            (moved, (moved || was_playing).then(|| inner.notification()))
        };
        if let Some(note) = note {
            note.dispatch();
        }
        moved
    }

    /// Steps back one position. Returns `false` at the start or while playing.
    pub fn previous(&self) -> bool {
        let note = {
            let mut inner = self.lock();
            if inner.playing {
                return false;
            }
            match inner.index {
                None => return false,
                Some(0) => inner.index = None,
                Some(i) => inner.index = Some(i - 1),
            }
            inner.notification()
        };
        note.dispatch();
        true
    }

    /// Rewinds to the start and plays.
    pub fn replay(&self) {
        let note = {
            let mut inner = self.lock();
            inner.stop_timer();
            inner.index = None;
            if !inner.steps.is_empty() {
                self.start_timer(&mut inner);
            }
            inner.notification()
        };
        note.dispatch();
    }

    /// Stops and rewinds to the start without playing.
    pub fn reset(&self) {
        let note = {
            let mut inner = self.lock();
            inner.stop_timer();
            inner.index = None;
            inner.notification()
        };
        note.dispatch();
    }

    /// Sets the timer interval, clamped to at least [`MIN_INTERVAL_MS`].
    ///
    /// While playing, the timer restarts at the new interval from the
    /// current position.
    pub fn set_speed(&self, interval_ms: u64) {
        let clamped = interval_ms.max(MIN_INTERVAL_MS);
        if clamped != interval_ms {
            tracing::warn!(requested = interval_ms, clamped, "playback interval clamped");
        }
        let note = {
            let mut inner = self.lock();
            inner.interval = Duration::from_millis(clamped);
            if inner.playing {
                inner.stop_timer();
                self.start_timer(&mut inner);
            }
            inner.notification()
        };
        note.dispatch();
    }

    /// Step at the current position.
    pub fn current_step(&self) -> Option<Step> {
        self.lock().current_step().cloned()
    }

    /// Current position, `None` before the first step.
    pub fn current_index(&self) -> Option<usize> {
        self.lock().index
    }

    /// Current state.
    pub fn state(&self) -> PlaybackState {
        self.lock().state()
    }

    /// Number of loaded steps.
    pub fn len(&self) -> usize {
        self.lock().steps.len()
    }

    /// Returns `true` if no steps are loaded.
    pub fn is_empty(&self) -> bool {
        self.lock().steps.is_empty()
    }

    /// Control enablement snapshot.
    pub fn ui_state(&self) -> UiState {
        self.lock().ui_state()
    }

    /// Spawns the tick task and marks `inner` as playing.
    ///
    /// Without a tokio runtime nothing could advance, so the state is left
    /// as it was.
    fn start_timer(&self, inner: &mut Inner) {
        let Ok(handle) = Handle::try_current() else {
            tracing::warn!("no tokio runtime; playback only advances manually");
            return;
        };
        inner.playing = true;
        inner.generation += 1;
        let generation = inner.generation;
        let weak = Arc::downgrade(&self.shared);
        inner.timer = Some(handle.spawn(run_timer(weak, generation, inner.interval)));
    }

    /// One timer tick. Returns `false` when the timer should stop.
    fn tick(&self, generation: u64) -> bool {
        let (keep_going, note) = {
            let mut inner = self.lock();
            if !inner.playing || inner.generation != generation {
                return false;
            }
            if !inner.advance() {
                inner.stop_timer();
                (false, inner.notification())
            } else if inner.at_last() || inner.current_step().is_some_and(Step::is_terminal) {
                inner.stop_timer();
                (false, inner.notification())
            } else {
                (true, inner.notification())
            }
        };
        tracing::trace!(index = ?note.change.index, "playback tick");
        note.dispatch();
        keep_going
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("PlaybackController")
            .field("steps", &inner.steps.len())
            .field("index", &inner.index)
            .field("state", &inner.state())
            .field("interval", &inner.interval)
            .finish()
    }
}

async fn run_timer(weak: Weak<Mutex<Inner>>, generation: u64, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let Some(shared) = weak.upgrade() else {
            break;
        };
        let controller = PlaybackController { shared };
        if !controller.tick(generation) {
            break;
        }
    }
}
