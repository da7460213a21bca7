//! Playback states and UI snapshots.

use serde::Serialize;

use crate::trace::Step;

/// Where the controller is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing shown yet (no steps, or positioned before the first step).
    Idle,
    /// Positioned on a step, not advancing.
    Stepped,
    /// Advancing on a timer.
    Playing,
}

/// Which playback controls are usable.
///
/// A pure function of the controller state; see [`UiState::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiState {
    /// Current state.
    pub state: PlaybackState,
    /// Current position, `None` before the first step.
    pub index: Option<usize>,
    /// Number of loaded steps.
    pub total_steps: usize,
    /// Timer interval in milliseconds.
    pub interval_ms: u64,
    /// Not playing, steps loaded, and not sitting on the result.
    pub can_play: bool,
    /// Playing.
    pub can_pause: bool,
    /// A later step exists.
    pub can_next: bool,
    /// Not playing and past the start.
    pub can_previous: bool,
    /// Steps loaded.
    pub can_replay: bool,
    /// Steps loaded and not already at the start.
    pub can_reset: bool,
}

impl UiState {
    /// Derives the snapshot from the controller's state.
    ///
    /// # Examples
    ///
    /// ```
    /// use tsp_stepper::playback::{PlaybackState, UiState};
    /// use tsp_stepper::trace::{Step, StepKind};
    ///
    /// let steps = vec![
    ///     Step::new(StepKind::Compare, "a"),
    ///     Step::new(StepKind::Final, "done"),
    /// ];
    /// let ui = UiState::new(PlaybackState::Stepped, Some(1), &steps, 500);
    /// assert!(!ui.can_play);
    /// assert!(!ui.can_next);
    /// assert!(ui.can_previous);
    /// assert!(ui.can_replay);
    /// ```
    pub fn new(state: PlaybackState, index: Option<usize>, steps: &[Step], interval_ms: u64) -> Self {
        let playing = state == PlaybackState::Playing;
        let total = steps.len();
        let on_terminal = index
            .and_then(|i| steps.get(i))
            .is_some_and(Step::is_terminal);
        let has_next = match index {
            None => total > 0,
            Some(i) => i + 1 < total,
        };

        Self {
            state,
            index,
            total_steps: total,
            interval_ms,
            can_play: !playing && total > 0 && !on_terminal,
            can_pause: playing,
            can_next: has_next,
            can_previous: !playing && index.is_some(),
            can_replay: total > 0,
            can_reset: total > 0 && (playing || index.is_some()),
        }
    }
}

/// Sent to step observers after every state change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepChange {
    /// Current position.
    pub index: Option<usize>,
    /// Step at the current position.
    pub step: Option<Step>,
    /// Control enablement at this moment.
    pub ui: UiState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::StepKind;

    fn steps() -> Vec<Step> {
        vec![
            Step::new(StepKind::CandidateEdge, "a"),
            Step::new(StepKind::Decision, "b"),
            Step::new(StepKind::FinalResult, "c"),
        ]
    }

    #[test]
    fn test_empty_trace_disables_controls() {
        let ui = UiState::new(PlaybackState::Idle, None, &[], 500);
        assert!(!ui.can_play);
        assert!(!ui.can_next);
        assert!(!ui.can_previous);
        assert!(!ui.can_replay);
        assert!(!ui.can_reset);
    }

    #[test]
    fn test_idle_with_steps() {
        let s = steps();
        let ui = UiState::new(PlaybackState::Idle, None, &s, 500);
        assert!(ui.can_play);
        assert!(ui.can_next);
        assert!(!ui.can_previous);
        assert!(!ui.can_reset);
    }

    #[test]
    fn test_playing() {
        let s = steps();
        let ui = UiState::new(PlaybackState::Playing, Some(0), &s, 200);
        assert!(!ui.can_play);
        assert!(ui.can_pause);
        assert!(!ui.can_previous);
        assert!(ui.can_reset);
        assert_eq!(ui.interval_ms, 200);
    }

    #[test]
    fn test_terminal_step_blocks_play() {
        let s = steps();
        let ui = UiState::new(PlaybackState::Stepped, Some(2), &s, 500);
        assert!(!ui.can_play);
        assert!(!ui.can_next);
        assert!(ui.can_replay);
    }
}
