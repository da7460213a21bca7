//! Playback over a precomputed step trace.
//!
//! - [`PlaybackController`] — play/pause/step/replay state machine with a timer
//! - [`UiState`] — button enablement derived from the controller state
//! - [`StepChange`] — payload sent to step observers

mod controller;
mod state;

pub use controller::{PlaybackController, DEFAULT_INTERVAL_MS, MIN_INTERVAL_MS};
pub use state::{PlaybackState, StepChange, UiState};
