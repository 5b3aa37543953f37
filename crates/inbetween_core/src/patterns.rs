//! Ready-made observers for common playback patterns
//!
//! ```rust
//! use inbetween_core::{patterns, Tween};
//!
//! let mut tween = Tween::from(0)
//!     .to(10)
//!     .during(10)
//!     .on_step_with(patterns::yoyo())
//!     .build()
//!     .unwrap();
//! tween.step(10.0);
//! tween.step(4.0);
//! assert_eq!(*tween.values(), 6);
//! ```

use crate::observer::Observer;
use crate::tween::Tween;
use crate::value::TweenValues;

/// Progress at or below which a tween counts as back at its start
const START_THRESHOLD: f64 = 0.001;

/// Restart from position 0 every time the end is reached
#[derive(Clone, Copy, Debug, Default)]
pub struct Repeat;

impl<V: TweenValues> Observer<V> for Repeat {
    fn on_step(&mut self, tween: &mut Tween<V>, _values: &V) -> bool {
        if tween.progress() >= 1.0 {
            tween.seek(0.0);
        }
        false
    }
}

/// Restart until the end has been reached `remaining` more times, then
/// detach
#[derive(Clone, Copy, Debug)]
pub struct RepeatTimes {
    remaining: u32,
}

impl RepeatTimes {
    pub fn new(times: u32) -> Self {
        Self {
            remaining: times.max(1),
        }
    }

    /// Plays left, counting the current one
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

impl<V: TweenValues> Observer<V> for RepeatTimes {
    fn on_step(&mut self, tween: &mut Tween<V>, _values: &V) -> bool {
        if tween.progress() < 1.0 {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            tracing::debug!("counted loop finished");
            return true;
        }
        tween.seek(0.0);
        false
    }
}

/// Bounce between the two ends forever
#[derive(Clone, Copy, Debug, Default)]
pub struct Yoyo;

impl<V: TweenValues> Observer<V> for Yoyo {
    fn on_step(&mut self, tween: &mut Tween<V>, _values: &V) -> bool {
        if tween.progress() <= START_THRESHOLD {
            tween.forward();
        }
        if tween.progress() >= 1.0 {
            tween.backward();
        }
        false
    }
}

/// Loop forever
pub fn repeat() -> Repeat {
    Repeat
}

/// Play `times` times in total; `0` and `1` both play once
pub fn repeat_times(times: u32) -> RepeatTimes {
    RepeatTimes::new(times)
}

/// Play forward, then backward, then forward again, forever
pub fn yoyo() -> Yoyo {
    Yoyo
}
