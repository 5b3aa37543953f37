//! Tweens
//!
//! A [`Tween`] owns a keyframe [`Sequence`], a playback [`Clock`], the value
//! computed at the current position, and its observers.
//!
//! # Example
//!
//! ```rust
//! use inbetween_core::{Easing, Tween};
//!
//! let mut tween = Tween::from(0)
//!     .to(100)
//!     .during(100)
//!     .via(Easing::QuadraticOut)
//!     .on_step(|value: &i32| {
//!         println!("value = {}", value);
//!         false
//!     })
//!     .build()
//!     .unwrap();
//!
//! while tween.progress() < 1.0 {
//!     tween.step(1.0);
//! }
//! assert_eq!(*tween.values(), 100);
//! ```
//!
//! # Dispatch
//!
//! Every position change (`step`, `seek`, and their progress/segment
//! variants) recomputes the value and then runs each observer in
//! registration order with that value. An observer that returns `true` is
//! detached after its call.
//!
//! Observers may control the tween they observe. Position changes made
//! from inside an observer update the clock and the current value right
//! away but never start a nested dispatch; the remaining observers of the
//! pass still receive the value the pass started with, and the next
//! external `step` or `seek` reflects the adjusted state.

use crate::clock::{Clock, Direction, TweenState};
use crate::easing::Easing;
use crate::error::{Result, TweenError};
use crate::observer::{Observer, ObserverId, ObserverList};
use crate::sequence::{Segment, Sequence};
use crate::value::TweenValues;

/// A multi-keyframe, multi-dimensional interpolator driven by step counts
pub struct Tween<V: TweenValues> {
    sequence: Sequence<V>,
    clock: Clock,
    current: V,
    observers: ObserverList<V>,
    dispatching: bool,
}

impl<V: TweenValues> Tween<V> {
    /// Start a builder from the initial value
    #[allow(clippy::should_implement_trait)]
    pub fn from(initial: V) -> TweenBuilder<V> {
        TweenBuilder::new(initial)
    }

    fn new(sequence: Sequence<V>, observers: ObserverList<V>) -> Self {
        let clock = Clock::new(sequence.span());
        let current = sequence.sample(0.0);
        Self {
            sequence,
            clock,
            current,
            observers,
            dispatching: false,
        }
    }

    // =========================================================================
    // Playback
    // =========================================================================

    /// Advance by `delta` steps in the current direction (backwards when
    /// reversed), saturating at either end, then notify observers.
    pub fn step(&mut self, delta: f64) -> &V {
        self.clock.advance(delta);
        self.settle()
    }

    /// Advance by a fraction of the whole span
    pub fn step_progress(&mut self, ratio: f64) -> &V {
        self.step(ratio * self.clock.span())
    }

    /// Move to an absolute position (clamped), keeping the direction, then
    /// notify observers.
    pub fn seek(&mut self, position: f64) -> &V {
        self.clock.seek(position);
        self.settle()
    }

    /// Seek to a fraction of the whole span
    pub fn seek_progress(&mut self, ratio: f64) -> &V {
        self.seek(ratio * self.clock.span())
    }

    /// Seek to the start of a segment. Indices past the end select the
    /// last segment.
    pub fn jump(&mut self, segment: usize) -> &V {
        let index = segment.min(self.sequence.segments().len().saturating_sub(1));
        let position = self.sequence.segment_start(index);
        self.seek(position)
    }

    /// Play towards the end on subsequent steps
    pub fn forward(&mut self) {
        self.clock.set_direction(Direction::Forward);
    }

    /// Play towards the start on subsequent steps
    pub fn backward(&mut self) {
        self.clock.set_direction(Direction::Backward);
    }

    pub fn direction(&self) -> Direction {
        self.clock.direction()
    }

    /// Position normalized to `[0, 1]`; `1.0` for a zero-length tween
    pub fn progress(&self) -> f64 {
        self.clock.progress()
    }

    /// Current cumulative step position
    pub fn position(&self) -> f64 {
        self.clock.position()
    }

    /// Total span in steps
    pub fn duration(&self) -> f64 {
        self.clock.span()
    }

    pub fn state(&self) -> TweenState {
        self.clock.state()
    }

    /// Value at the current position
    pub fn values(&self) -> &V {
        &self.current
    }

    /// Evaluate at an absolute position without moving or dispatching
    pub fn peek(&self, position: f64) -> V {
        let position = position.clamp(0.0, self.clock.span());
        self.sequence.sample(position)
    }

    /// Evaluate at a progress ratio without moving or dispatching
    pub fn peek_progress(&self, ratio: f64) -> V {
        self.peek(ratio * self.clock.span())
    }

    /// Index of the segment the current position falls in
    pub fn segment_index(&self) -> usize {
        self.sequence
            .locate(self.clock.position())
            .map(|(index, _)| index)
            .unwrap_or(0)
    }

    pub fn segments(&self) -> &[Segment<V>] {
        self.sequence.segments()
    }

    // =========================================================================
    // Last-segment reshaping
    // =========================================================================

    /// Assign an easing to every dimension of the last segment
    pub fn via(&mut self, easing: Easing) -> Result<()> {
        self.sequence.set_last_easing(None, easing)?;
        self.refresh();
        Ok(())
    }

    /// Assign an easing to one dimension of the last segment
    pub fn via_dim(&mut self, dim: usize, easing: Easing) -> Result<()> {
        self.sequence.set_last_easing(Some(dim), easing)?;
        self.refresh();
        Ok(())
    }

    /// Redefine where the last segment ends and how long it takes
    pub fn retarget(&mut self, target: V, steps: u32) -> Result<()> {
        self.reshape(Some(target), Some(steps))
    }

    pub fn set_last_target(&mut self, target: V) -> Result<()> {
        self.reshape(Some(target), None)
    }

    pub fn set_last_duration(&mut self, steps: u32) -> Result<()> {
        self.reshape(None, Some(steps))
    }

    fn reshape(&mut self, target: Option<V>, steps: Option<u32>) -> Result<()> {
        self.sequence.reshape_last(target, steps)?;
        self.clock.resize(self.sequence.span());
        self.refresh();
        tracing::debug!(
            span = self.clock.span(),
            position = self.clock.position(),
            "last segment reshaped"
        );
        Ok(())
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register an observer that only needs the values
    pub fn on_step<F>(&mut self, mut callback: F) -> ObserverId
    where
        F: FnMut(&V) -> bool + 'static,
        V: 'static,
    {
        self.observers
            .push(Box::new(move |_: &mut Tween<V>, values: &V| callback(values)))
    }

    /// Register an observer that can also control the tween
    pub fn on_step_with<O>(&mut self, observer: O) -> ObserverId
    where
        O: Observer<V> + 'static,
    {
        self.observers.push(Box::new(observer))
    }

    /// Detach an observer. Returns `false` if it was already gone.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // =========================================================================
    // Evaluation and dispatch
    // =========================================================================

    fn refresh(&mut self) {
        self.current = self.sequence.sample(self.clock.position());
    }

    fn settle(&mut self) -> &V {
        self.refresh();
        tracing::trace!(
            position = self.clock.position(),
            direction = ?self.clock.direction(),
            nested = self.dispatching,
            "tween moved"
        );
        self.dispatch();
        &self.current
    }

    fn dispatch(&mut self) {
        if self.dispatching || self.observers.is_empty() {
            return;
        }
        self.dispatching = true;

        let values = self.current.clone();
        let mut entries = self.observers.begin_pass();
        entries.retain_mut(|entry| {
            if self.observers.is_detached(entry.id) {
                return false;
            }
            let detach = entry.observer.on_step(self, &values);
            if detach {
                self.observers.detach(entry.id);
                tracing::debug!(observer = %entry.id, "observer detached");
            }
            !detach
        });
        self.observers.end_pass(entries);

        self.dispatching = false;
    }
}

impl<V: TweenValues> std::fmt::Debug for Tween<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tween")
            .field("current", &self.current)
            .field("position", &self.clock.position())
            .field("span", &self.clock.span())
            .field("direction", &self.clock.direction())
            .field("segments", &self.sequence.segments().len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Fluent builder for [`Tween`]
///
/// `to(target)` opens a segment and `during(steps)` closes it; `via`
/// applies to the segment closed last. The first mistake in a chain is kept
/// and reported by [`TweenBuilder::build`]; calls after it are ignored.
pub struct TweenBuilder<V: TweenValues> {
    sequence: Sequence<V>,
    pending: Option<V>,
    observers: ObserverList<V>,
    error: Option<TweenError>,
}

impl<V: TweenValues> TweenBuilder<V> {
    pub fn new(initial: V) -> Self {
        Self {
            sequence: Sequence::new(initial),
            pending: None,
            observers: ObserverList::new(),
            error: None,
        }
    }

    fn fail(&mut self, reason: String) {
        if self.error.is_none() {
            tracing::debug!(%reason, "tween builder rejected a call");
            self.error = Some(TweenError::MalformedSequence(reason));
        }
    }

    /// Open a segment towards `target`
    pub fn to(mut self, target: V) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.pending.is_some() {
            self.fail("`to` called before `during` closed the previous segment".into());
        } else if target.dims() != self.sequence.dims() {
            self.fail(format!(
                "target has {} dimensions, expected {}",
                target.dims(),
                self.sequence.dims()
            ));
        } else {
            self.pending = Some(target);
        }
        self
    }

    /// Close the open segment with a duration in steps
    pub fn during(mut self, steps: u32) -> Self {
        if self.error.is_some() {
            return self;
        }
        match self.pending.take() {
            Some(target) => self.sequence.push(target, steps),
            None => self.fail("`during` called without a preceding `to`".into()),
        }
        self
    }

    /// Ease every dimension of the last closed segment
    pub fn via(self, easing: Easing) -> Self {
        self.apply_easing(None, easing)
    }

    /// Ease one dimension of the last closed segment
    pub fn via_dim(self, dim: usize, easing: Easing) -> Self {
        self.apply_easing(Some(dim), easing)
    }

    fn apply_easing(mut self, dim: Option<usize>, easing: Easing) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.sequence.is_empty() {
            self.fail("`via` called before any segment was closed".into());
            return self;
        }
        if let Err(err) = self.sequence.set_last_easing(dim, easing) {
            self.error = Some(err);
        }
        self
    }

    /// Register an observer that only needs the values
    pub fn on_step<F>(mut self, mut callback: F) -> Self
    where
        F: FnMut(&V) -> bool + 'static,
        V: 'static,
    {
        self.observers
            .push(Box::new(move |_: &mut Tween<V>, values: &V| callback(values)));
        self
    }

    /// Register an observer that can also control the tween
    pub fn on_step_with<O>(mut self, observer: O) -> Self
    where
        O: Observer<V> + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn build(self) -> Result<Tween<V>> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.pending.is_some() {
            tracing::debug!("tween builder finished with an open segment");
            return Err(TweenError::MalformedSequence(
                "`to` was never closed by `during`".into(),
            ));
        }
        tracing::debug!(
            segments = self.sequence.segments().len(),
            span = self.sequence.span(),
            dims = self.sequence.dims(),
            "tween built"
        );
        Ok(Tween::new(self.sequence, self.observers))
    }
}
