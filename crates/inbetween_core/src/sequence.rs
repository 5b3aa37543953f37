//! Keyframe segments
//!
//! A [`Sequence`] is the initial value followed by an append-only list of
//! [`Segment`]s. Each segment starts where the previous one ended, so the
//! only mutable slot is the last segment (its end value, duration and
//! easing), reachable through the narrow `*_last` methods.

use smallvec::{smallvec, SmallVec};

use crate::easing::Easing;
use crate::error::{Result, TweenError};
use crate::value::TweenValues;

/// Per-dimension storage, inline for the common 1-4 dimension case
pub(crate) type PerDim<T> = SmallVec<[T; 4]>;

/// One keyframe-to-keyframe span
#[derive(Clone, Debug)]
pub struct Segment<V> {
    start: V,
    end: V,
    duration: u32,
    easing: PerDim<Easing>,
}

impl<V: TweenValues> Segment<V> {
    fn new(start: V, end: V, duration: u32) -> Self {
        let easing = smallvec![Easing::Linear; start.dims()];
        Self {
            start,
            end,
            duration,
            easing,
        }
    }

    /// Value at local progress 0
    pub fn start(&self) -> &V {
        &self.start
    }

    /// Value at local progress 1
    pub fn end(&self) -> &V {
        &self.end
    }

    /// Duration in steps
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Easing assigned to each dimension
    pub fn easing(&self) -> &[Easing] {
        &self.easing
    }

    /// Local progress for an offset measured from the segment's start.
    /// Zero-length segments are always complete.
    fn local_progress(&self, offset: f64) -> f64 {
        if self.duration == 0 {
            1.0
        } else {
            (offset / self.duration as f64).clamp(0.0, 1.0)
        }
    }

    /// Evaluate the segment at a local progress in `[0, 1]`
    pub fn sample(&self, local: f64) -> V {
        let eased: PerDim<f64> = self.easing.iter().map(|e| e.apply(local)).collect();
        V::interpolate(&self.start, &self.end, &eased)
    }
}

/// The ordered segment list of a tween
#[derive(Clone, Debug)]
pub struct Sequence<V> {
    initial: V,
    segments: Vec<Segment<V>>,
    span: u64,
}

impl<V: TweenValues> Sequence<V> {
    pub(crate) fn new(initial: V) -> Self {
        Self {
            initial,
            segments: Vec::new(),
            span: 0,
        }
    }

    /// Dimensions of every value in this sequence
    pub fn dims(&self) -> usize {
        self.initial.dims()
    }

    /// The value the sequence starts from
    pub fn initial(&self) -> &V {
        &self.initial
    }

    pub fn segments(&self) -> &[Segment<V>] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Sum of all segment durations, in steps
    pub fn span(&self) -> f64 {
        self.span as f64
    }

    /// Close a new segment from the current end value to `end`
    pub(crate) fn push(&mut self, end: V, duration: u32) {
        let start = self.end_value().clone();
        self.segments.push(Segment::new(start, end, duration));
        self.span += duration as u64;
    }

    /// Value at the end of the last segment (the initial value if empty)
    pub fn end_value(&self) -> &V {
        self.segments
            .last()
            .map(|segment| &segment.end)
            .unwrap_or(&self.initial)
    }

    /// Cumulative position at which segment `index` starts
    pub fn segment_start(&self, index: usize) -> f64 {
        self.segments
            .iter()
            .take(index)
            .map(|segment| segment.duration as u64)
            .sum::<u64>() as f64
    }

    /// Resolve a position to `(segment index, local progress)`.
    ///
    /// Segment `i` covers `[start_i, start_i + duration_i)`; a position at or
    /// past the span resolves to the last segment at progress 1. Returns
    /// `None` only when there are no segments.
    pub fn locate(&self, position: f64) -> Option<(usize, f64)> {
        let last = self.segments.len().checked_sub(1)?;
        let mut start = 0u64;
        for (index, segment) in self.segments.iter().enumerate() {
            let end = start + segment.duration as u64;
            if position < end as f64 {
                let local = segment.local_progress(position - start as f64);
                return Some((index, local));
            }
            start = end;
        }
        Some((last, 1.0))
    }

    /// Evaluate the sequence at an absolute position
    pub fn sample(&self, position: f64) -> V {
        match self.locate(position) {
            Some((index, local)) => self.segments[index].sample(local),
            None => self.initial.clone(),
        }
    }

    /// Assign an easing to one dimension (or all, with `None`) of the last
    /// segment
    pub(crate) fn set_last_easing(&mut self, dim: Option<usize>, easing: Easing) -> Result<()> {
        let dims = self.dims();
        let segment = self.segments.last_mut().ok_or(TweenError::NoSegments)?;
        match dim {
            None => segment.easing.iter_mut().for_each(|slot| *slot = easing),
            Some(d) if d < dims => segment.easing[d] = easing,
            Some(d) => {
                return Err(TweenError::MalformedSequence(format!(
                    "dimension {} out of range for a {}-dimensional tween",
                    d, dims
                )))
            }
        }
        Ok(())
    }

    /// Redefine the end value and/or duration of the last segment
    pub(crate) fn reshape_last(&mut self, end: Option<V>, duration: Option<u32>) -> Result<()> {
        let dims = self.dims();
        if let Some(ref target) = end {
            if target.dims() != dims {
                return Err(TweenError::MalformedSequence(format!(
                    "target has {} dimensions, expected {}",
                    target.dims(),
                    dims
                )));
            }
        }
        let segment = self.segments.last_mut().ok_or(TweenError::NoSegments)?;
        if let Some(target) = end {
            segment.end = target;
        }
        if let Some(steps) = duration {
            self.span = self.span - segment.duration as u64 + steps as u64;
            segment.duration = steps;
        }
        Ok(())
    }
}
