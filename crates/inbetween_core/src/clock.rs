//! Playback clock
//!
//! Tracks the cumulative step position of a tween and its playback
//! direction. The clock never reads a wall clock: callers advance it by
//! explicit step counts. Every update saturates into `[0, span]`.

/// Playback direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Steps move towards the end
    #[default]
    Forward,
    /// Steps move towards the start
    Backward,
}

impl Direction {
    /// Multiplier applied to step deltas
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Where a tween sits on its sequence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenState {
    /// Never stepped or seeked
    Idle,
    /// Position is 0 and the span is non-zero
    AtStart,
    /// Strictly between start and end
    Active,
    /// Position equals the span (always the case for a zero-length span)
    AtEnd,
}

#[derive(Clone, Debug)]
pub struct Clock {
    position: f64,
    span: f64,
    direction: Direction,
    started: bool,
}

impl Clock {
    pub fn new(span: f64) -> Self {
        Self {
            position: 0.0,
            span: span.max(0.0),
            direction: Direction::Forward,
            started: false,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// Move by `delta` in the current direction. NaN deltas leave the
    /// position unchanged.
    pub fn advance(&mut self, delta: f64) -> f64 {
        let delta = if delta.is_nan() { 0.0 } else { delta };
        self.place(self.position + delta * self.direction.sign())
    }

    /// Jump to an absolute position. A NaN position keeps the current one.
    pub fn seek(&mut self, position: f64) -> f64 {
        let position = if position.is_nan() {
            self.position
        } else {
            position
        };
        self.place(position)
    }

    fn place(&mut self, position: f64) -> f64 {
        self.position = position.clamp(0.0, self.span);
        self.started = true;
        self.position
    }

    /// Change the span (after the last segment is retimed), keeping the
    /// position inside it
    pub fn resize(&mut self, span: f64) {
        self.span = span.max(0.0);
        self.position = self.position.min(self.span);
    }

    /// Position normalized to `[0, 1]`; a zero span is always complete
    pub fn progress(&self) -> f64 {
        if self.span <= 0.0 {
            1.0
        } else {
            (self.position / self.span).clamp(0.0, 1.0)
        }
    }

    pub fn state(&self) -> TweenState {
        if !self.started {
            TweenState::Idle
        } else if self.position >= self.span {
            TweenState::AtEnd
        } else if self.position <= 0.0 {
            TweenState::AtStart
        } else {
            TweenState::Active
        }
    }
}
