//! Inbetween Tweening Engine
//!
//! Step-driven keyframe interpolation with per-dimension easing.
//!
//! # Features
//!
//! - **Keyframe Sequences**: Chain `to(..).during(..).via(..)` segments from an initial value
//! - **Multi-dimensional Values**: Scalars, tuples, arrays and vectors, each slot eased on its own
//! - **Step Playback**: Forward/backward stepping, seeking and segment jumps with saturation
//! - **Observers**: Step callbacks that may steer the tween they observe
//! - **Scheduling**: Drive many tweens of different value types together

pub mod clock;
pub mod easing;
pub mod error;
pub mod observer;
pub mod patterns;
pub mod scheduler;
pub mod sequence;
pub mod tween;
pub mod value;

pub use clock::{Direction, TweenState};
pub use easing::Easing;
pub use error::{Result, TweenError};
pub use observer::{Observer, ObserverId};
pub use scheduler::{Playback, TweenId, TweenScheduler};
pub use sequence::{Segment, Sequence};
pub use tween::{Tween, TweenBuilder};
pub use value::{TweenValues, Tweenable};
