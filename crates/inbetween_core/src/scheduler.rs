//! Tween scheduler
//!
//! Drives a collection of tweens of different value types with one call per
//! frame. There is no wall clock: each `tick` advances every tween by the
//! same step delta.

use slotmap::{new_key_type, SlotMap};

use crate::clock::{Direction, TweenState};
use crate::tween::Tween;
use crate::value::TweenValues;

new_key_type! {
    pub struct TweenId;
}

/// Value-type-erased control surface of a tween
pub trait Playback {
    fn step(&mut self, delta: f64);
    fn seek(&mut self, position: f64);
    fn forward(&mut self);
    fn backward(&mut self);
    fn progress(&self) -> f64;
    fn duration(&self) -> f64;
    fn direction(&self) -> Direction;
    fn state(&self) -> TweenState;

    /// Resting at the end it is heading for
    fn is_finished(&self) -> bool {
        match self.direction() {
            Direction::Forward => self.progress() >= 1.0,
            Direction::Backward => self.progress() <= 0.0,
        }
    }
}

impl<V: TweenValues> Playback for Tween<V> {
    fn step(&mut self, delta: f64) {
        Tween::step(self, delta);
    }

    fn seek(&mut self, position: f64) {
        Tween::seek(self, position);
    }

    fn forward(&mut self) {
        Tween::forward(self);
    }

    fn backward(&mut self) {
        Tween::backward(self);
    }

    fn progress(&self) -> f64 {
        Tween::progress(self)
    }

    fn duration(&self) -> f64 {
        Tween::duration(self)
    }

    fn direction(&self) -> Direction {
        Tween::direction(self)
    }

    fn state(&self) -> TweenState {
        Tween::state(self)
    }
}

/// Owns tweens and steps them together
pub struct TweenScheduler {
    tweens: SlotMap<TweenId, Box<dyn Playback>>,
}

impl TweenScheduler {
    pub fn new() -> Self {
        Self {
            tweens: SlotMap::with_key(),
        }
    }

    pub fn add<P: Playback + 'static>(&mut self, tween: P) -> TweenId {
        self.tweens.insert(Box::new(tween))
    }

    pub fn get(&self, id: TweenId) -> Option<&dyn Playback> {
        self.tweens.get(id).map(|tween| tween.as_ref())
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut (dyn Playback + 'static)> {
        self.tweens.get_mut(id).map(|tween| tween.as_mut())
    }

    pub fn remove(&mut self, id: TweenId) -> Option<Box<dyn Playback>> {
        self.tweens.remove(id)
    }

    /// Step every tween by `delta`
    pub fn tick(&mut self, delta: f64) {
        for (_, tween) in self.tweens.iter_mut() {
            tween.step(delta);
        }
    }

    /// Check if any tween still has somewhere to go
    pub fn has_active(&self) -> bool {
        self.tweens.iter().any(|(_, tween)| !tween.is_finished())
    }

    /// Drop every finished tween, returning how many were removed
    pub fn retain_active(&mut self) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|_, tween| !tween.is_finished());
        let removed = before - self.tweens.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.tweens.len(), "finished tweens dropped");
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = (TweenId, &dyn Playback)> {
        self.tweens.iter().map(|(id, tween)| (id, tween.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}

impl Default for TweenScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_steps_every_tween() {
        let mut scheduler = TweenScheduler::new();
        let a = scheduler.add(Tween::from(0).to(10).during(10).build().unwrap());
        let b = scheduler.add(Tween::from([0.0f32; 2]).to([1.0, 2.0]).during(4).build().unwrap());
        scheduler.tick(2.0);
        assert_eq!(scheduler.get(a).unwrap().progress(), 0.2);
        assert_eq!(scheduler.get(b).unwrap().progress(), 0.5);
        assert_eq!(scheduler.len(), 2);
    }

    #[test]
    fn test_retain_active() {
        let mut scheduler = TweenScheduler::default();
        let short = scheduler.add(Tween::from(0).to(1).during(1).build().unwrap());
        let long = scheduler.add(Tween::from(0).to(1).during(5).build().unwrap());
        scheduler.tick(1.0);
        assert!(scheduler.has_active());
        assert_eq!(scheduler.retain_active(), 1);
        assert!(scheduler.get(short).is_none());
        assert!(scheduler.get(long).is_some());
    }

    #[test]
    fn test_backward_tween_finishes_at_start() {
        let mut scheduler = TweenScheduler::new();
        let id = scheduler.add(Tween::from(0).to(10).during(10).build().unwrap());
        scheduler.tick(10.0);
        assert!(!scheduler.has_active());
        scheduler.get_mut(id).unwrap().backward();
        assert!(scheduler.has_active());
        scheduler.tick(10.0);
        assert!(!scheduler.has_active());
        assert_eq!(scheduler.get(id).unwrap().state(), TweenState::AtStart);
    }

    #[test]
    fn test_remove() {
        let mut scheduler = TweenScheduler::new();
        let id = scheduler.add(Tween::from(1u8).build().unwrap());
        assert!(scheduler.remove(id).is_some());
        assert!(scheduler.remove(id).is_none());
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.iter().count(), 0);
    }
}
