//! Step observers
//!
//! Observers run after every position change of a tween, in registration
//! order. Returning `true` detaches the observer once its call returns.

use std::fmt;

use smallvec::SmallVec;

use crate::tween::Tween;
use crate::value::TweenValues;

/// Handle to a registered observer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observer#{}", self.0)
    }
}

/// Something that reacts to tween steps
///
/// Implemented for every `FnMut(&mut Tween<V>, &V) -> bool`, so closures
/// and plain functions work directly; stateful observers (counters and the
/// like) can implement it on their own types.
///
/// The observer may call `seek`, `forward`, `backward` or reshape the last
/// segment through `tween`. Those calls take effect immediately but do not
/// start a nested dispatch.
pub trait Observer<V: TweenValues> {
    /// Called with the freshly computed values. Return `true` to detach.
    fn on_step(&mut self, tween: &mut Tween<V>, values: &V) -> bool;
}

impl<V, F> Observer<V> for F
where
    V: TweenValues,
    F: FnMut(&mut Tween<V>, &V) -> bool,
{
    fn on_step(&mut self, tween: &mut Tween<V>, values: &V) -> bool {
        self(tween, values)
    }
}

pub(crate) struct ObserverEntry<V> {
    pub(crate) id: ObserverId,
    pub(crate) observer: Box<dyn Observer<V>>,
}

/// Ordered observer storage.
///
/// During a dispatch pass the entries are moved out with
/// [`ObserverList::begin_pass`]; registrations and removals that happen
/// meanwhile are reconciled in [`ObserverList::end_pass`].
pub(crate) struct ObserverList<V> {
    entries: Vec<ObserverEntry<V>>,
    next_id: u64,
    in_pass: SmallVec<[ObserverId; 4]>,
    detached: SmallVec<[ObserverId; 2]>,
}

impl<V: TweenValues> ObserverList<V> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
            in_pass: SmallVec::new(),
            detached: SmallVec::new(),
        }
    }

    pub(crate) fn push(&mut self, observer: Box<dyn Observer<V>>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push(ObserverEntry { id, observer });
        id
    }

    /// Number of attached observers, including any moved out for a pass
    pub(crate) fn len(&self) -> usize {
        self.entries.len() + self.in_pass.len() - self.detached.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        if let Some(index) = self.entries.iter().position(|entry| entry.id == id) {
            self.entries.remove(index);
            return true;
        }
        self.detach(id)
    }

    /// Mark an entry that is out for a pass as gone
    pub(crate) fn detach(&mut self, id: ObserverId) -> bool {
        if self.in_pass.contains(&id) && !self.detached.contains(&id) {
            self.detached.push(id);
            return true;
        }
        false
    }

    /// Whether `id` was removed while its entry was out for a pass
    pub(crate) fn is_detached(&self, id: ObserverId) -> bool {
        self.detached.contains(&id)
    }

    pub(crate) fn begin_pass(&mut self) -> Vec<ObserverEntry<V>> {
        let entries = std::mem::take(&mut self.entries);
        self.in_pass = entries.iter().map(|entry| entry.id).collect();
        entries
    }

    /// Put the surviving entries back ahead of anything registered during
    /// the pass.
    pub(crate) fn end_pass(&mut self, mut survivors: Vec<ObserverEntry<V>>) {
        survivors.append(&mut self.entries);
        let detached = std::mem::take(&mut self.detached);
        survivors.retain(|entry| !detached.contains(&entry.id));
        self.entries = survivors;
        self.in_pass.clear();
    }
}
