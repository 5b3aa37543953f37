//! Integration tests for tween playback, observers and scheduling
//!
//! These tests verify that:
//! - Playback saturates, stays deterministic and keeps progress in range
//! - Keyframe values are hit exactly at segment boundaries
//! - Observer-driven loop and yoyo patterns behave at the boundaries
//! - Tweens of different value types can be driven together

use inbetween_core::{
    patterns, Direction, Easing, Playback, Tween, TweenError, TweenScheduler, TweenState,
};
use std::cell::RefCell;
use std::rc::Rc;

const EPSILON: f32 = 1e-4;

fn three_segments() -> Tween<f32> {
    Tween::from(0.0f32)
        .to(10.0)
        .during(7)
        .via(Easing::QuadraticOut)
        .to(-3.0)
        .during(11)
        .via(Easing::ElasticInOut)
        .to(5.5)
        .during(4)
        .via(Easing::BounceOut)
        .build()
        .unwrap()
}

/// Progress never decreases going forward, never increases going backward,
/// and stays in [0, 1]
#[test]
fn test_progress_is_monotonic() {
    let mut tween = three_segments();
    let mut last = tween.progress();
    for _ in 0..40 {
        tween.step(0.7);
        let progress = tween.progress();
        assert!(progress >= last);
        assert!((0.0..=1.0).contains(&progress));
        last = progress;
    }
    assert_eq!(last, 1.0);

    tween.backward();
    for _ in 0..40 {
        tween.step(0.7);
        let progress = tween.progress();
        assert!(progress <= last);
        assert!((0.0..=1.0).contains(&progress));
        last = progress;
    }
    assert_eq!(last, 0.0);
}

/// Start and end values are exact
#[test]
fn test_endpoint_values() {
    let mut tween = three_segments();
    assert_eq!(*tween.seek(0.0), 0.0);
    assert_eq!(*tween.seek(tween.duration()), 5.5);

    let mut linear = Tween::from([1.5f32, -2.0, 8.0])
        .to([3.0, 4.0, -8.0])
        .during(9)
        .build()
        .unwrap();
    assert_eq!(*linear.seek(0.0), [1.5, -2.0, 8.0]);
    assert_eq!(*linear.seek(9.0), [3.0, 4.0, -8.0]);
}

/// Values depend only on position, not on how it was reached
#[test]
fn test_seek_matches_stepping() {
    let mut stepped = three_segments();
    let mut sought = three_segments();

    let mut trail = Vec::new();
    while stepped.progress() < 1.0 {
        trail.push((stepped.position(), *stepped.step(1.0)));
    }
    for (position, _) in &trail {
        sought.seek(*position);
    }
    sought.seek(0.0);
    assert_eq!(*sought.seek(sought.duration()), *stepped.values());

    for (position, value) in trail {
        let expected = sought.peek(position + 1.0);
        assert!((expected - value).abs() < EPSILON);
    }
}

/// A detached observer is never called again; the others keep running
#[test]
fn test_observer_removal_is_isolated() {
    let once = Rc::new(RefCell::new(0));
    let always = Rc::new(RefCell::new(0));
    let (once_count, always_count) = (once.clone(), always.clone());

    let mut tween = Tween::from(0)
        .to(10)
        .during(10)
        .on_step(move |_| {
            *once_count.borrow_mut() += 1;
            true
        })
        .on_step(move |_| {
            *always_count.borrow_mut() += 1;
            false
        })
        .build()
        .unwrap();

    tween.step(1.0);
    tween.seek(5.0);
    tween.step(1.0);
    assert_eq!(*once.borrow(), 1);
    assert_eq!(*always.borrow(), 3);
}

/// Zero-duration segments complete immediately
#[test]
fn test_zero_duration_segments() {
    let mut tween = Tween::from(0).to(10).during(0).to(20).during(0).build().unwrap();
    assert_eq!(tween.duration(), 0.0);
    assert_eq!(tween.progress(), 1.0);
    assert_eq!(*tween.step(5.0), 20);
    tween.backward();
    assert_eq!(*tween.step(5.0), 20);
    assert_eq!(tween.progress(), 1.0);
    assert_eq!(tween.state(), TweenState::AtEnd);

    let mut jump_then_ramp = Tween::from(0.0f32)
        .to(10.0)
        .during(0)
        .to(20.0)
        .during(10)
        .build()
        .unwrap();
    assert_eq!(*jump_then_ramp.seek(0.0), 10.0);
    assert_eq!(*jump_then_ramp.seek(5.0), 15.0);
}

/// 0 to 100 over 100 steps, halfway, to the end, then 30 back
#[test]
fn test_linear_scenario() {
    let mut tween = Tween::from(0).to(100).during(100).build().unwrap();

    assert_eq!(*tween.step(50.0), 50);
    assert_eq!(tween.progress(), 0.5);
    assert_eq!(tween.state(), TweenState::Active);

    assert_eq!(*tween.step(50.0), 100);
    assert_eq!(tween.progress(), 1.0);
    assert_eq!(tween.state(), TweenState::AtEnd);

    tween.backward();
    assert_eq!(*tween.step(30.0), 70);
}

/// Yoyo stays within the range and flips only at the boundaries
#[test]
fn test_yoyo_flips_at_boundaries() {
    let mut tween = Tween::from(0)
        .to(100)
        .during(5)
        .on_step_with(patterns::yoyo())
        .build()
        .unwrap();

    let mut previous = tween.direction();
    for _ in 0..=60 {
        let value = *tween.step(1.0);
        assert!((0..=100).contains(&value));

        let direction = tween.direction();
        if direction != previous {
            match direction {
                Direction::Backward => assert_eq!(tween.progress(), 1.0),
                Direction::Forward => assert!(tween.progress() <= 0.001),
            }
        }
        previous = direction;
    }
}

/// Boundary values of a two-segment sequence are exact
#[test]
fn test_multi_segment_boundaries() {
    let mut tween = Tween::from(0).to(100).during(10).to(50).during(5).build().unwrap();
    assert_eq!(*tween.seek(10.0), 100);
    assert_eq!(tween.segment_index(), 1);
    assert_eq!(*tween.seek(15.0), 50);
    assert_eq!(*tween.seek(12.0), 80);
}

/// A counted loop plays exactly N times and then stays at the end
#[test]
fn test_counted_loop_runs_n_times() {
    let ends = Rc::new(RefCell::new(0));
    let counter = ends.clone();
    let mut tween = Tween::from(0)
        .to(100)
        .during(5)
        .on_step(move |v: &i32| {
            if *v == 100 {
                *counter.borrow_mut() += 1;
            }
            false
        })
        .on_step_with(patterns::repeat_times(10))
        .build()
        .unwrap();

    for _ in 0..=60 {
        tween.step(1.0);
    }
    // ten plays reach the end ten times; after that every step reports 100
    assert_eq!(tween.progress(), 1.0);
    assert_eq!(tween.observer_count(), 1);
    assert_eq!(*ends.borrow(), 10 + (61 - 50));
}

/// Overshooting curves are applied without clamping
#[test]
fn test_overshoot_is_not_clamped() {
    let tween = Tween::from(0.0f32).to(1.0).during(100).via(Easing::BackIn).build().unwrap();
    assert!(tween.peek(20.0) < 0.0);

    let ints = Tween::from(0).to(100).during(100).via(Easing::BackOut).build().unwrap();
    assert!(ints.peek(70.0) > 100);
}

/// Per-dimension easing on a mixed integer/float tween
#[test]
fn test_mixed_dimensions() {
    let mut tween = Tween::from((0, 0.0f32))
        .to((2, 2.0))
        .during(100)
        .via_dim(1, Easing::Custom(|t| t * t))
        .build()
        .unwrap();

    let (i, f) = *tween.seek(50.0);
    assert_eq!(i, 1);
    assert!((f - 0.5).abs() < EPSILON);

    let mut steps = 0;
    while tween.progress() < 1.0 {
        tween.step(1.0);
        steps += 1;
    }
    assert_eq!(steps, 50);
    assert_eq!(*tween.values(), (2, 2.0));
}

/// Runtime-sized vectors must keep their dimensionality
#[test]
fn test_vec_dimension_mismatch() {
    let result = Tween::from(vec![0.0f32, 1.0, 2.0]).to(vec![1.0, 2.0]).during(3).build();
    assert!(matches!(result, Err(TweenError::MalformedSequence(_))));

    let mut tween = Tween::from(vec![0.0f32, 1.0]).to(vec![1.0, 2.0]).during(3).build().unwrap();
    assert!(tween.retarget(vec![0.0], 3).is_err());
    assert_eq!(tween.segments().len(), 1);
}

/// Retargeting from an observer takes effect on the next step
#[test]
fn test_retarget_inside_observer() {
    let mut tween = Tween::from(0)
        .to(100)
        .during(10)
        .on_step_with(|t: &mut Tween<i32>, v: &i32| {
            if *v >= 50 {
                t.retarget(0, 10).unwrap();
                return true;
            }
            false
        })
        .build()
        .unwrap();

    tween.step(5.0);
    // the pass already ran with 50; the current value reflects the retarget
    assert_eq!(*tween.values(), 0);
    assert_eq!(*tween.step(1.0), 0);
}

/// Tweens of different value types tick together
#[test]
fn test_scheduler_drives_heterogeneous_tweens() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();

    let mut scheduler = TweenScheduler::new();
    let position = scheduler.add(
        Tween::from((0.0f32, 0.0f32))
            .to((10.0, 20.0))
            .during(4)
            .on_step(move |v: &(f32, f32)| {
                sink.borrow_mut().push(*v);
                false
            })
            .build()
            .unwrap(),
    );
    let colour = scheduler.add(Tween::from([0u8, 0, 0]).to([255, 128, 0]).during(8).build().unwrap());

    while scheduler.has_active() {
        scheduler.tick(1.0);
    }
    // saturated ticks still notify
    assert_eq!(seen.borrow().len(), 8);
    assert_eq!(seen.borrow()[3], (10.0, 20.0));
    assert_eq!(scheduler.get(colour).map(|t| t.progress()), Some(1.0));
    assert!(scheduler.get(position).unwrap().is_finished());

    scheduler.get_mut(colour).unwrap().seek(0.0);
    assert_eq!(scheduler.retain_active(), 1);
    assert_eq!(scheduler.len(), 1);
}
