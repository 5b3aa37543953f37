//! Console demos
//!
//! Each demo builds a tween, drives it, and prints what its observers saw.
//! Observers must be `'static`, so they record into a shared buffer and the
//! demo writes the buffer out afterwards.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use anyhow::Result;
use inbetween_core::{patterns, Easing, Tween, TweenValues};

use crate::config::InbetweenConfig;

type Recording<V> = Rc<RefCell<Vec<V>>>;

/// Observer that appends every value it sees to a shared buffer
fn recorder<V: TweenValues + 'static>() -> (Recording<V>, impl FnMut(&V) -> bool + 'static) {
    let recording: Recording<V> = Rc::new(RefCell::new(Vec::new()));
    let sink = recording.clone();
    let observer = move |values: &V| {
        sink.borrow_mut().push(values.clone());
        false
    };
    (recording, observer)
}

/// Draw one plot row: the signed value, then a dot at its column
pub fn plot_line(value: i32, target: i32, width: u32) -> String {
    let column = if target == 0 {
        None
    } else {
        let scaled = (value as f64 * width as f64 / target as f64).round();
        (0.0..=width as f64).contains(&scaled).then_some(scaled as u32)
    };
    let mut line = format!("{:+04} |", value);
    line.extend((0..=width).map(|i| if Some(i) == column { '.' } else { ' ' }));
    line.push(if value == target { ';' } else { '|' });
    line
}

/// Plot one tween per easing curve
pub fn easings<W: Write>(
    out: &mut W,
    config: &InbetweenConfig,
    only: Option<Easing>,
) -> Result<()> {
    let demo = &config.demo;
    let (recording, observer) = recorder::<i32>();
    let mut tween = Tween::from(0)
        .to(demo.target)
        .during(demo.steps)
        .on_step(observer)
        .build()?;

    let curves: Vec<Easing> = match only {
        Some(easing) => vec![easing],
        None => Easing::catalog().iter().map(|(_, easing)| *easing).collect(),
    };

    for easing in curves {
        tracing::info!(easing = %easing, "plotting");
        tween.via(easing)?;
        tween.seek(0.0);
        for _ in 0..=demo.steps {
            tween.step(1.0);
        }

        writeln!(out, "{}", easing)?;
        for value in recording.borrow_mut().drain(..) {
            writeln!(out, "{}", plot_line(value, demo.target, demo.plot_width))?;
        }
    }
    Ok(())
}

/// Loop a short tween `count` times (forever when `count` is 0)
pub fn counted_loop<W: Write>(out: &mut W, config: &InbetweenConfig, count: u32) -> Result<()> {
    let demo = &config.demo;
    let (recording, observer) = recorder::<i32>();
    let builder = Tween::from(0)
        .to(demo.target)
        .during(demo.cycle_steps)
        .on_step(observer);
    let mut tween = if count == 0 {
        writeln!(out, "infinite loop")?;
        builder.on_step_with(patterns::repeat()).build()?
    } else {
        writeln!(out, "counted loop ({} times)", count)?;
        builder.on_step_with(patterns::repeat_times(count)).build()?
    };

    for _ in 0..=demo.frames {
        tween.step(1.0);
    }
    let values = recording.borrow();
    write_lines(out, &values)
}

/// Bounce a short tween between its ends
pub fn yoyo<W: Write>(out: &mut W, config: &InbetweenConfig) -> Result<()> {
    let demo = &config.demo;
    let (recording, observer) = recorder::<i32>();
    let mut tween = Tween::from(0)
        .to(demo.target)
        .during(demo.cycle_steps)
        .on_step(observer)
        .on_step_with(patterns::yoyo())
        .build()?;

    writeln!(out, "yoyo")?;
    for _ in 0..=demo.frames {
        tween.step(1.0);
    }
    let values = recording.borrow();
    write_lines(out, &values)
}

/// An integer and a float dimension stepped together to the end
pub fn multi<W: Write>(out: &mut W, config: &InbetweenConfig) -> Result<()> {
    let (recording, observer) = recorder::<(i32, f32)>();
    let mut tween = Tween::from((0, 0.0f32))
        .to((2, 2.0))
        .during(config.demo.steps)
        .on_step(observer)
        .build()?;

    while tween.progress() < 1.0 {
        tween.step(1.0);
    }
    for (i, f) in recording.borrow().iter() {
        writeln!(out, "i={} f={:.6}", i, f)?;
    }
    Ok(())
}

/// Three-segment path across the canvas, bouncing between its ends
pub fn path<W: Write>(out: &mut W, config: &InbetweenConfig) -> Result<()> {
    let (width, height) = (config.canvas.width, config.canvas.height);
    let (recording, observer) = recorder::<(i32, i32)>();
    let mut tween = Tween::from((0, 0))
        .to((width, height))
        .during(120)
        .to((width / 2, height / 2))
        .during(60)
        .to((width / 2, 0))
        .during(30)
        .via(Easing::CircularInOut)
        .on_step(observer)
        .on_step_with(patterns::yoyo())
        .build()?;

    for _ in 0..config.demo.frames {
        tween.step(1.0);
    }
    for (x, y) in recording.borrow().iter() {
        writeln!(out, "{} {}", x, y)?;
    }
    Ok(())
}

fn write_lines<W: Write>(out: &mut W, values: &[i32]) -> Result<()> {
    for value in values {
        writeln!(out, "{}", value)?;
    }
    Ok(())
}
