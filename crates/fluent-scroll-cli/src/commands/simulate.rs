use anyhow::Result;
use serde::Serialize;

use fluent_scroll_core::{InputOutcome, ScrollConfig, SmoothScrollEngine};

/// One engine step that produced motion
#[derive(Debug, Clone, Serialize)]
pub struct TickRecord {
    pub tick: usize,
    pub time_ms: u64,
    pub delta: f64,
    /// Scroll offset after the step, growing downwards
    pub offset: f64,
    pub active: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub events: usize,
    pub passed_through: usize,
    pub ticks: usize,
    pub emitted: f64,
    pub offset: f64,
}

/// Feed `deltas` spaced `interval_ms` apart and tick until the engine settles
pub fn simulate(
    config: &ScrollConfig,
    deltas: &[f64],
    interval_ms: u64,
) -> Result<(Vec<TickRecord>, Summary)> {
    let mut engine = SmoothScrollEngine::new(config)?;
    let tick_ms = (engine.interval().as_millis() as u64).max(1);

    let mut pending = deltas
        .iter()
        .enumerate()
        .map(|(i, delta)| (i as u64 * interval_ms, *delta))
        .peekable();

    let mut records = Vec::new();
    let mut passed_through = 0;
    let mut emitted = 0.0;
    let mut offset = 0.0;
    let mut now = 0;

    loop {
        while let Some((at, delta)) = pending.next_if(|(at, _)| *at <= now) {
            if let InputOutcome::PassThrough = engine.on_input_delta(delta, at) {
                passed_through += 1;
                offset -= delta;
            }
        }

        if let Some(step) = engine.tick() {
            emitted += step.delta;
            offset -= step.delta;
            records.push(TickRecord {
                tick: records.len(),
                time_ms: now,
                delta: step.delta,
                offset,
                active: engine.active_gestures().len(),
            });
        }

        if pending.peek().is_none() && !engine.is_running() {
            break;
        }
        now += tick_ms;
    }

    let summary = Summary {
        events: deltas.len(),
        passed_through,
        ticks: records.len(),
        emitted,
        offset,
    };
    Ok((records, summary))
}

pub fn run(config: &ScrollConfig, deltas: &[f64], interval_ms: u64, json: bool) -> Result<()> {
    let (records, summary) = simulate(config, deltas, interval_ms)?;

    if json {
        for record in &records {
            println!("{}", serde_json::to_string(record)?);
        }
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    println!(
        "Mode {}, {} fps, {} ms per notch, {} steps\n",
        config.easing.label(),
        config.fps,
        config.duration_ms,
        config.steps_total()
    );
    for record in &records {
        println!(
            "  tick {:>4}  t={:>6}ms  delta={:>10.3}  offset={:>10.3}  active={}",
            record.tick, record.time_ms, record.delta, record.offset, record.active
        );
    }
    println!();
    println!(
        "Events: {} ({} passed through)  Ticks: {}  Emitted: {:.3}  Offset: {:.3}",
        summary.events, summary.passed_through, summary.ticks, summary.emitted, summary.offset
    );

    Ok(())
}
