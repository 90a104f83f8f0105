//! L3 Molecular Layer: Time-based smooth scroll engine
//!
//! Used on wide HiDPI surfaces where a fixed step count looks sluggish.
//! Gestures carry a remaining distance and a remaining time; each tick
//! consumes the wall-clock time elapsed since the previous one. Under
//! sustained input gestures get shorter and, once the queue is full, merge.

use std::time::Duration;

use tracing::{debug, trace};

use super::delta_queue::DeltaEventQueue;
use super::easing::{ratio_delta, EasingMode};
use super::engine::{
    passes_through, scaled_delta, InputOutcome, ScrollEngine, ScrollStep, StepTimer,
};
use crate::config::ScrollConfig;

/// Fraction of the base duration removed at full queue pressure
const PRESSURE_SHRINK: f64 = 0.6;

#[derive(Debug, Clone, PartialEq)]
pub struct TimedGesture {
    pub remaining_distance: f64,
    pub remaining_ms: f64,
}

#[derive(Debug, Clone)]
pub struct AdaptiveScrollEngine {
    config: ScrollConfig,
    mode: EasingMode,
    timer: StepTimer,
    queue: DeltaEventQueue,
    gestures: Vec<TimedGesture>,
    last_tick_ms: u64,
}

impl AdaptiveScrollEngine {
    pub fn new(config: &ScrollConfig) -> crate::Result<Self> {
        if let Err(e) = config.validate() {
            debug!("Rejected scroll configuration: {}", e);
            return Err(e);
        }

        Ok(Self {
            config: config.clone(),
            mode: config.easing,
            timer: StepTimer::new(config.tick_interval()),
            queue: DeltaEventQueue::new(),
            gestures: Vec::new(),
            last_tick_ms: 0,
        })
    }

    /// Duration for a new gesture given how many are already active
    pub fn effective_duration_ms(&self) -> f64 {
        let max_queue = self.config.adaptive_max_queue.max(1) as f64;
        let pressure = (self.gestures.len() as f64 / max_queue).min(1.0);
        let shrunk = self.config.duration_ms as f64 * (1.0 - PRESSURE_SHRINK * pressure);
        shrunk.max(self.config.adaptive_min_duration_ms as f64)
    }

    pub fn on_input_delta(&mut self, raw_delta: f64, now_ms: u64) -> InputOutcome {
        if passes_through(self.mode, raw_delta, self.config.wheel_notch) {
            return InputOutcome::PassThrough;
        }

        self.queue.record_event(now_ms);
        let distance = scaled_delta(&self.config, raw_delta, self.queue.acceleration_ratio());
        let duration = self.effective_duration_ms();

        let full = self.gestures.len() >= self.config.adaptive_max_queue;
        match self.gestures.last_mut() {
            Some(last) if full => {
                last.remaining_distance += distance;
                last.remaining_ms = last.remaining_ms.max(duration);
                trace!(distance, "Merged into newest gesture");
            }
            _ => self.gestures.push(TimedGesture {
                remaining_distance: distance,
                remaining_ms: duration,
            }),
        }

        if !self.timer.is_running() {
            self.last_tick_ms = now_ms;
        }
        self.timer.restart(now_ms);
        InputOutcome::Smoothed
    }

    pub fn tick(&mut self, now_ms: u64) -> Option<ScrollStep> {
        if self.gestures.is_empty() {
            return None;
        }

        let dt = now_ms.saturating_sub(self.last_tick_ms) as f64;
        self.last_tick_ms = now_ms;

        let mode = self.mode;
        let mut delta = 0.0;
        for gesture in &mut self.gestures {
            if gesture.remaining_ms <= 0.0 {
                continue;
            }
            let consume = dt.min(gesture.remaining_ms);
            let sub = if consume >= gesture.remaining_ms {
                gesture.remaining_distance
            } else {
                ratio_delta(mode, gesture.remaining_distance, consume / gesture.remaining_ms)
            };
            gesture.remaining_distance -= sub;
            gesture.remaining_ms -= consume;
            // Under `None` the share is dropped, not deferred
            if mode.is_smooth() {
                delta += sub;
            }
        }
        self.gestures.retain(|g| g.remaining_ms > 0.0);

        let settled = self.gestures.is_empty();
        if settled {
            self.timer.stop();
        }

        trace!(delta, dt, active = self.gestures.len(), "Adaptive engine tick");
        Some(ScrollStep { delta, settled })
    }

    pub fn active_gestures(&self) -> &[TimedGesture] {
        &self.gestures
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }
}

impl ScrollEngine for AdaptiveScrollEngine {
    fn on_input(&mut self, raw_delta: f64, now_ms: u64) -> InputOutcome {
        self.on_input_delta(raw_delta, now_ms)
    }

    fn tick(&mut self, now_ms: u64) -> Option<ScrollStep> {
        AdaptiveScrollEngine::tick(self, now_ms)
    }

    fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    fn mode(&self) -> EasingMode {
        self.mode
    }

    fn set_mode(&mut self, mode: EasingMode) {
        self.mode = mode;
    }

    fn interval(&self) -> Duration {
        self.timer.interval()
    }

    fn reset(&mut self) {
        self.gestures.clear();
        self.timer.stop();
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(mode: EasingMode) -> AdaptiveScrollEngine {
        let config = ScrollConfig {
            easing: mode,
            ..Default::default()
        };
        AdaptiveScrollEngine::new(&config).unwrap()
    }

    fn run(engine: &mut AdaptiveScrollEngine, start_ms: u64, step_ms: u64) -> Vec<f64> {
        let mut now = start_ms;
        let mut deltas = Vec::new();
        while engine.is_running() {
            now += step_ms;
            if let Some(step) = engine.tick(now) {
                deltas.push(step.delta);
            }
        }
        deltas
    }

    #[test]
    fn test_conserves_injected_distance() {
        for mode in [
            EasingMode::Constant,
            EasingMode::Linear,
            EasingMode::Quadratic,
            EasingMode::Cosine,
        ] {
            let mut engine = engine(mode);
            engine.on_input_delta(120.0, 0);
            engine.on_input_delta(-240.0, 30);
            engine.on_input_delta(120.0, 45);
            let total: f64 = run(&mut engine, 45, 16).iter().sum();
            assert!(total.abs() < 1e-9, "{:?} moved {}", mode, total);
        }
    }

    #[test]
    fn test_settles_within_duration() {
        let mut engine = engine(EasingMode::Quadratic);
        engine.on_input_delta(120.0, 0);
        let deltas = run(&mut engine, 0, 16);
        // 400 ms at 16 ms per tick
        assert_eq!(deltas.len(), 25);
        assert!(deltas.iter().all(|d| *d > 0.0));
    }

    #[test]
    fn test_pressure_shortens_gestures() {
        let mut engine = engine(EasingMode::Linear);
        assert_eq!(engine.effective_duration_ms(), 400.0);
        engine.on_input_delta(120.0, 0);
        assert!((engine.effective_duration_ms() - 400.0 * 0.8).abs() < 1e-9);
        engine.on_input_delta(120.0, 5);
        engine.on_input_delta(120.0, 10);
        assert!((engine.effective_duration_ms() - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_min_duration_floor() {
        let config = ScrollConfig {
            duration_ms: 200,
            ..Default::default()
        };
        let mut engine = AdaptiveScrollEngine::new(&config).unwrap();
        for i in 0..3 {
            engine.on_input_delta(120.0, i);
        }
        assert_eq!(engine.effective_duration_ms(), 120.0);
    }

    #[test]
    fn test_full_queue_merges_into_newest() {
        let mut engine = engine(EasingMode::Cosine);
        for i in 0..5 {
            engine.on_input_delta(120.0, i);
        }
        let gestures = engine.active_gestures();
        assert_eq!(gestures.len(), 3);
        let total: f64 = gestures.iter().map(|g| g.remaining_distance).sum();
        let first = gestures[0].remaining_distance;
        assert!(gestures[2].remaining_distance > first * 2.5);
        assert!(total > 5.0 * 180.0);
    }

    #[test]
    fn test_none_interlude_drops_its_share() {
        let mut engine = engine(EasingMode::Linear);
        engine.on_input_delta(120.0, 0);
        let mut deltas = Vec::new();
        let mut now = 0;
        for _ in 0..3 {
            now += 16;
            deltas.push(engine.tick(now).map(|s| s.delta).unwrap_or_default());
        }
        engine.set_mode(EasingMode::None);
        for _ in 0..10 {
            now += 16;
            assert_eq!(engine.tick(now).map(|s| s.delta), Some(0.0));
        }
        engine.set_mode(EasingMode::Linear);
        deltas.extend(run(&mut engine, now, 16));

        let total: f64 = deltas.iter().sum();
        let largest = deltas.iter().copied().fold(0.0, f64::max);
        assert!(total < 192.0 * 0.75, "moved {}", total);
        assert!(largest < 30.0, "jumped {}", largest);
    }

    #[test]
    fn test_idle_and_pass_through() {
        let mut engine = engine(EasingMode::Linear);
        assert!(engine.tick(100).is_none());
        assert_eq!(engine.on_input_delta(45.0, 0), InputOutcome::PassThrough);
        engine.set_mode(EasingMode::None);
        assert_eq!(engine.on_input_delta(120.0, 0), InputOutcome::PassThrough);
    }
}
