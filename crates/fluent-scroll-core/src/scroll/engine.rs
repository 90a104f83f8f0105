//! L3 Molecular Layer: Fixed-step smooth scroll engine
//!
//! Every accepted wheel delta becomes a gesture spread over `fps * duration`
//! timer steps. Gestures overlap freely; one tick moves by the sum of every
//! active gesture's share for that step.

use std::time::Duration;

use tracing::{debug, trace};

use super::delta_queue::DeltaEventQueue;
use super::easing::{interpolate, EasingMode};
use super::observer::ScrollObserver;
use crate::config::ScrollConfig;

/// One wheel delta being distributed over the engine's steps
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollGesture {
    total_distance: f64,
    steps_remaining: u32,
    steps_total: u32,
    emitted: f64,
    /// Ran under more than one mode; its kernel sum no longer matches the total
    mode_changed: bool,
}

impl ScrollGesture {
    fn new(total_distance: f64, steps_total: u32) -> Self {
        Self {
            total_distance,
            steps_remaining: steps_total,
            steps_total,
            emitted: 0.0,
            mode_changed: false,
        }
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn steps_remaining(&self) -> u32 {
        self.steps_remaining
    }

    pub fn steps_total(&self) -> u32 {
        self.steps_total
    }

    /// Distance already handed out by previous steps
    pub fn emitted(&self) -> f64 {
        self.emitted
    }

    /// Move one step and return the distance for it
    fn step(&mut self, mode: EasingMode) -> f64 {
        let delta = if self.steps_remaining == 1 && mode.is_smooth() && !self.mode_changed {
            // last step absorbs the discretisation error of the kernel
            self.total_distance - self.emitted
        } else {
            interpolate(
                mode,
                self.total_distance,
                self.steps_total,
                self.steps_remaining,
            )
        };
        self.emitted += delta;
        self.steps_remaining = self.steps_remaining.saturating_sub(1);
        delta
    }

    fn is_finished(&self) -> bool {
        self.steps_remaining == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Running,
}

/// Periodic timer owned by an engine.
///
/// The host drives it: while `is_running()` it calls the engine's `tick`
/// every `interval()`.
#[derive(Debug, Clone)]
pub struct StepTimer {
    interval: Duration,
    running: bool,
    started_at_ms: Option<u64>,
}

impl StepTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: false,
            started_at_ms: None,
        }
    }

    /// Start, or restart if already running
    pub fn restart(&mut self, now_ms: u64) {
        self.running = true;
        self.started_at_ms = Some(now_ms);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.started_at_ms = None;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Stamp of the last (re)start
    pub fn started_at_ms(&self) -> Option<u64> {
        self.started_at_ms
    }
}

/// What happened to a raw wheel delta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// Queued as a gesture, motion follows on subsequent ticks
    Smoothed,
    /// Not handled; the caller should apply native scrolling
    PassThrough,
}

/// Result of one engine tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollStep {
    /// Offset change for this step
    pub delta: f64,
    /// The engine has no active gestures left and stopped its timer
    pub settled: bool,
}

impl ScrollStep {
    pub fn deliver<O: ScrollObserver + ?Sized>(&self, observer: &mut O) {
        observer.offset_delta(self.delta);
        if self.settled {
            observer.settled();
        }
    }
}

/// Common surface of the fixed-step and adaptive engines
pub trait ScrollEngine {
    /// Feed a raw wheel delta received at `now_ms`
    fn on_input(&mut self, raw_delta: f64, now_ms: u64) -> InputOutcome;

    /// Advance one timer step. `None` while idle.
    fn tick(&mut self, now_ms: u64) -> Option<ScrollStep>;

    fn is_running(&self) -> bool;

    fn mode(&self) -> EasingMode;

    fn set_mode(&mut self, mode: EasingMode);

    fn interval(&self) -> Duration;

    /// Drop every gesture, stop the timer, forget input history
    fn reset(&mut self);
}

/// Whether a delta is left to native scrolling
pub(crate) fn passes_through(mode: EasingMode, raw_delta: f64, wheel_notch: u32) -> bool {
    if !mode.is_smooth() || raw_delta == 0.0 || !raw_delta.is_finite() {
        return true;
    }
    wheel_notch > 0 && raw_delta.abs() % wheel_notch as f64 != 0.0
}

/// Scaled gesture distance: `raw * step_ratio * (1 + acceleration * ratio)`
#[inline]
pub(crate) fn scaled_delta(config: &ScrollConfig, raw_delta: f64, ratio: f64) -> f64 {
    let delta = raw_delta * config.step_ratio;
    delta + delta * config.acceleration_factor * ratio
}

#[derive(Debug, Clone)]
pub struct SmoothScrollEngine {
    config: ScrollConfig,
    mode: EasingMode,
    steps_total: u32,
    timer: StepTimer,
    queue: DeltaEventQueue,
    gestures: Vec<ScrollGesture>,
}

impl SmoothScrollEngine {
    pub fn new(config: &ScrollConfig) -> crate::Result<Self> {
        if let Err(e) = config.validate() {
            debug!("Rejected scroll configuration: {}", e);
            return Err(e);
        }

        Ok(Self {
            config: config.clone(),
            mode: config.easing,
            steps_total: config.steps_total(),
            timer: StepTimer::new(config.tick_interval()),
            queue: DeltaEventQueue::new(),
            gestures: Vec::new(),
        })
    }

    /// Accept a raw wheel delta or hand it back for native scrolling
    pub fn on_input_delta(&mut self, raw_delta: f64, now_ms: u64) -> InputOutcome {
        if passes_through(self.mode, raw_delta, self.config.wheel_notch) {
            return InputOutcome::PassThrough;
        }

        self.queue.record_event(now_ms);
        let ratio = self.queue.acceleration_ratio();
        let distance = scaled_delta(&self.config, raw_delta, ratio);

        self.gestures
            .push(ScrollGesture::new(distance, self.steps_total));
        self.timer.restart(now_ms);

        trace!(
            raw = raw_delta,
            distance,
            ratio,
            active = self.gestures.len(),
            "Queued scroll gesture"
        );
        InputOutcome::Smoothed
    }

    /// Advance every active gesture by one step
    pub fn tick(&mut self) -> Option<ScrollStep> {
        if self.gestures.is_empty() {
            return None;
        }

        let mode = self.mode;
        let delta: f64 = self.gestures.iter_mut().map(|g| g.step(mode)).sum();
        self.gestures.retain(|g| !g.is_finished());

        let settled = self.gestures.is_empty();
        if settled {
            self.timer.stop();
        }

        trace!(delta, active = self.gestures.len(), "Scroll engine tick");
        Some(ScrollStep { delta, settled })
    }

    pub fn state(&self) -> EngineState {
        if self.timer.is_running() {
            EngineState::Running
        } else {
            EngineState::Idle
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn mode(&self) -> EasingMode {
        self.mode
    }

    /// Switching to `None` lets existing gestures drain without moving
    pub fn set_mode(&mut self, mode: EasingMode) {
        if mode != self.mode {
            debug!("Scroll easing changed from {:?} to {:?}", self.mode, mode);
            self.mode = mode;
            for gesture in &mut self.gestures {
                gesture.mode_changed = true;
            }
        }
    }

    pub fn active_gestures(&self) -> &[ScrollGesture] {
        &self.gestures
    }

    pub fn interval(&self) -> Duration {
        self.timer.interval()
    }

    pub fn steps_total(&self) -> u32 {
        self.steps_total
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn reset(&mut self) {
        self.gestures.clear();
        self.timer.stop();
        self.queue.clear();
    }
}

impl ScrollEngine for SmoothScrollEngine {
    fn on_input(&mut self, raw_delta: f64, now_ms: u64) -> InputOutcome {
        self.on_input_delta(raw_delta, now_ms)
    }

    fn tick(&mut self, _now_ms: u64) -> Option<ScrollStep> {
        SmoothScrollEngine::tick(self)
    }

    fn is_running(&self) -> bool {
        SmoothScrollEngine::is_running(self)
    }

    fn mode(&self) -> EasingMode {
        self.mode
    }

    fn set_mode(&mut self, mode: EasingMode) {
        SmoothScrollEngine::set_mode(self, mode);
    }

    fn interval(&self) -> Duration {
        SmoothScrollEngine::interval(self)
    }

    fn reset(&mut self) {
        SmoothScrollEngine::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(mode: EasingMode) -> SmoothScrollEngine {
        let config = ScrollConfig {
            easing: mode,
            ..Default::default()
        };
        SmoothScrollEngine::new(&config).unwrap()
    }

    fn drain(engine: &mut SmoothScrollEngine) -> Vec<f64> {
        let mut deltas = Vec::new();
        while let Some(step) = engine.tick() {
            deltas.push(step.delta);
            if step.settled {
                break;
            }
        }
        deltas
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = ScrollConfig {
            fps: 0,
            ..Default::default()
        };
        assert!(SmoothScrollEngine::new(&config).is_err());
    }

    #[test]
    fn test_idle_tick_is_none() {
        let mut engine = engine(EasingMode::Linear);
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.tick().is_none());
    }

    #[test]
    fn test_gesture_settles_after_steps_total() {
        let mut engine = engine(EasingMode::Cosine);
        assert_eq!(engine.on_input_delta(120.0, 0), InputOutcome::Smoothed);
        assert_eq!(engine.state(), EngineState::Running);

        let deltas = drain(&mut engine);
        assert_eq!(deltas.len(), 24);
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.active_gestures().is_empty());
        assert!(engine.tick().is_none());
    }

    #[test]
    fn test_every_mode_conserves_distance() {
        // one event in the window: ratio 1/15
        let expected = 120.0 * 1.5 * (1.0 + 1.0 / 15.0);
        for mode in [
            EasingMode::Constant,
            EasingMode::Linear,
            EasingMode::Quadratic,
            EasingMode::Cosine,
        ] {
            for fps in [30, 60, 61, 144] {
                let config = ScrollConfig {
                    easing: mode,
                    fps,
                    ..Default::default()
                };
                let mut engine = SmoothScrollEngine::new(&config).unwrap();
                engine.on_input_delta(120.0, 0);
                let total: f64 = drain(&mut engine).iter().sum();
                assert!(
                    (total - expected).abs() < 1e-9,
                    "{:?} at {} fps moved {}",
                    mode,
                    fps,
                    total
                );
            }
        }
    }

    #[test]
    fn test_negative_delta_moves_backwards() {
        let mut engine = engine(EasingMode::Quadratic);
        engine.on_input_delta(-240.0, 0);
        let deltas = drain(&mut engine);
        assert!(deltas.iter().all(|d| *d <= 0.0));
        assert!(deltas.iter().sum::<f64>() < -300.0);
    }

    #[test]
    fn test_pass_through_cases() {
        let mut engine = engine(EasingMode::Linear);
        assert_eq!(engine.on_input_delta(0.0, 0), InputOutcome::PassThrough);
        assert_eq!(engine.on_input_delta(90.0, 0), InputOutcome::PassThrough);
        assert_eq!(engine.on_input_delta(-360.0, 0), InputOutcome::Smoothed);

        let mut none = self::engine(EasingMode::None);
        assert_eq!(none.on_input_delta(120.0, 0), InputOutcome::PassThrough);
        assert!(!none.is_running());
    }

    #[test]
    fn test_notch_filter_can_be_disabled() {
        let config = ScrollConfig {
            wheel_notch: 0,
            ..Default::default()
        };
        let mut engine = SmoothScrollEngine::new(&config).unwrap();
        assert_eq!(engine.on_input_delta(7.5, 0), InputOutcome::Smoothed);
    }

    #[test]
    fn test_rapid_input_accelerates() {
        let mut engine = engine(EasingMode::Constant);
        for i in 0..20 {
            engine.on_input_delta(120.0, i * 10);
        }
        let last = engine.active_gestures().last().unwrap();
        assert!((last.total_distance() - 120.0 * 1.5 * 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_gestures_superpose() {
        let config = ScrollConfig {
            easing: EasingMode::Cosine,
            acceleration_factor: 0.0,
            ..Default::default()
        };
        let lag = 5;

        let mut first = SmoothScrollEngine::new(&config).unwrap();
        first.on_input_delta(120.0, 0);
        let a = drain(&mut first);

        let mut second = SmoothScrollEngine::new(&config).unwrap();
        second.on_input_delta(-240.0, 0);
        let b = drain(&mut second);

        let mut both = SmoothScrollEngine::new(&config).unwrap();
        both.on_input_delta(120.0, 0);
        let mut combined = Vec::new();
        for _ in 0..lag {
            combined.push(both.tick().unwrap().delta);
        }
        both.on_input_delta(-240.0, 80);
        combined.extend(drain(&mut both));

        assert_eq!(combined.len(), lag + b.len());
        for (i, value) in combined.iter().enumerate() {
            let expected = a.get(i).copied().unwrap_or(0.0)
                + if i >= lag { b[i - lag] } else { 0.0 };
            assert!((value - expected).abs() < 1e-9, "tick {}", i);
        }
    }

    #[test]
    fn test_simultaneous_gestures_add_on_first_tick() {
        let config = ScrollConfig {
            easing: EasingMode::Cosine,
            wheel_notch: 0,
            ..Default::default()
        };
        let mut engine = SmoothScrollEngine::new(&config).unwrap();
        engine.on_input_delta(120.0, 0);
        engine.on_input_delta(-60.0, 0);

        let steps = engine.steps_total();
        let expected: f64 = engine
            .active_gestures()
            .iter()
            .map(|g| interpolate(EasingMode::Cosine, g.total_distance(), steps, steps))
            .sum();
        let first = engine.tick().unwrap();
        assert_eq!(first.delta, expected);
        assert!(!first.settled);
    }

    #[test]
    fn test_switching_to_none_drains_without_motion() {
        let mut engine = engine(EasingMode::Cosine);
        engine.on_input_delta(120.0, 0);
        for _ in 0..3 {
            engine.tick();
        }

        engine.set_mode(EasingMode::None);
        assert_eq!(engine.on_input_delta(120.0, 50), InputOutcome::PassThrough);

        let rest = drain(&mut engine);
        assert_eq!(rest.len(), 21);
        assert!(rest.iter().all(|d| *d == 0.0));
        assert!(!engine.is_running());
    }

    #[test]
    fn test_mode_round_trip_through_none_does_not_jump() {
        let mut engine = engine(EasingMode::Cosine);
        engine.on_input_delta(120.0, 0);
        let mut deltas = Vec::new();
        for _ in 0..3 {
            deltas.extend(engine.tick().map(|s| s.delta));
        }

        engine.set_mode(EasingMode::None);
        for _ in 0..19 {
            assert_eq!(engine.tick().map(|s| s.delta), Some(0.0));
        }

        engine.set_mode(EasingMode::Constant);
        let rest = drain(&mut engine);
        assert_eq!(rest.len(), 2);
        assert!(rest.iter().all(|d| (*d - 8.0).abs() < 1e-9), "{:?}", rest);
        deltas.extend(rest);

        let total: f64 = deltas.iter().sum();
        assert!(total < 192.0 / 2.0, "moved {}", total);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_reset_stops_everything() {
        let mut engine = engine(EasingMode::Linear);
        engine.on_input_delta(120.0, 0);
        engine.reset();
        assert!(!engine.is_running());
        assert!(engine.tick().is_none());
    }

    #[test]
    fn test_step_delivers_to_observer() {
        #[derive(Default)]
        struct Sink {
            moved: f64,
            settled: bool,
        }
        impl ScrollObserver for Sink {
            fn offset_delta(&mut self, delta: f64) {
                self.moved += delta;
            }
            fn settled(&mut self) {
                self.settled = true;
            }
        }

        let mut engine = engine(EasingMode::Constant);
        engine.on_input_delta(120.0, 0);
        let mut sink = Sink::default();
        while let Some(step) = engine.tick() {
            step.deliver(&mut sink);
        }
        assert!(sink.settled);
        assert!((sink.moved - 192.0).abs() < 1e-9);
    }
}
