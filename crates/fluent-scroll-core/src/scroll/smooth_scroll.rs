//! L3 Molecular Layer: Per-axis smooth scroll dispatcher
//!
//! Owns one fixed-step and one adaptive engine and routes each wheel event to
//! the one that suits the surface it arrived on.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::adaptive::AdaptiveScrollEngine;
use super::easing::EasingMode;
use super::engine::{InputOutcome, ScrollEngine, ScrollStep, SmoothScrollEngine};
use crate::config::ScrollConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Size of the surface a wheel event was delivered to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub width_px: f64,
    pub device_pixel_ratio: f64,
}

impl ViewportMetrics {
    pub fn new(width_px: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width_px,
            device_pixel_ratio,
        }
    }

    /// Width in device pixels
    pub fn physical_width(&self) -> f64 {
        self.width_px * self.device_pixel_ratio
    }
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self::new(1280.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    FixedStep,
    Adaptive,
}

#[derive(Debug, Clone)]
pub struct SmoothScroll {
    axis: Axis,
    dynamic_engine: bool,
    hidpi_width_threshold: f64,
    fixed: SmoothScrollEngine,
    adaptive: AdaptiveScrollEngine,
    last_kind: Option<EngineKind>,
}

impl SmoothScroll {
    pub fn new(axis: Axis, config: &ScrollConfig) -> crate::Result<Self> {
        Ok(Self {
            axis,
            dynamic_engine: config.dynamic_engine,
            hidpi_width_threshold: config.hidpi_width_threshold,
            fixed: SmoothScrollEngine::new(config)?,
            adaptive: AdaptiveScrollEngine::new(config)?,
            last_kind: None,
        })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Engine a wheel event on `metrics` would be routed to
    pub fn select_engine(&self, metrics: ViewportMetrics) -> EngineKind {
        if self.dynamic_engine && metrics.physical_width() > self.hidpi_width_threshold {
            EngineKind::Adaptive
        } else {
            EngineKind::FixedStep
        }
    }

    pub fn wheel_event(
        &mut self,
        raw_delta: f64,
        now_ms: u64,
        metrics: ViewportMetrics,
    ) -> InputOutcome {
        let kind = self.select_engine(metrics);
        if self.last_kind != Some(kind) {
            debug!(
                axis = ?self.axis,
                width = metrics.physical_width(),
                "Using {:?} scroll engine",
                kind
            );
            self.last_kind = Some(kind);
        }

        match kind {
            EngineKind::FixedStep => self.fixed.on_input(raw_delta, now_ms),
            EngineKind::Adaptive => self.adaptive.on_input(raw_delta, now_ms),
        }
    }

    /// Advance whichever engines are running and sum their output
    pub fn tick(&mut self, now_ms: u64) -> Option<ScrollStep> {
        let steps = [
            ScrollEngine::tick(&mut self.fixed, now_ms),
            self.adaptive.tick(now_ms),
        ];
        let mut produced = false;
        let mut delta = 0.0;
        for step in steps.into_iter().flatten() {
            produced = true;
            delta += step.delta;
        }
        produced.then(|| ScrollStep {
            delta,
            settled: !self.is_running(),
        })
    }

    pub fn is_running(&self) -> bool {
        self.fixed.is_running() || self.adaptive.is_running()
    }

    pub fn mode(&self) -> EasingMode {
        self.fixed.mode()
    }

    pub fn set_mode(&mut self, mode: EasingMode) {
        ScrollEngine::set_mode(&mut self.fixed, mode);
        self.adaptive.set_mode(mode);
    }

    pub fn interval(&self) -> Duration {
        self.fixed.interval()
    }

    pub fn reset(&mut self) {
        ScrollEngine::reset(&mut self.fixed);
        self.adaptive.reset();
    }

    pub fn fixed_engine(&self) -> &SmoothScrollEngine {
        &self.fixed
    }

    pub fn adaptive_engine(&self) -> &AdaptiveScrollEngine {
        &self.adaptive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll() -> SmoothScroll {
        SmoothScroll::new(Axis::Vertical, &ScrollConfig::default()).unwrap()
    }

    #[test]
    fn test_selects_adaptive_on_wide_hidpi() {
        let scroll = scroll();
        assert_eq!(
            scroll.select_engine(ViewportMetrics::new(1920.0, 1.0)),
            EngineKind::FixedStep
        );
        assert_eq!(
            scroll.select_engine(ViewportMetrics::new(1920.0, 2.0)),
            EngineKind::Adaptive
        );
        // exactly at the threshold stays on the step engine
        assert_eq!(
            scroll.select_engine(ViewportMetrics::new(1280.0, 2.0)),
            EngineKind::FixedStep
        );
    }

    #[test]
    fn test_dynamic_engine_can_be_disabled() {
        let config = ScrollConfig {
            dynamic_engine: false,
            ..Default::default()
        };
        let scroll = SmoothScroll::new(Axis::Horizontal, &config).unwrap();
        assert_eq!(
            scroll.select_engine(ViewportMetrics::new(3840.0, 2.0)),
            EngineKind::FixedStep
        );
    }

    #[test]
    fn test_routes_input_and_ticks() {
        let mut scroll = scroll();
        let wide = ViewportMetrics::new(3000.0, 1.0);
        assert_eq!(scroll.wheel_event(120.0, 0, wide), InputOutcome::Smoothed);
        assert!(scroll.adaptive_engine().is_running());
        assert!(!scroll.fixed_engine().is_running());

        let mut now = 0;
        let mut total = 0.0;
        while scroll.is_running() {
            now += 16;
            if let Some(step) = scroll.tick(now) {
                total += step.delta;
            }
        }
        assert!((total - 192.0).abs() < 1e-9);
        assert!(scroll.tick(now + 16).is_none());
    }

    #[test]
    fn test_set_mode_reaches_both_engines() {
        let mut scroll = scroll();
        scroll.set_mode(EasingMode::None);
        assert_eq!(
            scroll.wheel_event(120.0, 0, ViewportMetrics::new(4000.0, 1.0)),
            InputOutcome::PassThrough
        );
        assert_eq!(
            scroll.wheel_event(120.0, 0, ViewportMetrics::default()),
            InputOutcome::PassThrough
        );
    }
}
