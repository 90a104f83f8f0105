//! L2 Organism Layer: Smooth scroll area
//!
//! Owns a smooth scroll dispatcher and a scroll bar per axis and decides where
//! each wheel event goes: to a smoothing engine, to the bar's own animation,
//! straight to the bar, or back to the parent when the area is already at the
//! end it is being pushed towards.

use std::time::Duration;

use tracing::trace;

use super::easing::EasingMode;
use super::engine::InputOutcome;
use super::observer::ScrollObserver;
use super::scroll_bar::SmoothScrollBar;
use super::smooth_scroll::{Axis, SmoothScroll, ViewportMetrics};
use super::tween::OffsetChange;
use crate::config::{AnimationConfig, ScrollConfig};

/// Wheel event as delivered by the host, in eighths of a degree (120 per notch).
///
/// Positive values point away from the user (scroll up / left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelInput {
    pub angle_delta_x: f64,
    pub angle_delta_y: f64,
    pub timestamp_ms: u64,
}

impl WheelInput {
    pub fn vertical(angle_delta: f64, timestamp_ms: u64) -> Self {
        Self {
            angle_delta_x: 0.0,
            angle_delta_y: angle_delta,
            timestamp_ms,
        }
    }

    pub fn horizontal(angle_delta: f64, timestamp_ms: u64) -> Self {
        Self {
            angle_delta_x: angle_delta,
            angle_delta_y: 0.0,
            timestamp_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Queued on a smoothing engine
    Smoothed,
    /// Started a scroll bar animation
    Animated,
    /// Applied to the bar directly
    Native,
    /// Not consumed; the parent should handle it
    Ignored,
}

#[derive(Debug, Clone)]
struct AxisState {
    scroll: SmoothScroll,
    bar: SmoothScrollBar,
    viewport: f64,
    content: f64,
}

impl AxisState {
    fn new(axis: Axis, scroll: &ScrollConfig, animation: &AnimationConfig) -> crate::Result<Self> {
        Ok(Self {
            scroll: SmoothScroll::new(axis, scroll)?,
            bar: SmoothScrollBar::new(animation),
            viewport: 0.0,
            content: 0.0,
        })
    }

    /// The wheel pushes towards an end the bar already sits on
    fn at_end(&self, angle_delta: f64) -> bool {
        (angle_delta < 0.0 && self.bar.value() == self.bar.maximum())
            || (angle_delta > 0.0 && self.bar.value() == self.bar.minimum())
    }

    fn is_moving(&self) -> bool {
        self.scroll.is_running() || self.bar.is_animating()
    }
}

#[derive(Debug, Clone)]
pub struct SmoothScrollArea {
    vertical: AxisState,
    horizontal: AxisState,
    use_animation: bool,
}

impl SmoothScrollArea {
    pub fn new(scroll: &ScrollConfig, animation: &AnimationConfig) -> crate::Result<Self> {
        Ok(Self {
            vertical: AxisState::new(Axis::Vertical, scroll, animation)?,
            horizontal: AxisState::new(Axis::Horizontal, scroll, animation)?,
            use_animation: animation.use_animation,
        })
    }

    fn axis(&self, axis: Axis) -> &AxisState {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisState {
        match axis {
            Axis::Vertical => &mut self.vertical,
            Axis::Horizontal => &mut self.horizontal,
        }
    }

    /// Update viewport and content size; the scrollable range follows
    pub fn set_extents(&mut self, axis: Axis, viewport: f64, content: f64) -> Option<OffsetChange> {
        let state = self.axis_mut(axis);
        state.viewport = viewport.max(0.0);
        state.content = content.max(0.0);
        let max = (state.content - state.viewport).max(0.0);
        state.bar.set_range(0.0, max)
    }

    pub fn extents(&self, axis: Axis) -> (f64, f64) {
        let state = self.axis(axis);
        (state.viewport, state.content)
    }

    pub fn wheel(&mut self, input: WheelInput, metrics: ViewportMetrics) -> WheelOutcome {
        if self.vertical.at_end(input.angle_delta_y) || self.horizontal.at_end(input.angle_delta_x)
        {
            return WheelOutcome::Ignored;
        }

        let (axis, delta) = if input.angle_delta_y != 0.0 {
            (Axis::Vertical, input.angle_delta_y)
        } else {
            (Axis::Horizontal, input.angle_delta_x)
        };
        if delta == 0.0 {
            return WheelOutcome::Ignored;
        }

        let use_animation = self.use_animation;
        let state = self.axis_mut(axis);
        let outcome = if use_animation {
            state.bar.scroll_value(-delta, true);
            WheelOutcome::Animated
        } else {
            match state.scroll.wheel_event(delta, input.timestamp_ms, metrics) {
                InputOutcome::Smoothed => WheelOutcome::Smoothed,
                InputOutcome::PassThrough => {
                    state.bar.scroll_value(-delta, false);
                    WheelOutcome::Native
                }
            }
        };

        trace!(?axis, delta, ?outcome, "Wheel event");
        outcome
    }

    /// Advance engines and bar animations by one frame.
    ///
    /// Returns whether anything is still moving.
    pub fn tick<O: ScrollObserver + ?Sized>(
        &mut self,
        now_ms: u64,
        dt: Duration,
        observer: &mut O,
    ) -> bool {
        for state in [&mut self.vertical, &mut self.horizontal] {
            if let Some(step) = state.scroll.tick(now_ms) {
                observer.offset_delta(step.delta);
                if let Some(change) = state.bar.scroll_value(-step.delta, false) {
                    observer.offset_changed(change.value);
                }
                if step.settled {
                    observer.settled();
                }
            }
            if let Some(change) = state.bar.advance(dt) {
                change.deliver(observer);
            }
        }
        self.is_moving()
    }

    pub fn scroll_to(&mut self, axis: Axis, value: f64, animate: bool) -> Option<OffsetChange> {
        let state = self.axis_mut(axis);
        state.scroll.reset();
        state.bar.scroll_to(value, animate)
    }

    pub fn scroll_by(&mut self, axis: Axis, delta: f64, animate: bool) -> Option<OffsetChange> {
        self.axis_mut(axis).bar.scroll_value(delta, animate)
    }

    /// Press or drag on the bar: freeze where it is
    pub fn stop(&mut self, axis: Axis) {
        let state = self.axis_mut(axis);
        state.scroll.reset();
        state.bar.stop();
    }

    #[inline]
    pub fn offset(&self, axis: Axis) -> f64 {
        self.axis(axis).bar.value()
    }

    pub fn bar(&self, axis: Axis) -> &SmoothScrollBar {
        &self.axis(axis).bar
    }

    pub fn is_moving(&self) -> bool {
        self.vertical.is_moving() || self.horizontal.is_moving()
    }

    pub fn use_animation(&self) -> bool {
        self.use_animation
    }

    pub fn set_use_animation(&mut self, use_animation: bool) {
        self.use_animation = use_animation;
    }

    pub fn mode(&self) -> EasingMode {
        self.vertical.scroll.mode()
    }

    pub fn set_mode(&mut self, mode: EasingMode) {
        self.vertical.scroll.set_mode(mode);
        self.horizontal.scroll.set_mode(mode);
    }

    /// Interval the host should tick at while something moves
    pub fn frame_interval(&self) -> Duration {
        self.vertical.scroll.interval()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn area() -> SmoothScrollArea {
        let mut area =
            SmoothScrollArea::new(&ScrollConfig::default(), &AnimationConfig::default()).unwrap();
        area.set_extents(Axis::Vertical, 400.0, 10_000.0);
        area.set_extents(Axis::Horizontal, 400.0, 1_000.0);
        area
    }

    #[derive(Default)]
    struct Recorder {
        deltas: f64,
        values: Vec<f64>,
        settled: usize,
    }

    impl ScrollObserver for Recorder {
        fn offset_changed(&mut self, value: f64) {
            self.values.push(value);
        }
        fn offset_delta(&mut self, delta: f64) {
            self.deltas += delta;
        }
        fn settled(&mut self) {
            self.settled += 1;
        }
    }

    fn run(area: &mut SmoothScrollArea, observer: &mut Recorder) {
        let mut now = 0;
        while area.is_moving() {
            now += 16;
            area.tick(now, FRAME, observer);
        }
    }

    #[test]
    fn test_wheel_down_is_smoothed() {
        let mut area = area();
        let outcome = area.wheel(WheelInput::vertical(-120.0, 0), ViewportMetrics::default());
        assert_eq!(outcome, WheelOutcome::Smoothed);
        assert_eq!(area.offset(Axis::Vertical), 0.0);

        let mut recorder = Recorder::default();
        run(&mut area, &mut recorder);
        assert!((area.offset(Axis::Vertical) - 192.0).abs() < 1e-9);
        assert!((recorder.deltas + 192.0).abs() < 1e-9);
        assert_eq!(recorder.settled, 1);
        assert!(recorder.values.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_wheel_past_start_is_ignored() {
        let mut area = area();
        let outcome = area.wheel(WheelInput::vertical(120.0, 0), ViewportMetrics::default());
        assert_eq!(outcome, WheelOutcome::Ignored);
        assert!(!area.is_moving());
    }

    #[test]
    fn test_content_shorter_than_viewport_ignores_wheel() {
        let mut area = area();
        area.set_extents(Axis::Vertical, 400.0, 100.0);
        assert_eq!(area.bar(Axis::Vertical).maximum(), 0.0);
        assert_eq!(
            area.wheel(WheelInput::vertical(-120.0, 0), ViewportMetrics::default()),
            WheelOutcome::Ignored
        );
    }

    #[test]
    fn test_fine_grained_delta_goes_native() {
        let mut area = area();
        let outcome = area.wheel(WheelInput::vertical(-30.0, 0), ViewportMetrics::default());
        assert_eq!(outcome, WheelOutcome::Native);
        assert_eq!(area.offset(Axis::Vertical), 30.0);
    }

    #[test]
    fn test_no_smoothing_goes_native() {
        let mut area = area();
        area.set_mode(EasingMode::None);
        let outcome = area.wheel(WheelInput::vertical(-240.0, 0), ViewportMetrics::default());
        assert_eq!(outcome, WheelOutcome::Native);
        assert_eq!(area.offset(Axis::Vertical), 240.0);
    }

    #[test]
    fn test_animation_mode_uses_bar() {
        let mut area = area();
        area.set_use_animation(true);
        let outcome = area.wheel(WheelInput::vertical(-120.0, 0), ViewportMetrics::default());
        assert_eq!(outcome, WheelOutcome::Animated);
        assert!(area.bar(Axis::Vertical).is_animating());

        let mut recorder = Recorder::default();
        run(&mut area, &mut recorder);
        assert_eq!(area.offset(Axis::Vertical), 120.0);
        assert_eq!(recorder.values.last().copied(), Some(120.0));
        assert_eq!(recorder.settled, 1);
    }

    #[test]
    fn test_horizontal_when_no_vertical_delta() {
        let mut area = area();
        area.wheel(WheelInput::horizontal(-120.0, 0), ViewportMetrics::default());
        let mut recorder = Recorder::default();
        run(&mut area, &mut recorder);
        assert_eq!(area.offset(Axis::Vertical), 0.0);
        assert!((area.offset(Axis::Horizontal) - 192.0).abs() < 1e-9);
    }

    #[test]
    fn test_offset_clamped_at_content_end() {
        let mut area = area();
        area.set_extents(Axis::Vertical, 400.0, 500.0);
        area.wheel(WheelInput::vertical(-120.0, 0), ViewportMetrics::default());
        let mut recorder = Recorder::default();
        run(&mut area, &mut recorder);
        assert_eq!(area.offset(Axis::Vertical), 100.0);
    }

    #[test]
    fn test_scroll_to_animates() {
        let mut area = area();
        area.scroll_to(Axis::Vertical, 5_000.0, true);
        assert!(area.is_moving());
        let mut recorder = Recorder::default();
        run(&mut area, &mut recorder);
        assert_eq!(area.offset(Axis::Vertical), 5_000.0);
    }
}
