//! L3 Molecular Layer: Smooth scroll bar value model
//!
//! A bounded value animated with [`AnimatedScrollOffset`]. The bar keeps a
//! shadow target next to the shown value so that repeated relative scrolls
//! accumulate on where the bar is heading, not where it currently is.

use std::time::Duration;

use tracing::debug;

use super::curve::Curve;
use super::tween::{AnimatedScrollOffset, OffsetChange};
use crate::config::AnimationConfig;

const DEFAULT_PAGE_STEP: f64 = 50.0;

#[derive(Debug, Clone)]
pub struct SmoothScrollBar {
    minimum: f64,
    maximum: f64,
    offset: AnimatedScrollOffset,
    /// Where relative scrolls accumulate, always inside the range
    target: f64,
    page_step: f64,
    single_step: f64,
    duration: Duration,
    curve: Curve,
    short_distance: f64,
    short_distance_divisor: f64,
}

impl Default for SmoothScrollBar {
    fn default() -> Self {
        Self::new(&AnimationConfig::default())
    }
}

impl SmoothScrollBar {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            minimum: 0.0,
            maximum: 0.0,
            offset: AnimatedScrollOffset::default(),
            target: 0.0,
            page_step: DEFAULT_PAGE_STEP,
            single_step: 1.0,
            duration: config.duration(),
            curve: config.curve,
            short_distance: config.short_distance,
            short_distance_divisor: config.short_distance_divisor,
        }
    }

    #[inline]
    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.minimum, self.maximum)
    }

    /// Set the range; `min > max` is ignored
    pub fn set_range(&mut self, minimum: f64, maximum: f64) -> Option<OffsetChange> {
        if minimum > maximum || !minimum.is_finite() || !maximum.is_finite() {
            debug!("Ignoring scroll range [{}, {}]", minimum, maximum);
            return None;
        }
        self.minimum = minimum;
        self.maximum = maximum;
        self.target = self.clamp(self.target);

        let value = self.offset.current_value();
        let end = self.offset.target();
        if self.clamp(value) != value || self.clamp(end) != end {
            return self.offset.jump_to(self.clamp(value));
        }
        None
    }

    /// Move to `value`, animated or not.
    ///
    /// Short moves get a proportionally shorter animation.
    pub fn set_value(&mut self, value: f64, use_ani: bool) -> Option<OffsetChange> {
        let value = self.clamp(value);
        self.target = value;
        let current = self.offset.current_value();
        self.offset.stop();
        if value == current {
            return None;
        }

        if !use_ani {
            return self.offset.jump_to(value);
        }

        let dv = (value - current).abs();
        let duration = if dv < self.short_distance {
            let ms = self.duration.as_millis() as f64 * dv / self.short_distance_divisor;
            Duration::from_millis(ms as u64)
        } else {
            self.duration
        };
        self.offset.animate_to(value, duration, self.curve)
    }

    /// Scroll by `delta` relative to the current target
    pub fn scroll_value(&mut self, delta: f64, use_ani: bool) -> Option<OffsetChange> {
        let target = self.clamp(self.target + delta);
        self.set_value(target, use_ani)
    }

    pub fn scroll_to(&mut self, value: f64, use_ani: bool) -> Option<OffsetChange> {
        self.set_value(value, use_ani)
    }

    /// Move the shadow target without touching the shown value
    pub fn reset_value(&mut self, value: f64) {
        self.target = self.clamp(value);
    }

    pub fn page_up(&mut self, use_ani: bool) -> Option<OffsetChange> {
        self.scroll_value(-self.page_step, use_ani)
    }

    pub fn page_down(&mut self, use_ani: bool) -> Option<OffsetChange> {
        self.scroll_value(self.page_step, use_ani)
    }

    /// Stop animating and take the shown value as the new target (press/drag)
    pub fn stop(&mut self) {
        self.offset.stop();
        self.target = self.offset.current_value();
    }

    pub fn advance(&mut self, dt: Duration) -> Option<OffsetChange> {
        self.offset.advance(dt)
    }

    pub fn set_scroll_animation(&mut self, duration: Duration, curve: Curve) {
        self.duration = duration;
        self.curve = curve;
    }

    pub fn set_page_step(&mut self, step: f64) {
        self.page_step = step.max(0.0);
    }

    pub fn set_single_step(&mut self, step: f64) {
        self.single_step = step.max(0.0);
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.offset.current_value()
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn page_step(&self) -> f64 {
        self.page_step
    }

    pub fn single_step(&self) -> f64 {
        self.single_step
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn at_minimum(&self) -> bool {
        self.value() <= self.minimum
    }

    pub fn at_maximum(&self) -> bool {
        self.value() >= self.maximum
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }

    /// Remaining time of the running animation
    pub fn remaining(&self) -> Duration {
        self.offset
            .tween()
            .map(|t| t.duration().saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn bar(max: f64) -> SmoothScrollBar {
        let mut bar = SmoothScrollBar::default();
        bar.set_range(0.0, max);
        bar
    }

    fn settle(bar: &mut SmoothScrollBar) {
        while bar.is_animating() {
            bar.advance(FRAME);
            assert!(bar.value() >= bar.minimum() && bar.value() <= bar.maximum());
        }
    }

    #[test]
    fn test_jump_without_animation() {
        let mut bar = bar(1000.0);
        let change = bar.set_value(300.0, false);
        assert_eq!(change.map(|c| c.value), Some(300.0));
        assert_eq!(bar.value(), 300.0);
        assert!(!bar.is_animating());
    }

    #[test]
    fn test_equal_value_is_noop() {
        let mut bar = bar(1000.0);
        bar.set_value(300.0, false);
        assert!(bar.set_value(300.0, true).is_none());
        assert!(!bar.is_animating());
    }

    #[test]
    fn test_returning_to_shown_value_cancels_animation() {
        let mut bar = bar(1000.0);
        bar.set_value(100.0, false);
        bar.set_value(400.0, true);
        assert!(bar.is_animating());

        assert_eq!(bar.set_value(100.0, true), None);
        assert!(!bar.is_animating());
        assert_eq!(bar.target(), 100.0);
        settle(&mut bar);
        assert_eq!(bar.value(), 100.0);
    }

    #[test]
    fn test_short_moves_animate_faster() {
        let mut bar = bar(1000.0);
        bar.set_value(35.0, true);
        assert_eq!(bar.remaining(), Duration::from_millis(250));

        bar.set_value(635.0, true);
        assert_eq!(bar.remaining(), Duration::from_millis(500));
    }

    #[test]
    fn test_value_stays_in_range() {
        let mut bar = bar(200.0);
        bar.scroll_value(500.0, true);
        assert_eq!(bar.target(), 200.0);
        settle(&mut bar);
        assert_eq!(bar.value(), 200.0);
        assert!(bar.at_maximum());

        bar.scroll_value(-1000.0, true);
        settle(&mut bar);
        assert!(bar.at_minimum());
    }

    #[test]
    fn test_relative_scrolls_accumulate_on_target() {
        let mut bar = bar(1000.0);
        bar.scroll_value(120.0, true);
        bar.advance(FRAME);
        bar.scroll_value(120.0, true);
        assert_eq!(bar.target(), 240.0);
        settle(&mut bar);
        assert_eq!(bar.value(), 240.0);
    }

    #[test]
    fn test_stop_syncs_target() {
        let mut bar = bar(1000.0);
        bar.scroll_value(400.0, true);
        bar.advance(Duration::from_millis(100));
        bar.stop();
        assert!(!bar.is_animating());
        assert_eq!(bar.target(), bar.value());
        assert!(bar.value() > 0.0 && bar.value() < 400.0);
    }

    #[test]
    fn test_invalid_range_ignored() {
        let mut bar = bar(100.0);
        bar.set_range(50.0, 10.0);
        assert_eq!(bar.minimum(), 0.0);
        assert_eq!(bar.maximum(), 100.0);
    }

    #[test]
    fn test_shrinking_range_clamps_value() {
        let mut bar = bar(1000.0);
        bar.set_value(800.0, false);
        let change = bar.set_range(0.0, 300.0);
        assert_eq!(change.map(|c| c.value), Some(300.0));
        assert_eq!(bar.value(), 300.0);
        assert_eq!(bar.target(), 300.0);
    }

    #[test]
    fn test_page_steps() {
        let mut bar = bar(1000.0);
        bar.page_down(false);
        bar.page_down(false);
        assert_eq!(bar.value(), 100.0);
        bar.page_up(false);
        assert_eq!(bar.value(), 50.0);
    }

    #[test]
    fn test_reset_value_only_moves_target() {
        let mut bar = bar(1000.0);
        bar.reset_value(700.0);
        assert_eq!(bar.value(), 0.0);
        bar.scroll_value(10.0, false);
        assert_eq!(bar.value(), 710.0);
    }
}
