//! L3 Molecular Layer: Animated scroll offset
//!
//! A single value that either sits still or follows one tween. A new target
//! replaces the running tween; nothing is queued or blended. Time is passed
//! in by the caller, so the animation runs the same on a real frame clock and
//! in tests.

use std::time::Duration;

use super::curve::Curve;
use super::observer::ScrollObserver;
use super::timing::{lerp, progress};

/// In-flight interpolation from `start_value` to `end_value`
#[derive(Debug, Clone, PartialEq)]
pub struct TweenState {
    start_value: f64,
    end_value: f64,
    elapsed: Duration,
    duration: Duration,
    curve: Curve,
}

impl TweenState {
    pub fn start_value(&self) -> f64 {
        self.start_value
    }

    pub fn end_value(&self) -> f64 {
        self.end_value
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    #[inline]
    pub fn progress(&self) -> f64 {
        progress(self.elapsed, self.duration)
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    fn value(&self) -> f64 {
        if self.is_complete() {
            self.end_value
        } else {
            lerp(
                self.start_value,
                self.end_value,
                self.curve.apply(self.progress()),
            )
        }
    }
}

/// A new offset value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetChange {
    pub value: f64,
    /// No tween is left running after this change
    pub finished: bool,
}

impl OffsetChange {
    pub fn deliver<O: ScrollObserver + ?Sized>(&self, observer: &mut O) {
        observer.offset_changed(self.value);
        if self.finished {
            observer.settled();
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnimatedScrollOffset {
    current: f64,
    tween: Option<TweenState>,
}

impl AnimatedScrollOffset {
    pub fn new(value: f64) -> Self {
        Self {
            current: value,
            tween: None,
        }
    }

    #[inline]
    pub fn current_value(&self) -> f64 {
        self.current
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    /// Final value: the tween's end, or the current value when idle
    pub fn target(&self) -> f64 {
        self.tween
            .as_ref()
            .map(|t| t.end_value)
            .unwrap_or(self.current)
    }

    pub fn tween(&self) -> Option<&TweenState> {
        self.tween.as_ref()
    }

    /// Start a tween from the current value, replacing any running one.
    ///
    /// A zero duration jumps. Animating to the value already shown cancels
    /// the running tween and reports no change.
    pub fn animate_to(
        &mut self,
        target: f64,
        duration: Duration,
        curve: impl Into<Curve>,
    ) -> Option<OffsetChange> {
        if duration.is_zero() {
            return self.jump_to(target);
        }
        if target == self.current {
            self.tween = None;
            return None;
        }

        self.tween = Some(TweenState {
            start_value: self.current,
            end_value: target,
            elapsed: Duration::ZERO,
            duration,
            curve: curve.into(),
        });
        None
    }

    /// Set the value immediately, cancelling any tween
    pub fn jump_to(&mut self, value: f64) -> Option<OffsetChange> {
        self.tween = None;
        if value == self.current {
            return None;
        }
        self.current = value;
        Some(OffsetChange {
            value,
            finished: true,
        })
    }

    /// Move the running tween forward by `dt`
    pub fn advance(&mut self, dt: Duration) -> Option<OffsetChange> {
        let tween = self.tween.as_mut()?;
        tween.elapsed = tween.elapsed.saturating_add(dt);

        let value = tween.value();
        let finished = tween.is_complete();
        if finished {
            self.tween = None;
        }

        let changed = value != self.current;
        self.current = value;
        (changed || finished).then_some(OffsetChange { value, finished })
    }

    /// Freeze at the current value
    pub fn stop(&mut self) {
        self.tween = None;
    }
}
