//! L4 Atomic Layer: Time calculation utilities for scroll animations
//!
//! Pure functions only. Callers pass elapsed time in explicitly so that every
//! animation can be driven by a simulated clock.

use std::time::Duration;

/// Calculate animation progress (0.0 to 1.0) from elapsed time and duration
///
/// A zero duration is always complete.
#[inline]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Number of timer steps covering `duration_ms` at `fps`, rounded to nearest
#[inline]
pub fn steps_for(fps: u32, duration_ms: u64) -> u32 {
    (fps as f64 * duration_ms as f64 / 1000.0).round() as u32
}

/// Timer interval for a frame rate (`1000 / fps` ms)
#[inline]
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16) // ~60fps fallback
    } else {
        Duration::from_millis(1000 / fps as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(100.0, 0.0, 0.25) - 75.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert!((progress(Duration::ZERO, Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_progress_clamps() {
        let d = Duration::from_millis(200);
        assert_eq!(progress(Duration::from_millis(50), d), 0.25);
        assert_eq!(progress(Duration::from_millis(400), d), 1.0);
    }

    #[test]
    fn test_steps_for() {
        assert_eq!(steps_for(60, 400), 24);
        assert_eq!(steps_for(144, 400), 58);
        assert_eq!(steps_for(60, 10), 1);
    }

    #[test]
    fn test_frame_interval() {
        assert_eq!(frame_interval(60), Duration::from_millis(16));
        assert_eq!(frame_interval(0), Duration::from_millis(16));
        assert_eq!(frame_interval(120), Duration::from_millis(8));
    }
}
