//! L4 Atomic Layer: Interpolation kernels for wheel gestures
//!
//! A gesture of total distance `D` is spread over `T` timer steps. Each kernel
//! returns the share of `D` to move on one step, given how many steps are left.
//! The time-based engine uses [`ratio_delta`] instead, which consumes a
//! fraction of the *remaining* distance.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Kernel selecting how a gesture is distributed over its steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EasingMode {
    /// Smoothing disabled, wheel input goes to native scrolling
    None,
    Constant,
    #[default]
    Linear,
    Quadratic,
    Cosine,
}

impl EasingMode {
    pub const ALL: [EasingMode; 5] = [
        EasingMode::None,
        EasingMode::Constant,
        EasingMode::Linear,
        EasingMode::Quadratic,
        EasingMode::Cosine,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EasingMode::None => "none",
            EasingMode::Constant => "constant",
            EasingMode::Linear => "linear",
            EasingMode::Quadratic => "quadratic",
            EasingMode::Cosine => "cosine",
        }
    }

    /// Next mode in declaration order, wrapping around
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    #[inline]
    pub fn is_smooth(self) -> bool {
        self != EasingMode::None
    }
}

impl std::str::FromStr for EasingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown easing mode '{}'", s))
    }
}

/// Distance to move on this step for one gesture.
///
/// With `m = T/2` and `x = |T - remaining - m|`, every kernel peaks in the
/// middle of the gesture (`x = 0`) except `Constant`.
#[inline]
pub fn interpolate(
    mode: EasingMode,
    total_distance: f64,
    steps_total: u32,
    steps_remaining: u32,
) -> f64 {
    if steps_total == 0 {
        return 0.0;
    }
    let total = steps_total as f64;
    let m = total / 2.0;
    let x = (total - steps_remaining as f64 - m).abs();

    match mode {
        EasingMode::None => 0.0,
        EasingMode::Constant => total_distance / total,
        EasingMode::Linear => 2.0 * total_distance / total * (m - x) / m,
        EasingMode::Quadratic => 0.75 / m * (1.0 - x * x / (m * m)) * total_distance,
        EasingMode::Cosine => ((x * PI / m).cos() + 1.0) / (2.0 * m) * total_distance,
    }
}

/// Share of `remaining` consumed when `ratio` of the remaining time elapses.
#[inline]
pub fn ratio_delta(mode: EasingMode, remaining: f64, ratio: f64) -> f64 {
    let r = ratio.clamp(0.0, 1.0);
    match mode {
        EasingMode::Quadratic => remaining * (1.0 - (1.0 - r) * (1.0 - r)),
        EasingMode::Cosine => remaining * (1.0 - (r * PI).cos()) / 2.0,
        EasingMode::None | EasingMode::Constant | EasingMode::Linear => remaining * r,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kernel_sum(mode: EasingMode, distance: f64, steps: u32) -> f64 {
        (1..=steps)
            .rev()
            .map(|k| interpolate(mode, distance, steps, k))
            .sum()
    }

    #[test]
    fn test_constant_and_cosine_conserve_distance() {
        for mode in [EasingMode::Constant, EasingMode::Cosine] {
            for steps in 2..=64 {
                for distance in [180.0, -360.0, 0.75, 12345.5] {
                    let sum = kernel_sum(mode, distance, steps);
                    assert!(
                        (sum - distance).abs() <= 1e-9 * distance.abs(),
                        "{:?} T={} D={} sum={}",
                        mode,
                        steps,
                        distance,
                        sum
                    );
                }
            }
        }
    }

    #[test]
    fn test_linear_conserves_distance_for_even_steps() {
        for steps in (2..=64).step_by(2) {
            let sum = kernel_sum(EasingMode::Linear, 270.0, steps);
            assert!((sum - 270.0).abs() <= 1e-9 * 270.0, "T={} sum={}", steps, sum);
        }
    }

    #[test]
    fn test_discretisation_error_is_bounded() {
        // Quadratic (all T) and Linear (odd T) lose D/T² to the discrete sum.
        for steps in 2..=64u32 {
            let bound = 1.0 / (steps as f64 * steps as f64) + 1e-9;
            let q = kernel_sum(EasingMode::Quadratic, 1.0, steps);
            assert!((q - 1.0).abs() <= bound, "quadratic T={} sum={}", steps, q);
            let l = kernel_sum(EasingMode::Linear, 1.0, steps);
            assert!((l - 1.0).abs() <= bound, "linear T={} sum={}", steps, l);
        }
    }

    #[test]
    fn test_none_never_moves() {
        assert_eq!(kernel_sum(EasingMode::None, 500.0, 24), 0.0);
    }

    #[test]
    fn test_linear_and_quadratic_never_reverse() {
        for mode in [EasingMode::Linear, EasingMode::Quadratic] {
            for steps in 2..=64 {
                for k in 1..=steps {
                    let step = interpolate(mode, 240.0, steps, k);
                    assert!(step >= 0.0, "{:?} T={} k={} step={}", mode, steps, k, step);
                }
            }
        }
    }

    #[test]
    fn test_kernels_peak_mid_gesture() {
        let first = interpolate(EasingMode::Cosine, 100.0, 24, 24);
        let middle = interpolate(EasingMode::Cosine, 100.0, 24, 12);
        let last = interpolate(EasingMode::Cosine, 100.0, 24, 1);
        assert!(middle > first);
        assert!(middle > last);
        assert_eq!(interpolate(EasingMode::Linear, 100.0, 24, 24), 0.0);
    }

    #[test]
    fn test_zero_steps_is_inert() {
        assert_eq!(interpolate(EasingMode::Constant, 100.0, 0, 0), 0.0);
    }

    #[test]
    fn test_ratio_delta_endpoints() {
        for mode in EasingMode::ALL {
            assert!(ratio_delta(mode, 90.0, 0.0).abs() < 1e-12, "{:?}", mode);
            assert!((ratio_delta(mode, 90.0, 1.0) - 90.0).abs() < 1e-9, "{:?}", mode);
        }
        assert!((ratio_delta(EasingMode::Quadratic, 100.0, 0.5) - 75.0).abs() < 1e-9);
        assert!((ratio_delta(EasingMode::Cosine, 100.0, 0.5) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_mode_parsing_and_cycling() {
        assert_eq!("Cosine".parse::<EasingMode>(), Ok(EasingMode::Cosine));
        assert!("bouncy".parse::<EasingMode>().is_err());
        assert_eq!(EasingMode::Cosine.next(), EasingMode::None);
        assert_eq!(EasingMode::None.next(), EasingMode::Constant);
    }
}
