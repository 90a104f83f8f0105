//! L4 Atomic Layer: Tween curves for animated offsets
//!
//! Maps progress in [0, 1] to eased progress in [0, 1] with `f(0) = 0` and
//! `f(1) = 1`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::easing::EasingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Curve {
    /// Holds the start value until the very end
    Step,
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    #[default]
    OutCubic,
    InOutCubic,
    OutQuint,
    OutExpo,
    InOutSine,
}

impl Curve {
    /// Apply the curve to a progress value
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Step => {
                if t < 1.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Curve::Linear => t,
            Curve::InQuad => t * t,
            Curve::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Curve::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Curve::OutCubic => cubic_ease_out(t),
            Curve::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Curve::OutQuint => quintic_ease_out(t),
            Curve::OutExpo => exponential_ease_out(t),
            Curve::InOutSine => (1.0 - (t * PI).cos()) / 2.0,
        }
    }
}

impl From<EasingMode> for Curve {
    fn from(mode: EasingMode) -> Self {
        match mode {
            EasingMode::None => Curve::Step,
            EasingMode::Constant | EasingMode::Linear => Curve::Linear,
            EasingMode::Quadratic => Curve::OutQuad,
            EasingMode::Cosine => Curve::InOutSine,
        }
    }
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
fn cubic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
fn quintic_ease_out(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv.powi(5)
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t), pinned to 1 at the end
#[inline]
fn exponential_ease_out(t: f64) -> f64 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}
