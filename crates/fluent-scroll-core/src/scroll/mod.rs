//! Smooth scrolling system
//!
//! Wheel deltas are turned into gestures that overlap and decay over a fixed
//! number of timer steps; programmatic scrolls run as tweens on a bounded
//! scroll bar value.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Per-step interpolation kernels for wheel gestures
//! - `curve` - Tween curves (ease-out cubic and friends)
//! - `timing` - Time calculation utilities (progress, interpolation, step counts)
//! - `delta_queue` - Sliding window of wheel events for acceleration
//!
//! ## L3 Molecular Layer
//! - `engine` - Fixed-step engine and the shared engine types
//! - `adaptive` - Time-based engine for wide HiDPI surfaces
//! - `smooth_scroll` - Per-axis dispatcher choosing between the two
//! - `tween` - Animated scroll offset
//! - `scroll_bar` - Bounded, animated scroll bar value
//!
//! ## L2 Organism Layer
//! - `area` - Scroll area wiring wheel input, engines and bars together
//!
//! # Usage
//!
//! ```ignore
//! use fluent_scroll_core::scroll::{Axis, SmoothScrollArea, ViewportMetrics, WheelInput};
//!
//! let mut area = SmoothScrollArea::new(&config.scroll, &config.animation)?;
//! area.set_extents(Axis::Vertical, 600.0, 12_000.0);
//!
//! area.wheel(WheelInput::vertical(-120.0, now_ms), ViewportMetrics::default());
//!
//! // Every frame while something moves
//! let moving = area.tick(now_ms, frame, &mut ());
//! let offset = area.offset(Axis::Vertical);
//! ```

// L4 Atomic Layer
pub mod curve;
pub mod delta_queue;
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod adaptive;
pub mod engine;
pub mod observer;
pub mod scroll_bar;
pub mod smooth_scroll;
pub mod tween;

// L2 Organism Layer
pub mod area;

pub use adaptive::AdaptiveScrollEngine;
pub use area::{SmoothScrollArea, WheelInput, WheelOutcome};
pub use curve::Curve;
pub use delta_queue::DeltaEventQueue;
pub use easing::{interpolate, EasingMode};
pub use engine::{
    EngineState, InputOutcome, ScrollEngine, ScrollGesture, ScrollStep, SmoothScrollEngine,
    StepTimer,
};
pub use observer::ScrollObserver;
pub use scroll_bar::SmoothScrollBar;
pub use smooth_scroll::{Axis, EngineKind, SmoothScroll, ViewportMetrics};
pub use tween::{AnimatedScrollOffset, OffsetChange, TweenState};
