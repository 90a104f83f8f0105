pub mod config;
pub mod cycle;
pub mod error;
pub mod scroll;

pub use config::{AppConfig, AnimationConfig, KeymapConfig, PickerConfig, ScrollConfig, UiConfig};
pub use cycle::{CycleEvent, CycleList, CyclicSequenceView, Slot};
pub use error::{Error, Result};
pub use scroll::{
    Axis, Curve, EasingMode, InputOutcome, OffsetChange, ScrollObserver, ScrollStep,
    SmoothScrollArea, SmoothScrollEngine, ViewportMetrics, WheelInput, WheelOutcome,
};
