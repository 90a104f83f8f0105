use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;
use crate::scroll::curve::Curve;
use crate::scroll::easing::EasingMode;
use crate::scroll::timing;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub picker: PickerConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Wheel smoothing parameters, handed to every engine at construction.
///
/// There is no process-wide instance: each scroll area receives its own copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Timer rate of the step engine
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Time a single wheel notch keeps contributing motion
    #[serde(default = "default_scroll_duration")]
    pub duration_ms: u64,
    /// Distance multiplier applied to every raw wheel delta
    #[serde(default = "default_step_ratio")]
    pub step_ratio: f64,
    /// Extra boost at full input density (0 disables acceleration)
    #[serde(default = "default_acceleration_factor")]
    pub acceleration_factor: f64,
    /// Interpolation kernel distributing a gesture over its steps
    #[serde(default)]
    pub easing: EasingMode,
    /// Deltas that are not a multiple of this are left to native scrolling (0 = accept all)
    #[serde(default = "default_wheel_notch")]
    pub wheel_notch: u32,
    /// Pick the time-based engine on wide HiDPI surfaces
    #[serde(default = "default_true")]
    pub dynamic_engine: bool,
    /// Physical width (px * device pixel ratio) above which the adaptive engine is used
    #[serde(default = "default_hidpi_width_threshold")]
    pub hidpi_width_threshold: f64,
    /// Active gestures kept by the adaptive engine before merging
    #[serde(default = "default_adaptive_max_queue")]
    pub adaptive_max_queue: usize,
    /// Shortest duration the adaptive engine shrinks a gesture to
    #[serde(default = "default_adaptive_min_duration")]
    pub adaptive_min_duration_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            duration_ms: default_scroll_duration(),
            step_ratio: default_step_ratio(),
            acceleration_factor: default_acceleration_factor(),
            easing: EasingMode::default(),
            wheel_notch: default_wheel_notch(),
            dynamic_engine: default_true(),
            hidpi_width_threshold: default_hidpi_width_threshold(),
            adaptive_max_queue: default_adaptive_max_queue(),
            adaptive_min_duration_ms: default_adaptive_min_duration(),
        }
    }
}

impl ScrollConfig {
    /// Number of timer steps one gesture is spread over
    pub fn steps_total(&self) -> u32 {
        timing::steps_for(self.fps, self.duration_ms)
    }

    /// Interval of the step timer
    pub fn tick_interval(&self) -> Duration {
        timing::frame_interval(self.fps)
    }

    /// Reject values that would break an engine mid-animation.
    pub fn validate(&self) -> crate::Result<()> {
        if self.fps == 0 {
            return Err(Error::invalid("scroll.fps", "must be greater than zero"));
        }
        let steps = self.steps_total();
        if steps < 2 {
            return Err(Error::invalid(
                "scroll.duration_ms",
                format!(
                    "gives {} step(s) at {} fps, at least 2 are required",
                    steps, self.fps
                ),
            ));
        }
        if !self.step_ratio.is_finite() || self.step_ratio <= 0.0 {
            return Err(Error::invalid(
                "scroll.step_ratio",
                format!("must be a positive number, got {}", self.step_ratio),
            ));
        }
        if !self.acceleration_factor.is_finite() || self.acceleration_factor < 0.0 {
            return Err(Error::invalid(
                "scroll.acceleration_factor",
                format!("must not be negative, got {}", self.acceleration_factor),
            ));
        }
        if !self.hidpi_width_threshold.is_finite() || self.hidpi_width_threshold <= 0.0 {
            return Err(Error::invalid(
                "scroll.hidpi_width_threshold",
                "must be a positive number",
            ));
        }
        if self.adaptive_max_queue == 0 {
            return Err(Error::invalid(
                "scroll.adaptive_max_queue",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Programmatic scrolling (scroll bar, "scroll to" calls)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Duration of a full-length scroll bar animation
    #[serde(default = "default_animation_duration")]
    pub duration_ms: u64,
    /// Shape of scroll bar animations
    #[serde(default)]
    pub curve: Curve,
    /// Route wheel input through the scroll bar animation instead of the step engine
    #[serde(default)]
    pub use_animation: bool,
    /// Moves shorter than this get a proportionally shorter animation
    #[serde(default = "default_short_distance")]
    pub short_distance: f64,
    /// Divisor used to scale the duration of short moves
    #[serde(default = "default_short_distance_divisor")]
    pub short_distance_divisor: f64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_animation_duration(),
            curve: Curve::default(),
            use_animation: false,
            short_distance: default_short_distance(),
            short_distance_divisor: default_short_distance_divisor(),
        }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn validate(&self) -> crate::Result<()> {
        if !self.short_distance_divisor.is_finite() || self.short_distance_divisor <= 0.0 {
            return Err(Error::invalid(
                "animation.short_distance_divisor",
                "must be a positive number",
            ));
        }
        if !self.short_distance.is_finite() || self.short_distance < 0.0 {
            return Err(Error::invalid(
                "animation.short_distance",
                "must not be negative",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickerConfig {
    /// Rows shown at once by each picker column
    #[serde(default = "default_visible_count")]
    pub visible_count: usize,
    /// Duration of the one-item scroll animation
    #[serde(default = "default_picker_duration")]
    pub scroll_duration_ms: u64,
    /// Use a 12-hour clock with an AM/PM column
    #[serde(default)]
    pub twelve_hour: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            visible_count: default_visible_count(),
            scroll_duration_ms: default_picker_duration(),
            twelve_hour: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Dark color scheme
    #[serde(default = "default_true")]
    pub dark: bool,
    /// Width reported to the engine selector, in physical pixels per column
    #[serde(default = "default_cell_width")]
    pub cell_width_px: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            dark: default_true(),
            cell_width_px: default_cell_width(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-d>" (Ctrl+d), "<S-Tab>" (Shift+Tab), "<CR>" (Enter), "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Move focus to the next pane
    #[serde(default = "default_key_focus_next")]
    pub focus_next: String,
    /// Move focus to the previous pane
    #[serde(default = "default_key_focus_prev")]
    pub focus_prev: String,
    /// Scroll down one wheel notch / next picker item
    #[serde(default = "default_key_scroll_down")]
    pub scroll_down: String,
    /// Scroll up one wheel notch / previous picker item
    #[serde(default = "default_key_scroll_up")]
    pub scroll_up: String,
    /// Scroll half page down
    #[serde(default = "default_key_page_down")]
    pub page_down: String,
    /// Scroll half page up
    #[serde(default = "default_key_page_up")]
    pub page_up: String,
    /// Animate to the top
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Animate to the bottom
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Cycle the interpolation kernel
    #[serde(default = "default_key_cycle_easing")]
    pub cycle_easing: String,
    /// Toggle between step engine and scroll bar animation
    #[serde(default = "default_key_toggle_animation")]
    pub toggle_animation: String,
    /// Show the help popup
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            focus_next: default_key_focus_next(),
            focus_prev: default_key_focus_prev(),
            scroll_down: default_key_scroll_down(),
            scroll_up: default_key_scroll_up(),
            page_down: default_key_page_down(),
            page_up: default_key_page_up(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            cycle_easing: default_key_cycle_easing(),
            toggle_animation: default_key_toggle_animation(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_focus_next() -> String { "<Tab>".to_string() }
fn default_key_focus_prev() -> String { "<S-Tab>".to_string() }
fn default_key_scroll_down() -> String { "j".to_string() }
fn default_key_scroll_up() -> String { "k".to_string() }
fn default_key_page_down() -> String { "<C-d>".to_string() }
fn default_key_page_up() -> String { "<C-u>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_cycle_easing() -> String { "e".to_string() }
fn default_key_toggle_animation() -> String { "a".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_fps() -> u32 {
    60
}

fn default_scroll_duration() -> u64 {
    400
}

fn default_step_ratio() -> f64 {
    1.5
}

fn default_acceleration_factor() -> f64 {
    1.0
}

fn default_wheel_notch() -> u32 {
    120 // one detent of a classic mouse wheel
}

fn default_hidpi_width_threshold() -> f64 {
    2560.0
}

fn default_adaptive_max_queue() -> usize {
    3
}

fn default_adaptive_min_duration() -> u64 {
    120
}

fn default_animation_duration() -> u64 {
    500
}

fn default_short_distance() -> f64 {
    50.0
}

fn default_short_distance_divisor() -> f64 {
    70.0
}

fn default_visible_count() -> usize {
    9
}

fn default_picker_duration() -> u64 {
    250
}

fn default_tick_rate() -> u64 {
    100
}

fn default_cell_width() -> f64 {
    9.0
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render as pretty TOML
    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/fluent-scroll/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("fluent-scroll")
            .join("config.toml")
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.scroll.validate()?;
        self.animation.validate()?;
        if self.picker.visible_count == 0 {
            return Err(Error::invalid(
                "picker.visible_count",
                "must be greater than zero",
            ));
        }
        if self.ui.tick_rate_ms == 0 {
            return Err(Error::invalid("ui.tick_rate_ms", "must be greater than zero"));
        }
        if !self.ui.cell_width_px.is_finite() || self.ui.cell_width_px <= 0.0 {
            return Err(Error::invalid("ui.cell_width_px", "must be a positive number"));
        }
        Ok(())
    }
}
