use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::{Local, Timelike};
use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};

use fluent_scroll_core::{
    AppConfig, Axis, CycleEvent, CycleList, ScrollObserver, SmoothScrollArea, ViewportMetrics,
    WheelInput, WheelOutcome,
};

use crate::theme::Theme;

/// Virtual pixels per document row
pub const LINE_PX: f64 = 40.0;
/// Virtual pixels per picker row
pub const PICKER_ROW_PX: f64 = 33.0;
/// One wheel notch, in eighths of a degree
pub const NOTCH: f64 = 120.0;

/// Width of one picker column including its gap
const PICKER_COLUMN_WIDTH: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Document,
    Hours,
    Minutes,
    Period,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Help,
}

/// Running totals reported by the scroll area
#[derive(Debug, Clone, Default)]
pub struct MotionStats {
    pub frames: u64,
    pub distance: f64,
    pub settled: u64,
    pub last_offset: f64,
}

impl ScrollObserver for MotionStats {
    fn offset_changed(&mut self, value: f64) {
        self.last_offset = value;
    }

    fn offset_delta(&mut self, delta: f64) {
        self.distance += delta.abs();
    }

    fn settled(&mut self) {
        self.settled += 1;
    }
}

/// Hour, minute and optional AM/PM columns
#[derive(Debug, Clone)]
pub struct TimePicker {
    pub hours: CycleList<String>,
    pub minutes: CycleList<String>,
    pub period: Option<CycleList<String>>,
}

impl TimePicker {
    pub fn new(config: &AppConfig, hour: u32, minute: u32) -> Result<Self> {
        let picker = &config.picker;
        let duration = Duration::from_millis(picker.scroll_duration_ms);
        let column = |items: Vec<String>| {
            CycleList::new(items, picker.visible_count, PICKER_ROW_PX, duration)
        };

        let (hour_items, hour_index, period) = if picker.twelve_hour {
            let items = (1..=12).map(|h| format!("{:02}", h)).collect();
            let h12 = match hour % 12 {
                0 => 12,
                h => h,
            };
            let mut period = column(vec!["AM".to_string(), "PM".to_string()])?;
            period.select_index(usize::from(hour >= 12));
            (items, (h12 - 1) as usize, Some(period))
        } else {
            let items = (0..24).map(|h| format!("{:02}", h)).collect();
            (items, hour as usize, None)
        };

        let mut hours = column(hour_items)?;
        hours.select_index(hour_index);
        let mut minutes = column((0..60).map(|m| format!("{:02}", m)).collect())?;
        minutes.select_index(minute as usize);

        Ok(Self {
            hours,
            minutes,
            period,
        })
    }

    pub fn column(&self, focus: Focus) -> Option<&CycleList<String>> {
        match focus {
            Focus::Hours => Some(&self.hours),
            Focus::Minutes => Some(&self.minutes),
            Focus::Period => self.period.as_ref(),
            Focus::Document => None,
        }
    }

    pub fn column_mut(&mut self, focus: Focus) -> Option<&mut CycleList<String>> {
        match focus {
            Focus::Hours => Some(&mut self.hours),
            Focus::Minutes => Some(&mut self.minutes),
            Focus::Period => self.period.as_mut(),
            Focus::Document => None,
        }
    }

    /// Columns in display order
    pub fn focuses(&self) -> Vec<Focus> {
        let mut focuses = vec![Focus::Hours, Focus::Minutes];
        if self.period.is_some() {
            focuses.push(Focus::Period);
        }
        focuses
    }

    pub fn is_animating(&self) -> bool {
        self.hours.is_animating()
            || self.minutes.is_animating()
            || self.period.as_ref().is_some_and(|p| p.is_animating())
    }

    pub fn advance(&mut self, dt: Duration) {
        self.hours.advance(dt);
        self.minutes.advance(dt);
        if let Some(period) = self.period.as_mut() {
            period.advance(dt);
        }
    }

    /// Current time as shown, e.g. "07:30" or "07:30 PM"
    pub fn display(&self) -> String {
        let hour = self.hours.current_item().map(String::as_str).unwrap_or("--");
        let minute = self.minutes.current_item().map(String::as_str).unwrap_or("--");
        match self.period.as_ref().and_then(|p| p.current_item()) {
            Some(period) => format!("{}:{} {}", hour, minute, period),
            None => format!("{}:{}", hour, minute),
        }
    }
}

/// Screen areas from the last draw
#[derive(Debug, Clone, Default)]
pub struct PaneLayout {
    pub document: Rect,
    pub picker: Rect,
    pub columns: Vec<(Focus, Rect)>,
    pub status: Rect,
}

impl PaneLayout {
    pub fn compute(area: Rect, focuses: &[Focus], visible_count: usize) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let picker_width = PICKER_COLUMN_WIDTH * focuses.len() as u16 + 3;
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(picker_width)])
            .split(rows[0]);

        let picker = panes[1];
        let inner = Rect {
            x: picker.x.saturating_add(2),
            y: picker.y.saturating_add(1),
            width: picker.width.saturating_sub(3),
            height: picker.height.saturating_sub(2),
        };
        let height = (visible_count as u16).min(inner.height);
        let top = inner.y + (inner.height - height) / 2;

        let columns = focuses
            .iter()
            .enumerate()
            .map(|(i, focus)| {
                let x = inner.x + PICKER_COLUMN_WIDTH * i as u16;
                let width = (PICKER_COLUMN_WIDTH - 1).min(inner.right().saturating_sub(x));
                (*focus, Rect::new(x, top, width, height))
            })
            .collect();

        Self {
            document: panes[0],
            picker,
            columns,
            status: rows[1],
        }
    }

    /// Document viewport without its border
    pub fn document_inner(&self) -> Rect {
        Rect {
            x: self.document.x.saturating_add(1),
            y: self.document.y.saturating_add(1),
            width: self.document.width.saturating_sub(2),
            height: self.document.height.saturating_sub(2),
        }
    }

    pub fn column_at(&self, column: u16, row: u16) -> Option<(Focus, Rect)> {
        self.columns
            .iter()
            .copied()
            .find(|(_, rect)| rect.contains(Position::new(column, row)))
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    /// Lines of the scrollable document
    pub document: Vec<String>,
    pub area: SmoothScrollArea,
    pub picker: TimePicker,
    pub focus: Focus,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Pending key for multi-key sequences (e.g., 'gg')
    pub pending_key: Option<char>,
    /// How the last wheel event was consumed
    pub last_wheel: Option<WheelOutcome>,
    pub stats: MotionStats,
    pub layout: PaneLayout,
    /// Picker column being dragged and the last pointer row
    drag: Option<(Focus, u16)>,
    started: Instant,
    last_frame_ms: Option<u64>,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Result<Self> {
        let now = Local::now();
        Self::with_time(config, now.hour(), now.minute())
    }

    /// Start the picker at a fixed time
    pub fn with_time(config: Arc<AppConfig>, hour: u32, minute: u32) -> Result<Self> {
        let area = SmoothScrollArea::new(&config.scroll, &config.animation)?;
        let picker = TimePicker::new(&config, hour, minute)?;

        Ok(Self {
            theme: Theme::from_config(&config.ui),
            document: demo_document(),
            area,
            picker,
            focus: Focus::Document,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            pending_key: None,
            last_wheel: None,
            stats: MotionStats::default(),
            layout: PaneLayout::default(),
            drag: None,
            started: Instant::now(),
            last_frame_ms: None,
            config,
        })
    }

    /// Milliseconds since start, the clock every engine runs on
    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Accept the layout of a new frame and resize the scroll ranges
    pub fn apply_layout(&mut self, layout: PaneLayout) {
        let inner = layout.document_inner();
        let width_px = self.config.ui.cell_width_px;
        let widest = self
            .document
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let vertical = (inner.height as f64 * LINE_PX, self.document.len() as f64 * LINE_PX);
        if self.area.extents(Axis::Vertical) != vertical {
            self.area.set_extents(Axis::Vertical, vertical.0, vertical.1);
        }
        let horizontal = (inner.width as f64 * width_px, widest as f64 * width_px);
        if self.area.extents(Axis::Horizontal) != horizontal {
            self.area.set_extents(Axis::Horizontal, horizontal.0, horizontal.1);
        }
        self.layout = layout;
    }

    fn metrics(&self) -> ViewportMetrics {
        let width = self.layout.document_inner().width as f64 * self.config.ui.cell_width_px;
        ViewportMetrics::new(width, 1.0)
    }

    /// First document row in view
    pub fn top_row(&self) -> usize {
        (self.area.offset(Axis::Vertical) / LINE_PX).floor() as usize
    }

    /// First document column in view
    pub fn left_column(&self) -> usize {
        let width_px = self.config.ui.cell_width_px;
        if width_px <= 0.0 {
            return 0;
        }
        (self.area.offset(Axis::Horizontal) / width_px).floor() as usize
    }

    pub fn focus_next(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
    }

    pub fn focus_prev(&mut self) {
        let order = self.focus_order();
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + order.len() - 1) % order.len()];
    }

    fn focus_order(&self) -> Vec<Focus> {
        let mut order = vec![Focus::Document];
        order.extend(self.picker.focuses());
        order
    }

    /// Feed a wheel event to the document
    pub fn wheel(&mut self, input: WheelInput) -> WheelOutcome {
        let outcome = self.area.wheel(input, self.metrics());
        self.last_wheel = Some(outcome);
        outcome
    }

    pub fn scroll_down(&mut self, now_ms: u64) {
        match self.focus {
            Focus::Document => {
                self.wheel(WheelInput::vertical(-NOTCH, now_ms));
            }
            focus => self.step_column(focus, 1),
        }
    }

    pub fn scroll_up(&mut self, now_ms: u64) {
        match self.focus {
            Focus::Document => {
                self.wheel(WheelInput::vertical(NOTCH, now_ms));
            }
            focus => self.step_column(focus, -1),
        }
    }

    pub fn page_down(&mut self) {
        match self.focus {
            Focus::Document => {
                let half = self.area.extents(Axis::Vertical).0 / 2.0;
                self.area.scroll_by(Axis::Vertical, half, true);
            }
            focus => self.step_column(focus, self.half_picker()),
        }
    }

    pub fn page_up(&mut self) {
        match self.focus {
            Focus::Document => {
                let half = self.area.extents(Axis::Vertical).0 / 2.0;
                self.area.scroll_by(Axis::Vertical, -half, true);
            }
            focus => self.step_column(focus, -self.half_picker()),
        }
    }

    pub fn jump_to_top(&mut self) {
        self.pending_key = None;
        match self.focus {
            Focus::Document => {
                self.area.scroll_to(Axis::Vertical, 0.0, true);
            }
            focus => {
                if let Some(event) = self.picker.column_mut(focus).and_then(|c| c.select_index(0)) {
                    self.on_cycle_event(event);
                }
            }
        }
    }

    pub fn jump_to_bottom(&mut self) {
        match self.focus {
            Focus::Document => {
                let max = self.area.bar(Axis::Vertical).maximum();
                self.area.scroll_to(Axis::Vertical, max, true);
            }
            focus => {
                let event = self.picker.column_mut(focus).and_then(|column| {
                    let last = column.view().len().checked_sub(1)?;
                    column.select_index(last)
                });
                if let Some(event) = event {
                    self.on_cycle_event(event);
                }
            }
        }
    }

    fn half_picker(&self) -> isize {
        (self.config.picker.visible_count / 2).max(1) as isize
    }

    fn step_column(&mut self, focus: Focus, steps: isize) {
        let Some(column) = self.picker.column_mut(focus) else {
            return;
        };
        let target = column.current_slot().saturating_add_signed(steps);
        if let Some(event) = column.set_current_slot(target) {
            self.on_cycle_event(event);
        }
    }

    fn on_cycle_event(&mut self, event: CycleEvent) {
        match event {
            CycleEvent::CurrentItemChanged { .. } => {
                self.set_status(format!("Time {}", self.picker.display()));
            }
        }
    }

    pub fn cycle_easing(&mut self) {
        let mode = self.area.mode().next();
        self.area.set_mode(mode);
        self.set_status(format!("Easing: {}", mode.label()));
    }

    pub fn toggle_animation(&mut self) {
        let use_animation = !self.area.use_animation();
        self.area.set_use_animation(use_animation);
        let label = if use_animation {
            "scroll bar animation"
        } else {
            "step engine"
        };
        self.set_status(format!("Wheel: {}", label));
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now_ms: u64) {
        let column = self.layout.column_at(mouse.column, mouse.row);
        let in_document = self
            .layout
            .document
            .contains(Position::new(mouse.column, mouse.row));

        match mouse.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let delta = if mouse.kind == MouseEventKind::ScrollDown {
                    -NOTCH
                } else {
                    NOTCH
                };
                if let Some((focus, _)) = column {
                    let event = self.picker.column_mut(focus).and_then(|c| c.wheel(delta));
                    if let Some(event) = event {
                        self.on_cycle_event(event);
                    }
                } else if in_document {
                    let input = if mouse.modifiers.contains(KeyModifiers::SHIFT) {
                        WheelInput::horizontal(delta, now_ms)
                    } else {
                        WheelInput::vertical(delta, now_ms)
                    };
                    self.wheel(input);
                }
            }
            MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight if in_document => {
                let delta = if mouse.kind == MouseEventKind::ScrollRight {
                    -NOTCH
                } else {
                    NOTCH
                };
                self.wheel(WheelInput::horizontal(delta, now_ms));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((focus, rect)) = column {
                    self.focus = focus;
                    self.drag = Some((focus, mouse.row));
                    let row = (mouse.row - rect.y) as usize;
                    let event = self
                        .picker
                        .column_mut(focus)
                        .and_then(|c| c.slot_at_row(row).map(|slot| c.click_slot(slot)))
                        .and_then(|result| result.ok().flatten());
                    if let Some(event) = event {
                        self.on_cycle_event(event);
                    }
                } else if in_document {
                    self.focus = Focus::Document;
                    self.area.stop(Axis::Vertical);
                    self.area.stop(Axis::Horizontal);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((focus, last_row)) = self.drag {
                    let rows = last_row as f64 - mouse.row as f64;
                    if let Some(column) = self.picker.column_mut(focus) {
                        column.drag_by(rows * column.item_extent());
                    }
                    self.drag = Some((focus, mouse.row));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some((focus, _)) = self.drag.take() {
                    let event = self.picker.column_mut(focus).and_then(|c| c.release());
                    if let Some(event) = event {
                        self.on_cycle_event(event);
                    }
                }
            }
            _ => {}
        }
    }

    /// Advance every animation by one frame
    pub fn tick(&mut self, now_ms: u64) {
        let interval = self.area.frame_interval();
        let dt = self
            .last_frame_ms
            .map(|last| Duration::from_millis(now_ms.saturating_sub(last)))
            .unwrap_or(interval);

        self.stats.frames += 1;
        self.area.tick(now_ms, dt, &mut self.stats);
        self.picker.advance(dt);

        self.last_frame_ms = self.is_animating().then_some(now_ms);
    }

    pub fn is_animating(&self) -> bool {
        self.area.is_moving() || self.picker.is_animating()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
    }
}

/// Sample text long enough to scroll both ways
fn demo_document() -> Vec<String> {
    const PARAGRAPHS: [&str; 6] = [
        "Each wheel notch becomes a gesture that spreads its distance over a fixed number of frames.",
        "Gestures overlap, so a fast flick keeps adding motion on top of what is still decaying.",
        "Press e to cycle the easing kernel and feel how constant, linear, quadratic and cosine differ.",
        "Press a to route the wheel through the scroll bar animation instead of the step engine.",
        "Tab moves focus to the time picker, whose columns wrap around without ever showing a seam.",
        "A long line follows so that horizontal scrolling has something to do: ------------------------------------------------------------------------------------------------ end.",
    ];
    (0..400)
        .map(|i| format!("{:>4}  {}", i + 1, PARAGRAPHS[i % PARAGRAPHS.len()]))
        .collect()
}
