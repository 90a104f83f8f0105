use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use fluent_scroll_core::{Axis, WheelOutcome};

use crate::app::{App, Focus, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;

        let mode_str = match app.mode {
            Mode::Normal => "NORMAL",
            Mode::Help => "HELP",
        };
        let focus_str = match app.focus {
            Focus::Document => "Document",
            Focus::Hours => "Hours",
            Focus::Minutes => "Minutes",
            Focus::Period => "AM/PM",
        };
        let wheel_str = match app.last_wheel {
            Some(WheelOutcome::Smoothed) => "smoothed",
            Some(WheelOutcome::Animated) => "animated",
            Some(WheelOutcome::Native) => "native",
            Some(WheelOutcome::Ignored) => "ignored",
            None => "-",
        };

        let status_text = match &app.status_message {
            Some(msg) => format!(" {}", msg),
            None => format!(
                " {} | {} | y={:.0} x={:.0} | wheel: {} | settled: {}",
                mode_str,
                focus_str,
                app.area.offset(Axis::Vertical),
                app.area.offset(Axis::Horizontal),
                wheel_str,
                app.stats.settled,
            ),
        };
        let moving = if app.is_animating() { " ● " } else { "   " };
        let help_hint = " q:quit Tab:focus j/k:scroll e:easing a:animate ?:help ";

        let used = status_text.width() + moving.width() + help_hint.width();
        let padding = " ".repeat((area.width as usize).saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(moving, Style::default().fg(theme.moving).bg(theme.bg2)),
            Span::styled(padding, Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
