use ratatui::{
    layout::{Margin, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use fluent_scroll_core::Axis;

use crate::app::{App, Focus, LINE_PX};

/// Scrollable document pane
pub struct DocumentWidget;

impl DocumentWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let focused = app.focus == Focus::Document;
        let border = if focused { theme.accent } else { theme.border };

        let title = format!(
            " Document [{}{}] ",
            app.area.mode().label(),
            if app.area.use_animation() { ", animated" } else { "" }
        );
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.bg0));

        let lines: Vec<Line> = app
            .document
            .iter()
            .map(|text| Line::from(Span::styled(text.as_str(), Style::default().fg(theme.fg1))))
            .collect();

        let top = app.top_row().min(u16::MAX as usize) as u16;
        let left = app.left_column().min(u16::MAX as usize) as u16;
        let paragraph = Paragraph::new(lines).block(block).scroll((top, left));
        frame.render_widget(paragraph, area);

        let bar = app.area.bar(Axis::Vertical);
        let rows = (bar.maximum() / LINE_PX).ceil() as usize;
        let mut state = ScrollbarState::new(rows + 1).position(top as usize);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None)
            .thumb_style(Style::default().fg(if app.area.is_moving() {
                theme.moving
            } else {
                theme.grey2
            }))
            .track_style(Style::default().fg(theme.bg2));
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut state,
        );
    }
}
