use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use fluent_scroll_core::KeymapConfig;

use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Key reference built from the active keymap
    pub fn render_help(frame: &mut Frame, keymap: &KeymapConfig, theme: &Theme) {
        let entries = [
            (keymap.scroll_down.as_str(), "scroll down one notch / next item"),
            (keymap.scroll_up.as_str(), "scroll up one notch / previous item"),
            (keymap.page_down.as_str(), "half page down"),
            (keymap.page_up.as_str(), "half page up"),
            (keymap.jump_to_top.as_str(), "animate to top / first item"),
            (keymap.jump_to_bottom.as_str(), "animate to bottom / last item"),
            (keymap.focus_next.as_str(), "next pane"),
            (keymap.focus_prev.as_str(), "previous pane"),
            (keymap.cycle_easing.as_str(), "cycle easing kernel"),
            (keymap.toggle_animation.as_str(), "toggle step engine / bar animation"),
            (keymap.quit.as_str(), "quit"),
        ];

        let key_width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        let mut lines: Vec<Line> = entries
            .iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:>width$}  ", key, width = key_width),
                        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(*description, Style::default().fg(theme.fg1)),
                ])
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Mouse wheel scrolls the pane under the pointer; drag picker columns",
            Style::default().fg(theme.grey1),
        )));

        let area = frame.area();
        let width = 72u16.min(area.width.saturating_sub(4));
        let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(width, height, area);

        frame.render_widget(Clear, popup_area);
        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Rect of `width` x `height` centred in `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let rect = centered_rect(20, 10, Rect::new(0, 0, 100, 50));
        assert_eq!(rect, Rect::new(40, 20, 20, 10));

        let clipped = centered_rect(200, 10, Rect::new(5, 5, 100, 50));
        assert_eq!(clipped.x, 5);
    }
}
