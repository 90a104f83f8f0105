use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use fluent_scroll_core::{CycleList, Slot};

use crate::app::{App, Focus};
use crate::theme::Theme;

/// Time picker pane with one cycle list per column
pub struct PickerWidget;

impl PickerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let focused = app.focus != Focus::Document;

        let block = Block::default()
            .title(" Time ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused { theme.accent } else { theme.border }))
            .style(Style::default().bg(theme.bg1));
        frame.render_widget(block, area);

        for (focus, rect) in &app.layout.columns {
            if let Some(column) = app.picker.column(*focus) {
                render_column(frame, *rect, column, app.focus == *focus, theme);
            }
        }
    }
}

fn render_column(
    frame: &mut Frame,
    area: Rect,
    column: &CycleList<String>,
    focused: bool,
    theme: &Theme,
) {
    let centre = column.view().visible_count() / 2;
    let lines: Vec<Line> = (0..area.height as usize)
        .map(|row| {
            let text = column
                .slot_at_row(row)
                .and_then(|slot| column.view().slot(slot).ok())
                .and_then(|slot| match slot {
                    Slot::Item(_, item) => Some(item.as_str()),
                    Slot::Placeholder => None,
                })
                .unwrap_or("");

            let style = if row == centre {
                let style = Style::default().bg(theme.selection).add_modifier(Modifier::BOLD);
                if focused {
                    style.fg(theme.accent)
                } else {
                    style.fg(theme.fg0)
                }
            } else {
                Style::default().fg(theme.grey1)
            };
            Line::from(Span::styled(centred(text, area.width as usize), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}

/// Pad `text` on both sides to fill `width` display cells
fn centred(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    let left = (width - used) / 2;
    let right = width - used - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centred_pads_both_sides() {
        assert_eq!(centred("07", 5), " 07  ");
        assert_eq!(centred("", 2), "  ");
        assert_eq!(centred("toolong", 3), "toolong");
    }

    #[test]
    fn test_centred_uses_display_width() {
        // Two wide characters take four cells
        assert_eq!(centred("午前", 6), " 午前 ");
    }
}
