//! UI Components and Layout Module
//!
//! Reusable pieces shared by the catalog screen: the bottom bar with
//! context shortcuts or the current notice, centered popups and the delete
//! confirmation dialog.

use crate::app::{App, InputMode, NoticeKind};
use crate::ui::colors::RosePine;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Renders the bottom bar: the active notice if there is one, otherwise the
/// shortcuts for the current input mode.
pub fn render_bottom_bar<S>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let content = match &app.notice {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Success => RosePine::FOAM,
                NoticeKind::Error => RosePine::LOVE,
            };
            Paragraph::new(Line::from(vec![
                Span::styled(format!(" {}: ", notice.title), Style::default().fg(color).bold()),
                Span::styled(notice.text.clone(), Style::default().fg(RosePine::TEXT)),
            ]))
        }
        None => Paragraph::new(get_context_shortcuts(app))
            .alignment(Alignment::Right)
            .style(Style::default().fg(RosePine::MUTED)),
    };

    content
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        )
        .render(area, frame.buffer_mut());
}

fn get_context_shortcuts<S>(app: &App<S>) -> String {
    match app.input_mode {
        InputMode::Search => " [type] Filter │ [⏎/Esc] Done ".to_string(),
        InputMode::AddSnippet => {
            " [Tab] Next field │ [⏎] Newline in code │ [Ctrl+S] Save │ [Esc] Cancel ".to_string()
        }
        InputMode::ConfirmDelete => " [y] Delete │ [n/Esc] Keep ".to_string(),
        InputMode::HelpMenu => " [?/Esc] Close help ".to_string(),
        InputMode::Normal => {
            " [/] Search │ [↑↓] Select │ [←→] Page │ [a] Add │ [d] Delete │ [y] Copy │ [r] Reload │ [?] Help │ [q] Quit "
                .to_string()
        }
    }
}

/// Area of `width` x `height` centered in `area`, clipped to fit
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

pub fn render_confirm_delete<S>(frame: &mut Frame, app: &App<S>) {
    let area = centered_rect(frame.area(), 50, 7);
    Clear.render(area, frame.buffer_mut());

    let label = app
        .delete_target
        .as_ref()
        .and_then(|id| app.view.store().get(id))
        .map(|s| format!("slip {} · {}", s.slip_no, s.question))
        .unwrap_or_default();

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Delete this code?",
            Style::default().fg(RosePine::LOVE).bold(),
        )),
        Line::from(truncate_to_width(&label, area.width.saturating_sub(4) as usize)),
        Line::from(""),
        Line::from(Span::styled(
            "[y] Delete   [n] Keep",
            Style::default().fg(RosePine::SUBTLE),
        )),
    ];

    Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .title(" Confirm ")
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::LOVE).bg(RosePine::BASE)),
        )
        .render(area, frame.buffer_mut());
}

pub fn render_help(frame: &mut Frame) {
    let area = centered_rect(frame.area(), 56, 18);
    Clear.render(area, frame.buffer_mut());

    let shortcuts = [
        ("/", "Search by question, slip no, or language"),
        ("↑ ↓ / j k", "Select a code on this page"),
        ("← → / h l", "Previous / next page"),
        ("1-9", "Jump to page"),
        ("g", "Back to the last page with results"),
        ("PgUp PgDn", "Scroll the code preview"),
        ("a", "Add new code"),
        ("d", "Delete selected code"),
        ("y", "Copy selected code to clipboard"),
        ("r", "Reload from server"),
        ("q", "Quit"),
    ];

    let mut lines = vec![Line::from("")];
    lines.extend(shortcuts.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", key), Style::default().fg(RosePine::GOLD)),
            Span::styled(action.to_string(), Style::default().fg(RosePine::TEXT)),
        ])
    }));

    Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title(" Help ")
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::IRIS).bg(RosePine::BASE)),
        )
        .render(area, frame.buffer_mut());
}

/// Cuts `text` to at most `width` terminal columns, marking the cut with `…`
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_to_width("binary search", 20), "binary search");
    }

    #[test]
    fn long_text_is_cut_with_ellipsis() {
        assert_eq!(truncate_to_width("sum of two numbers", 8), "sum of …");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(truncate_to_width("日本語のコード", 5), "日本…");
    }

    #[test]
    fn centered_rect_is_clipped_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(area, 100, 4);

        assert_eq!(rect.width, 40);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.y, 3);
    }
}
