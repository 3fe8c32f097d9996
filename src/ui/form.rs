use crate::app::App;
use crate::models::SnippetDraft;
use crate::ui::colors::RosePine;
use crate::ui::components::centered_rect;
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

const PLACEHOLDERS: [&str; 4] = [
    "Enter Slip No",
    "Enter Question",
    "Enter Language",
    "Enter Code",
];

/// The "Add New Code" popup: three single-line fields and a multi-line code box
pub fn render_add_form<S>(frame: &mut Frame, app: &App<S>) {
    let area = centered_rect(frame.area(), 72, 24);
    Clear.render(area, frame.buffer_mut());

    let block = Block::bordered()
        .title(" Add New Code ")
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::IRIS).bg(RosePine::BASE));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let areas = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(inner);

    for (index, field_area) in areas.iter().enumerate() {
        let focused = index == app.draft_field;
        let value = app.draft.field(index).unwrap_or_default();

        let mut lines: Vec<Line> = if value.is_empty() && !focused {
            vec![Line::from(Span::styled(
                PLACEHOLDERS[index],
                Style::default().fg(RosePine::MUTED),
            ))]
        } else {
            value
                .split('\n')
                .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(RosePine::TEXT))))
                .collect()
        };
        if focused {
            if let Some(last) = lines.last_mut() {
                last.push_span(Span::styled("█", Style::default().fg(RosePine::IRIS)));
            }
        }

        // Keep the cursor line in view for long code bodies
        let height = field_area.height.saturating_sub(2) as usize;
        let scroll = lines.len().saturating_sub(height) as u16;

        let border = if focused {
            RosePine::IRIS
        } else {
            RosePine::HIGHLIGHT_HIGH
        };
        let title = if focused {
            Span::styled(
                format!(" {} ", SnippetDraft::FIELD_NAMES[index]),
                Style::default().fg(RosePine::GOLD).bold(),
            )
        } else {
            Span::raw(format!(" {} ", SnippetDraft::FIELD_NAMES[index]))
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .block(
                Block::bordered()
                    .title(title)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border)),
            )
            .render(*field_area, frame.buffer_mut());
    }
}
