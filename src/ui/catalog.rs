use crate::app::{App, InputMode};
use crate::models::CodeSnippet;
use crate::ui::colors::RosePine;
use crate::ui::components::{render_bottom_bar, render_confirm_delete, render_help, truncate_to_width};
use crate::ui::form;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, BorderType, List, ListItem, ListState, Paragraph, Scrollbar, ScrollbarOrientation,
        ScrollbarState, StatefulWidget, Widget, Wrap,
    },
};

pub fn render<S>(frame: &mut Frame, app: &App<S>) {
    let [header, body, pages, bottom] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(frame.area());

    render_header(frame, header, app);

    if app.visible().is_empty() {
        render_empty(frame, body, app);
    } else {
        let [list_area, preview_area] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).areas(body);
        render_cards(frame, list_area, app);
        if let Some(snippet) = app.selected_snippet() {
            render_preview(frame, preview_area, app, snippet);
        }
    }

    render_pagination(frame, pages, app);
    render_bottom_bar(frame, bottom, app);

    match app.input_mode {
        InputMode::AddSnippet => form::render_add_form(frame, app),
        InputMode::ConfirmDelete => render_confirm_delete(frame, app),
        InputMode::HelpMenu => render_help(frame),
        InputMode::Normal | InputMode::Search => {}
    }
}

fn render_header<S>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let [title_area, search_area, count_area] = Layout::horizontal([
        Constraint::Length(16),
        Constraint::Fill(1),
        Constraint::Length(22),
    ])
    .areas(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled("CODE", Style::default().fg(RosePine::TEXT).bold()),
        Span::styled("</>", Style::default().fg(RosePine::LOVE).bold()),
        Span::styled("BOX", Style::default().fg(RosePine::TEXT).bold()),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
    );
    title.render(title_area, frame.buffer_mut());

    let searching = app.input_mode == InputMode::Search;
    let search_line = if app.view.search().is_empty() && !searching {
        Line::from(Span::styled(
            " Search by question, slip no, or language...",
            Style::default().fg(RosePine::MUTED),
        ))
    } else {
        let mut spans = vec![
            Span::styled(" ", Style::default()),
            Span::styled(app.view.search().to_string(), Style::default().fg(RosePine::TEXT)),
        ];
        if searching {
            spans.push(Span::styled("█", Style::default().fg(RosePine::IRIS)));
        }
        Line::from(spans)
    };
    let border = if searching {
        RosePine::IRIS
    } else {
        RosePine::HIGHLIGHT_HIGH
    };
    Paragraph::new(search_line)
        .block(
            Block::bordered()
                .title(" 󰍉 Search ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        )
        .render(search_area, frame.buffer_mut());

    let status = if app.is_loading() {
        "loading…".to_string()
    } else if app.pending.is_some() {
        "saving…".to_string()
    } else {
        format!(
            "{} of {} codes",
            app.view.filtered().len(),
            app.view.store().len()
        )
    };
    Paragraph::new(status)
        .alignment(Alignment::Center)
        .style(Style::default().fg(RosePine::SUBTLE))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        )
        .render(count_area, frame.buffer_mut());
}

fn render_empty<S>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let message = if app.is_loading() {
        "Loading codes..."
    } else if app.view.store().is_empty() {
        "No codes yet. Press [a] to add one."
    } else {
        "No codes found."
    };

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    Block::bordered()
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH))
        .render(area, frame.buffer_mut());
    Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(RosePine::SUBTLE))
        .render(middle, frame.buffer_mut());
}

fn render_cards<S>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let text_width = area.width.saturating_sub(4) as usize;

    let items: Vec<ListItem> = app
        .visible()
        .iter()
        .map(|snippet| {
            let language = snippet.language_kind();
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(
                        format!("Slip {}", snippet.slip_no),
                        Style::default().fg(RosePine::GOLD).bold(),
                    ),
                    Span::styled("  ·  ", Style::default().fg(RosePine::MUTED)),
                    Span::styled(
                        language.display_name().to_string(),
                        Style::default().fg(RosePine::FOAM),
                    ),
                ]),
                Line::from(Span::styled(
                    truncate_to_width(&snippet.question, text_width),
                    Style::default().fg(RosePine::TEXT),
                )),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::bordered()
                .title(format!(" Codes · page {} ", app.view.current_page()))
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        )
        .highlight_style(Style::default().bg(RosePine::OVERLAY))
        .highlight_symbol("▍");

    let mut state = ListState::default().with_selected(Some(app.selected));
    StatefulWidget::render(list, area, frame.buffer_mut(), &mut state);
}

fn render_preview<S>(frame: &mut Frame, area: Rect, app: &App<S>, snippet: &CodeSnippet) {
    let block = Block::bordered()
        .title(format!(" {} ", snippet.question))
        .title_bottom(Line::from(format!(" {} lines · [y] copy ", snippet.get_line_count())).right_aligned())
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(RosePine::IRIS))
        .style(Style::default().bg(RosePine::SURFACE));
    let inner = block.inner(area);
    block.render(area, frame.buffer_mut());

    let lines = app
        .preview_cache
        .borrow_mut()
        .lines_for(snippet, RosePine::SURFACE)
        .to_vec();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    let total = paragraph.line_count(inner.width);
    let visible = inner.height as usize;
    let scroll = app.preview_scroll.min(total.saturating_sub(visible));

    paragraph
        .scroll((scroll as u16, 0))
        .render(inner, frame.buffer_mut());

    if total > visible {
        let mut scrollbar_state = ScrollbarState::default()
            .content_length(total)
            .position(scroll);
        Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .style(Style::default().fg(RosePine::SUBTLE))
            .render(area, frame.buffer_mut(), &mut scrollbar_state);
    }
}

fn render_pagination<S>(frame: &mut Frame, area: Rect, app: &App<S>) {
    let total = app.view.total_pages();
    let current = app.view.current_page();

    let mut spans = Vec::new();
    for page in 1..=total {
        let style = if page == current {
            Style::default().fg(RosePine::BASE).bg(RosePine::PINE).bold()
        } else {
            Style::default().fg(RosePine::SUBTLE)
        };
        spans.push(Span::styled(format!(" {} ", page), style));
        spans.push(Span::raw(" "));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        )
        .render(area, frame.buffer_mut());
}
