//! Keyboard Input Handling Module
//!
//! Translates key events into catalog actions. Each input mode has its own
//! handler; the return value tells the event loop whether to quit.

use crate::app::{App, InputMode};
use crate::handlers::clipboard::copy_to_clipboard;
use crate::service::CatalogService;
use log::warn;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

const PREVIEW_SCROLL_STEP: usize = 10;

pub fn handle_key_events<S>(key: KeyEvent, app: &mut App<S>) -> bool
where
    S: CatalogService + Clone + Send + 'static,
{
    if key.kind != KeyEventKind::Press {
        return false;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_keys(key, app),
        InputMode::Search => {
            handle_search_keys(key, app);
            false
        }
        InputMode::AddSnippet => {
            handle_form_keys(key, app);
            false
        }
        InputMode::ConfirmDelete => {
            handle_confirm_keys(key, app);
            false
        }
        InputMode::HelpMenu => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.input_mode = InputMode::Normal;
            }
            false
        }
    }
}

fn handle_normal_keys<S>(key: KeyEvent, app: &mut App<S>) -> bool
where
    S: CatalogService + Clone + Send + 'static,
{
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('/') => app.input_mode = InputMode::Search,
        KeyCode::Char('?') => app.input_mode = InputMode::HelpMenu,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
        KeyCode::Right | KeyCode::Char('l') => app.next_page(),
        KeyCode::Left | KeyCode::Char('h') => app.previous_page(),
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(page) = c.to_digit(10) {
                app.go_to_page(page as usize);
            }
        }
        KeyCode::Char('g') => app.clamp_page(),
        KeyCode::PageDown => app.preview_scroll += PREVIEW_SCROLL_STEP,
        KeyCode::PageUp => {
            app.preview_scroll = app.preview_scroll.saturating_sub(PREVIEW_SCROLL_STEP)
        }
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_add_form(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('y') => copy_selected(app),
        KeyCode::Esc => app.clear_notice(),
        _ => {}
    }
    false
}

fn handle_search_keys<S>(key: KeyEvent, app: &mut App<S>) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_form_keys<S>(key: KeyEvent, app: &mut App<S>)
where
    S: CatalogService + Clone + Send + 'static,
{
    const CODE_FIELD: usize = 3;

    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => app.submit_draft(),
        KeyCode::Tab | KeyCode::Down => app.next_draft_field(),
        KeyCode::BackTab | KeyCode::Up => app.previous_draft_field(),
        KeyCode::Enter if app.draft_field == CODE_FIELD => {
            if let Some(field) = app.draft.field_mut(CODE_FIELD) {
                field.push('\n');
            }
        }
        KeyCode::Enter => app.next_draft_field(),
        KeyCode::Backspace => {
            if let Some(field) = app.draft.field_mut(app.draft_field) {
                field.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(field) = app.draft.field_mut(app.draft_field) {
                field.push(c);
            }
        }
        _ => {}
    }
}

fn handle_confirm_keys<S>(key: KeyEvent, app: &mut App<S>)
where
    S: CatalogService + Clone + Send + 'static,
{
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.delete_target = None;
            app.input_mode = InputMode::Normal;
        }
        _ => {}
    }
}

fn copy_selected<S>(app: &mut App<S>) {
    let Some(code) = app.selected_snippet().map(|s| s.code.clone()) else {
        return;
    };

    match copy_to_clipboard(&code) {
        Ok(()) => app.set_success("The code has been copied successfully.".to_string()),
        Err(e) => {
            warn!("event=clipboard_copy status=error error={}", e);
            app.set_error(format!("Could not copy the code: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Paginator;
    use crate::service::fake::{FakeCatalogService, snippet};
    use std::time::Duration;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with(count: i64) -> App<FakeCatalogService> {
        let service = FakeCatalogService::with_records(
            (1..=count)
                .map(|i| snippet(i, &i.to_string(), "question", "rust"))
                .collect(),
        );
        let mut app = App::new(service, Paginator::default());
        // Wait for the initial load to land
        for _ in 0..500 {
            app.tick();
            if app.pending.is_none() {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        app
    }

    #[test]
    fn q_quits_only_in_normal_mode() {
        let mut app = app_with(0);

        assert!(!handle_key_events(press(KeyCode::Char('/')), &mut app));
        assert!(!handle_key_events(press(KeyCode::Char('q')), &mut app));
        assert_eq!(app.view.search(), "q");

        handle_key_events(press(KeyCode::Esc), &mut app);
        assert!(handle_key_events(press(KeyCode::Char('q')), &mut app));
    }

    #[test]
    fn typing_a_search_filters_live() {
        let mut app = app_with(12);

        handle_key_events(press(KeyCode::Char('/')), &mut app);
        for c in "11".chars() {
            handle_key_events(press(KeyCode::Char(c)), &mut app);
        }
        assert_eq!(app.view.filtered().len(), 1);

        handle_key_events(press(KeyCode::Backspace), &mut app);
        assert_eq!(app.view.search(), "1");
    }

    #[test]
    fn arrows_move_between_pages() {
        let mut app = app_with(25);

        handle_key_events(press(KeyCode::Right), &mut app);
        handle_key_events(press(KeyCode::Right), &mut app);
        handle_key_events(press(KeyCode::Right), &mut app);
        assert_eq!(app.view.current_page(), 3);

        handle_key_events(press(KeyCode::Char('1')), &mut app);
        assert_eq!(app.view.current_page(), 1);
    }

    #[test]
    fn form_keys_fill_the_draft() {
        let mut app = app_with(0);

        handle_key_events(press(KeyCode::Char('a')), &mut app);
        handle_key_events(press(KeyCode::Char('7')), &mut app);
        handle_key_events(press(KeyCode::Tab), &mut app);
        handle_key_events(press(KeyCode::Char('x')), &mut app);
        handle_key_events(press(KeyCode::Tab), &mut app);
        handle_key_events(press(KeyCode::Tab), &mut app);
        handle_key_events(press(KeyCode::Char('a')), &mut app);
        handle_key_events(press(KeyCode::Enter), &mut app);
        handle_key_events(press(KeyCode::Char('b')), &mut app);

        assert_eq!(app.input_mode, InputMode::AddSnippet);
        assert_eq!(app.draft.slip_no, "7");
        assert_eq!(app.draft.question, "x");
        assert_eq!(app.draft.code, "a\nb");
    }

    #[test]
    fn declining_a_delete_keeps_the_record() {
        let mut app = app_with(2);

        handle_key_events(press(KeyCode::Char('d')), &mut app);
        assert_eq!(app.input_mode, InputMode::ConfirmDelete);
        handle_key_events(press(KeyCode::Char('n')), &mut app);

        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.delete_target.is_none());
        assert!(app.pending.is_none());
        assert_eq!(app.view.store().len(), 2);
    }
}
