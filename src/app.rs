use crate::catalog::{CatalogStore, CatalogView, Paginator};
use crate::error::CatalogError;
use crate::handlers::worker::{CatalogMessage, RequestWorker};
use crate::models::{CodeSnippet, SnippetDraft, SnippetId};
use crate::service::CatalogService;
use crate::ui::highlight::PreviewCache;
use chrono::{DateTime, Duration, Utc};
use log::error;
use std::cell::RefCell;

/// How long a notice stays on screen
const NOTICE_SECONDS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    AddSnippet,
    ConfirmDelete,
    HelpMenu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub text: String,
    pub shown_at: DateTime<Utc>,
}

/// The request currently in flight. At most one mutation runs at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    Load,
    Create,
    Delete(SnippetId),
}

/// TUI state: the catalog view plus everything that only matters on screen
/// (input mode, selection, the add form, notices).
#[derive(Debug)]
pub struct App<S> {
    pub view: CatalogView<S>,
    worker: RequestWorker<S>,
    pub pending: Option<PendingRequest>,
    pub input_mode: InputMode,
    /// Index of the selected card on the current page
    pub selected: usize,
    pub preview_scroll: usize,
    /// Filled during drawing, which only sees `&App`
    pub preview_cache: RefCell<PreviewCache>,
    pub draft: SnippetDraft,
    pub draft_field: usize,
    pub delete_target: Option<SnippetId>,
    pub notice: Option<Notice>,
    pub needs_redraw: bool,
}

impl<S> App<S>
where
    S: CatalogService + Clone + Send + 'static,
{
    /// Builds the app and starts the initial load in the background
    pub fn new(service: S, paginator: Paginator) -> Self {
        let worker = RequestWorker::new(service.clone());
        let view = CatalogView::new(CatalogStore::new(service), paginator);

        let mut app = Self {
            view,
            worker,
            pending: None,
            input_mode: InputMode::Normal,
            selected: 0,
            preview_scroll: 0,
            preview_cache: RefCell::new(PreviewCache::default()),
            draft: SnippetDraft::default(),
            draft_field: 0,
            delete_target: None,
            notice: None,
            needs_redraw: true,
        };
        app.reload();
        app
    }

    pub fn reload(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.pending = Some(PendingRequest::Load);
        self.worker.spawn_load();
    }

    /// Validates the form and sends it. Invalid input never reaches the
    /// network, and a second submission is refused while one is in flight.
    pub fn submit_draft(&mut self) {
        if self.pending.is_some() {
            self.set_error("Please wait for the current request to finish.".to_string());
            return;
        }

        match self.draft.clone().into_snippet() {
            Ok(snippet) => {
                self.pending = Some(PendingRequest::Create);
                self.worker.spawn_create(snippet);
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_snippet().map(|s| s.id.clone()) {
            self.delete_target = Some(id);
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        self.input_mode = InputMode::Normal;
        let Some(id) = self.delete_target.take() else {
            return;
        };
        if self.pending.is_some() {
            self.set_error("Please wait for the current request to finish.".to_string());
            return;
        }
        self.pending = Some(PendingRequest::Delete(id.clone()));
        self.worker.spawn_delete(id);
    }

    /// Applies finished requests and expires old notices. Called once per
    /// event loop iteration.
    pub fn tick(&mut self) {
        while let Some(message) = self.worker.try_recv() {
            self.handle_message(message);
        }

        if let Some(notice) = &self.notice {
            if Utc::now() - notice.shown_at >= Duration::seconds(NOTICE_SECONDS) {
                self.notice = None;
            }
        }
    }
}

impl<S> App<S> {
    pub fn handle_message(&mut self, message: CatalogMessage) {
        self.pending = None;
        let store = self.view.store_mut();

        match message {
            CatalogMessage::Loaded(result) => {
                // A failed load just leaves the catalog as it was
                let _ = store.apply_loaded(result);
                self.clamp_selection();
            }
            CatalogMessage::Created(result) => match store.apply_inserted(result) {
                Ok(_) => {
                    self.draft = SnippetDraft::default();
                    self.draft_field = 0;
                    self.input_mode = InputMode::Normal;
                    self.set_success("Code added successfully.".to_string());
                }
                Err(e) => self.report_failure("add", e),
            },
            CatalogMessage::Deleted(result) => match store.apply_removed(result) {
                Ok(_) => {
                    self.clamp_selection();
                    self.set_success("Code deleted successfully.".to_string());
                }
                Err(e) => self.report_failure("delete", e),
            },
        }
        self.needs_redraw = true;
    }

    fn report_failure(&mut self, action: &str, e: CatalogError) {
        error!("event=catalog_{} status=error error={}", action, e);
        self.set_error(format!("Failed to {} code: {}", action, e));
    }

    pub fn visible(&self) -> Vec<&CodeSnippet> {
        self.view.visible()
    }

    pub fn selected_snippet(&self) -> Option<&CodeSnippet> {
        self.view.visible().get(self.selected).copied()
    }

    pub fn is_loading(&self) -> bool {
        self.pending == Some(PendingRequest::Load)
    }

    pub fn select_next(&mut self) {
        let count = self.view.visible().len();
        if count > 0 && self.selected + 1 < count {
            self.selected += 1;
            self.preview_scroll = 0;
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.preview_scroll = 0;
        }
    }

    pub fn next_page(&mut self) {
        let total = self.view.total_pages();
        self.view.paginator_mut().next(total);
        self.selected = 0;
        self.preview_scroll = 0;
    }

    pub fn previous_page(&mut self) {
        self.view.paginator_mut().previous();
        self.selected = 0;
        self.preview_scroll = 0;
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.view.go_to_page(page);
        self.selected = 0;
        self.preview_scroll = 0;
    }

    /// Jumps back onto the last page that still has matches
    pub fn clamp_page(&mut self) {
        let total = self.view.total_pages();
        self.view.paginator_mut().clamp(total);
        self.clamp_selection();
    }

    /// Typing in the search box updates the filter immediately; the page
    /// index stays where it was.
    pub fn push_search_char(&mut self, c: char) {
        let mut term = self.view.search().to_string();
        term.push(c);
        self.view.set_search(term);
        self.clamp_selection();
    }

    pub fn pop_search_char(&mut self) {
        let mut term = self.view.search().to_string();
        term.pop();
        self.view.set_search(term);
        self.clamp_selection();
    }

    pub fn clamp_selection(&mut self) {
        let count = self.view.visible().len();
        self.selected = self.selected.min(count.saturating_sub(1));
        self.preview_scroll = 0;
    }

    pub fn open_add_form(&mut self) {
        self.input_mode = InputMode::AddSnippet;
        self.draft_field = 0;
    }

    pub fn next_draft_field(&mut self) {
        self.draft_field = (self.draft_field + 1) % SnippetDraft::FIELD_NAMES.len();
    }

    pub fn previous_draft_field(&mut self) {
        let count = SnippetDraft::FIELD_NAMES.len();
        self.draft_field = (self.draft_field + count - 1) % count;
    }

    pub fn set_error(&mut self, text: String) {
        self.notice = Some(Notice {
            kind: NoticeKind::Error,
            title: "Error",
            text,
            shown_at: Utc::now(),
        });
    }

    pub fn set_success(&mut self, text: String) {
        self.notice = Some(Notice {
            kind: NoticeKind::Success,
            title: "Success",
            text,
            shown_at: Utc::now(),
        });
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}
