//! codebox - Code Snippet Catalog
//!
//! A terminal viewer for a shared catalog of code snippets kept on a remote
//! service. Records are fetched once, searched and paged locally, and
//! created or deleted through the same service.
//!
//! - Run with no arguments for the TUI
//! - Run with a command (`list`, `show`, `add`, `delete`) for one-shot CLI use

use crate::app::App;
use crate::catalog::Paginator;
use crate::config::AppConfig;
use crate::service::{CatalogService, HttpCatalogService};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        event::{DisableMouseCapture, EnableMouseCapture},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::error::Error;
use std::io::{self};
use std::process::ExitCode;
use std::time::Duration;

mod app;
mod catalog;
mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod models;
mod service;
mod ui;

/// Application entry point and initialization
fn main() -> Result<ExitCode, Box<dyn Error>> {
    color_eyre::install()?;

    let config = AppConfig::load()?;
    if let Some(log_dir) = logging::default_log_dir() {
        if let Err(e) = logging::init_logging(&config.log_level, &log_dir) {
            eprintln!("codebox: logging disabled: {}", e);
        }
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let outcome = cli::execute_cli(&args, &config);
        logging::flush_logs();
        return outcome;
    }

    let service = HttpCatalogService::from_config(&config)?;
    let app = App::new(service, Paginator::new(config.page_size)?);
    let outcome = run_tui(app);
    logging::flush_logs();
    outcome?;

    Ok(ExitCode::SUCCESS)
}

/// Runs the terminal UI until the user quits. The terminal is restored
/// even when the loop fails.
fn run_tui<S>(mut app: App<S>) -> Result<(), Box<dyn Error>>
where
    S: CatalogService + Clone + Send + 'static,
{
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B, S>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<(), Box<dyn Error>>
where
    B: ratatui::backend::Backend,
    S: CatalogService + Clone + Send + 'static,
{
    loop {
        if app.needs_redraw {
            terminal.clear()?;
            app.needs_redraw = false;
        }
        terminal.draw(|frame| ui::catalog::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if handlers::keys::handle_key_events(key, app) {
                    return Ok(());
                }
            }
        }
        app.tick();
    }
}
