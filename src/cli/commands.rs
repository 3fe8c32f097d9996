use super::Command;
use crate::catalog::CatalogView;
use crate::models::{CodeSnippet, SnippetDraft};
use crate::service::CatalogService;
use crate::ui::highlight::highlight_for_terminal;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::Read;

/// Runs one command. Returns `false` when the catalog operation failed; the
/// failure has already been printed.
pub async fn run<S: CatalogService>(command: Command, view: &mut CatalogView<S>) -> Result<bool> {
    match command {
        Command::List { search, page } => list_snippets(view, search, page).await,
        Command::Show { id } => show_snippet(view, &id).await,
        Command::Add {
            slip_no,
            language,
            question,
            file,
        } => {
            let code = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut code = String::new();
                    std::io::stdin()
                        .read_to_string(&mut code)
                        .context("Failed to read code from stdin")?;
                    code
                }
            };
            let draft = SnippetDraft {
                slip_no,
                question,
                language,
                code,
            };
            add_snippet(view, draft).await
        }
        Command::Delete { id } => delete_snippet(view, &id).await,
        Command::Help => Ok(true),
    }
}

async fn load<S: CatalogService>(view: &mut CatalogView<S>) -> bool {
    match view.load().await {
        Ok(_) => true,
        Err(e) => {
            println!(
                "{}  {} {}",
                "┃".bright_magenta(),
                "Error fetching codes:".red(),
                e
            );
            false
        }
    }
}

/// Prints one page of the filtered catalog
pub async fn list_snippets<S: CatalogService>(
    view: &mut CatalogView<S>,
    search: String,
    page: usize,
) -> Result<bool> {
    if !load(view).await {
        return Ok(false);
    }
    view.set_search(search);
    view.go_to_page(page);

    let visible = view.visible();
    if visible.is_empty() {
        println!("{}  No codes found.", "┃".bright_magenta());
    }

    for (idx, snippet) in visible.iter().enumerate() {
        println!(
            "{}  {}. {} {}",
            "┃".bright_magenta(),
            (page.saturating_sub(1) * view.paginator().page_size() + idx + 1)
                .to_string()
                .bright_yellow(),
            format!("[slip {}]", snippet.slip_no).bright_green(),
            snippet.question.bright_white().bold()
        );
        println!(
            "{}     {}: {}   {}: {}",
            "┃".bright_magenta(),
            "Language".bright_blue(),
            snippet.language_kind().display_name(),
            "ID".bright_black(),
            snippet.id
        );
    }

    println!("{}", "─".repeat(60).bright_magenta());
    println!(
        "{}  page {} of {} · {} matching · {} total",
        "┃".bright_magenta(),
        view.current_page(),
        view.total_pages(),
        view.filtered().len(),
        view.store().len()
    );
    Ok(true)
}

pub async fn show_snippet<S: CatalogService>(view: &mut CatalogView<S>, id: &str) -> Result<bool> {
    if !load(view).await {
        return Ok(false);
    }

    match view.store().find_by_id_str(id) {
        Some(snippet) => {
            display_snippet_content(snippet);
            Ok(true)
        }
        None => {
            println!(
                "{}  No code found with ID: {}",
                "┃".bright_magenta(),
                id
            );
            Ok(false)
        }
    }
}

fn display_snippet_content(snippet: &CodeSnippet) {
    let language = snippet.language_kind();

    println!(
        "{}  {} {}",
        "┃".bright_magenta(),
        "SLIP".bright_green().bold(),
        snippet.slip_no.bold()
    );
    println!("{}", "─".repeat(60).bright_magenta());
    println!(
        "{}  {}: {}",
        "┃".bright_magenta(),
        "Question".bright_cyan(),
        snippet.question
    );
    println!(
        "{}  {}: {}",
        "┃".bright_magenta(),
        "Language".bright_yellow(),
        language.display_name()
    );
    println!(
        "{}  {}: {}",
        "┃".bright_magenta(),
        "ID".bright_black(),
        snippet.id
    );
    println!("{}", "─".repeat(60).bright_magenta());

    print!("{}", highlight_for_terminal(&snippet.code, &language));
    if !snippet.code.ends_with('\n') {
        println!();
    }
}

pub async fn add_snippet<S: CatalogService>(
    view: &mut CatalogView<S>,
    draft: SnippetDraft,
) -> Result<bool> {
    match view.submit(draft).await {
        Ok(snippet) => {
            println!(
                "{}  {} Code added successfully with ID {}",
                "┃".bright_magenta(),
                "✓".bright_green(),
                snippet.id
            );
            Ok(true)
        }
        Err(e) => {
            println!("{}  {} {}", "┃".bright_magenta(), "Error:".red(), e);
            Ok(false)
        }
    }
}

pub async fn delete_snippet<S: CatalogService>(view: &mut CatalogView<S>, id: &str) -> Result<bool> {
    if !load(view).await {
        return Ok(false);
    }

    let Some(target) = view.store().find_by_id_str(id).map(|s| s.id.clone()) else {
        println!(
            "{}  No code found with ID: {}",
            "┃".bright_magenta(),
            id
        );
        return Ok(false);
    };

    match view.remove(&target).await {
        Ok(_) => {
            println!(
                "{}  {} Code {} deleted",
                "┃".bright_magenta(),
                "✓".bright_green(),
                target
            );
            Ok(true)
        }
        Err(e) => {
            println!(
                "{}  {} Failed to delete code: {}",
                "┃".bright_magenta(),
                "Error:".red(),
                e
            );
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogStore, Paginator};
    use crate::error::CatalogError;
    use crate::service::fake::{FakeCatalogService, snippet};

    fn view_over(service: FakeCatalogService) -> CatalogView<FakeCatalogService> {
        CatalogView::new(CatalogStore::new(service), Paginator::default())
    }

    #[tokio::test]
    async fn list_reports_load_failure() {
        let service = FakeCatalogService::default();
        service.fail_next(CatalogError::Transport("offline".to_string()));
        let mut view = view_over(service);

        assert!(!list_snippets(&mut view, String::new(), 1).await.unwrap());
    }

    #[tokio::test]
    async fn list_applies_search_and_page() {
        let service = FakeCatalogService::with_records(
            (1..=12)
                .map(|i| snippet(i, &i.to_string(), "question", "java"))
                .collect(),
        );
        let mut view = view_over(service);

        assert!(list_snippets(&mut view, "java".to_string(), 2).await.unwrap());
        assert_eq!(view.visible().len(), 2);
    }

    #[tokio::test]
    async fn delete_by_typed_id() {
        let service = FakeCatalogService::with_records(vec![
            snippet(1, "1", "a", "go"),
            snippet(2, "2", "b", "go"),
        ]);
        let mut view = view_over(service.clone());

        assert!(delete_snippet(&mut view, "2").await.unwrap());
        assert_eq!(service.remote().len(), 1);
        assert!(!delete_snippet(&mut view, "9").await.unwrap());
    }

    #[tokio::test]
    async fn add_rejects_empty_fields() {
        let service = FakeCatalogService::default();
        let mut view = view_over(service.clone());
        let draft = SnippetDraft {
            slip_no: "1".to_string(),
            question: "q".to_string(),
            language: "go".to_string(),
            code: String::new(),
        };

        assert!(!add_snippet(&mut view, draft).await.unwrap());
        assert_eq!(service.calls(), 0);
    }
}
