use super::pagination::Paginator;
use super::query;
use super::store::CatalogStore;
use crate::error::CatalogResult;
use crate::models::{CodeSnippet, SnippetDraft, SnippetId};
use crate::service::CatalogService;

/// State container the presentation layers work against: the store, the
/// search term and the active page.
#[derive(Debug)]
pub struct CatalogView<S> {
    store: CatalogStore<S>,
    search: String,
    paginator: Paginator,
}

impl<S: CatalogService> CatalogView<S> {
    pub async fn load(&mut self) -> CatalogResult<usize> {
        self.store.load().await
    }

    /// Validates before touching the network; an invalid draft makes no request.
    pub async fn submit(&mut self, draft: SnippetDraft) -> CatalogResult<CodeSnippet> {
        let snippet = draft.into_snippet()?;
        self.store.insert(snippet).await
    }

    pub async fn remove(&mut self, id: &SnippetId) -> CatalogResult<usize> {
        self.store.remove(id).await
    }
}

impl<S> CatalogView<S> {
    pub fn new(store: CatalogStore<S>, paginator: Paginator) -> Self {
        Self {
            store,
            search: String::new(),
            paginator,
        }
    }

    pub fn store(&self) -> &CatalogStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut CatalogStore<S> {
        &mut self.store
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Changes the term; the page index is left where it was.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    pub fn paginator_mut(&mut self) -> &mut Paginator {
        &mut self.paginator
    }

    pub fn filtered(&self) -> Vec<&CodeSnippet> {
        query::filter(self.store.snippets(), &self.search)
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(self.filtered().len())
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.paginator.go_to(page);
    }

    /// Records on the active page of the filtered view
    pub fn visible(&self) -> Vec<&CodeSnippet> {
        let filtered = self.filtered();
        self.paginator.current(&filtered).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use crate::service::fake::{FakeCatalogService, snippet};

    fn view_with(records: Vec<CodeSnippet>) -> CatalogView<FakeCatalogService> {
        let mut store = CatalogStore::new(FakeCatalogService::default());
        store.apply_loaded(Ok(records)).unwrap();
        CatalogView::new(store, Paginator::default())
    }

    #[test]
    fn stale_page_index_yields_an_empty_page() {
        // 15 "sort" matches, three of which are also "merge"
        let mut records: Vec<CodeSnippet> = (1..=12)
            .map(|i| snippet(i, &i.to_string(), "bubble sort", "java"))
            .collect();
        records.extend((13..=15).map(|i| snippet(i, &i.to_string(), "merge sort", "c")));
        let mut view = view_with(records);

        view.set_search("sort");
        view.go_to_page(2);
        assert_eq!(view.visible().len(), 5);

        view.set_search("merge");
        assert_eq!(view.filtered().len(), 3);
        assert_eq!(view.current_page(), 2);
        assert!(view.visible().is_empty());

        let total = view.total_pages();
        view.paginator_mut().clamp(total);
        assert_eq!(view.visible().len(), 3);
    }

    #[test]
    fn visible_is_the_first_page_by_default() {
        let view = view_with(
            (1..=12)
                .map(|i| snippet(i, &i.to_string(), "q", "go"))
                .collect(),
        );

        assert_eq!(view.total_pages(), 2);
        assert_eq!(view.visible().len(), 10);
        assert_eq!(view.visible()[0].slip_no, "1");
    }

    #[test]
    fn empty_catalog_has_no_pages() {
        let view = view_with(Vec::new());

        assert_eq!(view.total_pages(), 0);
        assert!(view.visible().is_empty());
    }

    #[tokio::test]
    async fn invalid_draft_makes_no_request() {
        let mut view = view_with(Vec::new());
        let draft = SnippetDraft {
            slip_no: "1".to_string(),
            ..SnippetDraft::default()
        };

        let result = view.submit(draft).await;

        assert_eq!(result, Err(CatalogError::Validation { field: "question" }));
        assert_eq!(view.store().service().calls(), 0);
        assert!(view.store().is_empty());
    }

    #[tokio::test]
    async fn valid_draft_is_inserted_and_searchable() {
        let mut view = view_with(vec![snippet(1, "5", "sum of two numbers", "java")]);
        let draft = SnippetDraft {
            slip_no: "9".to_string(),
            question: "palindrome check".to_string(),
            language: "Kotlin".to_string(),
            code: "fun main() {}".to_string(),
        };

        let stored = view.submit(draft).await.unwrap();

        assert_eq!(view.store().len(), 2);
        view.set_search("kotlin");
        assert_eq!(view.visible(), vec![&stored]);
    }
}
