use crate::error::{CatalogError, CatalogResult};
use crate::models::{CodeSnippet, SnippetId};
use crate::service::CatalogService;
use log::{info, warn};

/// In-memory mirror of the remote snippet collection.
///
/// Contents are whatever the last successful load returned, plus the
/// optimistic inserts and removals accepted since. Each operation makes
/// exactly one request and never retries.
#[derive(Debug)]
pub struct CatalogStore<S> {
    service: S,
    snippets: Vec<CodeSnippet>,
}

impl<S: CatalogService> CatalogStore<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            snippets: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Replaces the whole collection with the service's list.
    ///
    /// On failure the previous contents stay in place and the cause is
    /// logged; callers are free to ignore the returned error.
    pub async fn load(&mut self) -> CatalogResult<usize> {
        let result = self.service.list().await;
        self.apply_loaded(result)
    }

    /// Creates `snippet` remotely and, once accepted, appends the same record
    /// locally. The store is untouched when the service refuses.
    pub async fn insert(&mut self, snippet: CodeSnippet) -> CatalogResult<CodeSnippet> {
        if self.contains(&snippet.id) {
            return Err(CatalogError::DuplicateId(snippet.id));
        }
        let result = self.service.create(&snippet).await;
        self.apply_inserted(result.map(|_| snippet))
    }

    /// Deletes remotely, then drops every local record carrying `id`.
    /// Returns how many local records were removed.
    pub async fn remove(&mut self, id: &SnippetId) -> CatalogResult<usize> {
        let result = self.service.delete(id).await;
        self.apply_removed(result.map(|_| id.clone()))
    }
}

impl<S> CatalogStore<S> {
    pub fn apply_loaded(&mut self, result: CatalogResult<Vec<CodeSnippet>>) -> CatalogResult<usize> {
        match result {
            Ok(snippets) => {
                info!("event=catalog_load status=ok count={}", snippets.len());
                self.snippets = snippets;
                Ok(self.snippets.len())
            }
            Err(e) => {
                warn!(
                    "event=catalog_load status=error kept={} error={}",
                    self.snippets.len(),
                    e
                );
                Err(e)
            }
        }
    }

    pub fn apply_inserted(&mut self, result: CatalogResult<CodeSnippet>) -> CatalogResult<CodeSnippet> {
        match result {
            Ok(snippet) => {
                if self.contains(&snippet.id) {
                    return Err(CatalogError::DuplicateId(snippet.id));
                }
                info!("event=catalog_insert status=ok id={}", snippet.id);
                self.snippets.push(snippet.clone());
                Ok(snippet)
            }
            Err(e) => {
                warn!("event=catalog_insert status=error error={}", e);
                Err(e)
            }
        }
    }

    pub fn apply_removed(&mut self, result: CatalogResult<SnippetId>) -> CatalogResult<usize> {
        match result {
            Ok(id) => {
                let before = self.snippets.len();
                self.snippets.retain(|s| s.id != id);
                let removed = before - self.snippets.len();
                info!("event=catalog_remove status=ok id={} removed={}", id, removed);
                Ok(removed)
            }
            Err(e) => {
                warn!("event=catalog_remove status=error error={}", e);
                Err(e)
            }
        }
    }

    pub fn snippets(&self) -> &[CodeSnippet] {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    pub fn get(&self, id: &SnippetId) -> Option<&CodeSnippet> {
        self.snippets.iter().find(|s| &s.id == id)
    }

    /// Looks a record up by the text form of its id, as typed by a user
    pub fn find_by_id_str(&self, id: &str) -> Option<&CodeSnippet> {
        self.snippets.iter().find(|s| s.id.to_string() == id)
    }

    pub fn contains(&self, id: &SnippetId) -> bool {
        self.get(id).is_some()
    }
}
