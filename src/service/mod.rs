//! Remote Catalog Service
//!
//! The authoritative snippet collection lives behind an HTTP API. This module
//! defines the contract the catalog consumes and the reqwest-backed client
//! that speaks it.

pub mod http;

use crate::error::CatalogResult;
use crate::models::{CodeSnippet, SnippetId};

pub use http::HttpCatalogService;

/// list / create / delete against the remote collection.
///
/// A success from `create` or `delete` only means the service accepted the
/// request; response bodies are not consulted.
pub trait CatalogService {
    async fn list(&self) -> CatalogResult<Vec<CodeSnippet>>;

    async fn create(&self, snippet: &CodeSnippet) -> CatalogResult<()>;

    async fn delete(&self, id: &SnippetId) -> CatalogResult<()>;
}
