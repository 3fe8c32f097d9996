use crate::models::SnippetId;
use thiserror::Error;

/// Failure of a single catalog operation. Every variant is terminal for the
/// operation that produced it; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("service rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error("please fill in the {field} field")]
    Validation { field: &'static str },

    #[error("a snippet with id {0} is already in the catalog")]
    DuplicateId(SnippetId),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
