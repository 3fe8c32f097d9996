pub mod snippet;

pub use snippet::{CodeSnippet, SnippetDraft, SnippetId, SnippetLanguage};
