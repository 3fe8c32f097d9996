//! Client-side catalog state
//!
//! - **`store`**: in-memory mirror of the remote collection with optimistic
//!   insert/remove
//! - **`query`**: case-insensitive search over question, slip no and language
//! - **`pagination`**: fixed-size, 1-indexed pages over the filtered view
//! - **`view`**: the state container tying the three together

pub mod pagination;
pub mod query;
pub mod store;
pub mod view;

pub use pagination::Paginator;
pub use store::CatalogStore;
pub use view::CatalogView;
