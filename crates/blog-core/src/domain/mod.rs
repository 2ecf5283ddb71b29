//! Domain entities - the core business objects.

mod post;
mod query;

pub use post::{NewPost, Post, PostChanges};
pub use query::{PostFilter, SortField, SortOptions, SortOrder};
