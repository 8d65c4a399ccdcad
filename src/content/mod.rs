//! Content module - front-matter, posts and the content repository

mod error;
mod frontmatter;
pub mod markdown;
mod post;
pub mod related;
pub mod repository;
mod search;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, PostDefaults};
pub use markdown::ReadingTime;
pub use post::{category_title, Post, PostMeta, PostRoute};
pub use repository::ContentRepository;
pub use search::{filter_entries, SearchEntry};
