//! Post models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Everything known about a post except its body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    /// File name without extension
    pub slug: String,

    pub title: String,

    pub description: String,

    /// Publication date
    pub date: NaiveDate,

    pub category: String,

    /// Hero image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub author: String,

    pub tags: Vec<String>,

    pub featured: bool,

    /// Derived from the body, e.g. "4 min read"
    pub reading_time: String,
}

impl PostMeta {
    /// Site-relative URL of the post, `/{category}/{slug}`
    pub fn path(&self) -> String {
        format!("/{}/{}", self.category, self.slug)
    }

    pub fn route(&self) -> PostRoute {
        PostRoute {
            category: self.category.clone(),
            slug: self.slug.clone(),
        }
    }
}

/// A post with its raw, unrendered body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,

    /// Raw markdown/MDX content
    pub content: String,
}

/// A routable `(category, slug)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostRoute {
    pub category: String,
    pub slug: String,
}

/// Turn a category slug into a display name ("bathroom-safety" -> "Bathroom Safety")
pub fn category_title(category: &str) -> String {
    category
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
