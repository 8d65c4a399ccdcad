//! Search index records

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PostMeta;

/// A post as exposed to the client-side search page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub date: NaiveDate,
    pub tags: Vec<String>,
}

impl From<&PostMeta> for SearchEntry {
    fn from(meta: &PostMeta) -> Self {
        Self {
            slug: meta.slug.clone(),
            title: meta.title.clone(),
            description: meta.description.clone(),
            category: meta.category.clone(),
            date: meta.date,
            tags: meta.tags.clone(),
        }
    }
}

impl SearchEntry {
    /// Every whitespace-separated term must appear in the title, description
    /// or category (case-insensitive). A blank query matches nothing.
    pub fn matches(&self, query: &str) -> bool {
        let haystack =
            format!("{} {} {}", self.title, self.description, self.category).to_lowercase();
        let query = query.to_lowercase();
        let mut terms = query.split_whitespace().peekable();

        terms.peek().is_some() && terms.all(|term| haystack.contains(term))
    }
}

/// Filter a catalog down to the entries matching `query`, keeping order
pub fn filter_entries<'a>(entries: &'a [SearchEntry], query: &str) -> Vec<&'a SearchEntry> {
    entries.iter().filter(|e| e.matches(query)).collect()
}
