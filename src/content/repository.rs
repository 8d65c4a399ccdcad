//! Content repository - loads posts from the flat content directory
//!
//! Every query re-reads the directory, so edits show up without a restart.

use anyhow::{Context, Result};
use indexmap::IndexSet;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::frontmatter::PostDefaults;
use super::related::rank_related;
use super::{ContentError, FrontMatter, Post, PostMeta, PostRoute, SearchEntry};
use crate::config::SiteConfig;
use crate::Site;

/// Extensions recognised as content files, in lookup precedence order
const EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Read-only view over the content directory
pub struct ContentRepository {
    content_dir: PathBuf,
    defaults: PostDefaults,
    related_limit: usize,
}

impl ContentRepository {
    /// Create a repository for a site
    pub fn new(site: &Site) -> Self {
        Self::from_dir(&site.content_dir, &site.config)
    }

    /// Create a repository over an arbitrary directory
    pub fn from_dir<P: AsRef<Path>>(content_dir: P, config: &SiteConfig) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            defaults: PostDefaults::from_config(config),
            related_limit: config.related_limit,
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// All posts, newest first
    pub fn list_all(&self) -> Result<Vec<PostMeta>> {
        if !self.content_dir.exists() {
            match fs::create_dir_all(&self.content_dir) {
                Ok(()) => tracing::debug!("Created content directory {:?}", self.content_dir),
                Err(e) => tracing::warn!(
                    "Content directory {:?} is missing and could not be created: {}",
                    self.content_dir,
                    e
                ),
            }
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for (slug, path) in self.discover()? {
            match self.load_meta(&path, &slug) {
                Ok(meta) => posts.push(meta),
                Err(e) if e.is_malformed() => {
                    tracing::warn!("Skipping {:?}: {}", path, e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        // Sort by date descending (newest first), slug keeps ties stable
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));

        Ok(posts)
    }

    /// Load a single post with its body
    ///
    /// Returns `Ok(None)` when nothing matches or the file is malformed.
    pub fn get(&self, slug: &str) -> Result<Option<Post>> {
        if !is_valid_slug(slug) {
            return Ok(None);
        }

        let Some(path) = EXTENSIONS
            .iter()
            .map(|ext| self.content_dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.is_file())
        else {
            return Ok(None);
        };

        match self.load_post(&path, slug) {
            Ok(post) => Ok(Some(post)),
            Err(e) if e.is_malformed() => {
                tracing::warn!("Cannot load {:?}: {}", path, e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Posts in exactly `category`, newest first
    pub fn list_by_category(&self, category: &str) -> Result<Vec<PostMeta>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Distinct categories in first-seen order
    pub fn list_categories(&self) -> Result<Vec<String>> {
        let categories: IndexSet<String> =
            self.list_all()?.into_iter().map(|p| p.category).collect();
        Ok(categories.into_iter().collect())
    }

    /// Every routable `(category, slug)` pair
    pub fn list_routes(&self) -> Result<Vec<PostRoute>> {
        Ok(self.list_all()?.iter().map(PostMeta::route).collect())
    }

    /// Tags with the number of posts using them, most used first
    pub fn list_tags(&self) -> Result<Vec<(String, usize)>> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for post in self.list_all()? {
            for tag in post.tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }

        let mut tags: Vec<_> = counts.into_iter().collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(tags)
    }

    /// Posts flagged `featured`, newest first
    pub fn featured(&self) -> Result<Vec<PostMeta>> {
        Ok(self.list_all()?.into_iter().filter(|p| p.featured).collect())
    }

    /// Up to `limit` posts related to `slug`
    pub fn related(
        &self,
        slug: &str,
        category: &str,
        tags: &[String],
        limit: usize,
    ) -> Result<Vec<PostMeta>> {
        let posts = self.list_all()?;
        Ok(rank_related(&posts, slug, category, tags, limit))
    }

    /// Related posts using the configured limit
    pub fn related_default(
        &self,
        slug: &str,
        category: &str,
        tags: &[String],
    ) -> Result<Vec<PostMeta>> {
        self.related(slug, category, tags, self.related_limit)
    }

    /// The full search catalog, newest first
    pub fn search_index(&self) -> Result<Vec<SearchEntry>> {
        Ok(self.list_all()?.iter().map(SearchEntry::from).collect())
    }

    /// Map each slug to its source file, `.mdx` winning over `.md`
    fn discover(&self) -> Result<BTreeMap<String, PathBuf>> {
        let mut sources: BTreeMap<String, PathBuf> = BTreeMap::new();

        for entry in WalkDir::new(&self.content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.with_context(|| {
                format!("Failed to read content directory {:?}", self.content_dir)
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = content_extension(path) else {
                continue;
            };
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_valid_slug(slug) {
                tracing::warn!("Skipping {:?}: file name is not a URL-safe slug", path);
                continue;
            }

            match sources.get(slug).cloned() {
                Some(existing) if ext == "mdx" && content_extension(&existing) != Some("mdx") => {
                    tracing::warn!("{:?} shadows {:?} (same slug)", path, existing);
                    sources.insert(slug.to_string(), path.to_path_buf());
                }
                Some(existing) => {
                    tracing::warn!("Ignoring {:?}, slug already used by {:?}", path, existing);
                }
                None => {
                    sources.insert(slug.to_string(), path.to_path_buf());
                }
            }
        }

        Ok(sources)
    }

    fn read(&self, path: &Path) -> Result<String, ContentError> {
        fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn load_meta(&self, path: &Path, slug: &str) -> Result<PostMeta, ContentError> {
        let text = self.read(path)?;
        let (fm, body) = FrontMatter::parse(&text)?;
        fm.into_meta(slug, body, &self.defaults)
    }

    fn load_post(&self, path: &Path, slug: &str) -> Result<Post, ContentError> {
        let text = self.read(path)?;
        let (fm, body) = FrontMatter::parse(&text)?;
        let meta = fm.into_meta(slug, body, &self.defaults)?;
        Ok(Post {
            meta,
            content: body.to_string(),
        })
    }
}

/// The recognised content extension of `path`, if any
fn content_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    EXTENSIONS.iter().copied().find(|e| *e == ext)
}

/// Slugs are plain file stems: no separators, no leading dot
pub(crate) fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && slug
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn fixture() -> (TempDir, ContentRepository) {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();

        write(
            dir,
            "grab-bars.mdx",
            "---\ntitle: Grab Bars\ndate: 2025-01-03\ncategory: bathroom-safety\ntags: [grab-bar, bathroom]\nfeatured: true\n---\nInstall them at 33 inches.\n",
        );
        write(
            dir,
            "shower-seats.md",
            "---\ntitle: Shower Seats\ndate: 2025-01-01\ncategory: bathroom-safety\n---\nSit while you shower.\n",
        );
        write(
            dir,
            "fall-sensors.md",
            "---\ntitle: Fall Sensors\ndate: 2025-01-02\ncategory: smart-monitoring\ntags: grab-bar\n---\nRadar beats wearables.\n",
        );
        write(dir, "notes.txt", "not content");

        let repo = ContentRepository::from_dir(dir, &SiteConfig::default());
        (tmp, repo)
    }

    fn slugs(posts: &[PostMeta]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_list_all_sorted_newest_first() {
        let (_tmp, repo) = fixture();
        let posts = repo.list_all().unwrap();
        assert_eq!(
            slugs(&posts),
            vec!["grab-bars", "fall-sensors", "shower-seats"]
        );
        assert!(posts.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_missing_dir_is_created_and_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("content").join("posts");
        let repo = ContentRepository::from_dir(&dir, &SiteConfig::default());

        assert!(repo.list_all().unwrap().is_empty());
        assert!(dir.is_dir());
        assert!(repo.list_categories().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let (tmp, repo) = fixture();
        write(tmp.path(), "broken.md", "---\ntitle: [oops\n---\nBody\n");
        write(tmp.path(), "bad-date.md", "---\ndate: someday\n---\nBody\n");

        let posts = repo.list_all().unwrap();
        assert_eq!(posts.len(), 3);
        assert!(repo.get("broken").unwrap().is_none());
    }

    #[test]
    fn test_get_returns_full_post() {
        let (_tmp, repo) = fixture();
        let post = repo.get("grab-bars").unwrap().unwrap();

        assert_eq!(post.meta.title, "Grab Bars");
        assert_eq!(post.meta.date, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(post.meta.tags, vec!["grab-bar", "bathroom"]);
        assert!(post.meta.featured);
        assert_eq!(post.meta.reading_time, "1 min read");
        assert_eq!(post.content, "Install them at 33 inches.\n");

        let listed = repo.list_all().unwrap();
        assert_eq!(listed.iter().find(|p| p.slug == "grab-bars"), Some(&post.meta));
    }

    #[test]
    fn test_get_not_found() {
        let (_tmp, repo) = fixture();
        assert!(repo.get("does-not-exist").unwrap().is_none());
        assert!(repo.get("notes").unwrap().is_none());
        assert!(repo.get("../grab-bars").unwrap().is_none());
        assert!(repo.get("").unwrap().is_none());
    }

    #[test]
    fn test_mdx_wins_slug_collision() {
        let (tmp, repo) = fixture();
        write(
            tmp.path(),
            "grab-bars.md",
            "---\ntitle: Old Grab Bars\ndate: 2020-01-01\n---\nOld.\n",
        );

        let posts = repo.list_all().unwrap();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[0].title, "Grab Bars");
        assert_eq!(repo.get("grab-bars").unwrap().unwrap().meta.title, "Grab Bars");
    }

    #[test]
    fn test_list_by_category() {
        let (_tmp, repo) = fixture();
        let bath = repo.list_by_category("bathroom-safety").unwrap();
        assert_eq!(slugs(&bath), vec!["grab-bars", "shower-seats"]);
        assert!(repo.list_by_category("Bathroom-Safety").unwrap().is_empty());
    }

    #[test]
    fn test_list_categories_and_routes() {
        let (_tmp, repo) = fixture();
        assert_eq!(
            repo.list_categories().unwrap(),
            vec!["bathroom-safety", "smart-monitoring"]
        );

        let routes = repo.list_routes().unwrap();
        assert_eq!(routes.len(), 3);
        assert_eq!(
            routes[1],
            PostRoute {
                category: "smart-monitoring".to_string(),
                slug: "fall-sensors".to_string(),
            }
        );
    }

    #[test]
    fn test_list_tags_and_featured() {
        let (_tmp, repo) = fixture();
        assert_eq!(
            repo.list_tags().unwrap(),
            vec![("grab-bar".to_string(), 2), ("bathroom".to_string(), 1)]
        );
        assert_eq!(slugs(&repo.featured().unwrap()), vec!["grab-bars"]);
    }

    #[test]
    fn test_related_uses_listing() {
        let (_tmp, repo) = fixture();
        let related = repo
            .related_default("grab-bars", "bathroom-safety", &["grab-bar".to_string()])
            .unwrap();
        assert_eq!(slugs(&related), vec!["shower-seats", "fall-sensors"]);
    }

    #[test]
    fn test_search_index_shape() {
        let (_tmp, repo) = fixture();
        let index = repo.search_index().unwrap();
        assert_eq!(index.len(), 3);
        let json = serde_json::to_value(&index[0]).unwrap();
        assert_eq!(json["slug"], "grab-bars");
        assert_eq!(json["date"], "2025-01-03");
        assert!(json.get("readingTime").is_none());
    }

    #[test]
    fn test_unsafe_file_names_are_not_listed() {
        let (tmp, repo) = fixture();
        write(tmp.path(), "grab bars.md", "---
title: Spaced
---
Body
");
        write(tmp.path(), ".hidden.md", "---
title: Hidden
---
Body
");

        let posts = repo.list_all().unwrap();
        assert_eq!(slugs(&posts), vec!["grab-bars", "fall-sensors", "shower-seats"]);

        for post in &posts {
            assert!(
                repo.get(&post.slug).unwrap().is_some(),
                "listed slug {:?} must resolve",
                post.slug
            );
        }
    }
}
