//! Generator module - writes the static JSON and XML outputs into `public_dir`

mod payload;
mod sitemap;

pub use payload::PostPayload;
pub use sitemap::{Sitemap, UrlEntry};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::content::related::rank_related;
use crate::content::repository::is_valid_slug;
use crate::content::{ContentRepository, PostMeta, SearchEntry};
use crate::seo::SeoGenerator;
use crate::Site;

/// Search catalog file name
pub const SEARCH_INDEX_FILE: &str = "search.json";
/// Sitemap file name
pub const SITEMAP_FILE: &str = "sitemap.xml";
/// Home page JSON-LD file name
pub const SITE_SCHEMA_FILE: &str = "site.json";

/// Static output generator
pub struct Generator {
    site: Site,
    repo: ContentRepository,
    seo: SeoGenerator,
}

impl Generator {
    pub fn new(site: &Site) -> Self {
        Self {
            site: site.clone(),
            repo: site.repository(),
            seo: site.seo(),
        }
    }

    /// Generate every output. Returns the number of posts written.
    pub fn generate(&self) -> Result<usize> {
        let public_dir = &self.site.public_dir;
        fs::create_dir_all(public_dir)
            .with_context(|| format!("Failed to create {:?}", public_dir))?;

        let posts = self.repo.list_all()?;
        let categories = self.repo.list_categories()?;
        tracing::debug!(
            "Generating outputs for {} posts in {} categories",
            posts.len(),
            categories.len()
        );

        self.generate_search_index(&posts)?;
        self.generate_site_schema()?;
        if self.site.config.sitemap.enable {
            self.generate_sitemap(&posts, &categories)?;
        }
        let written = self.generate_post_payloads(&posts)?;

        Ok(written)
    }

    /// Write `search.json`
    fn generate_search_index(&self, posts: &[PostMeta]) -> Result<()> {
        let entries: Vec<SearchEntry> = posts.iter().map(SearchEntry::from).collect();
        write_json(&self.site.public_dir.join(SEARCH_INDEX_FILE), &entries)
    }

    /// Write `site.json` with the Organization and WebSite records
    fn generate_site_schema(&self) -> Result<()> {
        let records = json!([self.seo.organization_schema(), self.seo.website_schema()]);
        write_json(&self.site.public_dir.join(SITE_SCHEMA_FILE), &records)
    }

    /// Write `sitemap.xml`
    fn generate_sitemap(&self, posts: &[PostMeta], categories: &[String]) -> Result<()> {
        let today = chrono::Local::now().date_naive();
        let sitemap = Sitemap::build(&self.site.config, posts, categories, today);
        let path = self.site.public_dir.join(SITEMAP_FILE);
        fs::write(&path, sitemap.to_xml())
            .with_context(|| format!("Failed to write sitemap to {:?}", path))?;
        tracing::debug!("Sitemap: {} urls", sitemap.urls.len());
        Ok(())
    }

    /// Write `{category}/{slug}.json` for every post
    fn generate_post_payloads(&self, posts: &[PostMeta]) -> Result<usize> {
        let limit = self.site.config.related_limit;
        let mut written = 0;

        for meta in posts {
            if !is_valid_slug(&meta.category) {
                tracing::warn!(
                    "Skipping payload for {:?}: unusable category {:?}",
                    meta.slug,
                    meta.category
                );
                continue;
            }
            // The file may have vanished or broken since the listing
            let Some(post) = self.repo.get(&meta.slug)? else {
                tracing::warn!("Post {:?} disappeared during generation", meta.slug);
                continue;
            };

            let related = rank_related(posts, &meta.slug, &meta.category, &meta.tags, limit);
            let payload = PostPayload::build(&self.seo, &post, related);

            let dir = self.site.public_dir.join(&meta.category);
            fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
            write_json(&dir.join(format!("{}.json", meta.slug)), &payload)?;
            written += 1;
        }

        Ok(written)
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))
}
