//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub name: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,

    // Writing
    pub default_category: String,
    pub words_per_minute: usize,
    pub related_limit: usize,

    #[serde(default)]
    pub seo: SeoConfig,
    #[serde(default)]
    pub sitemap: SitemapConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "RetrofitAge".to_string(),
            description: "Expert guides on aging-in-place technology and home modifications for senior safety.".to_string(),
            author: "RetrofitAge Team".to_string(),
            language: "en".to_string(),

            url: "https://retrofitage.com".to_string(),

            content_dir: "content/posts".to_string(),
            public_dir: "public".to_string(),

            default_category: "general".to_string(),
            words_per_minute: 200,
            related_limit: 3,

            seo: SeoConfig::default(),
            sitemap: SitemapConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }
}

/// Social preview and structured-data settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoConfig {
    /// Default social preview image, site-relative or absolute
    pub og_image: String,
    pub og_image_width: u32,
    pub og_image_height: u32,
    pub logo: String,
    pub twitter_card: String,
    /// Path of the search page, used by the WebSite search action
    pub search_path: String,
    pub contact_email: String,
    #[serde(default)]
    pub same_as: Vec<String>,
}

impl Default for SeoConfig {
    fn default() -> Self {
        Self {
            og_image: "/og-image.jpg".to_string(),
            og_image_width: 1200,
            og_image_height: 630,
            logo: "/logo.png".to_string(),
            twitter_card: "summary_large_image".to_string(),
            search_path: "/search".to_string(),
            contact_email: "contact@retrofitage.com".to_string(),
            same_as: vec![
                "https://facebook.com/retrofitage".to_string(),
                "https://twitter.com/retrofitage".to_string(),
                "https://pinterest.com/retrofitage".to_string(),
            ],
        }
    }
}

/// Sitemap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    pub enable: bool,
    #[serde(default)]
    pub static_pages: Vec<StaticPage>,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            static_pages: vec![
                StaticPage::new("/", ChangeFrequency::Daily, 1.0),
                StaticPage::new("/about", ChangeFrequency::Monthly, 0.8),
                StaticPage::new("/contact", ChangeFrequency::Monthly, 0.5),
                StaticPage::new("/privacy", ChangeFrequency::Yearly, 0.3),
                StaticPage::new("/terms", ChangeFrequency::Yearly, 0.3),
                StaticPage::new("/disclosure", ChangeFrequency::Yearly, 0.3),
            ],
        }
    }
}

/// A hand-written page listed in the sitemap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticPage {
    pub path: String,
    #[serde(default)]
    pub change_frequency: ChangeFrequency,
    #[serde(default = "default_priority")]
    pub priority: f32,
}

fn default_priority() -> f32 {
    0.5
}

impl StaticPage {
    pub fn new(path: &str, change_frequency: ChangeFrequency, priority: f32) -> Self {
        Self {
            path: path.to_string(),
            change_frequency,
            priority,
        }
    }
}

/// Sitemap `<changefreq>` values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    #[default]
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}
