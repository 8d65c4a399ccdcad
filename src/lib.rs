//! retrofit-press: content core for the RetrofitAge blog
//!
//! Loads Markdown/MDX articles from a flat content directory, ranks related
//! posts, and produces the SEO metadata, JSON-LD records, search index and
//! sitemap consumed by the page renderer.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod seo;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the site configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding one content file per post
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Create a site from a directory, reading `_config.yml` when present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a site with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Content repository over this site's content directory
    pub fn repository(&self) -> content::ContentRepository {
        content::ContentRepository::new(self)
    }

    /// SEO generator configured for this site
    pub fn seo(&self) -> seo::SeoGenerator {
        seo::SeoGenerator::new(self.config.clone())
    }

    /// Write all static outputs
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
