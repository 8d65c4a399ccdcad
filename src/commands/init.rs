//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

const WELCOME_POST: &str = r#"---
title: "Welcome to RetrofitAge"
description: "Practical home modifications that help older adults stay safe and independent."
date: 2025-01-01
category: general
tags: [getting-started]
featured: true
---

Most falls happen at home, and most of them are preventable.

## Start with the bathroom

Grab bars, non-slip mats and a shower seat cover the riskiest room first.

## Light the way

Motion-activated night lights between the bedroom and the bathroom.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config = SiteConfig::default();
    let content_dir = target_dir.join(&config.content_dir);

    fs::create_dir_all(&content_dir)
        .with_context(|| format!("Failed to create {:?}", content_dir))?;

    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        tracing::warn!("{:?} already exists, leaving it untouched", config_path);
    } else {
        let yaml = serde_yaml::to_string(&config)?;
        fs::write(&config_path, format!("# RetrofitAge site configuration\n{}", yaml))
            .with_context(|| format!("Failed to write {:?}", config_path))?;
    }

    let welcome = content_dir.join("welcome.mdx");
    if !welcome.exists() {
        fs::write(&welcome, WELCOME_POST)
            .with_context(|| format!("Failed to write {:?}", welcome))?;
    }

    tracing::info!("Initialized site in {:?}", target_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        assert!(tmp.path().join(CONFIG_FILE).exists());

        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.config.name, "RetrofitAge");

        let posts = site.repository().list_all().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "welcome");
        assert!(posts[0].featured);
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "name: Mine\n").unwrap();
        init_site(tmp.path()).unwrap();

        let site = Site::new(tmp.path()).unwrap();
        assert_eq!(site.config.name, "Mine");
    }
}
