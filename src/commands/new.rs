//! Create a new post

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Front-matter written into a fresh post
#[derive(Debug, Serialize)]
struct Scaffold<'a> {
    title: &'a str,
    description: &'a str,
    date: String,
    category: &'a str,
    tags: &'a [String],
}

/// Create a new post and return its path
pub fn create_post(
    site: &Site,
    title: &str,
    category: Option<&str>,
    tags: &[String],
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&site.content_dir)
        .with_context(|| format!("Failed to create {:?}", site.content_dir))?;

    let file_path = site.content_dir.join(format!("{}.mdx", slug));
    let shadowed = site.content_dir.join(format!("{}.md", slug));
    if file_path.exists() || shadowed.exists() {
        anyhow::bail!("A post with slug {:?} already exists", slug);
    }

    let scaffold = Scaffold {
        title,
        description: "",
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        category: category.unwrap_or(&site.config.default_category),
        tags,
    };
    let front_matter = serde_yaml::to_string(&scaffold)?;
    let content = format!("---\n{}---\n\n", front_matter);

    fs::write(&file_path, content)
        .with_context(|| format!("Failed to write {:?}", file_path))?;

    Ok(file_path)
}

/// Run the new command
pub fn run(site: &Site, title: &str, category: Option<&str>, tags: &[String]) -> Result<()> {
    let path = create_post(site, title, category, tags)?;
    println!("Created: {:?}", path);
    Ok(())
}
