//! Page metadata for `<head>` tags and social previews

use serde::{Deserialize, Serialize};

use super::SeoGenerator;
use crate::helpers::{self, escape_html};

/// Open Graph object type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Website,
    Article,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Website => "website",
            ContentType::Article => "article",
        }
    }
}

/// Facts about a page, as supplied by the renderer
#[derive(Debug, Clone, Default)]
pub struct PageInput {
    pub title: String,
    pub description: String,
    /// Site-relative path, e.g. `/bathroom-safety/grab-bars`
    pub canonical_path: Option<String>,
    pub image: Option<String>,
    pub content_type: ContentType,
    pub published_time: Option<String>,
    pub modified_time: Option<String>,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

/// Resolved metadata for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub authors: Vec<String>,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: String,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub images: Vec<OgImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

impl SeoGenerator {
    /// Resolve canonical URL, preview image and social cards for a page
    pub fn page_metadata(&self, input: &PageInput) -> PageMetadata {
        let config = &self.config;
        let url = helpers::canonical_url(config, input.canonical_path.as_deref());
        let image = self.image_url(input.image.as_deref());
        let author = input
            .author
            .clone()
            .unwrap_or_else(|| config.author.clone());

        let mut open_graph = OpenGraph {
            title: input.title.clone(),
            description: input.description.clone(),
            url: url.clone(),
            site_name: config.name.clone(),
            kind: input.content_type,
            images: vec![OgImage {
                url: image.clone(),
                width: config.seo.og_image_width,
                height: config.seo.og_image_height,
                alt: input.title.clone(),
            }],
            published_time: None,
            modified_time: None,
            authors: Vec::new(),
            tags: Vec::new(),
        };

        // Article-only Open Graph properties
        if input.content_type == ContentType::Article {
            open_graph.published_time = input.published_time.clone();
            open_graph.modified_time = input.modified_time.clone();
            open_graph.authors = vec![author.clone()];
            open_graph.tags = input.tags.clone();
        }

        PageMetadata {
            title: input.title.clone(),
            description: input.description.clone(),
            authors: vec![author],
            keywords: input.tags.clone(),
            canonical: url,
            open_graph,
            twitter: TwitterCard {
                card: config.seo.twitter_card.clone(),
                title: input.title.clone(),
                description: input.description.clone(),
                images: vec![image],
            },
        }
    }
}

impl PageMetadata {
    /// Render the `<head>` tags for this page, one per line
    pub fn head_tags(&self) -> String {
        let mut tags = vec![
            format!("<title>{}</title>", escape_html(&self.title)),
            meta_name("description", &self.description),
        ];
        tags.extend(self.authors.iter().map(|a| meta_name("author", a)));
        if !self.keywords.is_empty() {
            tags.push(meta_name("keywords", &self.keywords.join(", ")));
        }
        tags.push(format!(
            r#"<link rel="canonical" href="{}">"#,
            escape_html(&self.canonical)
        ));

        let og = &self.open_graph;
        tags.push(meta_property("og:title", &og.title));
        tags.push(meta_property("og:description", &og.description));
        tags.push(meta_property("og:url", &og.url));
        tags.push(meta_property("og:site_name", &og.site_name));
        tags.push(meta_property("og:type", og.kind.as_str()));
        for image in &og.images {
            tags.push(meta_property("og:image", &image.url));
            tags.push(meta_property("og:image:width", &image.width.to_string()));
            tags.push(meta_property("og:image:height", &image.height.to_string()));
            tags.push(meta_property("og:image:alt", &image.alt));
        }
        if let Some(published) = &og.published_time {
            tags.push(meta_property("article:published_time", published));
        }
        if let Some(modified) = &og.modified_time {
            tags.push(meta_property("article:modified_time", modified));
        }
        tags.extend(og.authors.iter().map(|a| meta_property("article:author", a)));
        tags.extend(og.tags.iter().map(|t| meta_property("article:tag", t)));

        let tw = &self.twitter;
        tags.push(meta_name("twitter:card", &tw.card));
        tags.push(meta_name("twitter:title", &tw.title));
        tags.push(meta_name("twitter:description", &tw.description));
        tags.extend(tw.images.iter().map(|i| meta_name("twitter:image", i)));

        tags.join("\n")
    }
}

fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        name,
        escape_html(content)
    )
}

fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}">"#,
        property,
        escape_html(content)
    )
}
