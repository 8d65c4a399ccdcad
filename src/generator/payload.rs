//! Per-article head payloads

use serde::Serialize;
use serde_json::Value;

use crate::content::{category_title, Post, PostMeta};
use crate::seo::extract::{extract_faqs, guide_steps};
use crate::seo::{
    json_ld_script, ArticleInput, BreadcrumbItem, ContentType, PageInput, PageMetadata,
    SeoGenerator,
};

/// Everything the renderer needs for an article's `<head>` and sidebar
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPayload {
    pub metadata: PageMetadata,
    /// JSON-LD records, in the order they should be embedded
    pub structured_data: Vec<Value>,
    pub related: Vec<PostMeta>,
    /// Ready-to-embed `<head>` markup: meta tags then JSON-LD scripts
    pub head: String,
}

impl PostPayload {
    pub fn build(seo: &SeoGenerator, post: &Post, related: Vec<PostMeta>) -> Self {
        let meta = &post.meta;
        let path = meta.path();
        let page_url = seo.url_for(&path);
        let date = meta.date.format("%Y-%m-%d").to_string();

        let metadata = seo.page_metadata(&PageInput {
            title: meta.title.clone(),
            description: meta.description.clone(),
            canonical_path: Some(path.clone()),
            image: meta.image.clone(),
            content_type: ContentType::Article,
            published_time: Some(date.clone()),
            modified_time: None,
            author: Some(meta.author.clone()),
            tags: meta.tags.clone(),
        });

        let mut structured_data = vec![
            seo.article_schema(&ArticleInput {
                title: meta.title.clone(),
                description: meta.description.clone(),
                url: page_url.clone(),
                image: meta.image.clone(),
                date_published: date,
                date_modified: None,
                author: Some(meta.author.clone()),
            }),
            seo.breadcrumb_schema(&[
                BreadcrumbItem::new("Home", "/"),
                BreadcrumbItem::new(category_title(&meta.category), format!("/{}", meta.category)),
                BreadcrumbItem::new(meta.title.clone(), path),
            ]),
        ];

        let faqs = extract_faqs(&post.content);
        if !faqs.is_empty() {
            structured_data.push(seo.faq_schema(&faqs));
        }

        if let Some(steps) = guide_steps(&meta.title, &meta.category, &post.content) {
            structured_data.push(seo.howto_schema(
                &meta.title,
                &meta.description,
                &page_url,
                &steps,
            ));
        }

        let mut head = metadata.head_tags();
        for record in &structured_data {
            head.push('\n');
            head.push_str(&json_ld_script(record));
        }

        Self {
            metadata,
            structured_data,
            related,
            head,
        }
    }
}
