//! schema.org structured data (JSON-LD)

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::SeoGenerator;

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// Maximum number of steps emitted in a HowTo record
const MAX_HOWTO_STEPS: usize = 10;

/// Facts needed for an `Article` record
#[derive(Debug, Clone, Default)]
pub struct ArticleInput {
    pub title: String,
    pub description: String,
    /// Absolute URL of the article page
    pub url: String,
    pub image: Option<String>,
    pub date_published: String,
    pub date_modified: Option<String>,
    pub author: Option<String>,
}

/// One level of a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreadcrumbItem {
    pub name: String,
    /// Site-relative path
    pub path: String,
}

impl BreadcrumbItem {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A question and its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

impl SeoGenerator {
    fn organization_ref(&self, name: &str) -> Value {
        json!({
            "@type": "Organization",
            "name": name,
            "url": self.config.url,
        })
    }

    fn logo_url(&self) -> String {
        crate::helpers::resolve_url(&self.config, &self.config.seo.logo)
    }

    /// `Article` record; `dateModified` falls back to `datePublished`
    pub fn article_schema(&self, input: &ArticleInput) -> Value {
        let author = input.author.as_deref().unwrap_or(&self.config.name);
        let date_modified = input
            .date_modified
            .as_deref()
            .unwrap_or(&input.date_published);

        let mut publisher = self.organization_ref(&self.config.name);
        publisher["logo"] = json!({
            "@type": "ImageObject",
            "url": self.logo_url(),
        });

        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "Article",
            "headline": input.title,
            "description": input.description,
            "image": self.image_url(input.image.as_deref()),
            "datePublished": input.date_published,
            "dateModified": date_modified,
            "author": self.organization_ref(author),
            "publisher": publisher,
            "mainEntityOfPage": {
                "@type": "WebPage",
                "@id": input.url,
            },
        })
    }

    /// `BreadcrumbList` with 1-based positions and absolute item URLs
    pub fn breadcrumb_schema(&self, items: &[BreadcrumbItem]) -> Value {
        let elements: Vec<Value> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                json!({
                    "@type": "ListItem",
                    "position": index + 1,
                    "name": item.name,
                    "item": self.url_for(&item.path),
                })
            })
            .collect();

        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "BreadcrumbList",
            "itemListElement": elements,
        })
    }

    /// `FAQPage`; an empty slice gives an empty `mainEntity`
    pub fn faq_schema(&self, faqs: &[Faq]) -> Value {
        let questions: Vec<Value> = faqs
            .iter()
            .map(|faq| {
                json!({
                    "@type": "Question",
                    "name": faq.question,
                    "acceptedAnswer": {
                        "@type": "Answer",
                        "text": faq.answer,
                    },
                })
            })
            .collect();

        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "FAQPage",
            "mainEntity": questions,
        })
    }

    /// `HowTo` built from step titles, capped at ten steps
    pub fn howto_schema(
        &self,
        name: &str,
        description: &str,
        page_url: &str,
        steps: &[String],
    ) -> Value {
        let steps: Vec<Value> = steps
            .iter()
            .take(MAX_HOWTO_STEPS)
            .enumerate()
            .map(|(index, step)| {
                json!({
                    "@type": "HowToStep",
                    "position": index + 1,
                    "name": step,
                    "url": format!("{}#step-{}", page_url, index + 1),
                })
            })
            .collect();

        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "HowTo",
            "name": name,
            "description": description,
            "step": steps,
        })
    }

    /// The publishing organization, for the home page
    pub fn organization_schema(&self) -> Value {
        let config = &self.config;
        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "Organization",
            "name": config.name,
            "url": config.url,
            "logo": self.logo_url(),
            "description": config.description,
            "sameAs": config.seo.same_as,
            "contactPoint": {
                "@type": "ContactPoint",
                "contactType": "customer service",
                "email": config.seo.contact_email,
            },
        })
    }

    /// The site itself, with a search action pointing at the search page
    pub fn website_schema(&self) -> Value {
        let config = &self.config;
        json!({
            "@context": SCHEMA_CONTEXT,
            "@type": "WebSite",
            "name": config.name,
            "url": config.url,
            "description": config.description,
            "potentialAction": {
                "@type": "SearchAction",
                "target": {
                    "@type": "EntryPoint",
                    "urlTemplate": format!(
                        "{}?q={{search_term_string}}",
                        self.url_for(&config.seo.search_path)
                    ),
                },
                "query-input": "required name=search_term_string",
            },
        })
    }
}
