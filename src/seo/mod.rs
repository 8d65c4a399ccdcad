//! SEO module - page metadata and schema.org structured data
//!
//! Everything here is a pure function of its input and the [`SiteConfig`]
//! the generator was built with; nothing touches the file system.

pub mod extract;
mod metadata;
mod schema;

pub use metadata::{ContentType, OgImage, OpenGraph, PageInput, PageMetadata, TwitterCard};
pub use schema::{ArticleInput, BreadcrumbItem, Faq};

use serde_json::Value;

use crate::config::SiteConfig;
use crate::helpers;

/// Wrap a JSON-LD record in a `<script>` tag that is safe to embed in HTML
pub fn json_ld_script(record: &Value) -> String {
    format!(
        r#"<script type="application/ld+json">{}</script>"#,
        helpers::escape_script_json(&record.to_string())
    )
}

/// Builds head metadata and JSON-LD records for a site
#[derive(Debug, Clone)]
pub struct SeoGenerator {
    config: SiteConfig,
}

impl SeoGenerator {
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Absolute URL for a site path
    pub fn url_for(&self, path: &str) -> String {
        helpers::full_url_for(&self.config, path)
    }

    /// The given image, or the site default, as an absolute URL
    fn image_url(&self, image: Option<&str>) -> String {
        let image = image
            .filter(|i| !i.trim().is_empty())
            .unwrap_or(&self.config.seo.og_image);
        helpers::resolve_url(&self.config, image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_ld_script_escapes_closing_tag() {
        let script = json_ld_script(&json!({"name": "</script><b>"}));
        assert!(script.starts_with(r#"<script type="application/ld+json">{"#));
        assert!(script.ends_with("}</script>"));
        assert_eq!(script.matches("</script>").count(), 1);
    }
}
