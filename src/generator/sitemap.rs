//! Sitemap generation.
//!
//! Static pages come from the config, then one entry per category and one
//! per post.
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://retrofitage.com/bathroom-safety/grab-bars</loc>
//!     <lastmod>2025-01-03</lastmod>
//!     <changefreq>monthly</changefreq>
//!     <priority>0.9</priority>
//!   </url>
//! </urlset>
//! ```

use chrono::NaiveDate;

use crate::config::{ChangeFrequency, SiteConfig};
use crate::content::repository::is_valid_slug;
use crate::content::PostMeta;
use crate::helpers::{escape_xml, full_url_for};

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const CATEGORY_PRIORITY: f32 = 0.8;
const POST_PRIORITY: f32 = 0.9;

/// Single URL entry in the sitemap
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    /// Full URL location
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

/// Sitemap data structure
#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    pub urls: Vec<UrlEntry>,
}

impl Sitemap {
    /// Build the sitemap for a listing. `today` stamps pages without a date.
    pub fn build(
        config: &SiteConfig,
        posts: &[PostMeta],
        categories: &[String],
        today: NaiveDate,
    ) -> Self {
        let static_pages = config.sitemap.static_pages.iter().map(|page| UrlEntry {
            loc: full_url_for(config, &page.path),
            lastmod: today,
            changefreq: page.change_frequency,
            priority: page.priority,
        });

        // Categories that cannot be a path segment get no payloads, so no URLs either
        let category_pages = categories
            .iter()
            .filter(|category| is_valid_slug(category.as_str()))
            .map(|category| UrlEntry {
                loc: full_url_for(config, category),
                lastmod: today,
                changefreq: ChangeFrequency::Weekly,
                priority: CATEGORY_PRIORITY,
            });

        let post_pages = posts
            .iter()
            .filter(|post| is_valid_slug(&post.category))
            .map(|post| UrlEntry {
                loc: full_url_for(config, &post.path()),
                lastmod: post.date,
                changefreq: ChangeFrequency::Monthly,
                priority: POST_PRIORITY,
            });

        Self {
            urls: static_pages.chain(category_pages).chain(post_pages).collect(),
        }
    }

    /// Generate sitemap XML string.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
        xml.push('\n');

        for entry in &self.urls {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&entry.loc)));
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                entry.lastmod.format("%Y-%m-%d")
            ));
            xml.push_str(&format!(
                "    <changefreq>{}</changefreq>\n",
                entry.changefreq.as_str()
            ));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(slug: &str, category: &str, day: u32) -> PostMeta {
        PostMeta {
            slug: slug.to_string(),
            title: slug.to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            category: category.to_string(),
            image: None,
            author: "RetrofitAge Team".to_string(),
            tags: vec![],
            featured: false,
            reading_time: "1 min read".to_string(),
        }
    }

    #[test]
    fn test_sitemap_entries() {
        let config = SiteConfig::default();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let posts = vec![post("grab-bars", "bathroom-safety", 3)];
        let categories = vec!["bathroom-safety".to_string()];

        let sitemap = Sitemap::build(&config, &posts, &categories, today);
        assert_eq!(sitemap.urls.len(), 6 + 1 + 1);

        assert_eq!(sitemap.urls[0].loc, "https://retrofitage.com/");
        assert_eq!(sitemap.urls[0].priority, 1.0);

        let category = &sitemap.urls[6];
        assert_eq!(category.loc, "https://retrofitage.com/bathroom-safety");
        assert_eq!(category.changefreq, ChangeFrequency::Weekly);
        assert_eq!(category.lastmod, today);

        let post = &sitemap.urls[7];
        assert_eq!(post.loc, "https://retrofitage.com/bathroom-safety/grab-bars");
        assert_eq!(post.lastmod, NaiveDate::from_ymd_opt(2025, 1, 3).unwrap());
        assert_eq!(post.priority, 0.9);
    }

    #[test]
    fn test_sitemap_skips_unroutable_categories() {
        let config = SiteConfig::default();
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let posts = vec![
            post("grab-bars", "bathroom-safety", 3),
            post("ramps", "home safety", 2),
        ];
        let categories = vec!["bathroom-safety".to_string(), "home safety".to_string()];

        let sitemap = Sitemap::build(&config, &posts, &categories, today);
        assert_eq!(sitemap.urls.len(), 6 + 1 + 1);
        assert!(sitemap.urls.iter().all(|u| !u.loc.contains(' ')));
    }

    #[test]
    fn test_sitemap_xml() {
        let sitemap = Sitemap {
            urls: vec![UrlEntry {
                loc: "https://example.com/a&b".to_string(),
                lastmod: NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
                changefreq: ChangeFrequency::Monthly,
                priority: 0.9,
            }],
        };
        let xml = sitemap.to_xml();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<loc>https://example.com/a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2025-01-03</lastmod>"));
        assert!(xml.contains("<changefreq>monthly</changefreq>"));
        assert!(xml.contains("<priority>0.9</priority>"));
        assert!(xml.ends_with("</urlset>\n"));
    }
}
