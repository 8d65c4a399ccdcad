//! Configuration module

mod site;

pub use site::ChangeFrequency;
pub use site::SeoConfig;
pub use site::SiteConfig;
pub use site::SitemapConfig;
pub use site::StaticPage;
