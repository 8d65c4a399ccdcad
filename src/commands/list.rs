//! List site content

use anyhow::Result;

use crate::content::category_title;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let repo = site.repository();

    match content_type {
        "post" | "posts" => {
            let posts = repo.list_all()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]{}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.path(),
                    if post.featured { " *" } else { "" }
                );
            }
        }
        "category" | "categories" => {
            let categories = repo.list_categories()?;
            println!("Categories ({}):", categories.len());
            for category in categories {
                let count = repo.list_by_category(&category)?.len();
                println!("  {} - {} ({})", category, category_title(&category), count);
            }
        }
        "tag" | "tags" => {
            let tags = repo.list_tags()?;
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "route" | "routes" => {
            let routes = repo.list_routes()?;
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  /{}/{}", route.category, route.slug);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category, tag, route",
                content_type
            );
        }
    }

    Ok(())
}
