//! Search posts from the command line

use anyhow::Result;

use crate::content::filter_entries;
use crate::Site;

/// Print every post matching `query`
pub fn run(site: &Site, query: &str) -> Result<()> {
    let index = site.repository().search_index()?;
    let matches = filter_entries(&index, query);

    println!("{} result(s) for {:?}:", matches.len(), query);
    for entry in matches {
        println!(
            "  {} - {} [/{}/{}]",
            entry.date.format("%Y-%m-%d"),
            entry.title,
            entry.category,
            entry.slug
        );
    }

    Ok(())
}
