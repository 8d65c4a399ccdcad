//! Related-post ranking

use std::collections::HashSet;

use super::PostMeta;

const CATEGORY_WEIGHT: f64 = 2.0;
const TAG_WEIGHT: f64 = 1.0;
const AUTHOR_WEIGHT: f64 = 0.5;

/// A candidate and its relevance to the source post
#[derive(Debug, Clone, Copy)]
pub struct RelatedScore<'a> {
    pub post: &'a PostMeta,
    pub score: f64,
}

/// Relevance of `candidate` to a post in `category` carrying `tags`.
///
/// Each distinct shared tag counts once.
pub fn score_candidate(
    candidate: &PostMeta,
    category: &str,
    tags: &HashSet<&str>,
    source_author: Option<&str>,
) -> f64 {
    let mut score = 0.0;

    if candidate.category == category {
        score += CATEGORY_WEIGHT;
    }

    let shared = candidate
        .tags
        .iter()
        .map(String::as_str)
        .collect::<HashSet<_>>()
        .intersection(tags)
        .count();
    score += shared as f64 * TAG_WEIGHT;

    if source_author == Some(candidate.author.as_str()) {
        score += AUTHOR_WEIGHT;
    }

    score
}

/// Pick up to `limit` posts related to `slug`.
///
/// `posts` must already be in listing order (newest first); ties in score and
/// the same-category backfill both keep that order. The source post is never
/// returned.
pub fn rank_related(
    posts: &[PostMeta],
    slug: &str,
    category: &str,
    tags: &[String],
    limit: usize,
) -> Vec<PostMeta> {
    if limit == 0 {
        return Vec::new();
    }

    let source_author = posts
        .iter()
        .find(|p| p.slug == slug)
        .map(|p| p.author.as_str());
    let tags: HashSet<&str> = tags.iter().map(String::as_str).collect();

    let mut scored: Vec<RelatedScore> = posts
        .iter()
        .filter(|p| p.slug != slug)
        .map(|post| RelatedScore {
            post,
            score: score_candidate(post, category, &tags, source_author),
        })
        .filter(|s| s.score > 0.0)
        .collect();

    // sort_by is stable, so equal scores stay newest first
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut related: Vec<&PostMeta> = scored.iter().take(limit).map(|s| s.post).collect();

    if related.len() < limit {
        let backfill: Vec<&PostMeta> = posts
            .iter()
            .filter(|p| {
                p.slug != slug
                    && p.category == category
                    && !related.iter().any(|r| r.slug == p.slug)
            })
            .take(limit - related.len())
            .collect();
        related.extend(backfill);
    }

    related.into_iter().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(slug: &str, day: u32, category: &str, tags: &[&str], author: &str) -> PostMeta {
        PostMeta {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            category: category.to_string(),
            image: None,
            author: author.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            featured: false,
            reading_time: "1 min read".to_string(),
        }
    }

    fn slugs(posts: &[PostMeta]) -> Vec<&str> {
        posts.iter().map(|p| p.slug.as_str()).collect()
    }

    const TEAM: &str = "RetrofitAge Team";

    #[test]
    fn test_category_outranks_single_tag() {
        // listing order: newest first
        let posts = vec![
            post("p1", 3, "bath", &["grab-bar"], TEAM),
            post("p3", 2, "smart", &["grab-bar"], TEAM),
            post("p2", 1, "bath", &[], TEAM),
        ];
        let related = rank_related(&posts, "p1", "bath", &["grab-bar".to_string()], 2);
        assert_eq!(slugs(&related), vec!["p2", "p3"]);
    }

    #[test]
    fn test_shared_tags_beat_category_only() {
        let posts = vec![
            post("src", 9, "x", &["a", "b"], "Ann"),
            post("cat-only", 8, "x", &[], "Bob"),
            post("cat-and-tags", 7, "x", &["b", "a"], "Bob"),
        ];
        let tags = vec!["a".to_string(), "b".to_string()];
        let related = rank_related(&posts, "src", "x", &tags, 3);
        assert_eq!(slugs(&related), vec!["cat-and-tags", "cat-only"]);
    }

    #[test]
    fn test_zero_score_excluded() {
        let posts = vec![
            post("src", 9, "x", &["a"], "Ann"),
            post("unrelated", 8, "y", &["z"], "Bob"),
        ];
        let related = rank_related(&posts, "src", "x", &["a".to_string()], 3);
        assert!(related.is_empty());
    }

    #[test]
    fn test_author_bonus_only() {
        let posts = vec![
            post("src", 9, "x", &[], "Ann"),
            post("same-author", 8, "y", &[], "Ann"),
            post("other", 7, "y", &[], "Bob"),
        ];
        let related = rank_related(&posts, "src", "x", &[], 3);
        assert_eq!(slugs(&related), vec!["same-author"]);
    }

    #[test]
    fn test_duplicate_tags_count_once() {
        let candidate = post("c", 1, "y", &["a", "a"], "Bob");
        let tags: HashSet<&str> = ["a"].into_iter().collect();
        assert_eq!(score_candidate(&candidate, "x", &tags, None), 1.0);
    }

    #[test]
    fn test_ties_keep_listing_order() {
        let posts = vec![
            post("newest", 5, "x", &[], "Bob"),
            post("src", 4, "x", &[], "Ann"),
            post("middle", 3, "x", &[], "Bob"),
            post("oldest", 2, "x", &[], "Bob"),
        ];
        let related = rank_related(&posts, "src", "x", &[], 3);
        assert_eq!(slugs(&related), vec!["newest", "middle", "oldest"]);
    }

    #[test]
    fn test_never_returns_source_and_respects_limit() {
        let posts: Vec<PostMeta> = (1..=9)
            .map(|d| post(&format!("p{d}"), d, "x", &["t"], TEAM))
            .collect();
        let related = rank_related(&posts, "p5", "x", &["t".to_string()], 3);
        assert_eq!(related.len(), 3);
        assert!(related.iter().all(|p| p.slug != "p5"));

        assert!(rank_related(&posts, "p5", "x", &[], 0).is_empty());
    }

    #[test]
    fn test_missing_source_has_no_author_bonus() {
        let posts = vec![post("a", 2, "y", &[], TEAM), post("b", 1, "x", &[], TEAM)];
        let related = rank_related(&posts, "gone", "x", &[], 3);
        assert_eq!(slugs(&related), vec!["b"]);
    }
}
