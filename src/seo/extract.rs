//! Best-effort structured data scraped from post bodies
//!
//! These scans are heuristics over headings. When nothing usable is found
//! they return empty results and the caller simply emits no record.

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

use super::Faq;
use crate::content::markdown::parser_options;

/// A guide needs at least this many headings to get a HowTo record
const MIN_HOWTO_STEPS: usize = 3;

fn is_faq_heading(text: &str) -> bool {
    let text = text.trim().to_lowercase();
    text.starts_with("faq") || text.contains("frequently asked")
}

fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Question/answer pairs from an `## FAQ` section.
///
/// Each `###` heading inside the section is a question; the text up to the
/// next heading of level 3 or above is its answer. Unanswered questions are
/// dropped.
pub fn extract_faqs(markdown: &str) -> Vec<Faq> {
    let mut faqs = Vec::new();
    let mut in_faq = false;
    let mut heading: Option<String> = None;
    let mut question: Option<String> = None;
    let mut answer = String::new();

    let mut finish = |question: &mut Option<String>, answer: &mut String| {
        if let Some(q) = question.take() {
            let q = normalize(&q);
            let a = normalize(answer);
            if !q.is_empty() && !a.is_empty() {
                faqs.push(Faq {
                    question: q,
                    answer: a,
                });
            }
        }
        answer.clear();
    };

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Start(Tag::Heading { level, .. })
                if matches!(level, HeadingLevel::H1 | HeadingLevel::H2 | HeadingLevel::H3) =>
            {
                heading = Some(String::new());
            }
            Event::End(TagEnd::Heading(level)) if heading.is_some() => {
                let text = heading.take().unwrap_or_default();
                finish(&mut question, &mut answer);
                match level {
                    HeadingLevel::H3 if in_faq => question = Some(text),
                    HeadingLevel::H3 => {}
                    _ => in_faq = is_faq_heading(&text),
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(h) = heading.as_mut() {
                    h.push_str(&t);
                } else if question.is_some() {
                    answer.push_str(&t);
                }
            }
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::Heading(_)) => {
                if question.is_some() {
                    answer.push(' ');
                }
            }
            _ => {}
        }
    }
    finish(&mut question, &mut answer);

    faqs
}

/// Texts of all `##` and `###` headings, in document order
pub fn extract_steps(markdown: &str) -> Vec<String> {
    let mut steps = Vec::new();
    let mut heading: Option<String> = None;

    for event in Parser::new_ext(markdown, parser_options()) {
        match event {
            Event::Start(Tag::Heading { level, .. })
                if matches!(level, HeadingLevel::H2 | HeadingLevel::H3) =>
            {
                heading = Some(String::new());
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(text) = heading.take() {
                    let text = normalize(&text);
                    if !text.is_empty() {
                        steps.push(text);
                    }
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(h) = heading.as_mut() {
                    h.push_str(&t);
                }
            }
            _ => {}
        }
    }

    steps
}

/// Whether a post reads as a step-by-step guide
pub fn is_guide(title: &str, category: &str) -> bool {
    let title = title.to_lowercase();
    title.contains("guide") || title.contains("how to") || category == "guides"
}

/// HowTo steps for a guide, or `None` when the post is not a guide or has
/// too few headings
pub fn guide_steps(title: &str, category: &str, markdown: &str) -> Option<Vec<String>> {
    if !is_guide(title, category) {
        return None;
    }
    let steps = extract_steps(markdown);
    (steps.len() >= MIN_HOWTO_STEPS).then_some(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"
## Why grab bars matter

Falls happen in bathrooms.

## FAQ

### How high should a grab bar be?

Between 33 and 36 inches
above the floor.

### Does Medicare pay?

Usually **not**.

### Unanswered?

## Final thoughts

Install them.
"#;

    #[test]
    fn test_extract_faqs() {
        let faqs = extract_faqs(BODY);
        assert_eq!(
            faqs,
            vec![
                Faq {
                    question: "How high should a grab bar be?".to_string(),
                    answer: "Between 33 and 36 inches above the floor.".to_string(),
                },
                Faq {
                    question: "Does Medicare pay?".to_string(),
                    answer: "Usually not.".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_no_faq_section() {
        assert!(extract_faqs("## Intro\n\n### Not a question\n\nText.\n").is_empty());
        assert!(extract_faqs("").is_empty());
    }

    #[test]
    fn test_frequently_asked_heading() {
        let body = "## Frequently Asked Questions\n\n### Cost?\n\nAbout $200.\n";
        let faqs = extract_faqs(body);
        assert_eq!(faqs.len(), 1);
        assert_eq!(faqs[0].answer, "About $200.");
    }

    #[test]
    fn test_extract_steps() {
        let steps = extract_steps(BODY);
        assert_eq!(steps[0], "Why grab bars matter");
        assert_eq!(steps[1], "FAQ");
        assert_eq!(steps.len(), 6);
    }

    #[test]
    fn test_guide_detection() {
        assert!(is_guide("The Complete Guide to Ramps", "structural-retrofit"));
        assert!(is_guide("How To Install Grab Bars", "bathroom-safety"));
        assert!(is_guide("Ramps", "guides"));
        assert!(!is_guide("Ramp Costs in 2025", "finance"));
    }

    #[test]
    fn test_guide_steps_needs_three_headings() {
        assert!(guide_steps("A guide", "x", "## One\n## Two\n").is_none());
        assert_eq!(
            guide_steps("A guide", "x", "## One\n## Two\n### Three\n").map(|s| s.len()),
            Some(3)
        );
        assert!(guide_steps("Not one", "x", "## One\n## Two\n## Three\n").is_none());
    }
}
